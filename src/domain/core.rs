//! Core geometry and monitor types
//!
//! Pure types with no knowledge of Win32. Monitor bounds are expressed in
//! physical pixels of the virtual desktop, where secondary monitors may sit
//! at negative coordinates.

/// Rectangle in integer pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Creates a new rectangle
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Returns the right edge coordinate
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Returns the bottom edge coordinate
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Returns true if this rectangle contains the given point
    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// A `w` by `h` rectangle centered on this one
    ///
    /// The result may extend past this rectangle when it is larger.
    pub fn centered(&self, w: i32, h: i32) -> Rect {
        Rect::new(self.x + (self.w - w) / 2, self.y + (self.h - h) / 2, w, h)
    }

    /// Returns the bounding box that contains both rectangles
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Rect::new(left, top, right - left, bottom - top)
    }

    /// Returns the bounding box of every rectangle, or None for an empty input
    pub fn union_all<'a, I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        rects
            .into_iter()
            .fold(None, |acc: Option<Rect>, rect| match acc {
                Some(bounds) => Some(bounds.union(rect)),
                None => Some(*rect),
            })
    }
}

/// A physical display surface as reported by monitor enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monitor {
    /// Zero-based enumeration index, stable for the lifetime of the process
    pub index: usize,
    /// Full monitor rectangle in physical pixels
    pub bounds: Rect,
    /// Whether this is the primary monitor
    pub is_primary: bool,
}

impl Monitor {
    pub fn new(index: usize, bounds: Rect) -> Self {
        Self {
            index,
            bounds,
            is_primary: false,
        }
    }

    /// Two-line caption shown on the monitor tile
    pub fn caption(&self) -> String {
        format!("Monitor {}\n{}x{}", self.index, self.bounds.w, self.bounds.h)
    }
}
