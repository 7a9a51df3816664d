//! Monitor map rendering
//!
//! Rasterizes the monitor tiles with tiny-skia. Layout calculation is kept
//! separate from drawing so tile geometry can be tested without a window.
//! Captions are not rasterized here; the window draws them with GDI on top
//! of the blitted map.

use tiny_skia::{
    Color, FillRule, Paint, PathBuilder, Pixmap, Rect as SkiaRect, Stroke, Transform,
};

use crate::domain::selection::MonitorSelection;

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Failed to create pixmap for rendering")]
    PixmapCreationFailed,

    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidCanvasDimensions { width: i32, height: i32 },
}

pub const BACKGROUND_COLOR: (u8, u8, u8) = (240, 240, 240);
pub const TILE_COLOR: (u8, u8, u8) = (173, 216, 230);
pub const SELECTED_COLOR: (u8, u8, u8) = (0, 128, 0);
pub const UNSELECTED_COLOR: (u8, u8, u8) = (128, 128, 128);

const BORDER_WIDTH: f32 = 3.0;
const INDICATOR_DIAMETER: f32 = 15.0;
/// Indicator's left edge, measured from the tile's right edge
const INDICATOR_RIGHT_OFFSET: f32 = 20.0;
const INDICATOR_TOP_OFFSET: f32 = 5.0;

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::from_rgba8(r, g, b, 255)
}

/// One monitor tile, in canvas coordinates
#[derive(Debug, Clone)]
pub struct MonitorTile {
    pub index: usize,
    pub rect: SkiaRect,
    pub selected: bool,
    /// Two-line caption: `Monitor <i>` and the resolution
    pub caption: String,
}

impl MonitorTile {
    /// Center and radius of the selected indicator dot
    pub fn indicator(&self) -> (f32, f32, f32) {
        let radius = INDICATOR_DIAMETER / 2.0;
        (
            self.rect.right() - INDICATOR_RIGHT_OFFSET + radius,
            self.rect.top() + INDICATOR_TOP_OFFSET + radius,
            radius,
        )
    }
}

/// Pre-calculated geometry of the whole map
#[derive(Debug, Clone)]
pub struct MonitorMapLayout {
    pub tiles: Vec<MonitorTile>,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl MonitorMapLayout {
    /// Builds tiles for every monitor with a drawable display rectangle
    pub fn from_selection(
        selection: &MonitorSelection,
        canvas_width: i32,
        canvas_height: i32,
    ) -> Result<Self, RendererError> {
        if canvas_width <= 0 || canvas_height <= 0 {
            return Err(RendererError::InvalidCanvasDimensions {
                width: canvas_width,
                height: canvas_height,
            });
        }

        let tiles = selection
            .records()
            .iter()
            .filter_map(|record| {
                let r = record.display_rect;
                // tiny-skia accepts empty rects, so size has to be checked here
                if r.w <= 0 || r.h <= 0 {
                    return None;
                }
                let rect = SkiaRect::from_xywh(r.x as f32, r.y as f32, r.w as f32, r.h as f32)?;
                Some(MonitorTile {
                    index: record.monitor.index,
                    rect,
                    selected: record.selected,
                    caption: record.monitor.caption(),
                })
            })
            .collect();

        Ok(Self {
            tiles,
            canvas_width: canvas_width as u32,
            canvas_height: canvas_height as u32,
        })
    }
}

/// Draws a `MonitorMapLayout` into a pixmap
#[derive(Debug, Default)]
pub struct MonitorMapRenderer;

impl MonitorMapRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the layout to an opaque pixmap
    pub fn render_layout(&self, layout: &MonitorMapLayout) -> Result<Pixmap, RendererError> {
        let mut pixmap = Pixmap::new(layout.canvas_width, layout.canvas_height)
            .ok_or(RendererError::PixmapCreationFailed)?;

        pixmap.fill(rgb(BACKGROUND_COLOR));

        for tile in &layout.tiles {
            self.render_tile(&mut pixmap, tile);
        }

        Ok(pixmap)
    }

    fn render_tile(&self, pixmap: &mut Pixmap, tile: &MonitorTile) {
        let mut paint = Paint::default();
        paint.set_color(rgb(TILE_COLOR));
        pixmap.fill_rect(tile.rect, &paint, Transform::identity(), None);

        // Stroke centered half a border inside so the whole border stays on the tile
        let inset = BORDER_WIDTH / 2.0;
        if let Some(border) = SkiaRect::from_ltrb(
            tile.rect.left() + inset,
            tile.rect.top() + inset,
            tile.rect.right() - inset,
            tile.rect.bottom() - inset,
        ) {
            let path = PathBuilder::from_rect(border);
            paint.set_color(rgb(if tile.selected {
                SELECTED_COLOR
            } else {
                UNSELECTED_COLOR
            }));
            let stroke = Stroke {
                width: BORDER_WIDTH,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }

        if tile.selected {
            let (cx, cy, radius) = tile.indicator();
            if let Some(path) = PathBuilder::from_circle(cx, cy, radius) {
                paint.set_color(rgb(SELECTED_COLOR));
                pixmap.fill_path(
                    &path,
                    &paint,
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
        }
    }
}

/// Converts the pixmap into the BGRA byte order of a 32-bit Win32 DIB
///
/// The map is rendered opaque, so premultiplied and straight alpha agree.
pub fn pixmap_to_bgra(pixmap: &Pixmap) -> Vec<u8> {
    let mut bytes = pixmap.data().to_vec();
    for pixel in bytes.chunks_exact_mut(4) {
        pixel.swap(0, 2);
    }
    bytes
}
