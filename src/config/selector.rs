use crate::domain::layout::LayoutParams;
use thiserror::Error;

/// Settings of the selector window and the files it produces
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorConfig {
    /// Outer window width
    pub window_width: i32,
    /// Outer window height
    pub window_height: i32,
    /// How the monitor map is scaled into the window
    pub layout: LayoutParams,
    /// Remote-desktop client executable
    pub client_program: String,
    /// Extension of connection files, without the dot
    pub file_extension: String,
    /// Prefix of generated file names
    pub file_prefix: String,
}

impl SelectorConfig {
    pub const DEFAULT_WINDOW_WIDTH: i32 = 800;
    pub const DEFAULT_WINDOW_HEIGHT: i32 = 600;
    pub const MIN_WINDOW_SIZE: i32 = 320;
    pub const MAX_WINDOW_SIZE: i32 = 4096;
    pub const MAX_PADDING: i32 = 200;
    pub const MIN_SCALE: f32 = 0.001;
    pub const MAX_SCALE: f32 = 1.0;
    pub const DEFAULT_CLIENT_PROGRAM: &'static str = "mstsc.exe";
    pub const DEFAULT_FILE_EXTENSION: &'static str = "rdp";
    pub const DEFAULT_FILE_PREFIX: &'static str = "MonitorSelect";

    /// Checks every value without modifying it
    pub fn validate(&self) -> Result<(), SelectorConfigError> {
        for (name, value) in [
            ("window_width", self.window_width),
            ("window_height", self.window_height),
            ("layout.max_width", self.layout.max_width),
            ("layout.max_height", self.layout.max_height),
        ] {
            if value <= 0 {
                return Err(SelectorConfigError::NonPositiveDimension { name, value });
            }
        }

        if self.layout.padding < 0
            || self.layout.padding * 2 >= self.layout.max_width.min(self.layout.max_height)
        {
            return Err(SelectorConfigError::PaddingTooLarge {
                padding: self.layout.padding,
            });
        }

        if !self.layout.base_scale.is_finite() || self.layout.base_scale <= 0.0 {
            return Err(SelectorConfigError::InvalidScale(self.layout.base_scale));
        }

        if self.client_program.trim().is_empty() {
            return Err(SelectorConfigError::EmptyValue("client_program"));
        }

        if self.file_extension.trim().is_empty() {
            return Err(SelectorConfigError::EmptyValue("file_extension"));
        }

        if self.file_prefix.trim().is_empty() {
            return Err(SelectorConfigError::EmptyValue("file_prefix"));
        }

        Ok(())
    }

    /// Returns a copy with every numeric value clamped into its usable range
    ///
    /// Empty strings fall back to their defaults.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let window_width = self.window_width.clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        let window_height = self.window_height.clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        let max_width = self.layout.max_width.clamp(1, window_width);
        let max_height = self.layout.max_height.clamp(1, window_height);
        let padding_limit = ((max_width.min(max_height) - 1) / 2).clamp(0, Self::MAX_PADDING);
        let base_scale = if self.layout.base_scale.is_finite() {
            self.layout.base_scale.clamp(Self::MIN_SCALE, Self::MAX_SCALE)
        } else {
            LayoutParams::DEFAULT_BASE_SCALE
        };

        Self {
            window_width,
            window_height,
            layout: LayoutParams {
                max_width,
                max_height,
                padding: self.layout.padding.clamp(0, padding_limit),
                base_scale,
            },
            client_program: non_empty_or(&self.client_program, defaults.client_program),
            file_extension: non_empty_or(
                self.file_extension.trim_start_matches('.'),
                defaults.file_extension,
            ),
            file_prefix: non_empty_or(&self.file_prefix, defaults.file_prefix),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            window_width: Self::DEFAULT_WINDOW_WIDTH,
            window_height: Self::DEFAULT_WINDOW_HEIGHT,
            layout: LayoutParams::default(),
            client_program: Self::DEFAULT_CLIENT_PROGRAM.to_string(),
            file_extension: Self::DEFAULT_FILE_EXTENSION.to_string(),
            file_prefix: Self::DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}

fn non_empty_or(value: &str, fallback: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed.to_string()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SelectorConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: i32 },
    #[error("Padding {padding} leaves no room for the monitor map")]
    PaddingTooLarge { padding: i32 },
    #[error("Scale factor must be a positive finite number, got {0}")]
    InvalidScale(f32),
    #[error("{0} must not be empty")]
    EmptyValue(&'static str),
}
