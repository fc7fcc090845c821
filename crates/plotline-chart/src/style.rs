//! Line styling for trendline primitives.

/// Default color for finished trendlines (cyan/teal).
pub const DEFAULT_LINE_COLOR: [f32; 4] = [0.0, 0.8, 0.8, 1.0];
/// Preview color (more transparent).
pub const PREVIEW_LINE_COLOR: [f32; 4] = [0.0, 0.8, 0.8, 0.5];
/// Highlight color used while a line is hovered.
pub const HIGHLIGHT_LINE_COLOR: [f32; 4] = [0.2, 1.0, 1.0, 1.0];

/// Visual style for a line primitive on the host surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: [f32; 4],
    pub width: f32,
    pub dashed: bool,
}

impl LineStyle {
    /// Style for a finished trendline.
    #[must_use]
    pub const fn solid() -> Self {
        Self {
            color: DEFAULT_LINE_COLOR,
            width: 1.5,
            dashed: false,
        }
    }

    /// Dashed style for the live preview while drawing.
    #[must_use]
    pub const fn preview() -> Self {
        Self {
            color: PREVIEW_LINE_COLOR,
            width: 1.0,
            dashed: true,
        }
    }

    /// Thicker highlight style applied while the line is hovered.
    #[must_use]
    pub const fn highlighted() -> Self {
        Self {
            color: HIGHLIGHT_LINE_COLOR,
            width: 2.5,
            dashed: false,
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::solid()
    }
}
