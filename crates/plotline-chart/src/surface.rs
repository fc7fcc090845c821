//! Capability interface to the host charting surface.
//!
//! The controller never talks to a concrete charting library. Everything it
//! needs — coordinate conversion, line primitive CRUD, interactivity
//! toggles — goes through [`ChartSurface`], so any host (or a test fake)
//! can sit on the other side.

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use crate::style::LineStyle;
use crate::types::ChartPoint;

/// Global counter for generating unique line IDs.
static NEXT_LINE_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a line primitive on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId(u64);

impl LineId {
    /// Generate a new unique line ID.
    pub fn new() -> Self {
        Self(NEXT_LINE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for LineId {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors surfaced by a host chart implementation.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// The referenced line primitive does not exist.
    #[error("unknown line primitive")]
    UnknownLine,
    /// The host rejected the primitive data or style.
    #[error("line primitive rejected update: {0}")]
    Rejected(String),
}

/// A pointer event as delivered by the host chart.
///
/// The host reports either a scale-native `time`, or — when the cursor is
/// beyond the plotted time range — only a `logical` bar index. The vertical
/// pixel position is converted to a price via
/// [`ChartSurface::coordinate_to_price`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceEvent {
    pub time: Option<f64>,
    pub logical: Option<f64>,
    pub pixel_y: Option<f64>,
}

impl SurfaceEvent {
    /// Event carrying a direct timestamp.
    #[must_use]
    pub const fn at_time(time: f64, pixel_y: f64) -> Self {
        Self {
            time: Some(time),
            logical: None,
            pixel_y: Some(pixel_y),
        }
    }

    /// Event carrying only a logical bar index.
    #[must_use]
    pub const fn at_logical(logical: f64, pixel_y: f64) -> Self {
        Self {
            time: None,
            logical: Some(logical),
            pixel_y: Some(pixel_y),
        }
    }
}

/// Narrow capability interface consumed from the host charting library.
pub trait ChartSurface {
    /// Create a new line primitive with the given style.
    fn add_line(&mut self, style: &LineStyle) -> Result<LineId, SurfaceError>;

    /// Replace the data points of a line primitive.
    ///
    /// Hosts may reject data they consider invalid; the controller treats
    /// such rejections as recoverable (see the drag revert logic).
    fn set_line_data(&mut self, id: LineId, points: &[ChartPoint]) -> Result<(), SurfaceError>;

    /// Read back the current data of a line primitive.
    fn line_data(&self, id: LineId) -> Option<Vec<ChartPoint>>;

    /// Restyle a line primitive.
    fn apply_line_style(&mut self, id: LineId, style: &LineStyle) -> Result<(), SurfaceError>;

    /// Remove a line primitive.
    fn remove_line(&mut self, id: LineId) -> Result<(), SurfaceError>;

    /// Convert a vertical pixel position to a price.
    fn coordinate_to_price(&self, pixel_y: f64) -> Option<f64>;

    /// Enable or disable the host's own pan/zoom handling.
    fn set_pan_zoom_enabled(&mut self, enabled: bool);

    /// Switch between pointer and default cursor.
    fn set_pointer_cursor(&mut self, pointer: bool);

    /// The currently visible price range, if known.
    fn visible_price_range(&self) -> Option<(f64, f64)>;

    /// Ask the host to refit its visible range to the content.
    fn fit_content(&mut self);
}
