//! Interactive trendline drawing engine for a host charting surface.
//!
//! This crate implements the gesture state machine behind click-to-draw
//! trendlines: live preview while drawing, hover detection against the
//! finished line, drag-to-edit (single endpoint or whole line), and
//! coordinate validation before anything is pushed to the host chart.
//!
//! The host chart itself (pan/zoom, coordinate mapping, series rendering)
//! is consumed through the narrow [`ChartSurface`] capability trait, so the
//! controller is host-agnostic and unit-testable with a fake surface.

pub mod controller;
pub mod hover;
pub mod style;
pub mod surface;
pub mod types;

pub use controller::{ControllerOptions, Phase, TrendlineController};
pub use hover::{hit_test, Hit, HoverConfig};
pub use style::LineStyle;
pub use surface::{ChartSurface, LineId, SurfaceError, SurfaceEvent};
pub use types::{ChartPoint, Trendline};
