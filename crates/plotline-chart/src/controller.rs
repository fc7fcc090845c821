//! The trendline drawing/selection/drag gesture state machine.
//!
//! [`TrendlineController`] translates raw pointer and crosshair events plus
//! the host chart's coordinate mapping into trendline lifecycle operations:
//! create, preview, finalize, hover-highlight, drag-edit, delete. Computed
//! geometry is validated before it is ever pushed to the host, and a push
//! the host rejects reverts the primitive to its pre-drag snapshot.
//!
//! All work happens synchronously inside the event handlers; ordering comes
//! from the host's own event delivery. The only guard is `updating`, held
//! across a single primitive data push, because some hosts synchronously
//! re-fire crosshair notifications from inside their own set-data call.

use plotline_core::{BarSeries, Candle, ValidityPolicy};

use crate::hover::{hit_test, Hit, HoverConfig};
use crate::style::LineStyle;
use crate::surface::{ChartSurface, LineId, SurfaceError, SurfaceEvent};
use crate::types::{ChartPoint, Trendline};

/// Floor applied to dragged prices when positivity is required.
const MIN_POSITIVE_PRICE: f64 = 1e-9;

/// Tuning knobs for the controller.
#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    /// Validity predicate for resolved times and prices.
    pub validity: ValidityPolicy,
    /// Hover detection parameters.
    pub hover: HoverConfig,
    /// Extra headroom around the visible price range during drags, as a
    /// fraction of the visible span.
    pub drag_buffer_ratio: f64,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            validity: ValidityPolicy::default(),
            hover: HoverConfig::default(),
            drag_buffer_ratio: 0.5,
        }
    }
}

/// Gesture phase of the controller.
///
/// Exactly one phase is active at a time; transitions only happen inside
/// the event handlers, so illegal combinations (for example dragging with
/// no snapshot) are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// No gesture in progress.
    Idle,
    /// Draw mode armed; `start` holds the first committed point once the
    /// first click lands.
    Drawing { start: Option<ChartPoint> },
    /// Cursor is on the finished line. `endpoint` is the grabbed endpoint
    /// index, or `None` for a whole-line hover.
    Hovering { endpoint: Option<usize> },
    /// Drag in progress, seeded from the last crosshair position and a
    /// snapshot of the line at mouse-down.
    Dragging {
        anchor: ChartPoint,
        snapshot: Trendline,
        endpoint: Option<usize>,
    },
}

struct ActiveLine {
    id: LineId,
    line: Trendline,
}

/// Interactive trendline controller over a [`ChartSurface`].
///
/// Owns at most one finished trendline plus a temporary dashed preview
/// while a draw gesture is pending its second click.
pub struct TrendlineController<S: ChartSurface> {
    surface: S,
    series: BarSeries,
    options: ControllerOptions,
    phase: Phase,
    active: Option<ActiveLine>,
    temp: Option<LineId>,
    last_cursor: Option<ChartPoint>,
    updating: bool,
    on_complete: Option<Box<dyn FnMut()>>,
}

impl<S: ChartSurface> TrendlineController<S> {
    /// Create a controller over the given surface.
    pub fn new(surface: S, options: ControllerOptions) -> Self {
        Self {
            surface,
            series: BarSeries::default(),
            options,
            phase: Phase::Idle,
            active: None,
            temp: None,
            last_cursor: None,
            updating: false,
            on_complete: None,
        }
    }

    /// Register a callback invoked when a trendline finishes drawing.
    ///
    /// Callers typically use this to flip their "drawing mode" UI toggle
    /// back off.
    pub fn set_on_complete<F: FnMut() + 'static>(&mut self, callback: F) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Cache the bar sequence and derive the nominal bar span.
    pub fn set_data(&mut self, bars: Vec<Candle>) {
        self.series = BarSeries::new(bars);
    }

    /// Toggle draw mode.
    ///
    /// Enabling clears any stale pending start point. Disabling mid-gesture
    /// discards the temp preview line; no partial line is committed.
    pub fn set_draw_mode(&mut self, enabled: bool) {
        if enabled {
            if matches!(self.phase, Phase::Hovering { .. } | Phase::Dragging { .. }) {
                self.exit_hover();
            }
            self.remove_temp();
            self.phase = Phase::Drawing { start: None };
        } else {
            self.remove_temp();
            if matches!(self.phase, Phase::Drawing { .. }) {
                self.phase = Phase::Idle;
            }
        }
    }

    /// Whether draw mode is currently armed.
    pub fn is_draw_mode(&self) -> bool {
        matches!(self.phase, Phase::Drawing { .. })
    }

    /// Current gesture phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The finished trendline, if one exists.
    pub fn active_line(&self) -> Option<&Trendline> {
        self.active.as_ref().map(|a| &a.line)
    }

    /// Access the underlying surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Handle a chart click.
    ///
    /// Effective only in draw mode. The first click commits the pending
    /// start point and creates the dashed preview; the second finalizes the
    /// trendline (normalized to ascending time), exits draw mode, and fires
    /// the completion callback. A second click at the start's exact time is
    /// ignored, since a zero-width line cannot exist.
    pub fn on_click(&mut self, event: &SurfaceEvent) {
        if self.updating {
            return;
        }
        let Phase::Drawing { start } = self.phase else {
            return;
        };
        let Some(point) = self.resolve_point(event) else {
            return;
        };

        match start {
            None => {
                self.phase = Phase::Drawing { start: Some(point) };
                match self.surface.add_line(&LineStyle::preview()) {
                    Ok(id) => {
                        self.temp = Some(id);
                        let _ = self.push_points(id, &[point]);
                    }
                    Err(e) => log::warn!("failed to create preview line: {e}"),
                }
            }
            Some(start) => {
                let Some(line) = Trendline::between(start, point) else {
                    return;
                };
                self.remove_temp();
                self.replace_active(line);
                self.phase = Phase::Idle;
                if let Some(callback) = self.on_complete.as_mut() {
                    callback();
                }
            }
        }
    }

    /// Handle a crosshair move.
    ///
    /// Depending on the phase this updates the draw preview, runs hover
    /// detection, or applies the current drag. Events that resolve to an
    /// invalid time or price are dropped entirely.
    pub fn on_crosshair_move(&mut self, event: &SurfaceEvent) {
        if self.updating {
            return;
        }
        let Some(point) = self.resolve_point(event) else {
            return;
        };
        self.last_cursor = Some(point);

        match self.phase {
            Phase::Drawing { start: Some(start) } => self.update_preview(start, point),
            Phase::Drawing { start: None } => {}
            Phase::Dragging {
                anchor,
                snapshot,
                endpoint,
            } => self.apply_drag(anchor, snapshot, endpoint, point),
            Phase::Idle | Phase::Hovering { .. } => self.update_hover(point),
        }
    }

    /// Handle a raw mouse-down over the chart region.
    ///
    /// Begins a drag when the line is hovered, seeded from the last known
    /// crosshair position (the host owns coordinate mapping, so the raw DOM
    /// position is useless here). No-op otherwise.
    pub fn on_mouse_down(&mut self) {
        let Phase::Hovering { endpoint } = self.phase else {
            return;
        };
        let (Some(anchor), Some(active)) = (self.last_cursor, self.active.as_ref()) else {
            return;
        };
        self.phase = Phase::Dragging {
            anchor,
            snapshot: active.line,
            endpoint,
        };
    }

    /// Handle a raw mouse-up. Ends any drag; idempotent otherwise.
    pub fn on_mouse_up(&mut self) {
        if let Phase::Dragging { .. } = self.phase {
            // The cursor is still over the line; the grabbed endpoint is
            // cleared and re-detected on the next crosshair move.
            self.phase = Phase::Hovering { endpoint: None };
        }
    }

    /// Delete the trendline if it exists, is hovered, and is not mid-drag.
    ///
    /// Restores chart interactivity and asks the host to refit its visible
    /// range. Returns whether a deletion occurred.
    pub fn delete_selected(&mut self) -> bool {
        if !matches!(self.phase, Phase::Hovering { .. }) {
            return false;
        }
        let Some(active) = self.active.take() else {
            return false;
        };

        if let Err(e) = self.surface.remove_line(active.id) {
            log::warn!("failed to remove trendline: {e}");
        }
        self.surface.set_pan_zoom_enabled(true);
        self.surface.set_pointer_cursor(false);
        self.phase = Phase::Idle;
        self.surface.fit_content();
        true
    }

    /// Resolve an event to a validated chart point.
    ///
    /// Falls back to span extrapolation when the host reports only a
    /// logical index.
    fn resolve_point(&self, event: &SurfaceEvent) -> Option<ChartPoint> {
        let time = match event.time {
            Some(t) => t,
            None => self.series.time_at_logical(event.logical?)?,
        };
        let price = self.surface.coordinate_to_price(event.pixel_y?)?;

        if !self.options.validity.valid_time(time) || !self.options.validity.valid_price(price) {
            return None;
        }
        Some(ChartPoint::new(time, price))
    }

    fn update_preview(&mut self, start: ChartPoint, cursor: ChartPoint) {
        let Some(id) = self.temp else {
            return;
        };
        // The host primitive requires ascending time, so the pair is
        // reordered on every update; a cursor at the start's exact time is
        // skipped.
        let Some(line) = Trendline::between(start, cursor) else {
            return;
        };
        let _ = self.push_points(id, &line.points());
    }

    fn update_hover(&mut self, cursor: ChartPoint) {
        let hit = match self.active.as_ref() {
            Some(active) => hit_test(cursor, &active.line, &self.options.hover, self.series.span()),
            None => Hit::Miss,
        };
        let was_hovering = matches!(self.phase, Phase::Hovering { .. });

        match hit {
            Hit::Miss => {
                if was_hovering {
                    self.exit_hover();
                }
                self.phase = Phase::Idle;
            }
            Hit::Endpoint(index) => {
                if !was_hovering {
                    self.enter_hover();
                }
                self.phase = Phase::Hovering {
                    endpoint: Some(index),
                };
            }
            Hit::Segment => {
                if !was_hovering {
                    self.enter_hover();
                }
                self.phase = Phase::Hovering { endpoint: None };
            }
        }
    }

    fn apply_drag(
        &mut self,
        anchor: ChartPoint,
        snapshot: Trendline,
        endpoint: Option<usize>,
        cursor: ChartPoint,
    ) {
        let Some(id) = self.active.as_ref().map(|a| a.id) else {
            return;
        };

        let d_time = cursor.time - anchor.time;
        let d_price = cursor.price - anchor.price;

        let mut points = snapshot.points();
        match endpoint {
            // A grabbed endpoint reshapes the line; a body grab moves it.
            Some(index) => points[index] = points[index].translate(d_time, d_price),
            None => {
                for point in points.iter_mut() {
                    *point = point.translate(d_time, d_price);
                }
            }
        }
        for point in points.iter_mut() {
            *point = self.clamp_candidate(*point);
        }

        // The update is skipped outright when the drag would reverse the
        // endpoint order or produce invalid coordinates; the primitive keeps
        // its last known-good data.
        if points[0].time >= points[1].time {
            return;
        }
        let valid = points.iter().all(|p| {
            self.options.validity.valid_time(p.time) && self.options.validity.valid_price(p.price)
        });
        if !valid {
            return;
        }
        let Some(line) = Trendline::between(points[0], points[1]) else {
            return;
        };

        match self.push_points(id, &points) {
            Ok(()) => {
                if let Some(active) = self.active.as_mut() {
                    active.line = line;
                }
            }
            Err(_) => {
                // Roll the primitive back to the pre-drag snapshot rather
                // than leaving it partially updated.
                let _ = self.push_points(id, &snapshot.points());
            }
        }
    }

    /// Clamp a dragged candidate into usable bounds.
    ///
    /// An invalid time falls back to the first bar's time. Prices are kept
    /// within the visible range expanded by the drag buffer, and floored to
    /// a small positive epsilon when positivity is required.
    fn clamp_candidate(&self, point: ChartPoint) -> ChartPoint {
        let time = if self.options.validity.valid_time(point.time) {
            point.time
        } else {
            self.series.first_time().unwrap_or(point.time)
        };

        let mut price = point.price;
        if let Some((min, max)) = self.surface.visible_price_range() {
            let buffer = (max - min) * self.options.drag_buffer_ratio;
            price = price.clamp(min - buffer, max + buffer);
        }
        if self.options.validity.require_positive {
            price = price.max(MIN_POSITIVE_PRICE);
        }

        ChartPoint::new(time, price)
    }

    fn enter_hover(&mut self) {
        // Keep the host's pan gesture from hijacking the upcoming drag.
        self.surface.set_pan_zoom_enabled(false);
        self.surface.set_pointer_cursor(true);
        if let Some(active) = self.active.as_ref() {
            if let Err(e) = self
                .surface
                .apply_line_style(active.id, &LineStyle::highlighted())
            {
                log::warn!("failed to highlight trendline: {e}");
            }
        }
    }

    fn exit_hover(&mut self) {
        self.surface.set_pan_zoom_enabled(true);
        self.surface.set_pointer_cursor(false);
        if let Some(active) = self.active.as_ref() {
            if let Err(e) = self.surface.apply_line_style(active.id, &LineStyle::solid()) {
                log::warn!("failed to restyle trendline: {e}");
            }
        }
    }

    fn replace_active(&mut self, line: Trendline) {
        if let Some(previous) = self.active.take() {
            if let Err(e) = self.surface.remove_line(previous.id) {
                log::warn!("failed to remove replaced trendline: {e}");
            }
        }
        match self.surface.add_line(&LineStyle::solid()) {
            Ok(id) => {
                if self.push_points(id, &line.points()).is_ok() {
                    self.active = Some(ActiveLine { id, line });
                } else {
                    let _ = self.surface.remove_line(id);
                }
            }
            Err(e) => log::warn!("failed to create trendline: {e}"),
        }
    }

    fn remove_temp(&mut self) {
        if let Some(id) = self.temp.take() {
            if let Err(e) = self.surface.remove_line(id) {
                log::warn!("failed to remove preview line: {e}");
            }
        }
    }

    /// Push data to a primitive with the re-entrancy guard held.
    fn push_points(&mut self, id: LineId, points: &[ChartPoint]) -> Result<(), SurfaceError> {
        self.updating = true;
        let result = self.surface.set_line_data(id, points);
        self.updating = false;
        if let Err(e) = &result {
            log::warn!("line primitive rejected update: {e}");
        }
        result
    }
}
