//! Focal-point zoom for a scrollable viewport.
//!
//! The controller owns only the scale factor. Everything else (intrinsic content bounds,
//! viewport bounds, scroll fractions, re-layout) belongs to the hosting widget and is reached
//! through [`ScrollHost`].

use crate::geometry::{EPSILON, Point, ScrollPosition, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wheel sensitivity: the zoom factor is `exp(delta_y * zoom_intensity)`.
pub const DEFAULT_ZOOM_INTENSITY: f64 = 0.001;

/// Upper bound for the scale factor.
pub const DEFAULT_MAX_SCALE: f64 = 2.5;

/// The larger side of the scaled content never shrinks below this many pixels.
pub const DEFAULT_MIN_VIEWPORT_SIZE: f64 = 900.0;

/// Tuning constants for [`ViewportZoomController`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub zoom_intensity: f64,
    pub max_scale: f64,
    pub min_viewport_size: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            zoom_intensity: DEFAULT_ZOOM_INTENSITY,
            max_scale: DEFAULT_MAX_SCALE,
            min_viewport_size: DEFAULT_MIN_VIEWPORT_SIZE,
        }
    }
}

/// Rejected [`ZoomConfig`] values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ZoomConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("min_viewport_size must be a non-negative finite number, got {0}")]
    NegativeMinViewport(f64),
}

impl ZoomConfig {
    /// Checks that every constant keeps the scale positive and finite.
    pub fn validate(&self) -> Result<(), ZoomConfigError> {
        for (field, value) in [
            ("zoom_intensity", self.zoom_intensity),
            ("max_scale", self.max_scale),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ZoomConfigError::NotPositive { field, value });
            }
        }
        if !(self.min_viewport_size.is_finite() && self.min_viewport_size >= 0.0) {
            return Err(ZoomConfigError::NegativeMinViewport(self.min_viewport_size));
        }
        Ok(())
    }
}

/// Current scale factor, applied uniformly to both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    scale: f64,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl ZoomState {
    pub fn scale(self) -> f64 {
        self.scale
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Capabilities the hosting widget exposes to the controller.
pub trait ScrollHost {
    /// Unscaled bounds of the displayed content.
    fn content_size(&self) -> Size;

    /// Bounds of the visible area.
    fn viewport_size(&self) -> Size;

    fn scroll_position(&self) -> ScrollPosition;

    fn set_scroll_position(&mut self, position: ScrollPosition);

    /// Applies `scale` to the content on both axes.
    fn apply_scale(&mut self, scale: f64);

    /// Asks the host to lay out and repaint. Fire-and-forget.
    fn request_layout(&mut self);
}

/// What a zoom request did to the state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomOutcome {
    /// Nothing changed and the host was not touched.
    Unchanged,
    /// The scale hit the minimum-size floor; scroll fractions were left alone.
    ClampedToMin { scale: f64 },
    /// The scale hit `max_scale`; scroll fractions were left alone.
    ClampedToMax { scale: f64 },
    /// The scale changed freely and the point under the cursor was kept in place.
    Zoomed { scale: f64, position: ScrollPosition },
}

impl ZoomOutcome {
    /// The resulting scale, if the request changed anything.
    pub fn scale(self) -> Option<f64> {
        match self {
            Self::Unchanged => None,
            Self::ClampedToMin { scale }
            | Self::ClampedToMax { scale }
            | Self::Zoomed { scale, .. } => Some(scale),
        }
    }
}

/// The smallest scale at which the larger content side still covers `min_viewport_size`.
///
/// `None` when the content has no usable size.
pub fn min_effective_scale(content: Size, config: &ZoomConfig) -> Option<f64> {
    let side = content.max_side();
    (side.is_finite() && side > EPSILON).then(|| config.min_viewport_size / side)
}

/// Where the scaled content starts inside the viewport; non-zero on an axis where the
/// content is smaller than the viewport and therefore centred.
fn centering_origin(scaled: Size, viewport: Size) -> Point {
    Point::new(
        ((viewport.width - scaled.width) / 2.0).max(0.0),
        ((viewport.height - scaled.height) / 2.0).max(0.0),
    )
}

fn scroll_span(scaled: Size, viewport: Size) -> Size {
    Size::new(scaled.width - viewport.width, scaled.height - viewport.height)
}

/// Top-left corner of the scaled content in viewport-local coordinates.
pub fn content_origin(scaled: Size, viewport: Size, position: ScrollPosition) -> Point {
    let centered = centering_origin(scaled, viewport);
    let offset = position.to_offset(scroll_span(scaled, viewport));
    Point::new(centered.x - offset.x, centered.y - offset.y)
}

/// Translates wheel input into scale and scroll-fraction changes on a [`ScrollHost`].
#[derive(Debug, Clone, Default)]
pub struct ViewportZoomController {
    config: ZoomConfig,
    state: ZoomState,
}

impl ViewportZoomController {
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            config,
            state: ZoomState::default(),
        }
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    pub fn state(&self) -> ZoomState {
        self.state
    }

    pub fn scale(&self) -> f64 {
        self.state.scale
    }

    /// Handles a wheel event: `delta_y` is the signed scroll amount, `cursor` is in
    /// viewport-local coordinates.
    pub fn on_scroll<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        delta_y: f64,
        cursor: Point,
    ) -> ZoomOutcome {
        let factor = (delta_y * self.config.zoom_intensity).exp();
        self.zoom_by(host, factor, cursor)
    }

    /// Zooms around the viewport centre.
    pub fn zoom_centered<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        factor: f64,
    ) -> ZoomOutcome {
        let viewport = host.viewport_size();
        let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        self.zoom_by(host, factor, center)
    }

    /// Multiplies the scale by `factor`, keeping the content point under `cursor` fixed
    /// unless a bound is hit.
    ///
    /// Bounds are checked in order: the minimum-size floor (re-derived from the host's
    /// current content bounds on every call), then `max_scale`. A clamped zoom does not
    /// touch the scroll fractions.
    pub fn zoom_by<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        factor: f64,
        cursor: Point,
    ) -> ZoomOutcome {
        if factor.is_nan() || factor == 1.0 {
            return ZoomOutcome::Unchanged;
        }

        let content = host.content_size();
        let viewport = host.viewport_size();
        let old_scale = self.state.scale;
        let old_scaled = content.scaled(old_scale);
        let offset = host
            .scroll_position()
            .to_offset(scroll_span(old_scaled, viewport));

        let candidate = old_scale * factor;

        if let Some(min_scale) = min_effective_scale(content, &self.config)
            && content.max_side() * candidate < self.config.min_viewport_size
        {
            log::debug!("zoom clamped to minimum scale {min_scale:.4} (requested {candidate:.4})");
            self.commit_scale(host, min_scale);
            return ZoomOutcome::ClampedToMin { scale: min_scale };
        }

        if candidate > self.config.max_scale {
            let max_scale = self.config.max_scale;
            log::debug!("zoom clamped to maximum scale {max_scale:.4} (requested {candidate:.4})");
            self.commit_scale(host, max_scale);
            return ZoomOutcome::ClampedToMax { scale: max_scale };
        }

        if !(candidate.is_finite() && candidate > 0.0) {
            log::debug!("ignoring zoom to unusable scale {candidate}");
            return ZoomOutcome::Unchanged;
        }

        self.commit_scale(host, candidate);

        // Focal point in content-local (unscaled) coordinates.
        let old_origin = centering_origin(old_scaled, viewport);
        let focal = Point::new(
            (offset.x + cursor.x - old_origin.x) / old_scale,
            (offset.y + cursor.y - old_origin.y) / old_scale,
        );

        let new_scaled = content.scaled(candidate);
        let new_origin = centering_origin(new_scaled, viewport);
        let adjustment = Point::new(
            focal.x * old_scale * (factor - 1.0) + (new_origin.x - old_origin.x),
            focal.y * old_scale * (factor - 1.0) + (new_origin.y - old_origin.y),
        );

        let position = ScrollPosition::from_offset(
            Point::new(offset.x + adjustment.x, offset.y + adjustment.y),
            scroll_span(new_scaled, viewport),
        );
        host.set_scroll_position(position);

        log::trace!(
            "zoomed to {candidate:.4} around ({:.1}, {:.1}), scroll ({:.3}, {:.3})",
            cursor.x,
            cursor.y,
            position.h(),
            position.v()
        );

        ZoomOutcome::Zoomed {
            scale: candidate,
            position,
        }
    }

    /// Pans by a pointer drag of `delta` pixels; dragging right reveals content to the left.
    pub fn pan_by<H: ScrollHost + ?Sized>(&mut self, host: &mut H, delta: Point) -> ScrollPosition {
        let span = scroll_span(
            host.content_size().scaled(self.state.scale),
            host.viewport_size(),
        );
        let offset = host.scroll_position().to_offset(span);
        let position =
            ScrollPosition::from_offset(Point::new(offset.x - delta.x, offset.y - delta.y), span);

        if position != host.scroll_position() {
            host.set_scroll_position(position);
            host.request_layout();
        }
        position
    }

    /// Back to scale 1, scrolled to the middle.
    pub fn reset<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        self.state.reset();
        host.apply_scale(self.state.scale);
        host.set_scroll_position(ScrollPosition::CENTER);
        host.request_layout();
    }

    fn commit_scale<H: ScrollHost + ?Sized>(&mut self, host: &mut H, scale: f64) {
        self.state.scale = scale;
        host.apply_scale(scale);
        host.request_layout();
    }
}
