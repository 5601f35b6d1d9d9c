//! The egui side of the zoomable viewport.

use eframe::egui;
use zoom_pane::zoom::content_origin;
use zoom_pane::{ScrollHost, ScrollPosition, Size};

/// Viewport state the zoom controller drives. Bounds are refreshed every frame from the
/// allocated rect and the displayed image.
pub struct PaneHost {
    ctx: egui::Context,
    content: Size,
    viewport: Size,
    position: ScrollPosition,
    scale: f64,
}

impl PaneHost {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            content: Size::default(),
            viewport: Size::default(),
            position: ScrollPosition::CENTER,
            scale: 1.0,
        }
    }

    pub fn set_content(&mut self, content: Size) {
        self.content = content;
    }

    pub fn set_viewport(&mut self, rect: egui::Rect) {
        self.viewport = Size::new(f64::from(rect.width()), f64::from(rect.height()));
    }

    /// Screen rect of the scaled content inside `viewport_rect`.
    pub fn content_rect(&self, viewport_rect: egui::Rect) -> egui::Rect {
        let scaled = self.content.scaled(self.scale);
        let origin = content_origin(scaled, self.viewport, self.position);
        egui::Rect::from_min_size(
            viewport_rect.min + egui::vec2(origin.x as f32, origin.y as f32),
            egui::vec2(scaled.width as f32, scaled.height as f32),
        )
    }
}

impl ScrollHost for PaneHost {
    fn content_size(&self) -> Size {
        self.content
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn scroll_position(&self) -> ScrollPosition {
        self.position
    }

    fn set_scroll_position(&mut self, position: ScrollPosition) {
        self.position = position;
    }

    fn apply_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    fn request_layout(&mut self) {
        self.ctx.request_repaint();
    }
}
