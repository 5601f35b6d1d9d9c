//! UI rendering methods for the viewer.

use crate::ZoomPaneApp;
use crate::constants::{KEY_ZOOM_DELTA, SIDEBAR_WIDTH};
use eframe::egui;
use zoom_pane::Point;

impl ZoomPaneApp {
    /// Handles keyboard shortcuts for zoom and reset.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        let (zoom_in, zoom_out, reset) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals),
                i.key_pressed(egui::Key::Minus),
                i.key_pressed(egui::Key::Num0),
            )
        });

        let step = KEY_ZOOM_DELTA * self.zoom.config().zoom_intensity;
        if zoom_in {
            self.zoom.zoom_centered(&mut self.pane, step.exp());
        }
        if zoom_out {
            self.zoom.zoom_centered(&mut self.pane, (-step).exp());
        }
        if reset {
            self.zoom.reset(&mut self.pane);
        }
    }

    /// Renders the bottom status bar with controls hint and the current scale.
    pub fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Scroll: Zoom | Drag: Pan | +/-: Zoom | 0: Reset");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{:.0}%", self.zoom.scale() * 100.0));
                });
            });
        });
    }

    /// Renders the left sidebar with the image list.
    pub fn show_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar")
            .exact_width(SIDEBAR_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add_space(4.0);
                    ui.strong("Images");
                    ui.separator();

                    if self.image_keys.is_empty() {
                        ui.label("No images loaded");
                        return;
                    }

                    let mut clicked = None;
                    for (idx, key) in self.image_keys.iter().enumerate() {
                        if ui
                            .selectable_label(self.selected_image == idx, key)
                            .clicked()
                        {
                            clicked = Some(idx);
                        }
                    }

                    if let Some(idx) = clicked
                        && idx != self.selected_image
                    {
                        self.select_image(idx);
                    }
                });
            });
    }

    /// Renders the central panel containing the zoomable image.
    pub fn show_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(key) = self.selected_key().map(str::to_owned) else {
                ui.centered_and_justified(|ui| {
                    ui.label("No images embedded under assets/images.");
                });
                return;
            };
            self.show_pane(ui, ctx, &key);
        });
    }

    /// Renders the image inside the viewport and feeds wheel and drag input to the zoom
    /// controller.
    fn show_pane(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, key: &str) {
        let Some(texture) = self.get_texture(ctx, key) else {
            ui.centered_and_justified(|ui| {
                ui.label(format!("Failed to load image: {key}"));
            });
            return;
        };

        let (viewport_rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        self.pane.set_viewport(viewport_rect);

        self.handle_scroll_zoom(ui, viewport_rect);

        if response.dragged() {
            let delta = response.drag_delta();
            self.zoom.pan_by(
                &mut self.pane,
                Point::new(f64::from(delta.x), f64::from(delta.y)),
            );
        }

        let content_rect = self.pane.content_rect(viewport_rect);

        ui.set_clip_rect(viewport_rect);
        ui.painter().image(
            texture.id(),
            content_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    /// Zooms towards the mouse position when the wheel moves over the viewport.
    fn handle_scroll_zoom(&mut self, ui: &mut egui::Ui, viewport_rect: egui::Rect) {
        let hover_pos = ui.input(|i| i.pointer.hover_pos());
        let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);

        let Some(hover) = hover_pos.filter(|p| viewport_rect.contains(*p)) else {
            return;
        };
        if scroll_delta == 0.0 {
            return;
        }

        let cursor = hover - viewport_rect.min;
        self.zoom.on_scroll(
            &mut self.pane,
            f64::from(scroll_delta),
            Point::new(f64::from(cursor.x), f64::from(cursor.y)),
        );
    }
}
