#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod constants;
mod pane;
mod ui;

use clap::Parser;
use constants::WINDOW_SIZE;
use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use pane::PaneHost;
use std::collections::HashMap;
use std::path::PathBuf;
use zoom_pane::{ImageCache, Settings, ViewportZoomController, logging};

#[derive(Parser, Debug)]
#[command(name = "zoom-pane")]
#[command(version)]
#[command(about = "Image viewer with cursor-focused zoom")]
struct Args {
    /// Settings file (RON); defaults to the platform config directory
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Image shown on startup, by name (e.g. "board")
    #[arg(long)]
    image: Option<String>,
}

/// Main application state for the viewer.
pub struct ZoomPaneApp {
    images: ImageCache,
    image_keys: Vec<String>,
    selected_image: usize,
    texture_cache: HashMap<String, TextureHandle>,
    zoom: ViewportZoomController,
    pane: PaneHost,
    toasts: Toasts,
}

impl ZoomPaneApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        settings: &Settings,
        images: ImageCache,
        initial_image: Option<&str>,
        startup_errors: Vec<String>,
    ) -> Self {
        let mut toasts = Toasts::new()
            .anchor(egui::Align2::RIGHT_TOP, (-10.0, 10.0))
            .direction(egui::Direction::TopDown);

        for err in startup_errors {
            toasts.add(error_toast(err));
        }

        let image_keys: Vec<String> = images.keys().into_iter().map(str::to_owned).collect();
        let selected_image = match initial_image {
            Some(key) => image_keys.iter().position(|k| k == key).unwrap_or_else(|| {
                log::warn!("Unknown image '{key}', showing the first one instead");
                toasts.add(error_toast(format!("Unknown image: {key}")));
                0
            }),
            None => 0,
        };

        let mut app = Self {
            images,
            image_keys,
            selected_image,
            texture_cache: HashMap::new(),
            zoom: ViewportZoomController::new(settings.zoom),
            pane: PaneHost::new(cc.egui_ctx.clone()),
            toasts,
        };
        app.select_image(selected_image);
        app
    }

    fn selected_key(&self) -> Option<&str> {
        self.image_keys.get(self.selected_image).map(String::as_str)
    }

    /// Switches to another image and resets the view to its initial scale.
    fn select_image(&mut self, idx: usize) {
        self.selected_image = idx;
        let Some(key) = self.image_keys.get(idx) else {
            return;
        };
        if let Some(image) = self.images.cached(key) {
            self.pane.set_content(image.size());
        }
        self.zoom.reset(&mut self.pane);
    }

    /// Returns the texture for `key`, uploading the decoded image on first use.
    fn get_texture(&mut self, ctx: &egui::Context, key: &str) -> Option<TextureHandle> {
        if let Some(texture) = self.texture_cache.get(key) {
            return Some(texture.clone());
        }

        let decoded = match self.images.get(key) {
            Ok(decoded) => decoded,
            Err(err) => {
                log::error!("{err}");
                self.toasts.add(error_toast(err.to_string()));
                return None;
            }
        };
        let image = ColorImage::from_rgba_unmultiplied(
            [decoded.width as usize, decoded.height as usize],
            &decoded.pixels,
        );
        let texture = ctx.load_texture(key, image, TextureOptions::LINEAR);
        self.texture_cache.insert(key.to_owned(), texture.clone());
        Some(texture)
    }
}

impl eframe::App for ZoomPaneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard_input(ctx);

        self.show_status_bar(ctx);
        self.show_sidebar(ctx);
        self.show_central_panel(ctx);

        self.toasts.show(ctx);
    }
}

fn error_toast(text: String) -> Toast {
    Toast {
        kind: ToastKind::Error,
        text: text.into(),
        options: ToastOptions::default()
            .duration_in_seconds(10.0)
            .show_icon(true),
        ..Default::default()
    }
}

/// Where the settings came from, reported once logging is up.
enum SettingsSource {
    File(PathBuf),
    Missing(PathBuf),
    NoConfigDir,
    Failed(String),
}

/// Loads settings from `path` or the default location. Failures fall back to defaults.
fn load_settings(path: Option<PathBuf>) -> (Settings, SettingsSource) {
    let Some(path) = path.or_else(Settings::default_path) else {
        return (Settings::default(), SettingsSource::NoConfigDir);
    };
    match Settings::load(&path) {
        Ok(settings) => (settings, SettingsSource::File(path)),
        Err(err) if err.is_not_found() => (Settings::default(), SettingsSource::Missing(path)),
        Err(err) => (Settings::default(), SettingsSource::Failed(err.to_string())),
    }
}

fn main() -> eframe::Result {
    let args = Args::parse();
    let mut startup_errors = Vec::new();

    let (settings, source) = load_settings(args.settings);

    match logging::init(&settings) {
        Ok(Some(path)) => log::info!("Logging to {}", path.display()),
        Ok(None) => {}
        Err(err) => {
            // Console-only fallback.
            let _ = env_logger::try_init();
            log::error!("{err}");
            startup_errors.push(err.to_string());
        }
    }

    match source {
        SettingsSource::File(path) => log::info!("Loaded settings from {}", path.display()),
        SettingsSource::Missing(path) => {
            log::info!("No settings file at {}, using defaults", path.display());
        }
        SettingsSource::NoConfigDir => log::info!("No config directory, using default settings"),
        SettingsSource::Failed(err) => {
            log::error!("{err}");
            startup_errors.push(err);
        }
    }

    let images = ImageCache::preloaded();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        "Zoom Pane",
        options,
        Box::new(move |cc| {
            Ok(Box::new(ZoomPaneApp::new(
                cc,
                &settings,
                images,
                args.image.as_deref(),
                startup_errors,
            )))
        }),
    )
}
