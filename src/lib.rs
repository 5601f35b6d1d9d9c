//! Zoomable, pannable viewport support for a small desktop game: a focal-point zoom
//! controller plus the settings, logging and image cache the viewer is built on.

pub mod geometry;
pub mod images;
pub mod logging;
pub mod settings;
pub mod zoom;

pub use geometry::{Point, ScrollPosition, Size};
pub use images::{DecodedImage, ImageCache, ImageLoadError};
pub use settings::{LogSettings, Settings, SettingsError};
pub use zoom::{ScrollHost, ViewportZoomController, ZoomConfig, ZoomOutcome, ZoomState};
