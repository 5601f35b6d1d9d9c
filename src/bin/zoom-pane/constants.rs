/// Width of the sidebar panel in pixels.
pub const SIDEBAR_WIDTH: f32 = 200.0;

/// Scroll delta applied per `+`/`-` key press, in wheel units.
pub const KEY_ZOOM_DELTA: f64 = 120.0;

/// Initial window size.
pub const WINDOW_SIZE: [f32; 2] = [1280.0, 960.0];
