//! Embedded image assets and a decoded-image cache.

use crate::geometry::Size;
use rust_embed::RustEmbed;
use std::collections::HashMap;
use thiserror::Error;

const IMAGE_DIR: &str = "images";
const IMAGE_EXT: &str = ".png";

/// Embeds all assets from the assets/ directory into the binary.
/// In debug mode, assets are loaded from the filesystem for faster iteration.
/// In release mode, assets are compressed and embedded in the binary.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

/// Errors that can occur when loading and decoding images.
#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("asset not found: {0}")]
    AssetNotFound(String),
    #[error("failed to decode image '{path}': {source}")]
    DecodeError {
        path: String,
        source: image::ImageError,
    },
}

/// RGBA8 pixels ready for texture creation.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl DecodedImage {
    /// Intrinsic size in pixels.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Decoded images keyed by file stem (`images/board.png` is `board`).
#[derive(Debug, Default)]
pub struct ImageCache {
    images: HashMap<String, DecodedImage>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes every embedded `images/*.png`. Images that fail to decode are skipped.
    pub fn preloaded() -> Self {
        let mut cache = Self::new();
        for key in embedded_keys() {
            if let Err(err) = cache.get(&key) {
                log::error!("Skipping image '{key}': {err}");
            }
        }
        log::info!("Preloaded {} images", cache.len());
        cache
    }

    /// Returns the decoded image for `key`, decoding it on first use.
    pub fn get(&mut self, key: &str) -> Result<&DecodedImage, ImageLoadError> {
        if !self.images.contains_key(key) {
            let path = image_path(key);
            log::debug!("Loading image '{key}' from {path}");
            let decoded = load_and_decode_image(&path)?;
            self.images.insert(key.to_owned(), decoded);
        }
        self.images
            .get(key)
            .ok_or_else(|| ImageLoadError::AssetNotFound(image_path(key)))
    }

    /// Already-decoded image, without loading.
    pub fn cached(&self, key: &str) -> Option<&DecodedImage> {
        self.images.get(key)
    }

    /// Embedded asset path for `key`, if such an image exists.
    pub fn asset_path(key: &str) -> Option<String> {
        let path = image_path(key);
        Assets::get(&path).map(|_| path)
    }

    /// Keys of all decoded images, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.images.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

fn image_path(key: &str) -> String {
    format!("{IMAGE_DIR}/{key}{IMAGE_EXT}")
}

/// Stems of the PNG files directly inside the embedded image directory.
fn embedded_keys() -> Vec<String> {
    let prefix = format!("{IMAGE_DIR}/");
    Assets::iter()
        .filter_map(|path| {
            let name = path.strip_prefix(&prefix)?;
            let stem = name.strip_suffix(IMAGE_EXT)?;
            (!stem.is_empty() && !stem.contains('/')).then(|| stem.to_owned())
        })
        .collect()
}

/// Loads and decodes an image from embedded assets.
pub fn load_and_decode_image(path: &str) -> Result<DecodedImage, ImageLoadError> {
    let file = Assets::get(path).ok_or_else(|| ImageLoadError::AssetNotFound(path.to_string()))?;

    let img =
        image::load_from_memory(&file.data).map_err(|source| ImageLoadError::DecodeError {
            path: path.to_string(),
            source,
        })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(DecodedImage {
        pixels: rgba.into_raw(),
        width,
        height,
    })
}
