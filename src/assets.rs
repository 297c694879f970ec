use crate::logger::{info, warn};
use std::path::{Path, PathBuf};

#[allow(dead_code)]
#[derive(Debug)]
pub enum AssetError {
    NotFound(PathBuf),
    Io(std::io::Error),
    Decode(image::ImageError),
    /// The renderer refused the asset (bad font data, texture creation failure)
    Invalid(String),
}
impl From<std::io::Error> for AssetError {
    fn from(error: std::io::Error) -> Self { AssetError::Io(error) }
}
impl From<image::ImageError> for AssetError {
    fn from(error: image::ImageError) -> Self { AssetError::Decode(error) }
}

/// Decoded RGBA8 pixels ready to be uploaded to the GPU
pub struct RawImage {
    pub data: Vec<u8>,
    pub dimensions: (u32, u32),
}

/// Explicit load state of an asset. Renderers check this every frame instead of assuming the asset exists
pub enum AssetSlot<T> {
    Unloaded(PathBuf),
    Loaded(T),
    Failed,
}
impl<T> AssetSlot<T> {
    pub fn new<P: AsRef<Path>>(path: P) -> AssetSlot<T> { AssetSlot::Unloaded(path.as_ref().to_path_buf()) }

    pub fn get(&self) -> Option<&T> {
        match self {
            AssetSlot::Loaded(asset) => Some(asset),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool { matches!(self, AssetSlot::Failed) }

    /// Runs `load` once for an unloaded slot. Failures are logged and remembered so they aren't retried every frame
    pub fn ensure_loaded(&mut self, load: impl FnOnce(&Path) -> Result<T, AssetError>) -> Option<&T> {
        if let AssetSlot::Unloaded(path) = self {
            let path = path.clone();
            *self = match load(&path) {
                Ok(asset) => {
                    info!("Loaded asset {}", path.display());
                    AssetSlot::Loaded(asset)
                }
                Err(e) => {
                    warn!("Unable to load asset {}: {:?}", path.display(), e);
                    AssetSlot::Failed
                }
            };
        }
        self.get()
    }
}

pub fn read_image(path: &Path) -> Result<RawImage, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }
    let data = std::fs::read(path)?;
    decode_image(&data)
}

pub fn decode_image(data: &[u8]) -> Result<RawImage, AssetError> {
    let reader = image::io::Reader::new(std::io::Cursor::new(data)).with_guessed_format()?;
    let buffer = reader.decode()?.into_rgba8();
    let dimensions = buffer.dimensions();
    Ok(RawImage { data: buffer.into_vec(), dimensions })
}

pub fn read_font(path: &Path) -> Result<speedy2d::font::Font, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }
    let data = std::fs::read(path)?;
    speedy2d::font::Font::new(&data).map_err(|e| AssetError::Invalid(format!("{e:?}")))
}
