//! Texture loading: resolving a [`TextureKey`] to RGBA pixels.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use orrery_bodies::TextureKey;
use thiserror::Error;

use crate::texture::{ManagedTexture, TextureError, TextureManager};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("texture '{key}' not found at {path}")]
    NotFound { key: String, path: PathBuf },

    #[error("failed to decode texture '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: image::ImageError,
    },
}

/// Decoded 8-bit RGBA pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl From<image::RgbaImage> for DecodedImage {
    fn from(img: image::RgbaImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            rgba: img.into_raw(),
        }
    }
}

/// Anything that can turn a texture key into pixels.
pub trait TextureSource {
    fn load(&self, key: &TextureKey) -> Result<DecodedImage, AssetError>;
}

/// Reads `<root>/<key>` and decodes it with `image`.
#[derive(Debug, Clone)]
pub struct DirectoryTextureSource {
    root: PathBuf,
}

impl DirectoryTextureSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &TextureKey) -> PathBuf {
        self.root.join(key.as_str())
    }
}

impl TextureSource for DirectoryTextureSource {
    fn load(&self, key: &TextureKey) -> Result<DecodedImage, AssetError> {
        let path = self.path_for(key);
        if !path.is_file() {
            return Err(AssetError::NotFound {
                key: key.to_string(),
                path,
            });
        }
        let img = image::open(&path).map_err(|source| AssetError::Decode {
            key: key.to_string(),
            source,
        })?;
        Ok(img.to_rgba8().into())
    }
}

/// Upload the texture for `key`, falling back to the white texture when the
/// source cannot supply it.
pub fn load_or_white(
    manager: &mut TextureManager,
    source: &dyn TextureSource,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    key: &TextureKey,
) -> Result<Arc<ManagedTexture>, TextureError> {
    if let Some(cached) = manager.get(key.as_str()) {
        return Ok(cached);
    }
    let img = match source.load(key) {
        Ok(img) => img,
        Err(err) => {
            log::warn!("{err}; rendering untextured");
            return manager.white(device, queue);
        }
    };
    let name = key.as_str();
    match manager.create_texture(device, queue, name, &img.rgba, img.width, img.height) {
        Ok(texture) => Ok(texture),
        Err(err) => {
            log::warn!("Texture '{key}' rejected ({err}), rendering untextured");
            manager.white(device, queue)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectoryTextureSource::new(dir.path());
        let err = source.load(&TextureKey::new("earth.jpg")).unwrap_err();
        assert!(matches!(err, AssetError::NotFound { .. }));
    }

    #[test]
    fn test_png_decodes_to_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 128]));
        img.save(dir.path().join("saturn_ring.png")).unwrap();

        let source = DirectoryTextureSource::new(dir.path());
        let decoded = source.load(&TextureKey::new("saturn_ring.png")).unwrap();
        assert_eq!((decoded.width, decoded.height), (4, 2));
        assert_eq!(decoded.rgba.len(), 4 * 2 * 4);
        assert_eq!(&decoded.rgba[..4], &[10, 20, 30, 128]);
    }

    #[test]
    fn test_jpeg_decodes_opaque() {
        let dir = tempfile::tempdir().unwrap();
        let img = image::RgbImage::from_pixel(8, 8, image::Rgb([200, 100, 50]));
        img.save(dir.path().join("mars.jpg")).unwrap();

        let decoded = DirectoryTextureSource::new(dir.path())
            .load(&TextureKey::new("mars.jpg"))
            .unwrap();
        assert_eq!((decoded.width, decoded.height), (8, 8));
        assert!(decoded.rgba.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_garbage_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("stars.jpg"), b"not an image").unwrap();
        let err = DirectoryTextureSource::new(dir.path())
            .load(&TextureKey::new("stars.jpg"))
            .unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn test_path_for_joins_root() {
        let source = DirectoryTextureSource::new("assets/textures");
        assert_eq!(
            source.path_for(&TextureKey::new("sun.jpg")),
            Path::new("assets/textures").join("sun.jpg")
        );
    }
}
