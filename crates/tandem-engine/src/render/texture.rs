//! Texture loading: CPU decode and GPU upload.
//!
//! Decoding is separate from upload so image errors surface at startup,
//! before a window or device exists.

use std::path::Path;

use anyhow::{Context, Result};
use wgpu::util::DeviceExt;

/// Decoded RGBA8 pixels, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// Decodes an image file into RGBA8.
    pub fn decode(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("failed to load texture {}", path.display()))?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();

        log::debug!("decoded texture {} ({width}x{height})", path.display());

        Self::from_rgba8(path.display().to_string(), width, height, rgba.into_raw())
    }

    /// Wraps raw RGBA8 pixels.
    pub fn from_rgba8(label: impl Into<String>, width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        let label = label.into();
        anyhow::ensure!(width > 0 && height > 0, "texture {label} has zero size");
        anyhow::ensure!(
            rgba.len() as u64 == width as u64 * height as u64 * 4,
            "texture {label}: expected {} bytes for {width}x{height} RGBA8, got {}",
            width as u64 * height as u64 * 4,
            rgba.len()
        );

        Ok(Self {
            label,
            width,
            height,
            rgba,
        })
    }
}

/// A GPU-resident 2D texture and its default view.
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Uploads decoded pixels as an `Rgba8Unorm` texture with one mip level.
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, image: &TextureImage) -> Self {
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(&image.label),
                size: wgpu::Extent3d {
                    width: image.width,
                    height: image.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &image.rgba,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            width: image.width,
            height: image.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprite.png");
        let mut img = image::RgbaImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, image::Rgba([0, 0, 255, 128]));
        img.save(&path).unwrap();

        let decoded = TextureImage::decode(&path).unwrap();
        assert_eq!((decoded.width, decoded.height), (2, 1));
        assert_eq!(decoded.rgba, vec![255, 0, 0, 255, 0, 0, 255, 128]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.png");
        let err = TextureImage::decode(&path).unwrap_err();
        assert!(format!("{err:#}").contains("nope.png"));
    }

    #[test]
    fn undecodable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(TextureImage::decode(&path).is_err());
    }

    #[test]
    fn from_rgba8_checks_length() {
        assert!(TextureImage::from_rgba8("t", 2, 2, vec![0; 16]).is_ok());
        assert!(TextureImage::from_rgba8("t", 2, 2, vec![0; 15]).is_err());
        assert!(TextureImage::from_rgba8("t", 0, 2, vec![]).is_err());
    }
}
