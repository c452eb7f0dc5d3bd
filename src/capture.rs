//! Surface screenshots

use crate::error::CaptureError;
use crate::rasterizer::Framebuffer;
use image::RgbImage;
use std::path::{Path, PathBuf};

/// File name for the capture taken on `frame`
pub fn capture_path(dir: &Path, frame: u64) -> PathBuf {
    dir.join(format!("capture_{}.png", frame))
}

/// Copy the surface into an RGB image, dropping alpha
pub fn surface_image(fb: &Framebuffer) -> Result<RgbImage, CaptureError> {
    if fb.pixels.len() != fb.width * fb.height * 4 {
        return Err(CaptureError::BadSurface);
    }
    Ok(RgbImage::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let c = fb.get_pixel(x as i32, y as i32).unwrap_or_default();
        image::Rgb([c.r, c.g, c.b])
    }))
}

/// Write the surface to `path`. The format follows the extension.
pub fn save_surface(fb: &Framebuffer, path: &Path) -> Result<(), CaptureError> {
    let img = surface_image(fb)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    img.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Color;

    #[test]
    fn test_capture_path_format() {
        let path = capture_path(Path::new("captures"), 42);
        assert_eq!(path, Path::new("captures").join("capture_42.png"));
    }

    #[test]
    fn test_surface_image_drops_alpha() {
        let mut fb = Framebuffer::new(3, 2);
        fb.clear(Color::new(10, 10, 15));
        fb.set_pixel(2, 1, Color::new(1, 2, 3));
        let img = surface_image(&fb).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(0, 0).0, [10, 10, 15]);
        assert_eq!(img.get_pixel(2, 1).0, [1, 2, 3]);
    }

    #[test]
    fn test_mismatched_surface_is_rejected() {
        let mut fb = Framebuffer::new(4, 4);
        fb.pixels.truncate(10);
        assert!(matches!(surface_image(&fb), Err(CaptureError::BadSurface)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = std::env::temp_dir().join(format!("shadebox_capture_{}", std::process::id()));
        let path = capture_path(&dir, 7);
        let mut fb = Framebuffer::new(5, 5);
        fb.clear(Color::new(200, 100, 50));
        save_surface(&fb, &path).unwrap();

        let back = image::open(&path).unwrap().to_rgb8();
        assert_eq!(back.get_pixel(4, 4).0, [200, 100, 50]);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
