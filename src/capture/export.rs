//! PNG export of rendered posters

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbaImage;

use crate::domain::PRINT_DPI;

/// Pixels per meter at the print resolution
const PRINT_PIXELS_PER_METER: u32 = (PRINT_DPI as f64 / 0.0254 + 0.5) as u32;

/// Encode an RGBA image as an 8-bit PNG tagged with the print resolution
pub fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: PRINT_PIXELS_PER_METER,
        yppu: PRINT_PIXELS_PER_METER,
        unit: png::Unit::Meter,
    }));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    // Writes IEND; dropping the writer would swallow this error
    writer.finish()
}

pub fn encode_png(image: &RgbaImage) -> anyhow::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_png(&mut buffer, image)?;
    Ok(buffer)
}

/// Write `image` to `dir/file_name`.
///
/// The PNG is written to a temporary file in `dir` and renamed into place
/// only once encoding succeeded, so a failed export leaves nothing behind.
pub fn save_png_atomic(image: &RgbaImage, dir: &Path, file_name: &str) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut file = tempfile::Builder::new()
        .prefix(".mapposter-")
        .suffix(".png")
        .tempfile_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    {
        let mut writer = io::BufWriter::new(file.as_file_mut());
        write_png(&mut writer, image)?;
        writer.flush()?;
    }

    let path = dir.join(file_name);
    file.persist(&path)
        .with_context(|| format!("saving {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_print_resolution_constant() {
        assert_eq!(PRINT_PIXELS_PER_METER, 11811);
    }

    #[test]
    fn test_encode_png_decodes_back() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let bytes = encode_png(&img).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_encoded_png_is_complete() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[bytes.len() - 8..bytes.len() - 4], b"IEND");
    }

    #[test]
    fn test_failed_write_is_reported() {
        struct Full;
        impl io::Write for Full {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let img = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
        assert!(write_png(Full, &img).is_err());
    }

    #[test]
    fn test_save_leaves_only_final_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let path = save_png_atomic(&img, &out, "map_8x10_2400x3000_300dpi.png").unwrap();

        assert_eq!(path, out.join("map_8x10_2400x3000_300dpi.png"));
        let entries: Vec<_> = std::fs::read_dir(&out).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert!(path.is_file());
    }
}
