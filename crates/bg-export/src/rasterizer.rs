use std::path::Path;

use anyhow::{Context, Result};
use bg_core::grid::PixelBuffer;
use image::{DynamicImage, GrayImage, ImageFormat};
use rayon::prelude::*;

/// Agrandit chaque point en un bloc `scale × scale` de pixels.
///
/// Parallelised by output row bands, one band per source row.
/// `scale = 1` returns an identical buffer.
///
/// # Example
/// ```
/// use bg_core::PixelBuffer;
/// use bg_export::rasterizer::upscale;
/// let src = PixelBuffer { data: vec![255, 0], width: 2, height: 1 };
/// let big = upscale(&src, 2);
/// assert_eq!((big.width, big.height), (4, 2));
/// assert_eq!(big.data, vec![255, 255, 0, 0, 255, 255, 0, 0]);
/// ```
#[must_use]
pub fn upscale(src: &PixelBuffer, scale: u32) -> PixelBuffer {
    let scale = scale.max(1);
    if scale == 1 {
        return src.clone();
    }

    let width = src.width * scale;
    let height = src.height * scale;
    let mut data = vec![0u8; (width * height) as usize];

    let stride = width as usize;
    let band_size = stride * scale as usize;
    if band_size > 0 {
        data.par_chunks_exact_mut(band_size)
            .enumerate()
            .for_each(|(sy, band)| {
                let (first, rest) = band.split_at_mut(stride);
                let src_row = &src.data[sy * src.width as usize..(sy + 1) * src.width as usize];
                for (block, &v) in first.chunks_exact_mut(scale as usize).zip(src_row) {
                    block.fill(v);
                }
                for line in rest.chunks_exact_mut(stride) {
                    line.copy_from_slice(first);
                }
            });
    }

    PixelBuffer {
        data,
        width,
        height,
    }
}

/// Convertit le buffer en image 8 bits niveaux de gris.
///
/// # Errors
/// Returns an error if the buffer length does not match its dimensions.
pub fn to_image(pixels: &PixelBuffer) -> Result<GrayImage> {
    GrayImage::from_raw(pixels.width, pixels.height, pixels.data.clone()).with_context(|| {
        format!(
            "Buffer incohérent : {} octets pour {}×{}",
            pixels.data.len(),
            pixels.width,
            pixels.height
        )
    })
}

/// Écrit le buffer sur disque, au format déduit de l'extension.
///
/// GIF is written as RGBA since its encoder rejects luma images.
///
/// # Errors
/// Returns an error for an empty buffer, an unsupported extension, or an I/O failure.
///
/// # Example
/// ```no_run
/// use bg_core::PixelBuffer;
/// use bg_export::rasterizer::save;
/// use std::path::Path;
/// let pixels = PixelBuffer { data: vec![255; 4], width: 2, height: 2 };
/// save(&pixels, Path::new("out.png")).unwrap();
/// ```
pub fn save(pixels: &PixelBuffer, path: &Path) -> Result<()> {
    if pixels.width == 0 || pixels.height == 0 {
        anyhow::bail!("Image vide : rien à écrire dans {}", path.display());
    }
    let format = ImageFormat::from_path(path)
        .with_context(|| format!("Format d'image inconnu pour {}", path.display()))?;
    let image = DynamicImage::ImageLuma8(to_image(pixels)?);
    let image = if format == ImageFormat::Gif {
        DynamicImage::ImageRgba8(image.to_rgba8())
    } else {
        image
    };
    image
        .save_with_format(path, format)
        .with_context(|| format!("Échec d'écriture de {}", path.display()))?;
    log::info!(
        "Image écrite : {} ({}×{})",
        path.display(),
        pixels.width,
        pixels.height
    );
    Ok(())
}
