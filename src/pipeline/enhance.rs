//! Image enhancement: grayscale collapse and contrast adjustment.
//!
//! A pure raster-in, raster-out transform with exactly two knobs. The
//! contrast rule is the classic midpoint-anchored multiplier:
//!
//! ```text
//! out = midpoint + factor * (in - midpoint)     (clamped to 0..=255)
//! ```
//!
//! Factor 1.0 is a bit-exact identity, 0.0 collapses every pixel to
//! mid-gray, values above 1.0 widen the dynamic range. Nothing else —
//! no rotation, cropping, or denoising — happens here.

use image::DynamicImage;

/// Intensity midpoint for 8-bit channels.
const MIDPOINT: f32 = 128.0;

/// Enhance a rasterised page for OCR.
///
/// When `grayscale` is set the image is first collapsed to single-channel
/// luminance; otherwise the contrast multiplier is applied independently to
/// each RGB channel.
pub fn enhance_page(img: &DynamicImage, grayscale: bool, contrast_factor: f32) -> DynamicImage {
    if grayscale {
        let mut luma = img.to_luma8();
        for pixel in luma.pixels_mut() {
            pixel[0] = adjust_contrast(pixel[0], contrast_factor);
        }
        DynamicImage::ImageLuma8(luma)
    } else {
        let mut rgb = img.to_rgb8();
        for pixel in rgb.pixels_mut() {
            for channel in pixel.0.iter_mut() {
                *channel = adjust_contrast(*channel, contrast_factor);
            }
        }
        DynamicImage::ImageRgb8(rgb)
    }
}

fn adjust_contrast(value: u8, factor: f32) -> u8 {
    (MIDPOINT + factor * (value as f32 - MIDPOINT))
        .round()
        .clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage};

    fn gradient_image() -> DynamicImage {
        let img = RgbImage::from_fn(16, 4, |x, y| {
            let v = (x * 16 + y) as u8;
            Rgb([v, 255 - v, 128])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn factor_one_is_identity_on_grayscale() {
        let original = gradient_image().to_luma8();
        let enhanced = enhance_page(&gradient_image(), true, 1.0).to_luma8();
        assert_eq!(original.as_raw(), enhanced.as_raw());
    }

    #[test]
    fn factor_zero_collapses_to_midpoint() {
        let enhanced = enhance_page(&gradient_image(), true, 0.0).to_luma8();
        assert!(enhanced.pixels().all(|p| p[0] == 128));
    }

    #[test]
    fn factor_zero_collapses_colour_channels_too() {
        let enhanced = enhance_page(&gradient_image(), false, 0.0).to_rgb8();
        assert!(enhanced.pixels().all(|p| p.0 == [128, 128, 128]));
    }

    #[test]
    fn large_factor_clamps_to_valid_range() {
        let enhanced = enhance_page(&gradient_image(), true, 100.0).to_luma8();
        // Every pixel must stay in range and the extremes must saturate.
        assert!(enhanced.pixels().any(|p| p[0] == 0));
        assert!(enhanced.pixels().any(|p| p[0] == 255));
    }

    #[test]
    fn contrast_widens_dynamic_range() {
        let img = DynamicImage::ImageLuma8(image::GrayImage::from_fn(2, 1, |x, _| {
            Luma([if x == 0 { 118 } else { 138 }])
        }));
        let enhanced = enhance_page(&img, true, 2.0).to_luma8();
        assert_eq!(enhanced.get_pixel(0, 0)[0], 108);
        assert_eq!(enhanced.get_pixel(1, 0)[0], 148);
    }

    #[test]
    fn grayscale_output_is_single_channel() {
        let enhanced = enhance_page(&gradient_image(), true, 2.0);
        assert!(matches!(enhanced, DynamicImage::ImageLuma8(_)));
    }
}
