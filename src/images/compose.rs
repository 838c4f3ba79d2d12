use image::{imageops, imageops::FilterType, Rgba, RgbaImage};

use super::stack_blur;

pub const BLUR_RADIUS: u32 = 12;

/// Fraction of the image height, measured from the bottom edge, that gets
/// blurred and shaded for text legibility.
pub const BOTTOM_SPLIT_FRACTION: f32 = 0.435;

/// Placeholder fill used when cover art cannot be fetched or decoded.
const PLACEHOLDER_COLOR: Rgba<u8> = Rgba([26, 26, 26, 255]);

/// Blurs the bottom `split_fraction` of the image and composites a
/// black-to-transparent gradient over the blurred band. The rest of the image
/// is left pixel-identical; output dimensions equal input dimensions.
pub fn apply_bottom_blur_and_gradient(
    original: &RgbaImage,
    radius: u32,
    split_fraction: f32,
) -> RgbaImage {
    let width = original.width();
    let height = original.height();
    let mut result = original.clone();
    if width == 0 || height == 0 {
        return result;
    }

    let split_fraction = split_fraction.clamp(0.0, 1.0);
    let split_y = (height as f32 * (1.0 - split_fraction)) as u32;
    if split_y >= height {
        return result;
    }
    let section_height = height - split_y;

    let mut section = imageops::crop_imm(original, 0, split_y, width, section_height).to_image();
    stack_blur(&mut section, radius);
    imageops::replace(&mut result, &section, 0, i64::from(split_y));

    // Gradient: transparent at the split line, solid black at the bottom edge.
    // Composited over RGB only; pixel alpha stays what it was.
    for y in split_y..height {
        let shade = ((y - split_y) as f32 + 0.5) / section_height as f32;
        let keep = 1.0 - shade.clamp(0.0, 1.0);
        for x in 0..width {
            let pixel = result.get_pixel_mut(x, y);
            let Rgba([r, g, b, a]) = *pixel;
            *pixel = Rgba([
                (r as f32 * keep).round() as u8,
                (g as f32 * keep).round() as u8,
                (b as f32 * keep).round() as u8,
                a,
            ]);
        }
    }

    result
}

/// Scales so the target rectangle is fully covered, then crops the overflow
/// evenly from both sides.
pub fn center_crop(image: &RgbaImage, target_width: u32, target_height: u32) -> RgbaImage {
    if image.width() == 0 || image.height() == 0 || target_width == 0 || target_height == 0 {
        return image.clone();
    }

    let scale = f64::max(
        target_width as f64 / image.width() as f64,
        target_height as f64 / image.height() as f64,
    );
    let scaled_width = ((image.width() as f64 * scale).ceil() as u32).max(target_width);
    let scaled_height = ((image.height() as f64 * scale).ceil() as u32).max(target_height);

    let resized = imageops::resize(image, scaled_width, scaled_height, FilterType::Triangle);
    let x = (scaled_width - target_width) / 2;
    let y = (scaled_height - target_height) / 2;
    imageops::crop_imm(&resized, x, y, target_width, target_height).to_image()
}

/// Scales every pixel's alpha by `opacity` in `[0, 1]`.
pub fn adjust_opacity(image: &RgbaImage, opacity: f32) -> RgbaImage {
    let factor = opacity.clamp(0.0, 1.0);
    let mut result = image.clone();
    for pixel in result.pixels_mut() {
        pixel.0[3] = (pixel.0[3] as f32 * factor).round() as u8;
    }
    result
}

pub fn solid_placeholder(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, PLACEHOLDER_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_art(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                170,
                200u8.saturating_sub((y % 32) as u8),
            ])
        })
    }

    #[test]
    fn output_dimensions_match_input() {
        let art = gradient_art(100, 60);
        let processed = apply_bottom_blur_and_gradient(&art, BLUR_RADIUS, BOTTOM_SPLIT_FRACTION);
        assert_eq!((processed.width(), processed.height()), (100, 60));
    }

    #[test]
    fn top_region_is_pixel_identical() {
        let art = gradient_art(80, 80);
        let processed = apply_bottom_blur_and_gradient(&art, BLUR_RADIUS, BOTTOM_SPLIT_FRACTION);

        let split_y = (80.0 * (1.0 - BOTTOM_SPLIT_FRACTION)) as u32;
        for y in 0..split_y {
            for x in 0..80 {
                assert_eq!(processed.get_pixel(x, y), art.get_pixel(x, y), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn alpha_channel_is_preserved_everywhere() {
        let art = gradient_art(64, 48);
        let processed = apply_bottom_blur_and_gradient(&art, BLUR_RADIUS, BOTTOM_SPLIT_FRACTION);

        for (original, processed) in art.pixels().zip(processed.pixels()) {
            assert_eq!(original.0[3], processed.0[3]);
        }
    }

    #[test]
    fn bottom_edge_is_shaded_towards_black() {
        let art = RgbaImage::from_pixel(40, 40, Rgba([200, 200, 200, 255]));
        let processed = apply_bottom_blur_and_gradient(&art, BLUR_RADIUS, BOTTOM_SPLIT_FRACTION);

        let bottom = processed.get_pixel(20, 39);
        assert!(bottom.0[0] < 30, "bottom row should be nearly black, got {bottom:?}");
        assert_eq!(bottom.0[3], 255);
    }

    #[test]
    fn zero_split_fraction_is_identity() {
        let art = gradient_art(30, 30);
        let processed = apply_bottom_blur_and_gradient(&art, BLUR_RADIUS, 0.0);
        assert_eq!(processed, art);
    }

    #[test]
    fn center_crop_produces_target_dimensions() {
        let art = gradient_art(300, 500);
        let cropped = center_crop(&art, 1000, 563);
        assert_eq!((cropped.width(), cropped.height()), (1000, 563));
    }

    #[test]
    fn center_crop_is_identity_on_matching_dimensions() {
        let art = gradient_art(64, 64);
        let cropped = center_crop(&art, 64, 64);
        assert_eq!((cropped.width(), cropped.height()), (64, 64));
    }

    #[test]
    fn adjust_opacity_scales_alpha_only() {
        let art = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 200]));
        let dimmed = adjust_opacity(&art, 0.5);
        assert_eq!(*dimmed.get_pixel(0, 0), Rgba([10, 20, 30, 100]));
    }

    #[test]
    fn placeholder_is_opaque() {
        let placeholder = solid_placeholder(8, 8);
        assert_eq!(placeholder.get_pixel(3, 3).0[3], 255);
    }
}
