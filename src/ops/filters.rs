// ============================================================================
// REGION BLUR — separable Gaussian applied in place to one rectangle
// ============================================================================

use image::{RgbaImage, imageops};
use rayon::prelude::*;

use crate::regions::BlurRegion;

/// Blur one region of `canvas` in place.
///
/// The rectangle is clipped to the raster; a region entirely outside the
/// image is a no-op. The kernel reads from a window padded by `ceil(3σ)`
/// around the clipped rect so edge pixels see their real surroundings, but
/// only the rect itself is written back. Because the source is the canvas as
/// already composited, a later overlapping region re-blurs the output of
/// earlier ones — that compounding is intentional.
pub fn blur_region(canvas: &mut RgbaImage, region: &BlurRegion) {
    let (img_w, img_h) = canvas.dimensions();

    // Clip to the raster, expanding to whole pixels.
    let x0 = region.x.floor().max(0.0) as u32;
    let y0 = region.y.floor().max(0.0) as u32;
    let x1 = ((region.x + region.width).ceil().max(0.0) as u32).min(img_w);
    let y1 = ((region.y + region.height).ceil().max(0.0) as u32).min(img_h);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    // Strength N matches the behavior of a CSS `blur(Npx)` filter, which is
    // a Gaussian with standard deviation N/2.
    let sigma = region.strength as f32 * 0.5;
    let pad = (sigma * 3.0).ceil() as u32;

    // Padded read window, clipped to the raster.
    let win_x = x0.saturating_sub(pad);
    let win_y = y0.saturating_sub(pad);
    let win_x1 = (x1 + pad).min(img_w);
    let win_y1 = (y1 + pad).min(img_h);
    let win_w = win_x1 - win_x;
    let win_h = win_y1 - win_y;

    let window = imageops::crop_imm(canvas, win_x, win_y, win_w, win_h).to_image();
    let blurred = gaussian_blur(&window, sigma);

    // Write back only the clipped region rows.
    let canvas_stride = img_w as usize * 4;
    let window_stride = win_w as usize * 4;
    let canvas_raw = canvas.as_mut();
    let blurred_raw = blurred.as_raw();
    for y in y0..y1 {
        let src_off = (y - win_y) as usize * window_stride + (x0 - win_x) as usize * 4;
        let dst_off = y as usize * canvas_stride + x0 as usize * 4;
        let len = (x1 - x0) as usize * 4;
        canvas_raw[dst_off..dst_off + len].copy_from_slice(&blurred_raw[src_off..src_off + len]);
    }
}

/// Normalized 1-D Gaussian kernel truncated at `ceil(3σ)`.
fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil() as usize;
    if radius == 0 {
        return vec![1.0];
    }
    let len = radius * 2 + 1;
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (0..len)
        .map(|i| {
            let x = i as f32 - radius as f32;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for v in &mut kernel {
        *v /= sum;
    }
    kernel
}

/// Separable Gaussian blur: horizontal pass then vertical pass, rows in
/// parallel, clamp-to-edge sampling. Works in f32 between the passes to
/// avoid intermediate rounding drift.
fn gaussian_blur(src: &RgbaImage, sigma: f32) -> RgbaImage {
    let w = src.width() as usize;
    let h = src.height() as usize;
    if w == 0 || h == 0 {
        return src.clone();
    }

    let kernel = gaussian_kernel(sigma);
    let input: Vec<f32> = src.as_raw().iter().map(|&b| b as f32).collect();
    let horizontal = convolve_pass(&input, w, h, &kernel, Axis::Horizontal);
    let vertical = convolve_pass(&horizontal, w, h, &kernel, Axis::Vertical);

    let bytes: Vec<u8> = vertical
        .iter()
        .map(|&v| v.round().clamp(0.0, 255.0) as u8)
        .collect();
    RgbaImage::from_raw(w as u32, h as u32, bytes).unwrap_or_else(|| src.clone())
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// One convolution pass over an interleaved RGBA f32 buffer. Output rows are
/// produced in parallel; sampling clamps to the buffer edge.
fn convolve_pass(input: &[f32], w: usize, h: usize, kernel: &[f32], axis: Axis) -> Vec<f32> {
    let radius = kernel.len() / 2;
    let stride = w * 4;
    let mut output = vec![0.0f32; input.len()];

    output.par_chunks_mut(stride).enumerate().for_each(|(y, row_out)| {
        for x in 0..w {
            let mut acc = [0.0f32; 4];
            for (ki, &kv) in kernel.iter().enumerate() {
                let offset = ki as isize - radius as isize;
                let idx = match axis {
                    Axis::Horizontal => {
                        let sx = (x as isize + offset).clamp(0, w as isize - 1) as usize;
                        y * stride + sx * 4
                    }
                    Axis::Vertical => {
                        let sy = (y as isize + offset).clamp(0, h as isize - 1) as usize;
                        sy * stride + x * 4
                    }
                };
                for c in 0..4 {
                    acc[c] += input[idx + c] * kv;
                }
            }
            let out_idx = x * 4;
            row_out[out_idx..out_idx + 4].copy_from_slice(&acc);
        }
    });

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn region(x: f32, y: f32, w: f32, h: f32, strength: u8) -> BlurRegion {
        BlurRegion { x, y, width: w, height: h, strength }
    }

    #[test]
    fn kernel_is_normalized() {
        for strength in [1u8, 5, 20] {
            let kernel = gaussian_kernel(strength as f32 * 0.5);
            let sum: f32 = kernel.iter().sum();
            assert!((sum - 1.0).abs() < 1e-4, "strength {strength}: sum {sum}");
            assert_eq!(kernel.len() % 2, 1);
        }
    }

    #[test]
    fn blur_of_uniform_image_is_identity() {
        let mut img = RgbaImage::from_pixel(32, 32, Rgba([80, 120, 200, 255]));
        let expected = img.clone();
        blur_region(&mut img, &region(4.0, 4.0, 20.0, 20.0, 10));
        assert_eq!(img, expected);
    }

    #[test]
    fn blur_writes_only_inside_the_region() {
        // Sharp checkerboard so blurring visibly changes pixels.
        let mut img = RgbaImage::from_fn(64, 64, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let before = img.clone();
        blur_region(&mut img, &region(16.0, 16.0, 16.0, 16.0, 8));

        let mut changed_inside = false;
        for (x, y, pixel) in img.enumerate_pixels() {
            let inside = (16..32).contains(&x) && (16..32).contains(&y);
            if inside {
                changed_inside |= pixel != before.get_pixel(x, y);
            } else {
                assert_eq!(
                    pixel,
                    before.get_pixel(x, y),
                    "pixel ({x},{y}) outside the region changed"
                );
            }
        }
        assert!(changed_inside, "blur had no effect inside the region");
    }

    #[test]
    fn region_outside_image_is_a_no_op() {
        let mut img = RgbaImage::from_pixel(16, 16, Rgba([10, 20, 30, 255]));
        let expected = img.clone();
        blur_region(&mut img, &region(100.0, 100.0, 50.0, 50.0, 5));
        blur_region(&mut img, &region(-40.0, -40.0, 20.0, 20.0, 5));
        assert_eq!(img, expected);
    }

    #[test]
    fn region_overlapping_the_edge_is_clipped() {
        let mut img = RgbaImage::from_fn(20, 20, |x, _| Rgba([(x * 12) as u8, 0, 0, 255]));
        // Extends past the right/bottom edges; must clip, not panic.
        blur_region(&mut img, &region(15.0, 15.0, 30.0, 30.0, 6));
        assert_eq!(img.dimensions(), (20, 20));
    }
}
