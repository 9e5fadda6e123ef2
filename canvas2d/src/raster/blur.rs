//! Two-pass gaussian blur, the realisation of the blur mask filter used by
//! shadow passes.

use tiny_skia::Pixmap;

fn gaussian_kernel(sigma: f32) -> (Vec<f32>, usize) {
    let radius = (sigma.abs() * 3.0).ceil() as usize;
    if radius == 0 {
        return (Vec::new(), 0);
    }

    let sigma_sq = sigma * sigma;
    let factor = 1.0 / (2.0 * std::f32::consts::PI * sigma_sq);
    let mut kernel = Vec::with_capacity(radius * 2 + 1);
    let mut sum = 0.0;
    for i in 0..=radius * 2 {
        let x = i as f32 - radius as f32;
        let value = factor * (-x * x / (2.0 * sigma_sq)).exp();
        kernel.push(value);
        sum += value;
    }
    if sum != 0.0 {
        for k in &mut kernel {
            *k /= sum;
        }
    }
    (kernel, radius)
}

/// Blur `pixmap` in place. Channels are premultiplied, so blurring them
/// directly composites correctly afterwards.
pub(crate) fn gaussian_blur(pixmap: &mut Pixmap, sigma: f32) {
    let (kernel, radius) = gaussian_kernel(sigma);
    if kernel.is_empty() {
        return;
    }

    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;
    let src: Vec<[f32; 4]> = pixmap
        .pixels()
        .iter()
        .map(|p| {
            [
                p.red() as f32,
                p.green() as f32,
                p.blue() as f32,
                p.alpha() as f32,
            ]
        })
        .collect();

    let mut temp = vec![[0.0f32; 4]; src.len()];
    let mut dst = vec![[0.0f32; 4]; src.len()];

    // horizontal pass, clamping samples to the row
    for y in 0..height {
        for x in 0..width {
            let mut accum = [0.0f32; 4];
            for (i, weight) in kernel.iter().enumerate() {
                let offset = i as isize - radius as isize;
                let cx = (x as isize + offset).clamp(0, width as isize - 1) as usize;
                let sample = src[y * width + cx];
                for (acc, s) in accum.iter_mut().zip(sample.iter()) {
                    *acc += s * weight;
                }
            }
            temp[y * width + x] = accum;
        }
    }

    // vertical pass
    for y in 0..height {
        for x in 0..width {
            let mut accum = [0.0f32; 4];
            for (i, weight) in kernel.iter().enumerate() {
                let offset = i as isize - radius as isize;
                let cy = (y as isize + offset).clamp(0, height as isize - 1) as usize;
                let sample = temp[cy * width + x];
                for (acc, s) in accum.iter_mut().zip(sample.iter()) {
                    *acc += s * weight;
                }
            }
            dst[y * width + x] = accum;
        }
    }

    for (pixel, vals) in pixmap.pixels_mut().iter_mut().zip(dst.iter()) {
        let a = vals[3].round().clamp(0.0, 255.0) as u8;
        // premultiplied channels can never exceed alpha
        let r = vals[0].round().clamp(0.0, a as f32) as u8;
        let g = vals[1].round().clamp(0.0, a as f32) as u8;
        let b = vals[2].round().clamp(0.0, a as f32) as u8;
        *pixel = tiny_skia::PremultipliedColorU8::from_rgba(r, g, b, a)
            .unwrap_or(tiny_skia::PremultipliedColorU8::TRANSPARENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sigma_is_identity() {
        let mut pixmap = Pixmap::new(8, 8).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(255, 0, 0, 255));
        let before = pixmap.data().to_vec();
        gaussian_blur(&mut pixmap, 0.0);
        assert_eq!(pixmap.data(), &before[..]);
    }

    #[test]
    fn test_blur_spreads_energy() {
        let mut pixmap = Pixmap::new(9, 9).unwrap();
        // single opaque pixel in the middle
        let idx = 4 * 9 + 4;
        pixmap.pixels_mut()[idx] =
            tiny_skia::PremultipliedColorU8::from_rgba(255, 255, 255, 255).unwrap();
        gaussian_blur(&mut pixmap, 1.0);
        let center = pixmap.pixels()[idx];
        let neighbor = pixmap.pixels()[idx + 1];
        assert!(center.alpha() < 255);
        assert!(neighbor.alpha() > 0);
        assert!(center.alpha() >= neighbor.alpha());
    }
}
