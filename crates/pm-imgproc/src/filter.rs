use image::RgbImage;
use image::imageops::FilterType;
use pm_core::{Error, Image};

use crate::convert::{from_gray_image, to_gray_image};

/// Gaussian blur; a non-positive `sigma` returns the input unchanged.
pub fn gaussian_blur(img: &Image<u8>, sigma: f32) -> Result<Image<u8>, Error> {
    if sigma.is_nan() || sigma <= 0.0 || img.is_empty() {
        return Ok(img.clone());
    }
    let gray = to_gray_image(img)?;
    Ok(from_gray_image(imageproc::filter::gaussian_blur_f32(
        &gray, sigma,
    )))
}

/// 3x3 Sobel derivative along `y`, so horizontal edges respond.
pub fn vertical_gradient(img: &Image<u8>) -> Result<Image<f32>, Error> {
    let gray = to_gray_image(img)?;
    let gy = imageproc::gradients::vertical_sobel(&gray);
    let data = gy.pixels().map(|p| p.0[0] as f32).collect();
    Image::from_vec(img.width(), img.height(), data)
}

/// Uniform bilinear magnification by an integer factor.
pub fn magnify_rgb(rgb: &RgbImage, scale: u32) -> RgbImage {
    let (w, h) = rgb.dimensions();
    image::imageops::resize(rgb, w * scale, h * scale, FilterType::Triangle)
}
