use image::{GrayImage, RgbImage};
use pm_core::{Error, Image};

/// Luma conversion with the `image` crate's Rec. 601 weights.
pub fn gray_from_rgb(rgb: &RgbImage) -> Image<u8> {
    let gray = image::imageops::grayscale(rgb);
    from_gray_image(gray)
}

pub fn from_gray_image(gray: GrayImage) -> Image<u8> {
    let (w, h) = gray.dimensions();
    Image::from_vec(w as usize, h as usize, gray.into_raw())
        .expect("GrayImage buffer always matches its dimensions")
}

pub fn to_gray_image(img: &Image<u8>) -> Result<GrayImage, Error> {
    GrayImage::from_raw(img.width() as u32, img.height() as u32, img.data().to_vec()).ok_or(
        Error::SizeMismatch {
            expected: img.width() * img.height(),
            actual: img.data().len(),
        },
    )
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::{gray_from_rgb, to_gray_image};

    #[test]
    fn gray_roundtrip_keeps_extent() {
        let mut rgb = RgbImage::new(4, 3);
        rgb.put_pixel(1, 2, Rgb([255, 255, 255]));

        let gray = gray_from_rgb(&rgb);
        assert_eq!(gray.dimensions(), (4, 3));
        assert_eq!(gray.data()[2 * 4 + 1], 255);
        assert_eq!(gray.data()[0], 0);

        let back = to_gray_image(&gray).expect("matching buffer");
        assert_eq!(back.dimensions(), (4, 3));
    }
}
