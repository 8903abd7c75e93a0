use crate::Mask;
use image::Luma;
use imageproc::contrast::{self, ThresholdType};
use imageproc::filter;
use imageproc::morphology::{grayscale_dilate, grayscale_erode, Mask as Kernel};

/// Largest kernel side a structuring element can have
pub const MAX_KERNEL_SIDE: u32 = 511;

/// Morphological closing with a `width` x `height` rectangle.
///
/// Even-sized rectangles have no centre pixel, so the erosion uses the
/// reflected anchor of the dilation; a closed rectangle stays where it was.
pub struct Closing {
    dilate: Kernel,
    erode: Kernel,
}

impl Closing {
    /// Sides must lie in `1..=MAX_KERNEL_SIDE`
    pub fn rect(width: u32, height: u32) -> Self {
        let ones = Mask::from_pixel(width, height, Luma([255]));
        let (ax, ay) = (width / 2, height / 2);
        Self {
            dilate: Kernel::from_image(&ones, ax as u8, ay as u8),
            erode: Kernel::from_image(&ones, (width - 1 - ax) as u8, (height - 1 - ay) as u8),
        }
    }

    /// Fills gaps narrower than the kernel inside foreground regions
    pub fn apply(&self, mask: &Mask) -> Mask {
        grayscale_erode(&grayscale_dilate(mask, &self.dilate), &self.erode)
    }
}

/// Median filter over a `ksize` x `ksize` window
pub fn median_blur(mask: &Mask, ksize: u32) -> Mask {
    let radius = ksize / 2;
    filter::median_filter(mask, radius, radius)
}

/// Binary threshold: strictly above `thresh` becomes 255, everything else 0
pub fn threshold(mask: &Mask, thresh: u8) -> Mask {
    contrast::threshold(mask, thresh, ThresholdType::Binary)
}
