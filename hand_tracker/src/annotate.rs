//! Debug overlay drawing on camera frames. Clipped to the frame; never fails.

use crate::contours::{Point, Rect};
use crate::{Frame, TrackerError};
use ab_glyph::FontRef;
use image::Rgb;
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_text_mut, text_size};

pub const MARKER_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const OUTLINE_THICKNESS: i32 = 3;
pub const CENTER_RADIUS: i32 = 4;
pub const LABEL_SCALE: f32 = 16.0;
/// Label baseline offset up and left of the centre marker
pub const LABEL_OFFSET: i32 = 10;

static FONT_BYTES: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

/// The bundled label typeface, also used for on-screen text
pub fn label_font() -> Result<FontRef<'static>, TrackerError> {
    Ok(FontRef::try_from_slice(FONT_BYTES)?)
}

/// Outline of the box from `(x, y)` to `(x + width, y + height)`, with the
/// stroke centred on that line
pub fn draw_box(frame: &mut Frame, rect: Rect, color: Rgb<u8>, thickness: i32) {
    let half = thickness / 2;
    for inset in -half..=half {
        let width = rect.width() as i32 + 1 - 2 * inset;
        let height = rect.height() as i32 + 1 - 2 * inset;
        if width <= 0 || height <= 0 {
            continue;
        }
        let ring = Rect::at(rect.left() + inset, rect.top() + inset)
            .of_size(width as u32, height as u32);
        draw_hollow_rect_mut(frame, ring, color);
    }
}

/// Bounding box, centre marker and `x: .., y: ..` label for the detected hand
pub fn mark_detection(frame: &mut Frame, rect: Rect, font: &FontRef) {
    let center = Point::new(
        rect.left() + rect.width() as i32 / 2,
        rect.top() + rect.height() as i32 / 2,
    );
    draw_box(frame, rect, MARKER_COLOR, OUTLINE_THICKNESS);
    draw_filled_circle_mut(frame, (center.x, center.y), CENTER_RADIUS, MARKER_COLOR);

    let label = format!("x: {}, y: {}", center.x, center.y);
    let (_, label_height) = text_size(LABEL_SCALE, font, &label);
    draw_text_mut(
        frame,
        MARKER_COLOR,
        center.x - LABEL_OFFSET,
        center.y - LABEL_OFFSET - label_height as i32,
        LABEL_SCALE,
        font,
        &label,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn green_count(frame: &Frame) -> usize {
        frame.pixels().filter(|p| **p == MARKER_COLOR).count()
    }

    #[test]
    fn test_box_stroke_is_centred_on_edges() {
        let mut frame = Frame::new(20, 20);
        draw_box(&mut frame, Rect::at(2, 2).of_size(10, 10), MARKER_COLOR, 3);
        assert_eq!(*frame.get_pixel(1, 1), MARKER_COLOR);
        assert_eq!(*frame.get_pixel(3, 7), MARKER_COLOR);
        assert_eq!(*frame.get_pixel(12, 12), MARKER_COLOR);
        assert_eq!(*frame.get_pixel(7, 7), BLACK);
        assert_eq!(*frame.get_pixel(14, 14), BLACK);
        assert_eq!(green_count(&frame), 13 * 13 - 7 * 7);
    }

    #[test]
    fn test_drawing_is_clipped() {
        let mut frame = Frame::new(10, 10);
        draw_box(&mut frame, Rect::at(-5, -5).of_size(30, 30), MARKER_COLOR, 3);
        assert_eq!(green_count(&frame), 0, "Outline lies entirely outside");
        draw_filled_circle_mut(&mut frame, (0, 0), CENTER_RADIUS, MARKER_COLOR);
        assert!(green_count(&frame) > 0);
        assert_eq!(*frame.get_pixel(9, 9), BLACK);
    }

    #[test]
    fn test_bundled_font_loads() {
        assert!(label_font().is_ok());
    }

    #[test]
    fn test_mark_detection_draws_box_centre_and_label() {
        let font = label_font().expect("font");
        let mut frame = Frame::new(120, 80);
        mark_detection(&mut frame, Rect::at(30, 40).of_size(20, 20), &font);

        assert_eq!(*frame.get_pixel(40, 50), MARKER_COLOR, "Centre marker");
        assert_eq!(*frame.get_pixel(44, 50), MARKER_COLOR, "Marker radius");
        assert_eq!(*frame.get_pixel(30, 40), MARKER_COLOR, "Box corner");
        assert_eq!(*frame.get_pixel(35, 45), BLACK);

        let label_pixels = frame
            .enumerate_pixels()
            .filter(|(_, y, p)| *y < 38 && p[1] > 0)
            .count();
        assert!(label_pixels > 0, "Label is drawn above the box");
    }
}
