use crate::Mask;
use imageproc::contours::BorderType;
use imageproc::geometry::contour_area;

pub use imageproc::rect::Rect;

pub type Point = imageproc::point::Point<i32>;
pub type Contour = imageproc::contours::Contour<i32>;

/// Bounding box of a point set. Inclusive of the last row and column.
pub fn bounding_rect(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let (mut min, mut max) = (*first, *first);
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    let width = (max.x - min.x + 1) as u32;
    let height = (max.y - min.y + 1) as u32;
    Some(Rect::at(min.x, min.y).of_size(width, height))
}

/// A candidate hand: the bounding box and area of one outer border
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blob {
    pub rect: Rect,
    /// Polygon area through pixel centres; a one-pixel-wide shape has none
    pub area: f64,
}

impl Blob {
    pub fn from_contour(contour: &Contour) -> Option<Self> {
        Some(Self {
            rect: bounding_rect(&contour.points)?,
            area: contour_area(&contour.points).abs(),
        })
    }

    pub fn center(&self) -> Point {
        let rect = self.rect;
        Point::new(
            rect.left() + rect.width() as i32 / 2,
            rect.top() + rect.height() as i32 / 2,
        )
    }
}

/// Outer borders of every 8-connected foreground component, in raster order
/// of their first pixel. Hole borders are dropped.
pub fn find_contours(mask: &Mask) -> Vec<Contour> {
    imageproc::contours::find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .collect()
}

/// The largest contour by area; on a tie the earliest one wins
pub fn largest_blob(contours: &[Contour]) -> Option<Blob> {
    let mut best: Option<Blob> = None;
    for blob in contours.iter().filter_map(Blob::from_contour) {
        match best {
            Some(b) if blob.area <= b.area => {}
            _ => best = Some(blob),
        }
    }
    best
}
