//! Near-square grid placement.

use cirrus_core::geometry::{Point, Size};

/// Returns the top-left position of every item, in input order.
///
/// Items fill rows of `ceil(sqrt(n))` columns from `origin`. Within a row,
/// items are packed left to right; each row is as tall as its tallest item.
pub(super) fn arrange(sizes: &[Size], origin: Point, spacing: f32) -> Vec<Point> {
    let columns = column_count(sizes.len());
    let mut positions = Vec::with_capacity(sizes.len());

    let mut y = origin.y();
    for row in sizes.chunks(columns) {
        let mut x = origin.x();
        for size in row {
            positions.push(Point::new(x, y));
            x += size.width() + spacing;
        }
        let row_height = row.iter().map(|size| size.height()).fold(0.0, f32::max);
        y += row_height + spacing;
    }
    positions
}

fn column_count(items: usize) -> usize {
    ((items as f64).sqrt().ceil() as usize).max(1)
}
