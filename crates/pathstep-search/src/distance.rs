use pathstep_core::Point;

/// Manhattan (L1) distance between two points.
///
/// On an obstacle-free grid with 4-way movement this is the exact
/// shortest-path distance.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
