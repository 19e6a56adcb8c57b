use pathstep_core::Point;

/// Minimal pathfinding interface: provides neighbor enumeration.
pub trait Pather {
    /// Append the traversable neighbors of `p` into `buf`. The caller clears
    /// `buf` before calling. Enumeration order decides tie-breaking.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}
