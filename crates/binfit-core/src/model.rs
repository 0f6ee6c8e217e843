use serde::{Deserialize, Serialize};
use std::fmt;

/// Width/height pair in area units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Dimension {
    pub width: u32,
    pub height: u32,
}

impl Dimension {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
    /// The same extents with width and height swapped.
    pub fn rotated(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
    pub fn area(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }
}

/// Anchor corner of a placed bounding box.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Axis-aligned orientation of an item inside a bin.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    /// Intrinsic `(width, height)`.
    #[default]
    Unrotated,
    /// Turned 90°: `(height, width)`.
    Rotated,
}

impl Rotation {
    /// Trial order used by every placement attempt; unrotated always wins a tie.
    pub const ALL: [Rotation; 2] = [Rotation::Unrotated, Rotation::Rotated];

    pub fn apply(self, dim: Dimension) -> Dimension {
        match self {
            Rotation::Unrotated => dim,
            Rotation::Rotated => dim.rotated(),
        }
    }

    pub fn is_rotated(self) -> bool {
        matches!(self, Rotation::Rotated)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rotation::Unrotated => f.write_str("(w,h)"),
            Rotation::Rotated => f.write_str("(h,w)"),
        }
    }
}

/// Where and how an item sits once it has joined a bin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Placement {
    pub rotation: Rotation,
    pub position: Position,
}

impl Placement {
    pub fn new(rotation: Rotation, position: Position) -> Self {
        Self { rotation, position }
    }
}

/// Axis-aligned rectangle. `x,y` is the anchor corner; `w,h` are the rotation-applied extents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_parts(position: Position, dim: Dimension) -> Self {
        Self::new(position.x, position.y, dim.width, dim.height)
    }

    /// Exclusive right edge (`x + w`).
    pub fn right(&self) -> u64 {
        self.x as u64 + self.w as u64
    }

    /// Exclusive far edge on the y axis (`y + h`).
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.h as u64
    }

    /// True if `self` lies entirely within a `width x height` container anchored at the origin.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width as u64 && self.bottom() <= height as u64
    }

    /// Center-distance overlap test.
    ///
    /// Centers are `pos + extent / 2` and the threshold per axis is
    /// `(a.extent + b.extent) / 2`, both with integer (floor) division. Odd
    /// extents therefore lose half a unit; touching edges never overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_center = (
            self.x as i64 + (self.w / 2) as i64,
            self.y as i64 + (self.h / 2) as i64,
        );
        let b_center = (
            other.x as i64 + (other.w / 2) as i64,
            other.y as i64 + (other.h / 2) as i64,
        );

        let size_avg = (
            (self.w as i64 + other.w as i64) / 2,
            (self.h as i64 + other.h as i64) / 2,
        );

        let x_overlap = (b_center.0 - a_center.0).abs() < size_avg.0;
        let y_overlap = (b_center.1 - a_center.1).abs() < size_avg.1;

        x_overlap && y_overlap
    }
}

/// Statistics about how well a packing run used its bins.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PackStats {
    /// Bins that received at least one item.
    pub bins_used: usize,
    /// All bins known to the packer.
    pub bins_total: usize,
    /// Items that ended up inside a bin.
    pub items_placed: usize,
    /// Items that fit no bin.
    pub items_unfit: usize,
    /// Items still waiting (non-zero only before `pack`).
    pub items_pending: usize,
    /// Placed items that were turned 90°.
    pub items_rotated: usize,
    /// Sum of the areas of the used bins.
    pub used_bin_area: u64,
    /// Sum of the areas of placed items.
    pub placed_item_area: u64,
    /// placed_item_area / used_bin_area (0.0 to 1.0).
    pub occupancy: f64,
}

impl PackStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Bins: {}/{}, Placed: {}, Unfit: {}, Rotated: {}, \
             Occupancy: {:.2}%, Used Area: {}, Item Area: {}",
            self.bins_used,
            self.bins_total,
            self.items_placed,
            self.items_unfit,
            self.items_rotated,
            self.occupancy * 100.0,
            self.used_bin_area,
            self.placed_item_area,
        )
    }

    /// Unused area inside the used bins.
    pub fn wasted_area(&self) -> u64 {
        self.used_bin_area.saturating_sub(self.placed_item_area)
    }

    /// Wasted area as a percentage (0.0 to 100.0).
    pub fn waste_percentage(&self) -> f64 {
        if self.used_bin_area > 0 {
            (self.wasted_area() as f64 / self.used_bin_area as f64) * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0, 0, 20, 10);
        let b = Rect::new(20, 0, 10, 5);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        let c = Rect::new(0, 10, 20, 10);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn nested_and_crossing_rects_overlap() {
        let big = Rect::new(0, 0, 80, 80);
        assert!(big.overlaps(&Rect::new(10, 10, 5, 5)));
        assert!(big.overlaps(&Rect::new(70, 70, 20, 20)));
        assert!(Rect::new(80, 0, 20, 40).overlaps(&Rect::new(80, 0, 20, 10)));
    }

    #[test]
    fn odd_extents_truncate_half_units() {
        // One shared unit column is missed: centers 1 and 3, threshold (3 + 2) / 2 = 2.
        let a = Rect::new(0, 0, 3, 3);
        let b = Rect::new(2, 0, 2, 3);
        assert!(!a.overlaps(&b));
        // Identical rectangles always overlap.
        assert!(a.overlaps(&a));
    }

    #[test]
    fn rotation_swaps_extents() {
        let d = Dimension::new(40, 20);
        assert_eq!(Rotation::Unrotated.apply(d), d);
        assert_eq!(Rotation::Rotated.apply(d), Dimension::new(20, 40));
        assert_eq!(d.area(), d.rotated().area());
    }

    #[test]
    fn fits_within_is_inclusive_of_far_edge() {
        assert!(Rect::new(80, 0, 20, 40).fits_within(100, 100));
        assert!(!Rect::new(81, 0, 20, 40).fits_within(100, 100));
    }
}
