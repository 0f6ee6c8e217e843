use crate::item::Item;
use crate::model::{Dimension, Placement, Position, Rect, Rotation};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Direction in which a placed item offers a new anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Width,
    Height,
}

/// A fixed-size container that owns the items placed into it.
///
/// Items are kept in placement order, which is also the order overlap tests
/// and anchor generation walk them in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bin {
    pub name: String,
    width: u32,
    height: u32,
    #[serde(default, deserialize_with = "placed_items")]
    items: Vec<Item>,
}

/// Every item inside a bin must carry a placement, or it would stop acting
/// as an obstacle for later fit queries.
fn placed_items<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Item>, D::Error> {
    let items = Vec::<Item>::deserialize(deserializer)?;
    if let Some(item) = items.iter().find(|i| !i.is_placed()) {
        return Err(serde::de::Error::custom(format!(
            "item '{}' inside a bin has no placement",
            item.name
        )));
    }
    Ok(items)
}

impl Bin {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            items: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimension(&self) -> Dimension {
        Dimension::new(self.width, self.height)
    }

    pub fn area(&self) -> u64 {
        self.dimension().area()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Area covered by placed items.
    pub fn used_area(&self) -> u64 {
        self.items.iter().map(Item::area).sum()
    }

    /// Checks whether `item` can sit at `anchor` without touching the bin.
    ///
    /// Rotations are tried in the given order, but only the first one that
    /// stays inside the bin is tested for overlap: a collision at this anchor
    /// rejects the anchor outright instead of falling through to the next
    /// rotation.
    pub fn fit_at(
        &self,
        item: &Item,
        anchor: Position,
        rotations: &[Rotation],
    ) -> Option<Placement> {
        let rotation = rotations.iter().copied().find(|&rotation| {
            Rect::from_parts(anchor, item.dimension_for(rotation))
                .fits_within(self.width, self.height)
        })?;

        let candidate = Rect::from_parts(anchor, item.dimension_for(rotation));
        let collides = self
            .items
            .iter()
            .filter_map(Item::rect)
            .any(|placed| placed.overlaps(&candidate));

        if collides {
            None
        } else {
            Some(Placement::new(rotation, anchor))
        }
    }

    /// Appends `item` with the given placement. The placement must come from
    /// [`fit_at`](Self::fit_at) on this bin with no commits in between.
    pub fn commit(&mut self, mut item: Item, placement: Placement) {
        debug_assert!(
            Rect::from_parts(placement.position, item.dimension_for(placement.rotation))
                .fits_within(self.width, self.height),
            "placement of '{}' exceeds bin '{}'",
            item.name,
            self.name
        );
        item.place(placement);
        self.items.push(item);
    }

    /// [`fit_at`](Self::fit_at) followed by [`commit`](Self::commit). On
    /// failure the item is handed back untouched.
    pub fn try_place(
        &mut self,
        item: Item,
        anchor: Position,
        rotations: &[Rotation],
    ) -> Result<(), Item> {
        match self.fit_at(&item, anchor, rotations) {
            Some(placement) => {
                self.commit(item, placement);
                Ok(())
            }
            None => Err(item),
        }
    }

    /// Corner anchors offered by placed items.
    ///
    /// All width-extension anchors `(x + width, y)` come first, then all
    /// height-extension anchors `(x, y + height)`, each in placement order.
    /// Extents are the placed item's intrinsic ones, not the rotated ones.
    pub fn candidate_anchors(&self) -> impl Iterator<Item = Position> + '_ {
        [Axis::Width, Axis::Height].into_iter().flat_map(move |axis| {
            self.items.iter().filter_map(move |placed| {
                let pos = placed.position()?;
                let anchor = match axis {
                    Axis::Width => Position::new(pos.x.checked_add(placed.width)?, pos.y),
                    Axis::Height => Position::new(pos.x, pos.y.checked_add(placed.height)?),
                };
                Some(anchor)
            })
        })
    }

    /// First placement for `item` in this bin: the origin when the bin is
    /// empty, otherwise the first candidate anchor that accepts it.
    pub fn find_placement(&self, item: &Item, rotations: &[Rotation]) -> Option<Placement> {
        if self.items.is_empty() {
            return self.fit_at(item, Position::ORIGIN, rotations);
        }
        self.candidate_anchors()
            .find_map(|anchor| self.fit_at(item, anchor, rotations))
    }
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}x{})", self.name, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(bin: &mut Bin, name: &str, w: u32, h: u32, at: (u32, u32)) {
        let item = Item::new(name, w, h);
        bin.try_place(item, Position::new(at.0, at.1), &Rotation::ALL)
            .expect("fixture placement must succeed");
    }

    #[test]
    fn fit_at_prefers_unrotated() {
        let bin = Bin::new("b", 100, 100);
        let p = bin
            .fit_at(&Item::new("sq", 10, 10), Position::ORIGIN, &Rotation::ALL)
            .unwrap();
        assert_eq!(p.rotation, Rotation::Unrotated);
    }

    #[test]
    fn fit_at_rotates_when_unrotated_exceeds_bounds() {
        let mut bin = Bin::new("b", 100, 100);
        placed(&mut bin, "big", 80, 80, (0, 0));
        let p = bin
            .fit_at(&Item::new("bar", 40, 20), Position::new(80, 0), &Rotation::ALL)
            .unwrap();
        assert_eq!(p, Placement::new(Rotation::Rotated, Position::new(80, 0)));
    }

    #[test]
    fn overlap_does_not_fall_through_to_other_rotation() {
        let mut bin = Bin::new("b", 100, 100);
        placed(&mut bin, "right", 10, 10, (30, 0));
        let item = Item::new("probe", 30, 10);
        let anchor = Position::new(15, 0);
        // Unrotated is in bounds and collides, so the anchor is rejected even
        // though the rotated orientation would be free.
        assert_eq!(bin.fit_at(&item, anchor, &Rotation::ALL), None);
        assert_eq!(
            bin.fit_at(&item, anchor, &[Rotation::Rotated]),
            Some(Placement::new(Rotation::Rotated, anchor))
        );
    }

    #[test]
    fn failed_try_place_returns_item_untouched() {
        let mut bin = Bin::new("b", 10, 10);
        let item = Item::new("too-big", 20, 5);
        let back = bin
            .try_place(item.clone(), Position::ORIGIN, &Rotation::ALL)
            .unwrap_err();
        assert_eq!(back, item);
        assert!(!back.is_placed());
        assert!(bin.is_empty());
    }

    #[test]
    fn candidate_anchors_walk_width_axis_first() {
        let mut bin = Bin::new("b", 100, 100);
        placed(&mut bin, "a", 20, 10, (0, 0));
        placed(&mut bin, "b", 10, 5, (20, 0));
        let anchors: Vec<_> = bin.candidate_anchors().collect();
        assert_eq!(
            anchors,
            vec![
                Position::new(20, 0),
                Position::new(30, 0),
                Position::new(0, 10),
                Position::new(20, 5),
            ]
        );
    }

    #[test]
    fn candidate_anchors_use_intrinsic_extents_of_rotated_items() {
        let mut bin = Bin::new("b", 100, 100);
        placed(&mut bin, "big", 80, 80, (0, 0));
        placed(&mut bin, "bar", 40, 20, (80, 0));
        assert!(bin.items()[1].rotation().is_rotated());
        let anchors: Vec<_> = bin.candidate_anchors().collect();
        assert_eq!(anchors[1], Position::new(120, 0));
        assert_eq!(anchors[3], Position::new(80, 20));
    }

    #[test]
    fn deserialized_bin_keeps_placed_items_as_obstacles() {
        let mut bin = Bin::new("b", 50, 50);
        placed(&mut bin, "first", 10, 10, (0, 0));
        let json = serde_json::to_string(&bin).unwrap();
        let back: Bin = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bin);
        assert_eq!(back.fit_at(&Item::new("x", 5, 5), Position::ORIGIN, &Rotation::ALL), None);
    }

    #[test]
    fn deserializing_bin_with_unplaced_item_fails() {
        let json = serde_json::json!({
            "name": "b",
            "width": 50,
            "height": 50,
            "items": [{ "name": "loose", "width": 5, "height": 5 }],
        });
        let err = serde_json::from_value::<Bin>(json).unwrap_err();
        assert!(err.to_string().contains("loose"));
        let empty: Bin = serde_json::from_str(r#"{"name":"b","width":50,"height":50}"#).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn find_placement_uses_origin_only_for_empty_bins() {
        let bin = Bin::new("b", 50, 50);
        assert_eq!(
            bin.find_placement(&Item::new("x", 5, 5), &Rotation::ALL),
            Some(Placement::new(Rotation::Unrotated, Position::ORIGIN))
        );

        let mut bin = Bin::new("b", 50, 50);
        placed(&mut bin, "first", 10, 10, (0, 0));
        assert_eq!(
            bin.find_placement(&Item::new("x", 5, 5), &Rotation::ALL),
            Some(Placement::new(Rotation::Unrotated, Position::new(10, 0)))
        );
    }
}
