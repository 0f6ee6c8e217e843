use crate::model::{Dimension, Placement, Position, Rect, Rotation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rectangle waiting to be placed into exactly one bin.
///
/// Width and height are intrinsic and never change. The placement (rotation
/// and anchor) is written once, by [`Bin::commit`](crate::Bin::commit), when
/// the item joins a bin; fit queries only read the item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    placement: Option<Placement>,
}

impl Item {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            placement: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Intrinsic extents, ignoring any rotation.
    pub fn dimension(&self) -> Dimension {
        Dimension::new(self.width, self.height)
    }

    /// Area from intrinsic extents; rotation does not change it.
    pub fn area(&self) -> u64 {
        self.dimension().area()
    }

    /// Extents the item would occupy under `rotation`.
    pub fn dimension_for(&self, rotation: Rotation) -> Dimension {
        rotation.apply(self.dimension())
    }

    /// Rotation-applied extents. Unplaced items report their intrinsic extents.
    pub fn effective_dimension(&self) -> Dimension {
        self.dimension_for(self.rotation())
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn is_placed(&self) -> bool {
        self.placement.is_some()
    }

    pub fn rotation(&self) -> Rotation {
        self.placement.map(|p| p.rotation).unwrap_or_default()
    }

    pub fn position(&self) -> Option<Position> {
        self.placement.map(|p| p.position)
    }

    /// Occupied rectangle inside its bin, if placed.
    pub fn rect(&self) -> Option<Rect> {
        self.placement
            .map(|p| Rect::from_parts(p.position, self.dimension_for(p.rotation)))
    }

    pub(crate) fn place(&mut self, placement: Placement) {
        debug_assert!(
            self.placement.is_none(),
            "item '{}' placed twice",
            self.name
        );
        self.placement = Some(placement);
    }

    /// Drops any placement so the item can be packed again.
    pub(crate) fn reset_placement(&mut self) {
        self.placement = None;
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}x{})", self.name, self.width, self.height)?;
        if let Some(p) = self.placement {
            write!(f, " pos({}) rt{}", p.position, p.rotation)?;
        }
        Ok(())
    }
}
