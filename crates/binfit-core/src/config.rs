use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::model::Rotation;

/// Item orders applied before packing. Every order breaks ties with the
/// configured [`TieBreak`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Largest area first (default; reduces fragmentation).
    AreaDesc,
    MaxSideDesc,
    HeightDesc,
    WidthDesc,
    NameAsc,
    /// Keep insertion order.
    None,
}

impl FromStr for SortOrder {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "area_desc" => Ok(Self::AreaDesc),
            "max_side_desc" => Ok(Self::MaxSideDesc),
            "height_desc" => Ok(Self::HeightDesc),
            "width_desc" => Ok(Self::WidthDesc),
            "name_asc" => Ok(Self::NameAsc),
            "none" => Ok(Self::None),
            _ => Err(()),
        }
    }
}

/// Bin orders applied before packing; escalation always walks bins in this order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BinOrder {
    /// Smallest area first (default; fills small bins before consuming large ones).
    AreaAsc,
    /// Keep insertion order.
    None,
}

impl FromStr for BinOrder {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "area_asc" => Ok(Self::AreaAsc),
            "none" => Ok(Self::None),
            _ => Err(()),
        }
    }
}

/// How two entries that compare equal under the primary order are ranked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Equal entries keep the order they were added in.
    InsertionOrder,
    /// Equal entries are ranked by name, then by insertion order.
    NameAsc,
}

impl FromStr for TieBreak {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "insertion" | "insertion_order" => Ok(Self::InsertionOrder),
            "name" | "name_asc" => Ok(Self::NameAsc),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackerConfig {
    /// Allow 90° rotations when the unrotated orientation leaves the bin.
    #[serde(default = "default_allow_rotation")]
    pub allow_rotation: bool,
    #[serde(default = "default_item_order")]
    pub item_order: SortOrder,
    #[serde(default = "default_bin_order")]
    pub bin_order: BinOrder,
    #[serde(default = "default_tie_break")]
    pub tie_break: TieBreak,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            allow_rotation: default_allow_rotation(),
            item_order: default_item_order(),
            bin_order: default_bin_order(),
            tie_break: default_tie_break(),
        }
    }
}

impl PackerConfig {
    /// Rotations tried at every anchor, in trial order.
    pub fn rotations(&self) -> &'static [Rotation] {
        if self.allow_rotation {
            &Rotation::ALL
        } else {
            &[Rotation::Unrotated]
        }
    }

    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}

fn default_allow_rotation() -> bool {
    true
}
fn default_item_order() -> SortOrder {
    SortOrder::AreaDesc
}
fn default_bin_order() -> BinOrder {
    BinOrder::AreaAsc
}
fn default_tie_break() -> TieBreak {
    TieBreak::InsertionOrder
}

/// Builder for `PackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn allow_rotation(mut self, v: bool) -> Self {
        self.cfg.allow_rotation = v;
        self
    }
    pub fn item_order(mut self, v: SortOrder) -> Self {
        self.cfg.item_order = v;
        self
    }
    pub fn bin_order(mut self, v: BinOrder) -> Self {
        self.cfg.bin_order = v;
        self
    }
    pub fn tie_break(mut self, v: TieBreak) -> Self {
        self.cfg.tie_break = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}
