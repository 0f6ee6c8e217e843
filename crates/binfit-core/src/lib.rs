//! Core library for packing rectangular items into rectangular bins.
//!
//! - Algorithm: greedy corner-anchor placement. Items go largest first, bins
//!   smallest first; each item tries the corners offered by already placed
//!   items, unrotated before rotated, and escalates to a strictly larger bin
//!   when the active bin has no room.
//! - Items that no bin accepts end up in the `unfit` list; packing itself
//!   never fails.
//! - Data model is serde-serializable; `PackJob` reads JSON/YAML job files.
//!
//! Quick example:
//! ```
//! use binfit_core::{Bin, Item, Packer};
//!
//! let mut packer = Packer::new();
//! packer.add_bin(Bin::new("Small Bin", 100, 100));
//! packer.add_items([
//!     Item::new("Item 1", 2, 2),
//!     Item::new("Item 2", 10, 5),
//!     Item::new("Item 3", 20, 10),
//!     Item::new("Item 4", 5, 5),
//! ]);
//! packer.pack();
//! assert!(packer.unfit().is_empty());
//! print!("{}", binfit_core::display_packed(packer.bins()));
//! ```

pub mod bin;
pub mod config;
pub mod error;
pub mod export;
pub mod item;
pub mod job;
pub mod model;
pub mod packer;

pub use bin::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use item::*;
pub use job::*;
pub use model::*;
pub use packer::{ItemState, PackOutcome, Packer};

/// Convenience prelude for common types and functions.
/// Importing `binfit_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{BinOrder, PackerConfig, PackerConfigBuilder, SortOrder, TieBreak};
    pub use crate::model::{Dimension, PackStats, Placement, Position, Rect, Rotation};
    pub use crate::{
        Bin, BinFitError, BinSpec, Item, ItemSpec, ItemState, PackJob, PackOutcome, Packer,
        pack_job,
    };
}
