use serde::{Deserialize, Serialize};

use crate::model::Placement;

/// Where a single item stands while the packer works on it.
///
/// Bin references are indices into the packer's sorted bin list. Only
/// [`Placed`](ItemState::Placed) carries a placement; the packer commits it
/// right after the transition, so no other state ever touches the item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ItemState {
    /// Head of the pending queue; looking for any bin that takes it at the origin.
    Pending,
    /// Searching the corner anchors of the active bin.
    Probing { bin: usize },
    /// The active bin had no room; trying bins strictly larger than `from`.
    Escalating { from: usize },
    /// A bin accepted the item.
    Placed { bin: usize, placement: Placement },
    /// No bin took the item this round; it goes back to the pending queue.
    Deferred,
    /// No bin accepts the item at its origin.
    Unfit,
}

impl ItemState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ItemState::Placed { .. } | ItemState::Deferred | ItemState::Unfit
        )
    }
}
