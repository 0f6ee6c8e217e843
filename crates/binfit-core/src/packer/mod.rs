use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::bin::Bin;
use crate::config::PackerConfig;
use crate::item::Item;
use crate::model::{PackStats, Placement, Position};

pub mod order;
pub mod state;

pub use state::ItemState;

/// Greedy corner-anchor packer.
///
/// Owns three collections and moves every item through exactly one of them
/// at a time: `pending` (waiting), the item list of some bin (placed), or
/// `unfit` (no bin accepts it).
///
/// Each round takes the head of the pending queue, finds the first bin that
/// accepts it at the origin, then fills that bin with as many of the remaining
/// items as possible. Items that do not fit the active bin escalate to
/// strictly larger bins; items that fit nowhere this round wait for the next.
#[derive(Debug, Clone, Default)]
pub struct Packer {
    config: PackerConfig,
    bins: Vec<Bin>,
    pending: Vec<Item>,
    unfit: Vec<Item>,
}

/// Final bins (with their placed items) and the items no bin accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackOutcome {
    pub bins: Vec<Bin>,
    pub unfit: Vec<Item>,
}

impl PackOutcome {
    pub fn stats(&self) -> PackStats {
        collect_stats(&self.bins, &self.unfit, 0)
    }
}

impl Packer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PackerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &PackerConfig {
        &self.config
    }

    pub fn add_bin(&mut self, bin: Bin) {
        self.bins.push(bin);
    }

    pub fn add_bins<I: IntoIterator<Item = Bin>>(&mut self, bins: I) {
        self.bins.extend(bins);
    }

    /// Queues `item`. A placement left over from an earlier run is cleared.
    pub fn add_item(&mut self, mut item: Item) {
        item.reset_placement();
        self.pending.push(item);
    }

    pub fn add_items<I: IntoIterator<Item = Item>>(&mut self, items: I) {
        for item in items {
            self.add_item(item);
        }
    }

    /// Bins in packing order (after `pack`) with their placed items.
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Items not yet processed.
    pub fn pending(&self) -> &[Item] {
        &self.pending
    }

    /// Items that fit no bin.
    pub fn unfit(&self) -> &[Item] {
        &self.unfit
    }

    pub fn stats(&self) -> PackStats {
        collect_stats(&self.bins, &self.unfit, self.pending.len())
    }

    pub fn into_outcome(self) -> PackOutcome {
        PackOutcome {
            bins: self.bins,
            unfit: self.unfit,
        }
    }

    /// Places every pending item into a bin or moves it to `unfit`.
    ///
    /// Never fails. With nothing pending this is a no-op. Each round removes
    /// at least the head of the queue, so the loop always terminates.
    #[instrument(skip_all, fields(bins = self.bins.len(), items = self.pending.len()))]
    pub fn pack(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        self.sort();

        let mut queue: VecDeque<Item> = std::mem::take(&mut self.pending).into();
        let mut rounds = 0usize;
        while let Some(head) = queue.pop_front() {
            match self.advance(&head, ItemState::Pending) {
                ItemState::Placed { bin, placement } => {
                    rounds += 1;
                    debug!(
                        round = rounds,
                        bin = %self.bins[bin],
                        item = %head.name,
                        remaining = queue.len(),
                        "filling bin"
                    );
                    self.bins[bin].commit(head, placement);
                    queue = self.fill_bin(bin, queue);
                }
                _ => {
                    debug!(item = %head, "no bin accepts item, marking unfit");
                    self.unfit.push(head);
                }
            }
        }

        debug!(
            rounds,
            unfit = self.unfit.len(),
            bins_used = self.bins.iter().filter(|b| !b.is_empty()).count(),
            "packing finished"
        );
    }

    /// Computes the next state of `item` without touching any bin or item.
    ///
    /// Terminal states map to themselves.
    pub fn advance(&self, item: &Item, state: ItemState) -> ItemState {
        let rotations = self.config.rotations();
        match state {
            ItemState::Pending => match self.find_fitted_bin(item) {
                Some((bin, placement)) => ItemState::Placed { bin, placement },
                None => ItemState::Unfit,
            },
            ItemState::Probing { bin } => {
                let found = self
                    .bins
                    .get(bin)
                    .and_then(|b| b.find_placement(item, rotations));
                match found {
                    Some(placement) => ItemState::Placed { bin, placement },
                    None => ItemState::Escalating { from: bin },
                }
            }
            ItemState::Escalating { from } => match self.find_larger_bin(item, from) {
                Some((bin, placement)) => ItemState::Placed { bin, placement },
                None => ItemState::Deferred,
            },
            terminal => terminal,
        }
    }

    /// Runs [`advance`](Self::advance) from `state` until a terminal state.
    pub fn resolve(&self, item: &Item, mut state: ItemState) -> ItemState {
        while !state.is_terminal() {
            state = self.advance(item, state);
        }
        state
    }

    /// First bin, in packing order, that accepts `item` at its origin.
    ///
    /// Pure probe: bins are not modified, so a bin that already holds items
    /// at the origin is skipped.
    pub fn find_fitted_bin(&self, item: &Item) -> Option<(usize, Placement)> {
        let rotations = self.config.rotations();
        self.bins.iter().enumerate().find_map(|(idx, bin)| {
            bin.fit_at(item, Position::ORIGIN, rotations)
                .map(|placement| (idx, placement))
        })
    }

    /// First bin, in packing order, with area strictly greater than bin
    /// `from` that has room for `item` among its current placements.
    pub fn find_larger_bin(&self, item: &Item, from: usize) -> Option<(usize, Placement)> {
        let rotations = self.config.rotations();
        let area = self.bins.get(from)?.area();
        self.bins
            .iter()
            .enumerate()
            .filter(|(_, bin)| bin.area() > area)
            .find_map(|(idx, bin)| {
                trace!(item = %item.name, bin = %bin, "escalation candidate");
                bin.find_placement(item, rotations)
                    .map(|placement| (idx, placement))
            })
    }

    fn sort(&mut self) {
        let cfg = &self.config;
        let (bin_order, item_order, mode) = (cfg.bin_order, cfg.item_order, cfg.tie_break);
        order::sort_indexed(&mut self.bins, |a, b| order::compare_bins(bin_order, mode, a, b));
        order::sort_indexed(&mut self.pending, |a, b| {
            order::compare_items(item_order, mode, a, b)
        });
    }

    /// Fills bin `bin` with `items`, in order, escalating items that do not
    /// fit to larger bins. Returns the items left for the next round.
    fn fill_bin(&mut self, bin: usize, items: VecDeque<Item>) -> VecDeque<Item> {
        let mut active = bin;
        let mut leftover = VecDeque::new();
        for item in items {
            match self.resolve(&item, ItemState::Probing { bin: active }) {
                ItemState::Placed { bin, placement } => {
                    if bin != active {
                        debug!(
                            item = %item.name,
                            from = %self.bins[active],
                            to = %self.bins[bin],
                            "escalated to larger bin"
                        );
                        active = bin;
                    }
                    trace!(
                        item = %item.name,
                        bin = %self.bins[bin],
                        x = placement.position.x,
                        y = placement.position.y,
                        rotated = placement.rotation.is_rotated(),
                        "placed"
                    );
                    self.bins[bin].commit(item, placement);
                }
                _ => leftover.push_back(item),
            }
        }
        leftover
    }
}

fn collect_stats(bins: &[Bin], unfit: &[Item], pending: usize) -> PackStats {
    let mut stats = PackStats {
        bins_total: bins.len(),
        items_unfit: unfit.len(),
        items_pending: pending,
        ..PackStats::default()
    };
    for bin in bins.iter().filter(|b| !b.is_empty()) {
        stats.bins_used += 1;
        stats.used_bin_area += bin.area();
        stats.placed_item_area += bin.used_area();
        stats.items_placed += bin.items().len();
        stats.items_rotated += bin
            .items()
            .iter()
            .filter(|i| i.rotation().is_rotated())
            .count();
    }
    stats.occupancy = if stats.used_bin_area > 0 {
        stats.placed_item_area as f64 / stats.used_bin_area as f64
    } else {
        0.0
    };
    stats
}
