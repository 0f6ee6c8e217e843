//! Comparators used to order bins and items before packing.
//!
//! Each comparator receives the entries' insertion indices alongside the
//! entries themselves, so the tie-break is an explicit parameter instead of
//! an accident of sort stability.

use std::cmp::Ordering;

use crate::bin::Bin;
use crate::config::{BinOrder, SortOrder, TieBreak};
use crate::item::Item;

fn tie_break(mode: TieBreak, a: (usize, &str), b: (usize, &str)) -> Ordering {
    match mode {
        TieBreak::InsertionOrder => a.0.cmp(&b.0),
        TieBreak::NameAsc => a.1.cmp(b.1).then_with(|| a.0.cmp(&b.0)),
    }
}

/// Orders bins by `order`, ties resolved by `mode`.
pub fn compare_bins(
    order: BinOrder,
    mode: TieBreak,
    a: (usize, &Bin),
    b: (usize, &Bin),
) -> Ordering {
    let primary = match order {
        BinOrder::AreaAsc => a.1.area().cmp(&b.1.area()),
        BinOrder::None => Ordering::Equal,
    };
    primary.then_with(|| match order {
        BinOrder::None => a.0.cmp(&b.0),
        BinOrder::AreaAsc => tie_break(mode, (a.0, a.1.name()), (b.0, b.1.name())),
    })
}

/// Orders items by `order`, ties resolved by `mode`.
pub fn compare_items(
    order: SortOrder,
    mode: TieBreak,
    a: (usize, &Item),
    b: (usize, &Item),
) -> Ordering {
    let (x, y) = (a.1, b.1);
    let primary = match order {
        SortOrder::AreaDesc => y.area().cmp(&x.area()),
        SortOrder::MaxSideDesc => y.width.max(y.height).cmp(&x.width.max(x.height)),
        SortOrder::HeightDesc => y.height.cmp(&x.height),
        SortOrder::WidthDesc => y.width.cmp(&x.width),
        SortOrder::NameAsc => x.name.cmp(&y.name),
        SortOrder::None => Ordering::Equal,
    };
    primary.then_with(|| match order {
        SortOrder::None => a.0.cmp(&b.0),
        _ => tie_break(mode, (a.0, x.name()), (b.0, y.name())),
    })
}

/// Sorts `entries` with `cmp`, which sees each entry's current index.
pub(crate) fn sort_indexed<T>(
    entries: &mut Vec<T>,
    cmp: impl Fn((usize, &T), (usize, &T)) -> Ordering,
) {
    let mut indexed: Vec<(usize, T)> = entries.drain(..).enumerate().collect();
    indexed.sort_by(|a, b| cmp((a.0, &a.1), (b.0, &b.1)));
    entries.extend(indexed.into_iter().map(|(_, entry)| entry));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(Item::name).collect()
    }

    #[test]
    fn items_sort_by_area_desc_keeping_insertion_order_on_ties() {
        let mut items = vec![
            Item::new("Item 1", 25, 30),
            Item::new("Item 2", 10, 5),
            Item::new("Item 6", 25, 30),
            Item::new("Item 7", 80, 80),
            Item::new("Item 0", 30, 25),
        ];
        sort_indexed(&mut items, |a, b| {
            compare_items(SortOrder::AreaDesc, TieBreak::InsertionOrder, a, b)
        });
        assert_eq!(names(&items), ["Item 7", "Item 1", "Item 6", "Item 0", "Item 2"]);
    }

    #[test]
    fn name_tie_break_ranks_equal_areas_by_name() {
        let mut items = vec![
            Item::new("b", 25, 30),
            Item::new("c", 30, 25),
            Item::new("a", 25, 30),
        ];
        sort_indexed(&mut items, |a, b| {
            compare_items(SortOrder::AreaDesc, TieBreak::NameAsc, a, b)
        });
        assert_eq!(names(&items), ["a", "b", "c"]);
    }

    #[test]
    fn bins_sort_by_area_asc() {
        let mut bins = vec![
            Bin::new("large", 200, 200),
            Bin::new("small-1", 50, 50),
            Bin::new("medium", 100, 100),
            Bin::new("small-2", 25, 100),
        ];
        sort_indexed(&mut bins, |a, b| {
            compare_bins(BinOrder::AreaAsc, TieBreak::InsertionOrder, a, b)
        });
        let got: Vec<_> = bins.iter().map(Bin::name).collect();
        assert_eq!(got, ["small-1", "small-2", "medium", "large"]);
    }

    #[test]
    fn none_order_is_identity() {
        let mut items = vec![Item::new("z", 1, 1), Item::new("a", 9, 9)];
        sort_indexed(&mut items, |a, b| compare_items(SortOrder::None, TieBreak::NameAsc, a, b));
        assert_eq!(names(&items), ["z", "a"]);
    }
}
