use binfit_core::prelude::*;
use rand::{Rng, SeedableRng};

fn random_packer(seed: u64) -> Packer {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut packer = Packer::new();
    for i in 0..rng.gen_range(2..=5) {
        let w = rng.gen_range(20..=120);
        let h = rng.gen_range(20..=120);
        packer.add_bin(Bin::new(format!("bin{}", i), w, h));
    }
    for i in 0..60 {
        let w = rng.gen_range(1..=80);
        let h = rng.gen_range(1..=80);
        packer.add_item(Item::new(format!("item{}", i), w, h));
    }
    // Always-oversized stragglers.
    packer.add_item(Item::new("wide", 500, 1));
    packer.add_item(Item::new("slab", 300, 300));
    packer
}

#[test]
fn placed_items_stay_inside_and_disjoint() {
    for seed in 0..25 {
        let mut packer = random_packer(seed);
        packer.pack();
        for bin in packer.bins() {
            let rects: Vec<Rect> = bin.items().iter().filter_map(Item::rect).collect();
            assert_eq!(rects.len(), bin.items().len(), "seed {seed}: unplaced item in bin");
            for r in &rects {
                assert!(
                    r.fits_within(bin.width(), bin.height()),
                    "seed {seed}: {r:?} leaves {bin}"
                );
            }
            for i in 0..rects.len() {
                for j in (i + 1)..rects.len() {
                    assert!(
                        !rects[i].overlaps(&rects[j]),
                        "seed {seed}: {:?} overlaps {:?} in {bin}",
                        rects[i],
                        rects[j]
                    );
                }
            }
        }
    }
}

#[test]
fn no_item_is_lost_or_duplicated() {
    for seed in 0..25 {
        let mut packer = random_packer(seed);
        let total = packer.pending().len();
        packer.pack();
        let placed: usize = packer.bins().iter().map(|b| b.items().len()).sum();
        assert_eq!(placed + packer.unfit().len(), total, "seed {seed}");
        assert!(packer.pending().is_empty());

        let mut names: Vec<&str> = packer
            .bins()
            .iter()
            .flat_map(|b| b.items().iter().map(Item::name))
            .chain(packer.unfit().iter().map(Item::name))
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total, "seed {seed}");
    }
}

#[test]
fn items_bigger_than_every_bin_are_unfit() {
    for seed in 0..10 {
        let mut packer = random_packer(seed);
        packer.pack();
        let biggest_bin = packer.bins().iter().map(Bin::area).max().unwrap();
        for bin in packer.bins() {
            assert!(bin.items().iter().all(|i| i.area() <= bin.area()));
        }
        let unfit: Vec<_> = packer.unfit().iter().map(Item::name).collect();
        assert!(unfit.contains(&"slab"), "seed {seed}");
        assert!(unfit.contains(&"wide"), "seed {seed}");
        assert!(packer.unfit().iter().all(|i| !i.is_placed()));
        assert!(biggest_bin < 300 * 300);
    }
}

#[test]
fn identical_input_gives_identical_layout() {
    for seed in [3, 17, 99] {
        let mut a = random_packer(seed);
        let mut b = random_packer(seed);
        a.pack();
        b.pack();
        assert_eq!(a.into_outcome(), b.into_outcome(), "seed {seed}");
    }
}

#[test]
fn bins_end_up_smallest_first() {
    let mut packer = random_packer(7);
    packer.pack();
    let areas: Vec<u64> = packer.bins().iter().map(Bin::area).collect();
    assert!(areas.windows(2).all(|w| w[0] <= w[1]));
}
