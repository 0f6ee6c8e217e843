use std::fmt::Write as _;

use serde_json::{Value, json};

use crate::bin::Bin;
use crate::item::Item;
use crate::packer::PackOutcome;

/// Plain-text dump: each bin followed by its placed items.
///
/// ```text
/// Small Bin(100x100)
///  packed items:
///    Item 3(20x10) pos(0,0) rt(w,h)
/// ```
pub fn display_packed(bins: &[Bin]) -> String {
    let mut out = String::new();
    for bin in bins {
        let _ = writeln!(out, "{bin}");
        let _ = writeln!(out, " packed items:");
        for item in bin.items() {
            let _ = writeln!(out, "   {item}");
        }
    }
    out
}

/// Plain-text list of items that fit no bin; empty when there are none.
pub fn display_unfit(unfit: &[Item]) -> String {
    let mut out = String::new();
    if unfit.is_empty() {
        return out;
    }
    let _ = writeln!(out, "unfit items:");
    for item in unfit {
        let _ = writeln!(out, "   {item}");
    }
    out
}

/// Serialize an outcome as `{ bins, unfit, stats }`.
/// Placed items carry their effective (rotation-applied) extents in `w`/`h`.
pub fn to_json(outcome: &PackOutcome) -> Value {
    let bins_val: Vec<Value> = outcome
        .bins
        .iter()
        .map(|bin| {
            let items_val: Vec<Value> = bin
                .items()
                .iter()
                .map(|item| {
                    let pos = item.position().unwrap_or_default();
                    let eff = item.effective_dimension();
                    json!({
                        "name": item.name,
                        "width": item.width,
                        "height": item.height,
                        "rotated": item.rotation().is_rotated(),
                        "x": pos.x,
                        "y": pos.y,
                        "w": eff.width,
                        "h": eff.height,
                    })
                })
                .collect();
            json!({
                "name": bin.name,
                "width": bin.width(),
                "height": bin.height(),
                "items": items_val,
            })
        })
        .collect();
    let unfit_val: Vec<Value> = outcome
        .unfit
        .iter()
        .map(|item| json!({"name": item.name, "width": item.width, "height": item.height}))
        .collect();
    json!({"bins": bins_val, "unfit": unfit_val, "stats": outcome.stats()})
}
