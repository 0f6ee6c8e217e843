use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::bin::Bin;
use crate::config::PackerConfig;
use crate::error::{BinFitError, Result};
use crate::item::Item;
use crate::packer::{PackOutcome, Packer};

/// A bin as described in a job file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BinSpec {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// An item as described in a job file. `quantity > 1` expands into copies
/// named `name#1`, `name#2`, ...
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemSpec {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Bins, items and optional configuration for one packing run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PackJob {
    #[serde(default)]
    pub bins: Vec<BinSpec>,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<PackerConfig>,
}

impl PackJob {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Reads a job file; `.json` is parsed as JSON, `.yaml`/`.yml` as YAML.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Self::from_json_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            _ => Err(BinFitError::InvalidConfig(format!(
                "unsupported job file extension: {}",
                path.display()
            ))),
        }
    }

    /// Rejects jobs with no bins or with zero-sized bins/items.
    pub fn validate(&self) -> Result<()> {
        if self.bins.is_empty() {
            return Err(BinFitError::Empty);
        }
        for b in &self.bins {
            if b.width == 0 || b.height == 0 {
                return Err(BinFitError::InvalidDimensions {
                    kind: "bin",
                    name: b.name.clone(),
                    width: b.width,
                    height: b.height,
                });
            }
        }
        for i in &self.items {
            if i.width == 0 || i.height == 0 {
                return Err(BinFitError::InvalidDimensions {
                    kind: "item",
                    name: i.name.clone(),
                    width: i.width,
                    height: i.height,
                });
            }
        }
        Ok(())
    }

    /// Number of items after expanding quantities.
    pub fn item_count(&self) -> usize {
        self.items.iter().map(|i| i.quantity as usize).sum()
    }

    /// Builds a packer loaded with this job's bins and items. `fallback` is
    /// used when the job carries no configuration of its own.
    pub fn into_packer(self, fallback: PackerConfig) -> Packer {
        let mut packer = Packer::with_config(self.config.unwrap_or(fallback));
        packer.add_bins(
            self.bins
                .into_iter()
                .map(|b| Bin::new(b.name, b.width, b.height)),
        );
        for spec in self.items {
            if spec.quantity == 1 {
                packer.add_item(Item::new(spec.name, spec.width, spec.height));
                continue;
            }
            packer.add_items(
                (1..=spec.quantity)
                    .map(|n| Item::new(format!("{}#{}", spec.name, n), spec.width, spec.height)),
            );
        }
        packer
    }
}

/// Validates and packs `job`, using `fallback` when the job has no config.
#[instrument(skip_all)]
pub fn pack_job(job: PackJob, fallback: PackerConfig) -> Result<PackOutcome> {
    job.validate()?;
    info!(bins = job.bins.len(), items = job.item_count(), "packing job");
    let mut packer = job.into_packer(fallback);
    packer.pack();
    let outcome = packer.into_outcome();
    info!(
        placed = outcome.stats().items_placed,
        unfit = outcome.unfit.len(),
        "job packed"
    );
    Ok(outcome)
}
