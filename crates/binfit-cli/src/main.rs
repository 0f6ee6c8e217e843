use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use binfit_core::config::{BinOrder, SortOrder, TieBreak};
use binfit_core::{PackJob, PackOutcome, PackerConfig, pack_job};
use clap::{ArgAction, Parser, Subcommand};
use serde::Deserialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "binfit",
    about = "Pack rectangular items into rectangular bins",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack the bins and items of a job file
    Pack(PackArgs),
    /// Validate a job file and print what it contains, without packing
    Check(CheckArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input/Output
    /// Job file (.json, .yaml or .yml) with `bins`, `items` and optional `config`
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Write the result here instead of stdout
    #[arg(short, long, help_heading = "Input/Output")]
    output: Option<PathBuf>,
    /// Result format: text | json
    #[arg(
        long,
        value_parser = ["text", "json"],
        default_value = "text",
        help_heading = "Input/Output"
    )]
    format: String,
    /// YAML config file path (overrides the job's own config)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,

    // Ordering
    /// Item order: area_desc|max_side_desc|height_desc|width_desc|name_asc|none
    #[arg(long, help_heading = "Ordering")]
    item_order: Option<String>,
    /// Bin order: area_asc|none
    #[arg(long, help_heading = "Ordering")]
    bin_order: Option<String>,
    /// Tie break for equal entries: insertion|name
    #[arg(long, help_heading = "Ordering")]
    tie_break: Option<String>,

    // Placement
    /// Never rotate items by 90°
    #[arg(long, default_value_t = false, help_heading = "Placement")]
    no_rotation: bool,

    // Export
    /// Export packing stats (JSON) to this file
    #[arg(long, help_heading = "Export")]
    export_stats: Option<PathBuf>,
    /// Print the merged configuration (after job/YAML/CLI) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
}

#[derive(Parser, Debug, Clone)]
struct CheckArgs {
    /// Job file (.json, .yaml or .yml)
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args),
        Commands::Check(args) => run_check(args),
    }
}

fn load_job(path: &Path) -> anyhow::Result<PackJob> {
    PackJob::from_path(path).with_context(|| format!("read job {}", path.display()))
}

fn run_pack(cli: &PackArgs) -> anyhow::Result<()> {
    let mut job = load_job(&cli.input)?;

    // Job config first, then the YAML file, then explicit flags.
    let mut cfg = job.config.take().unwrap_or_default();
    if let Some(path) = &cli.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)?;
        cfg = y.into_packer_config(cfg)?;
    }
    apply_flags(cli, &mut cfg)?;

    if cli.print_config {
        match cli.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }

    let outcome = pack_job(job, cfg)?;
    let stats = outcome.stats();
    info!(
        bins_used = stats.bins_used,
        placed = stats.items_placed,
        unfit = stats.items_unfit,
        occupancy = format!("{:.2}%", stats.occupancy * 100.0),
        "stats"
    );

    let rendered = render(&outcome, &cli.format)?;
    match &cli.output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("write {}", path.display()))?;
            info!(?path, "result written");
        }
        None => print!("{}", rendered),
    }

    if let Some(stats_path) = &cli.export_stats {
        fs::write(stats_path, serde_json::to_string_pretty(&stats)?)
            .with_context(|| format!("write {}", stats_path.display()))?;
    }
    Ok(())
}

fn run_check(args: &CheckArgs) -> anyhow::Result<()> {
    let job = load_job(&args.input)?;
    job.validate()
        .with_context(|| format!("validate job {}", args.input.display()))?;
    let bin_area: u64 = job
        .bins
        .iter()
        .map(|b| (b.width as u64) * (b.height as u64))
        .sum();
    let item_area: u64 = job
        .items
        .iter()
        .map(|i| (i.width as u64) * (i.height as u64) * (i.quantity as u64))
        .sum();
    println!(
        "{}: {} bins (area {}), {} items (area {})",
        args.input.display(),
        job.bins.len(),
        bin_area,
        job.item_count(),
        item_area
    );
    if item_area > bin_area {
        println!("note: items cover more area than all bins together; some will be unfit");
    }
    Ok(())
}

fn render(outcome: &PackOutcome, format: &str) -> anyhow::Result<String> {
    Ok(match format {
        "json" => serde_json::to_string_pretty(&binfit_core::to_json(outcome))?,
        _ => {
            let mut s = binfit_core::display_packed(&outcome.bins);
            s.push_str(&binfit_core::display_unfit(&outcome.unfit));
            s
        }
    })
}

fn apply_flags(cli: &PackArgs, cfg: &mut PackerConfig) -> anyhow::Result<()> {
    if cli.no_rotation {
        cfg.allow_rotation = false;
    }
    if let Some(s) = &cli.item_order {
        cfg.item_order = parse_sort_order(s)?;
    }
    if let Some(s) = &cli.bin_order {
        cfg.bin_order = parse_bin_order(s)?;
    }
    if let Some(s) = &cli.tie_break {
        cfg.tie_break = parse_tie_break(s)?;
    }
    Ok(())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Deserialize, Debug, Default)]
struct YamlConfig {
    allow_rotation: Option<bool>,
    item_order: Option<String>,
    bin_order: Option<String>,
    tie_break: Option<String>,
}

impl YamlConfig {
    fn into_packer_config(self, mut cfg: PackerConfig) -> anyhow::Result<PackerConfig> {
        if let Some(v) = self.allow_rotation {
            cfg.allow_rotation = v;
        }
        if let Some(s) = self.item_order {
            cfg.item_order = parse_sort_order(&s)?;
        }
        if let Some(s) = self.bin_order {
            cfg.bin_order = parse_bin_order(&s)?;
        }
        if let Some(s) = self.tie_break {
            cfg.tie_break = parse_tie_break(&s)?;
        }
        Ok(cfg)
    }
}

fn parse_sort_order(s: &str) -> anyhow::Result<SortOrder> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown item order: {}", s))
}

fn parse_bin_order(s: &str) -> anyhow::Result<BinOrder> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown bin order: {}", s))
}

fn parse_tie_break(s: &str) -> anyhow::Result<TieBreak> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown tie break: {}", s))
}
