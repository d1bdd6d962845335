use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use growpack_core::config::{InputConfig, PackerConfig, RenderOptions, SortOrder};
use growpack_core::{Layout, Meta, pack_layout, read_items};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "growpack",
    about = "Pack a CSV cut list onto a canvas that grows to fit",
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
    /// Pack a cut list and write the layout (JSON, optional SVG/PNG)
    Pack(PackArgs),
    /// Pack a cut list and print statistics only
    Stats(PackArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input/Output
    /// Input CSV file: name,width,height,quantity per line
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Layout base name (files will be name.json/.svg/.png)
    #[arg(short, long, default_value = "layout", help_heading = "Input/Output")]
    name: String,
    /// YAML config file path (values override command-line options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,

    // Input
    /// Divide raw dimensions by this (100 = centimetres to metres)
    #[arg(long, default_value_t = 100.0, help_heading = "Input")]
    scale: f64,
    /// Multiply scaled dimensions by this
    #[arg(long, default_value_t = 3.0, help_heading = "Input")]
    scale_factor: f64,
    /// Swap width/height so the taller side is the height
    #[arg(long, default_value_t = true, action=ArgAction::Set, help_heading = "Input")]
    orient_tall: bool,
    /// Field delimiter
    #[arg(long, default_value_t = ',', help_heading = "Input")]
    delimiter: char,
    /// Skip the first non-blank line
    #[arg(long, default_value_t = false, help_heading = "Input")]
    skip_header: bool,

    // Layout
    /// Sort order: height_desc|width_desc|area_desc|max_side_desc|name_asc|none|auto
    #[arg(long, default_value = "height_desc", help_heading = "Layout")]
    sort_order: String,
    /// Evaluate auto candidates in parallel (requires core feature `parallel`)
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    parallel: bool,

    // Export
    /// Also write an SVG drawing with labels
    #[arg(long, default_value_t = false, help_heading = "Export")]
    svg: bool,
    /// Also write a PNG preview (no labels)
    #[arg(long, default_value_t = false, help_heading = "Export")]
    png: bool,
    /// Preview resolution in pixels per canvas unit
    #[arg(long, default_value_t = 100.0, help_heading = "Export")]
    px_per_unit: f64,
    /// Label text size in canvas units
    #[arg(long, default_value_t = 0.4, help_heading = "Export")]
    text_size: f64,
    /// Export packing stats (JSON) to this file
    #[arg(long, help_heading = "Export")]
    export_stats: Option<PathBuf>,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: compute layout and stats but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

/// Everything a run needs, after merging CLI values with the YAML file.
#[derive(Debug, Clone, Serialize)]
struct RunConfig {
    input: InputConfig,
    packer: PackerConfig,
    render: RenderOptions,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args),
        Commands::Stats(args) => run_stats(args),
    }
}

fn build_config(cli: &PackArgs) -> anyhow::Result<RunConfig> {
    let base = RunConfig {
        input: InputConfig {
            scale: cli.scale,
            scale_factor: cli.scale_factor,
            orient_tall: cli.orient_tall,
            delimiter: cli.delimiter,
            skip_header: cli.skip_header,
        },
        packer: PackerConfig {
            sort_order: parse_sort_order(&cli.sort_order)?,
            parallel: cli.parallel,
        },
        render: RenderOptions {
            text_size: cli.text_size,
            ..Default::default()
        },
    };
    // Config file values override command-line values field by field
    let cfg = if let Some(path) = &cli.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)
            .with_context(|| format!("parse config {}", path.display()))?;
        y.into_run_config(base)?
    } else {
        base
    };
    cfg.input.validate()?;
    cfg.render.validate()?;
    Ok(cfg)
}

fn pack_input(cli: &PackArgs, cfg: &RunConfig) -> anyhow::Result<Layout> {
    let blocks = read_items(&cli.input, &cfg.input)
        .with_context(|| format!("read input {}", cli.input.display()))?;
    info!(count = blocks.len(), "loaded blocks");
    let start = Instant::now();
    let layout = pack_layout(blocks, cfg.packer.clone())?;
    info!(
        width = layout.width,
        height = layout.height,
        frames = layout.frames.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "packed"
    );
    Ok(layout)
}

fn run_pack(cli: &PackArgs) -> anyhow::Result<()> {
    let cfg = build_config(cli)?;

    if cli.print_config {
        match cli.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }

    let layout = pack_input(cli, &cfg)?;
    report_unplaced(&layout)?;

    let stats = layout.stats();
    info!(
        occupancy = format!("{:.2}%", stats.occupancy * 100.0),
        growth_events = stats.growth_events,
        "stats"
    );

    if cli.dry_run {
        println!("{}", stats.summary());
        return Ok(());
    }

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("create out_dir {}", cli.out_dir.display()))?;

    let meta = Meta::new(&cfg.packer, &cfg.input);
    let json_path = cli.out_dir.join(format!("{}.json", cli.name));
    let json = serde_json::to_string_pretty(&growpack_core::to_json(&layout, &meta))?;
    fs::write(&json_path, json).with_context(|| format!("write {}", json_path.display()))?;
    info!(?json_path, frames = layout.frames.len(), "layout written");

    if cli.svg {
        let svg_path = cli.out_dir.join(format!("{}.svg", cli.name));
        let doc = growpack_core::render_svg(&layout, &cfg.render);
        growpack_core::save_svg(&svg_path, &doc)
            .with_context(|| format!("write {}", svg_path.display()))?;
        info!(?svg_path, "svg written");
    }

    if cli.png {
        let png_path = cli.out_dir.join(format!("{}.png", cli.name));
        write_preview(&layout, cli.px_per_unit, &png_path)?;
    }

    if let Some(stats_path) = &cli.export_stats {
        let value = growpack_core::stats_to_json(&layout);
        fs::write(stats_path, serde_json::to_string_pretty(&value)?)
            .with_context(|| format!("write {}", stats_path.display()))?;
        info!(?stats_path, "stats exported");
    }
    Ok(())
}

fn run_stats(cli: &PackArgs) -> anyhow::Result<()> {
    let cfg = build_config(cli)?;
    let layout = pack_input(cli, &cfg)?;
    let stats = layout.stats();
    println!("{}", stats.summary());
    println!(
        "used_area={:.4} canvas_area={:.4} waste={:.2}%",
        stats.used_area,
        stats.canvas_area,
        stats.waste_percentage()
    );
    report_unplaced(&layout)
}

// Unplaced blocks fail the whole request.
fn report_unplaced(layout: &Layout) -> anyhow::Result<()> {
    for b in &layout.unplaced {
        warn!(label = %b.label, w = b.w, h = b.h, "unfit block");
    }
    layout.ensure_complete()?;
    Ok(())
}

fn write_preview(layout: &Layout, px_per_unit: f64, path: &Path) -> anyhow::Result<()> {
    let img = growpack_core::render_preview(layout, px_per_unit)?;
    growpack_core::save_preview(path, &img)
        .with_context(|| format!("write {}", path.display()))?;
    info!(png_path = ?path, "preview written");
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
        .try_init();
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    scale: Option<f64>,
    scale_factor: Option<f64>,
    orient_tall: Option<bool>,
    delimiter: Option<char>,
    skip_header: Option<bool>,
    sort_order: Option<String>,
    parallel: Option<bool>,
    text_size: Option<f64>,
    text_padding_x: Option<f64>,
    text_padding_y: Option<f64>,
    text_angle_deg: Option<f64>,
    stroke_width: Option<f64>,
}

impl YamlConfig {
    fn into_run_config(self, mut cfg: RunConfig) -> anyhow::Result<RunConfig> {
        if let Some(v) = self.scale {
            cfg.input.scale = v;
        }
        if let Some(v) = self.scale_factor {
            cfg.input.scale_factor = v;
        }
        if let Some(v) = self.orient_tall {
            cfg.input.orient_tall = v;
        }
        if let Some(v) = self.delimiter {
            cfg.input.delimiter = v;
        }
        if let Some(v) = self.skip_header {
            cfg.input.skip_header = v;
        }
        if let Some(v) = self.sort_order {
            cfg.packer.sort_order = parse_sort_order(&v)?;
        }
        if let Some(v) = self.parallel {
            cfg.packer.parallel = v;
        }
        if let Some(v) = self.text_size {
            cfg.render.text_size = v;
        }
        if let Some(v) = self.text_padding_x {
            cfg.render.text_padding_x = v;
        }
        if let Some(v) = self.text_padding_y {
            cfg.render.text_padding_y = v;
        }
        if let Some(v) = self.text_angle_deg {
            cfg.render.text_angle_deg = v;
        }
        if let Some(v) = self.stroke_width {
            cfg.render.stroke_width = v;
        }
        Ok(cfg)
    }
}

fn parse_sort_order(s: &str) -> anyhow::Result<SortOrder> {
    s.parse::<SortOrder>()
        .map_err(|_| anyhow::anyhow!("unknown sort order: {}", s))
}
