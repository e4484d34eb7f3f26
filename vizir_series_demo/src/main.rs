// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lays out sample series with `vizir_series` and prints the geometry as JSON.
//!
//! ```text
//! RUST_LOG=debug vizir_series_demo pack --categories 4 --size 3
//! vizir_series_demo violin --band-range 0 800 --width-ratio 0.6 --horizontal
//! ```

mod sample;

use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use vizir_series::{
    BoxLayout, BoxLayoutSpec, CirclePackLayout, CirclePackSpec, MAX_BOX_WIDTH, OrdinalScale,
    Orientation, ScaleContinuous, ScaleLinear, SizeAccessor, WidthRatio,
};

use crate::sample::{Lcg, VALUE_RANGE};

#[derive(Parser, Debug)]
#[command(
    name = "vizir_series_demo",
    version,
    about = "Lay out sample chart series and dump the geometry as JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Packed circles, one cluster per category.
    Pack(PackArgs),
    /// Violin slots, one per category.
    Violin(ViolinArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Number of categories.
    #[arg(long, default_value_t = 3)]
    categories: usize,
    /// Samples generated per category.
    #[arg(long, default_value_t = 30)]
    per_category: usize,
    /// Pixel range covered by the category bands.
    #[arg(
        long,
        num_args = 2,
        value_names = ["START", "END"],
        allow_negative_numbers = true,
        default_values_t = [0.0, 600.0]
    )]
    band_range: Vec<f64>,
    /// Seed for the sample generator.
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

impl CommonArgs {
    fn scale(&self) -> Result<(Vec<String>, OrdinalScale<String>)> {
        let &[start, end] = self.band_range.as_slice() else {
            bail!("--band-range takes exactly two values");
        };
        let keys = sample::category_keys(self.categories);
        let scale = OrdinalScale::new(keys.clone(), (start, end))?;
        Ok((keys, scale))
    }
}

#[derive(Args, Debug)]
struct PackArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Constant circle size. Sizes are random when omitted.
    #[arg(long)]
    size: Option<f64>,
}

#[derive(Args, Debug)]
struct ViolinArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Fraction of the slot width taken by each glyph, in `(0, 1]`.
    #[arg(long, default_value_t = 1.0)]
    width_ratio: f64,
    /// Lay glyphs out along a horizontal value axis.
    #[arg(long)]
    horizontal: bool,
    /// Upper bound on the slot width, in pixels.
    #[arg(long, default_value_t = MAX_BOX_WIDTH)]
    max_box_width: f64,
}

#[derive(Serialize)]
struct PackOutput<'a> {
    scale: &'a OrdinalScale<String>,
    layout: &'a CirclePackLayout,
}

#[derive(Serialize)]
struct ViolinOutput<'a> {
    scale: &'a OrdinalScale<String>,
    layout: &'a BoxLayout<'a, String>,
    /// `[x0, y0, x1, y1]` per glyph.
    rects: Vec<[f64; 4]>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut out = io::stdout().lock();
    match cli.command {
        Command::Pack(args) => run_pack(&args, &mut out)?,
        Command::Violin(args) => run_violin(&args, &mut out)?,
    }
    writeln!(out)?;
    Ok(())
}

fn run_pack(args: &PackArgs, out: &mut impl Write) -> Result<()> {
    let (keys, scale) = args.common.scale()?;
    let data = sample::pack_records(
        &keys,
        args.common.per_category,
        &mut Lcg::new(args.common.seed),
    );
    let mut spec = CirclePackSpec::new();
    if let Some(size) = args.size {
        spec = spec.with_size(SizeAccessor::Constant(size));
    }
    let layout = spec
        .layout(&data, Some(&scale))?
        .context("circle pack layout needs a category scale")?;
    log::info!(
        "packed {} circles into {} clusters",
        layout.circles.len(),
        layout.clusters.len()
    );
    serde_json::to_writer_pretty(
        out,
        &PackOutput {
            scale: &scale,
            layout: &layout,
        },
    )?;
    Ok(())
}

fn run_violin(args: &ViolinArgs, out: &mut impl Write) -> Result<()> {
    let (keys, scale) = args.common.scale()?;
    let data = sample::violin_records(
        &keys,
        args.common.per_category,
        &mut Lcg::new(args.common.seed),
    );
    let orientation = Orientation::from_horizontal(args.horizontal);
    let (lo, hi) = VALUE_RANGE;
    let pixels = match orientation {
        Orientation::Vertical => (400.0, 0.0),
        Orientation::Horizontal => (0.0, 400.0),
    };
    let value_scale: ScaleContinuous = ScaleLinear::new((lo, hi), pixels).into();
    let spec = BoxLayoutSpec::new()
        .with_width_ratio(WidthRatio::new(args.width_ratio)?)
        .with_orientation(orientation)
        .with_max_box_width(args.max_box_width);
    let layout = spec
        .layout(&data, Some(&scale), Some(&value_scale))?
        .context("violin layout needs both scales")?;
    log::info!(
        "laid out {} violins, {:.1}px wide",
        layout.boxes.len(),
        layout.metrics.width
    );
    let rects = layout
        .boxes
        .iter()
        .filter_map(|geometry| layout.glyph_rect(geometry))
        .map(|r| [r.x0, r.y0, r.x1, r.y1])
        .collect();
    serde_json::to_writer_pretty(
        out,
        &ViolinOutput {
            scale: &scale,
            layout: &layout,
            rects,
        },
    )?;
    Ok(())
}
