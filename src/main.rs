//! genome-viewport CLI entry point
//!
//! Inspect view geometry for a genome: prefetch expansion, visible feature
//! layout and cytoband placement.

use anyhow::Context;
use clap::{Parser, Subcommand};
use genome_viewport::chrom_sizes;
use genome_viewport::cytoband::CytobandIndex;
use genome_viewport::{DisplayedRegion, LinearDrawingModel, RegionExpander};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "genome-viewport")]
#[command(about = "Coordinate geometry for linear genome browser views")]
#[command(version)]
struct Cli {
    /// chrom.sizes file defining the navigation context (gzip/bzip2 ok)
    #[arg(short = 'g', long, global = true)]
    genome: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a visible region for prefetching
    Expand {
        /// Visible locus, e.g. chr1:10000-20000, or a chromosome name
        #[arg(short = 'r', long)]
        region: String,
        /// Pixel width of the visible region
        #[arg(short = 'w', long, default_value = "1000")]
        width: f64,
        /// Visible widths to add on each side
        #[arg(long, default_value = "1.0")]
        ratio: f64,
    },
    /// Lay out the features visible in a region
    Segments {
        /// Visible locus, e.g. chr1:10000-20000, or a chromosome name
        #[arg(short = 'r', long)]
        region: String,
        /// Pixel width of the visible region
        #[arg(short = 'w', long, default_value = "1000")]
        width: f64,
    },
    /// Place cytobands on a region
    Cytobands {
        /// cytoBand.txt file (gzip/bzip2 ok)
        bands: PathBuf,
        /// Visible locus, e.g. chr1:10000-20000, or a chromosome name
        #[arg(short = 'r', long)]
        region: String,
        /// Pixel width of the visible region
        #[arg(short = 'w', long, default_value = "1000")]
        width: f64,
    },
}

fn load_region(genome: Option<&PathBuf>, locus: &str) -> anyhow::Result<DisplayedRegion> {
    let path = genome.context("--genome <chrom.sizes> is required")?;
    let start = Instant::now();
    let region = chrom_sizes::load_region(path, locus)
        .with_context(|| format!("Failed to open region '{}' in {:?}", locus, path))?;
    info!("Genome loaded in {:.2}s", start.elapsed().as_secs_f64());
    Ok(region)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Expand { region, width, ratio } => {
            let region = load_region(cli.genome.as_ref(), &region)?;
            let expansion = RegionExpander::new(ratio)?.calculate_expansion(width, &region)?;

            println!("visible\t{}\t{}", region, region.absolute_region());
            println!("expanded\t{}\t{}", expansion.expanded_region, expansion.expanded_region.absolute_region());
            println!("expanded_width\t{}", expansion.expanded_width);
            println!("left_extra_pixels\t{}", expansion.left_extra_pixels);
            println!("right_extra_pixels\t{}", expansion.right_extra_pixels);
        }

        Commands::Segments { region, width } => {
            let region = load_region(cli.genome.as_ref(), &region)?;
            let model = LinearDrawingModel::new(&region, width)?;

            println!("# {} at {:.3} bases/pixel", region, model.bases_per_pixel());
            for segment in region.feature_segments() {
                let x_start = model.base_to_x(segment.absolute.start as f64);
                let x_end = model.base_to_x(segment.absolute.end as f64);
                println!(
                    "{}\t{}\t{:.1}\t{:.1}",
                    segment.name(),
                    segment.genome_coordinates(),
                    x_start,
                    x_end
                );
            }
        }

        Commands::Cytobands { bands, region, width } => {
            let region = load_region(cli.genome.as_ref(), &region)?;
            let index = CytobandIndex::from_file(&bands)
                .with_context(|| format!("Failed to load cytobands {:?}", bands))?;
            let model = LinearDrawingModel::new(&region, width)?;

            for placed in index.bands_in_view(&region) {
                let x_start = model.base_to_x(placed.absolute.start as f64).max(0.0);
                let x_end = model.base_to_x(placed.absolute.end as f64).min(model.draw_width());
                let colors = placed.band.stain.colors();
                println!(
                    "{}\t{}\t{}\t{:.1}\t{:.1}\t{}\t{}",
                    placed.band.chrom,
                    placed.band.name,
                    placed.band.stain.as_str(),
                    x_start,
                    x_end,
                    colors.band,
                    colors.text
                );
            }
        }
    }

    Ok(())
}
