use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kakera_core::catalog::{puzzle_by_slug, DEFAULT_PUZZLE_SLUG, PUZZLE_CATALOG};
use kakera_core::{grid_label, grid_side, Completion, PuzzleModel, PuzzleRules};
use kakera_image::{decode_rgba8, project_scene, slice_scene};
use serde::Serialize;

mod bot;

#[derive(Parser)]
#[command(name = "kakera", version, about = "Grid jigsaw puzzle tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the grid the sizing rules derive for an image.
    Grid {
        #[arg(long, requires = "height", conflicts_with = "image")]
        width: Option<u32>,
        #[arg(long, requires = "width", conflicts_with = "image")]
        height: Option<u32>,
        /// Decode this file and use its dimensions.
        #[arg(long)]
        image: Option<PathBuf>,
        /// Use a built-in catalog entry's dimensions.
        #[arg(long, conflicts_with_all = ["image", "width", "height"])]
        slug: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List the built-in puzzle catalog with derived grids.
    Catalog,
    /// Slice an image into tiles and write them as PNG files.
    Slice {
        #[arg(long)]
        image: PathBuf,
        #[arg(long, default_value = "tiles")]
        out: PathBuf,
        #[arg(long)]
        scene_dim: Option<u32>,
    },
    /// Shuffle a board and let the bot reassemble it, printing every move.
    Play {
        /// Derive the grid from this image; defaults to the built-in
        /// catalog's default entry when no dimensions are given.
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long, requires = "height", conflicts_with = "image")]
        width: Option<u32>,
        #[arg(long, requires = "width", conflicts_with = "image")]
        height: Option<u32>,
        #[arg(long)]
        seed: Option<u32>,
        /// Probability per move that the bot places a piece in a wrong cell.
        #[arg(long, default_value_t = 0.0)]
        error_rate: f32,
        #[arg(long)]
        quiet: bool,
    },
}

#[derive(Serialize)]
struct GridReport {
    width: u32,
    height: u32,
    grid_side: u32,
    piece_count: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let rules = PuzzleRules::default();

    match cli.command {
        Commands::Grid {
            width,
            height,
            image,
            slug,
            json,
        } => {
            let (width, height) = match slug {
                Some(slug) => catalog_dimensions(&slug)?,
                None => source_dimensions(width, height, image.as_deref())?,
            };
            let side = grid_side(width, height, &rules)?;
            if json {
                let report = GridReport {
                    width,
                    height,
                    grid_side: side,
                    piece_count: side * side,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}x{} -> {}", width, height, grid_label(side));
            }
        }
        Commands::Catalog => {
            for entry in PUZZLE_CATALOG {
                println!(
                    "{:<16} {:<24} {}x{} -> {}",
                    entry.slug,
                    entry.label,
                    entry.width,
                    entry.height,
                    grid_label(entry.grid_side(&rules)),
                );
            }
        }
        Commands::Slice {
            image,
            out,
            scene_dim,
        } => {
            let bytes = fs::read(&image)?;
            let source = decode_rgba8(&bytes)?;
            let side = grid_side(source.width(), source.height(), &rules)?;
            let scene = project_scene(&source, scene_dim.unwrap_or(rules.scene_dimension))?;
            let slices = slice_scene(&scene, side)?;
            fs::create_dir_all(&out)?;
            for (index, tile) in slices.tiles.iter().enumerate() {
                let path = out.join(format!("tile_{:02}.png", index + 1));
                tile.save(&path)?;
            }
            println!(
                "wrote {} tiles ({}) to {}",
                slices.tile_count(),
                grid_label(side),
                out.display()
            );
        }
        Commands::Play {
            image,
            width,
            height,
            seed,
            error_rate,
            quiet,
        } => {
            let (width, height) = match (image, width, height) {
                (Some(path), _, _) => {
                    let bytes = fs::read(&path)?;
                    let source = decode_rgba8(&bytes)?;
                    source.dimensions()
                }
                (None, Some(width), Some(height)) => (width, height),
                _ => catalog_dimensions(DEFAULT_PUZZLE_SLUG)?,
            };
            let side = grid_side(width, height, &rules)?;
            let mut model = PuzzleModel::new(side)?;
            let seed = seed.unwrap_or_else(rand::random::<u32>);
            model.shuffle(seed);
            let config = bot::BotConfig { seed, error_rate };
            let events = bot::run_bot(&mut model, &config)?;
            if !quiet {
                for event in &events {
                    println!("{event:?}");
                }
            }
            if model.completion() != Completion::Solved {
                return Err("bot finished without solving the board".into());
            }
            println!(
                "{} solved in {} moves (seed {seed})",
                grid_label(side),
                events.len()
            );
        }
    }

    Ok(())
}

fn catalog_dimensions(slug: &str) -> Result<(u32, u32), Box<dyn std::error::Error>> {
    let entry = puzzle_by_slug(slug).ok_or_else(|| format!("no catalog entry named {slug:?}"))?;
    Ok((entry.width, entry.height))
}

fn source_dimensions(
    width: Option<u32>,
    height: Option<u32>,
    image: Option<&std::path::Path>,
) -> Result<(u32, u32), Box<dyn std::error::Error>> {
    if let Some(path) = image {
        let bytes = fs::read(path)?;
        let source = decode_rgba8(&bytes)?;
        return Ok(source.dimensions());
    }
    match (width, height) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err("pass --width and --height, --image, or --slug".into()),
    }
}
