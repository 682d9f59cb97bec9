use std::{path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use mazegraph::{
    config::OverlayColor, util::parse_img, MazeExtractor, PathRenderer, SolverConfig,
};

#[derive(Parser, Debug)]
#[command(name = "mazegraph")]
#[command(about = "Solve a black and white maze image with breadth-first search")]
struct Cli {
    /// Maze image, white pixels are paths and black pixels are walls
    input: PathBuf,

    /// Where to write the solved image, defaults to `<input>_solution.png`
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with solver settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overlay color as `r,g,b[,a]`, overrides the config file
    #[arg(long)]
    overlay: Option<OverlayColor>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SolverConfig::from_json_file(path)?,
        None => SolverConfig::default(),
    };
    if let Some(OverlayColor(overlay)) = cli.overlay {
        config.overlay = overlay;
    }

    let img = image::open(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?;
    let map = parse_img(&img);

    let now = Instant::now();
    let maze = MazeExtractor::new(&map).extract()?;
    info!(
        "extracted {} vertices in {:.3} seconds",
        maze.graph().len(),
        now.elapsed().as_secs_f64()
    );

    let now = Instant::now();
    let solution = maze.solve_bfs()?;
    info!(
        "solved maze using breadth first search in {:.3} seconds",
        now.elapsed().as_secs_f64()
    );

    let solved = PathRenderer::new(config.overlay).render(&img, &solution)?;

    let output = cli.output.unwrap_or_else(|| {
        let stem = cli
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "maze".to_owned());
        cli.input.with_file_name(format!("{}_solution.png", stem))
    });
    solved
        .save(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("wrote solution to {}", output.display());

    Ok(())
}
