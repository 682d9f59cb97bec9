pub mod config;
pub mod error;
pub mod extract;
pub mod graph;
pub mod grid;
pub mod maze;
pub mod render;
pub mod util;

pub use config::SolverConfig;
pub use error::{MazeError, Result};
pub use extract::MazeExtractor;
pub use graph::{Graph, Vertex, VertexId};
pub use grid::{Cell, Direction, Grid, GridMap, Point};
pub use maze::{Maze, MazeBuilder, Solution};
pub use render::PathRenderer;

use image::{DynamicImage, RgbaImage};

/// Extracts the maze drawn in `img` and returns it together with the solved image
pub fn solve_image(img: &DynamicImage, config: &SolverConfig) -> Result<(Maze, RgbaImage)> {
    let map = util::parse_img(img);
    let maze = MazeExtractor::new(&map).extract()?;
    let solved = maze.solve_bfs_image(img, config)?;
    Ok((maze, solved))
}
