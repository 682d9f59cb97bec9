use image::{DynamicImage, RgbaImage};
use log::debug;

use crate::{
    config::SolverConfig,
    error::{MazeError, Result},
    graph::Graph,
    grid::Point,
    render::PathRenderer,
};

/// A maze under construction, vertices and edges are added incrementally and the exit may be
/// set at any time before [`MazeBuilder::build`].
#[derive(Debug, Clone)]
pub struct MazeBuilder {
    graph: Graph<Point>,
    start: Point,
    exit: Option<Point>,
}

impl MazeBuilder {
    pub fn new(start: Point) -> Self {
        let mut graph = Graph::new();
        graph.add_value(start);
        Self {
            graph,
            start,
            exit: None,
        }
    }

    pub fn set_exit(&mut self, exit: Point) -> &mut Self {
        self.graph.add_value(exit);
        self.exit = Some(exit);
        self
    }

    pub fn add_vertex(&mut self, point: Point) -> &mut Self {
        self.graph.add_value(point);
        self
    }

    pub fn connect_vertices(&mut self, a: Point, b: Point) -> Result<&mut Self> {
        self.graph.connect_undirected(a, b)?;
        Ok(self)
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.graph.contains(point)
    }

    /// Freezes the maze, fails if no exit has been set
    pub fn build(self) -> Result<Maze> {
        let exit = self.exit.ok_or(MazeError::MissingExit)?;
        Ok(Maze {
            graph: self.graph,
            start: self.start,
            exit,
        })
    }
}

/// A fully constructed maze, read only
#[derive(Debug, Clone)]
pub struct Maze {
    graph: Graph<Point>,
    start: Point,
    exit: Point,
}

impl Maze {
    pub fn start(&self) -> Point {
        self.start
    }

    pub fn exit(&self) -> Point {
        self.exit
    }

    pub fn graph(&self) -> &Graph<Point> {
        &self.graph
    }

    /// Finds the path with the fewest vertices from start to exit
    pub fn solve_bfs(&self) -> Result<Solution> {
        let path = self
            .graph
            .breadth_first_path(self.start, self.exit)
            .ok_or(MazeError::NoSolution)?;

        debug!(
            "bfs found a path over {} vertices from {} to {}",
            path.len(),
            self.start,
            self.exit
        );

        Ok(Solution { path })
    }

    /// Solves the maze and draws the solution onto a copy of `image`
    pub fn solve_bfs_image(&self, image: &DynamicImage, config: &SolverConfig) -> Result<RgbaImage> {
        let solution = self.solve_bfs()?;
        PathRenderer::new(config.overlay).render(image, &solution)
    }

    pub fn solve_dfs(&self) -> Result<Solution> {
        Err(MazeError::Unsupported("depth-first search"))
    }
}

/// Ordered vertices from start to exit. Consecutive vertices are joined by a straight corridor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    path: Vec<Point>,
}

impl Solution {
    pub fn new(path: Vec<Point>) -> Self {
        Self { path }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.path
    }

    /// Checks that every pair of consecutive vertices shares a row or a column
    pub fn validate(&self) -> Result<()> {
        for pair in self.path.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if from.x != to.x && from.y != to.y {
                return Err(MazeError::DiagonalSegment { from, to });
            }
        }
        Ok(())
    }

    /// Expands the vertices into every pixel along the path, each pixel listed once
    pub fn pixels(&self) -> Result<Vec<Point>> {
        self.validate()?;

        let mut pixels: Vec<Point> = self.path.first().copied().into_iter().collect();

        for pair in self.path.windows(2) {
            let (from, to) = (pair[0], pair[1]);

            // the first pixel of a run is the last pixel of the previous one
            if from.y == to.y {
                if from.x <= to.x {
                    pixels.extend((from.x + 1..=to.x).map(|x| Point::new(x, from.y)));
                } else {
                    pixels.extend((to.x..from.x).rev().map(|x| Point::new(x, from.y)));
                }
            } else if from.y <= to.y {
                pixels.extend((from.y + 1..=to.y).map(|y| Point::new(from.x, y)));
            } else {
                pixels.extend((to.y..from.y).rev().map(|y| Point::new(from.x, y)));
            }
        }

        Ok(pixels)
    }
}
