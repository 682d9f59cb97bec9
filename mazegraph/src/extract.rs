use std::collections::HashSet;

use log::{debug, trace, warn};

use crate::{
    error::{MazeError, Result},
    grid::{Cell, Direction, Grid, Point},
    maze::{Maze, MazeBuilder},
};

/// Builds a [`Maze`] from a grid of path and wall pixels.
///
/// Vertices are the two openings on the border (start and exit) and every interior path pixel
/// where the corridor turns or forks. Two vertices are connected when a straight, unbroken run
/// of path pixels joins them.
pub struct MazeExtractor<'a, G: Grid> {
    grid: &'a G,
}

impl<'a, G: Grid> MazeExtractor<'a, G> {
    pub fn new(grid: &'a G) -> Self {
        Self { grid }
    }

    pub fn extract(&self) -> Result<Maze> {
        let (start, exit) = self.find_openings()?;

        let mut builder = MazeBuilder::new(start);
        builder.set_exit(exit);

        let mut vertices = vec![start, exit];
        for branch in self.find_branches()? {
            builder.add_vertex(branch);
            vertices.push(branch);
        }

        let lookup: HashSet<Point> = vertices.iter().copied().collect();
        for vertex in &vertices {
            for direction in Direction::ALL {
                if let Some(neighbor) = self.cast_ray(*vertex, direction, &lookup) {
                    trace!("{} connects {} to {}", direction, vertex, neighbor);
                    builder.connect_vertices(*vertex, neighbor)?;
                }
            }
        }

        let maze = builder.build()?;
        debug!(
            "extracted maze with {} vertices and {} edges, start {} exit {}",
            maze.graph().len(),
            maze.graph().edge_count(),
            maze.start(),
            maze.exit()
        );

        Ok(maze)
    }

    /// Scans the border for the first two distinct path pixels. Columns are checked first
    /// (top then bottom of each), then the remaining rows (left then right of each).
    pub fn find_openings(&self) -> Result<(Point, Point)> {
        let (width, height) = (self.grid.width(), self.grid.height());
        if width == 0 || height == 0 {
            warn!("invalid maze: image is empty");
            return Err(MazeError::InvalidMaze);
        }

        let columns = (0..width).flat_map(|x| [Point::new(x, 0), Point::new(x, height - 1)]);
        let rows = (1..height.saturating_sub(1))
            .flat_map(|y| [Point::new(0, y), Point::new(width - 1, y)]);

        let mut openings: Vec<Point> = Vec::with_capacity(2);
        for p in columns.chain(rows) {
            if self.grid.is_path(p) && !openings.contains(&p) {
                openings.push(p);
                if openings.len() == 2 {
                    return Ok((openings[0], openings[1]));
                }
            }
        }

        warn!(
            "invalid maze: found {} opening(s) on the border",
            openings.len()
        );
        Err(MazeError::InvalidMaze)
    }

    /// All interior path pixels where the path turns or forks, column by column
    pub fn find_branches(&self) -> Result<Vec<Point>> {
        let (width, height) = (self.grid.width(), self.grid.height());
        let mut branches = Vec::new();

        for x in 1..width.saturating_sub(1) {
            for y in 1..height.saturating_sub(1) {
                let point = Point::new(x, y);
                match self.grid.cell(point) {
                    Some(Cell::Path) => {
                        if self.is_branch(point) {
                            branches.push(point);
                        }
                    }
                    Some(Cell::Other(rgba)) => {
                        return Err(MazeError::MalformedPixel { point, rgba });
                    }
                    Some(Cell::Wall) | None => {}
                }
            }
        }

        Ok(branches)
    }

    /// A path pixel is a branch if it has a path neighbor both vertically and horizontally.
    /// Straight corridors are not branches.
    pub fn is_branch(&self, point: Point) -> bool {
        let open = |direction| {
            self.grid
                .neighbor(point, direction)
                .is_some_and(|p| self.grid.is_path(p))
        };

        (open(Direction::Up) || open(Direction::Down))
            && (open(Direction::Left) || open(Direction::Right))
    }

    /// Walks from `from` in `direction` until leaving the grid, hitting a wall or reaching one of
    /// `vertices`, which is returned.
    fn cast_ray(
        &self,
        from: Point,
        direction: Direction,
        vertices: &HashSet<Point>,
    ) -> Option<Point> {
        let mut current = from;
        loop {
            current = self.grid.neighbor(current, direction)?;
            if !self.grid.is_path(current) {
                return None;
            }
            if vertices.contains(&current) {
                return Some(current);
            }
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::grid::GridMap;

    fn extract(text: &str) -> Result<Maze> {
        let map = GridMap::from_ascii(text);
        MazeExtractor::new(&map).extract()
    }

    /// Every edge must be stored on both of its ends
    fn assert_undirected(maze: &Maze) {
        let graph = maze.graph();
        for v in graph.values() {
            for n in graph.neighbors(&v) {
                assert!(graph.neighbors(&n).contains(&v), "{} -> {}", v, n);
            }
        }
    }

    #[test]
    fn test_straight_corridor() {
        let maze = extract(
            "
#.#
#.#
#.#
#.#
#.#
",
        )
        .unwrap();

        assert_eq!(maze.start(), Point::new(1, 0));
        assert_eq!(maze.exit(), Point::new(1, 4));
        assert_eq!(maze.graph().len(), 2);
        assert_eq!(maze.graph().edge_count(), 1);
        assert_eq!(
            maze.solve_bfs().unwrap().vertices(),
            &[Point::new(1, 0), Point::new(1, 4)]
        );
    }

    #[test]
    fn test_l_shaped_corridor() {
        let maze = extract(
            "
#.###
#.###
#....
#####
",
        )
        .unwrap();

        // start on the top row, exit on the right column
        assert_eq!(maze.start(), Point::new(1, 0));
        assert_eq!(maze.exit(), Point::new(4, 2));
        assert_eq!(maze.graph().len(), 3);
        assert!(maze.graph().contains(&Point::new(1, 2)));
        assert_eq!(
            maze.graph().neighbors(&Point::new(1, 2)),
            vec![Point::new(1, 0), Point::new(4, 2)]
        );
        assert_eq!(maze.graph().edge_count(), 2);
        assert_undirected(&maze);

        let solution = maze.solve_bfs().unwrap();
        assert_eq!(
            solution.vertices(),
            &[Point::new(1, 0), Point::new(1, 2), Point::new(4, 2)]
        );
    }

    #[test]
    fn test_single_opening() {
        assert_eq!(
            extract(
                "
#.###
#.###
#...#
#####
"
            )
            .unwrap_err(),
            MazeError::InvalidMaze
        );

        assert_eq!(extract("#####\n#####").unwrap_err(), MazeError::InvalidMaze);
        assert_eq!(
            MazeExtractor::new(&GridMap::new(0, 0)).extract().unwrap_err(),
            MazeError::InvalidMaze
        );
    }

    #[test]
    fn test_single_pixel_image() {
        // one pixel is both top and bottom, it only counts once
        assert_eq!(extract(".").unwrap_err(), MazeError::InvalidMaze);
    }

    #[test]
    fn test_one_pixel_wide_corridor() {
        // no interior, the left and right columns are the same pixels
        let maze = extract(".\n.\n.\n.\n.").unwrap();

        assert_eq!(maze.start(), Point::new(0, 0));
        assert_eq!(maze.exit(), Point::new(0, 4));
        assert_eq!(maze.graph().len(), 2);
        assert_eq!(maze.graph().edge_count(), 1);
        assert_eq!(maze.solve_bfs().unwrap().pixels().unwrap().len(), 5);
    }

    #[test]
    fn test_one_pixel_high_corridor() {
        // top and bottom of each column are the same pixel, the second column already holds
        // the exit
        let maze = extract(".....").unwrap();

        assert_eq!(maze.start(), Point::new(0, 0));
        assert_eq!(maze.exit(), Point::new(1, 0));
        assert_eq!(maze.graph().len(), 2);
        assert_eq!(maze.graph().edge_count(), 1);
        assert_eq!(
            maze.solve_bfs().unwrap().pixels().unwrap(),
            vec![Point::new(0, 0), Point::new(1, 0)]
        );
    }

    #[test]
    fn test_one_pixel_wide_single_opening() {
        // the middle pixel is both the left and the right end of its row
        assert_eq!(extract("#\n.\n#").unwrap_err(), MazeError::InvalidMaze);
    }

    #[test]
    fn test_opening_scan_order() {
        // the bottom row is checked in the same column pass as the top row, before any of the
        // left and right columns
        let map = GridMap::from_ascii(
            "
####.#
.#...#
##.###
#.####
",
        );
        let extractor = MazeExtractor::new(&map);
        assert_eq!(
            extractor.find_openings().unwrap(),
            (Point::new(1, 3), Point::new(4, 0))
        );
    }

    #[test]
    fn test_malformed_pixel() {
        assert!(matches!(
            extract(
                "
#.###
#.#r#
#....
#####
"
            ),
            Err(MazeError::MalformedPixel {
                point: Point { x: 3, y: 1 },
                ..
            })
        ));
    }

    #[test]
    fn test_disconnected() {
        let maze = extract(
            "
#.####
#.##.#
##...#
######
",
        );
        // the right blob does not reach the border
        assert_eq!(maze.unwrap_err(), MazeError::InvalidMaze);

        let maze = extract(
            "
#.####
#.##..
##.#.#
######
",
        )
        .unwrap();
        assert_eq!(maze.start(), Point::new(1, 0));
        assert_eq!(maze.exit(), Point::new(5, 1));
        assert_eq!(maze.solve_bfs(), Err(MazeError::NoSolution));
    }

    #[test]
    fn test_junctions() {
        //   0123456
        // 0 #.#####
        // 1 #.....#
        // 2 #.###.#
        // 3 #.....#
        // 4 #####.#
        let maze = extract(
            "
#.#####
#.....#
#.###.#
#.....#
#####.#
",
        )
        .unwrap();
        assert_undirected(&maze);

        let branches = MazeExtractor::new(&GridMap::from_ascii(
            "
#.#####
#.....#
#.###.#
#.....#
#####.#
",
        ))
        .find_branches()
        .unwrap();
        assert_eq!(
            branches,
            vec![
                Point::new(1, 1),
                Point::new(1, 3),
                Point::new(5, 1),
                Point::new(5, 3)
            ]
        );

        // the loop offers two routes over 5 vertices, the earlier registered branch wins
        let solution = maze.solve_bfs().unwrap();
        assert_eq!(
            solution.vertices(),
            &[
                Point::new(1, 0),
                Point::new(1, 1),
                Point::new(1, 3),
                Point::new(5, 3),
                Point::new(5, 4)
            ]
        );
        assert_eq!(solution.pixels().unwrap().len(), 1 + 1 + 2 + 4 + 1);
    }

    #[test]
    fn test_near_border_branch() {
        // the branch at (1, 1) touches the border ring on two sides
        let maze = extract(
            "
#.##
#..#
##.#
##.#
",
        )
        .unwrap();
        assert_eq!(maze.exit(), Point::new(2, 3));
        assert!(maze.graph().contains(&Point::new(1, 1)));
        assert!(maze.graph().contains(&Point::new(2, 1)));
        assert_eq!(maze.solve_bfs().unwrap().vertices().len(), 4);
    }
}
