use thiserror::Error;

use crate::grid::Point;

pub type Result<T> = std::result::Result<T, MazeError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// The border of the image did not contain two distinct openings
    #[error("invalid maze: missing start and/or exit opening")]
    InvalidMaze,

    /// An interior pixel that is neither path (white) nor wall (black)
    #[error("bad pixel color {rgba:?} at {point}")]
    MalformedPixel { point: Point, rgba: [u8; 4] },

    #[error("maze has no solution")]
    NoSolution,

    #[error("vertex {0} is not registered in the graph")]
    UnknownVertex(String),

    #[error("vertex {0} cannot be connected to itself")]
    SelfLoop(String),

    #[error("maze has no exit")]
    MissingExit,

    /// Two consecutive path points that are not on a common row or column
    #[error("path segment {from} -> {to} is not axis-aligned")]
    DiagonalSegment { from: Point, to: Point },

    #[error("point {0} lies outside of the image")]
    PointOutOfBounds(Point),

    #[error("{0} is not supported")]
    Unsupported(&'static str),

    #[error("invalid configuration: {0}")]
    Config(String),
}
