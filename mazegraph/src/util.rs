use image::{DynamicImage, GenericImageView};

use crate::grid::{Cell, GridMap};

/// Classifies every pixel of the image as path, wall or an unknown color
pub fn parse_img(img: &DynamicImage) -> GridMap {
    let width = img.width() as usize;
    let height = img.height() as usize;

    let mut cells = vec![vec![Cell::Wall; width]; height];

    for (col, row, p) in img.pixels() {
        cells[row as usize][col as usize] = Cell::from_rgba(p.0);
    }

    GridMap {
        rows: height,
        columns: width,
        cells,
    }
}
