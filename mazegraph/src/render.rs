use image::{DynamicImage, Pixel, Rgba, RgbaImage};

use crate::{
    config::DEFAULT_OVERLAY,
    error::{MazeError, Result},
    maze::Solution,
};

/// Draws a solution onto a copy of the maze image
#[derive(Debug, Clone, Copy)]
pub struct PathRenderer {
    overlay: Rgba<u8>,
}

impl Default for PathRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_OVERLAY)
    }
}

impl PathRenderer {
    pub fn new(overlay: [u8; 4]) -> Self {
        Self {
            overlay: Rgba(overlay),
        }
    }

    /// Returns an RGBA copy of `image` with the overlay blended over every pixel of the path.
    /// Nothing is drawn if any segment of the path is not axis-aligned or leaves the image.
    pub fn render(&self, image: &DynamicImage, solution: &Solution) -> Result<RgbaImage> {
        let mut output = image.to_rgba8();
        let pixels = solution.pixels()?;

        if let Some(p) = pixels
            .iter()
            .find(|p| p.x >= output.width() as usize || p.y >= output.height() as usize)
        {
            return Err(MazeError::PointOutOfBounds(*p));
        }

        for p in pixels {
            output
                .get_pixel_mut(p.x as u32, p.y as u32)
                .blend(&self.overlay);
        }

        Ok(output)
    }
}
