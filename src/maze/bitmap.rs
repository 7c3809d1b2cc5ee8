use super::{Coords, MazeError, MazeView, Result};

/// Brightness below which a pixel counts as a wall.
const DEFAULT_DARK_THRESHOLD: u8 = 128;

/// A read-only maze backed by a grayscale bitmap: one cell per pixel, dark
/// pixels are walls.
///
/// Two adjacent cells are separated by a wall when either of them is dark.
#[derive(Debug, Clone)]
pub struct BitmapMaze {
    width: usize,
    height: usize,
    /// Row-major brightness values, one per pixel
    luminance: Box<[u8]>,
    threshold: u8,
    openings: (Coords, Coords),
}

impl BitmapMaze {
    /// Builds a maze from one brightness byte per pixel, row by row.
    pub fn from_luminance(width: usize, height: usize, luminance: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        let expected = width * height;
        if luminance.len() != expected {
            return Err(MazeError::BitmapSize {
                expected,
                actual: luminance.len(),
            });
        }
        Ok(BitmapMaze {
            width,
            height,
            luminance: luminance.into_boxed_slice(),
            threshold: DEFAULT_DARK_THRESHOLD,
            openings: (Coords::new(0, 0), Coords::new(width - 1, height - 1)),
        })
    }

    /// Builds a maze from RGBA pixels. Brightness is the mean of the color channels.
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8]) -> Result<Self> {
        let expected = width * height * 4;
        if rgba.len() != expected {
            return Err(MazeError::BitmapSize {
                expected,
                actual: rgba.len(),
            });
        }
        let luminance = rgba
            .chunks_exact(4)
            .map(|px| ((px[0] as u16 + px[1] as u16 + px[2] as u16) / 3) as u8)
            .collect();
        BitmapMaze::from_luminance(width, height, luminance)
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_openings(mut self, entrance: Coords, exit: Coords) -> Result<Self> {
        for coord in [entrance, exit] {
            if !self.contains(coord) {
                return Err(MazeError::OutOfBounds(coord));
            }
        }
        self.openings = (entrance, exit);
        Ok(self)
    }

    /// True if the pixel at `coord` is a wall. Out of bounds counts as a wall.
    pub fn is_dark(&self, coord: Coords) -> bool {
        if !self.contains(coord) {
            return true;
        }
        self.luminance[self.id_of(coord)] < self.threshold
    }
}

impl MazeView for BitmapMaze {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn is_wall_between(&self, a: Coords, b: Coords) -> bool {
        !a.is_adjacent(b) || self.is_dark(a) || self.is_dark(b)
    }

    fn openings(&self) -> (Coords, Coords) {
        self.openings
    }
}
