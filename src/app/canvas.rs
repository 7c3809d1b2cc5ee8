use std::{fmt, io::Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Stylize},
};

use crate::maze::{Coords, MazeView};

/// One character cell pair of the terminal drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tile {
    Wall,
    Empty,
    /// Reached by the running algorithm
    Visited,
    /// The cell the last step worked on
    Active,
    /// Part of the solution path
    Route,
    Start,
    Goal,
    /// Member of a connected component, colored by label
    Region(u8),
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const WIDTH: u16 = 2;

    const REGION_COLORS: [Color; 6] = [
        Color::DarkBlue,
        Color::DarkCyan,
        Color::DarkGreen,
        Color::DarkMagenta,
        Color::DarkYellow,
        Color::DarkRed,
    ];

    pub fn region(label: usize) -> Tile {
        Tile::Region((label % Tile::REGION_COLORS.len()) as u8)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Tile::Wall => "██".with(Color::White),
            Tile::Empty => "  ".with(Color::Reset),
            Tile::Visited => "· ".with(Color::Blue),
            Tile::Active => "██".with(Color::Magenta),
            Tile::Route => "██".with(Color::Yellow),
            Tile::Start => "██".with(Color::Green),
            Tile::Goal => "██".with(Color::Red),
            Tile::Region(i) => "██".with(Tile::REGION_COLORS[*i as usize]),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Terminal picture of a maze: cells sit at odd coordinates and the tiles
/// between them show whether the wall is open, so a `w`x`h` maze needs
/// `2w + 1` by `2h + 1` tiles.
pub struct Canvas {
    tiles: Box<[Tile]>,
    width: u16,
    height: u16,
}

impl Canvas {
    /// Tiles needed to draw a maze of the given size.
    pub fn dimensions(maze_width: usize, maze_height: usize) -> (usize, usize) {
        (maze_width * 2 + 1, maze_height * 2 + 1)
    }

    /// Draws the walls and passages of `maze`, with its entrance and exit.
    pub fn from_maze<M: MazeView>(maze: &M) -> Self {
        let (width, height) = Canvas::dimensions(maze.width(), maze.height());
        let mut canvas = Canvas {
            tiles: vec![Tile::Wall; width * height].into_boxed_slice(),
            width: width as u16,
            height: height as u16,
        };
        for y in 0..maze.height() {
            for x in 0..maze.width() {
                let cell = Coords::new(x, y);
                canvas.set_cell(cell, Tile::Empty);
                for neighbor in [Coords::new(x + 1, y), Coords::new(x, y + 1)] {
                    if maze.contains(neighbor) && !maze.is_wall_between(cell, neighbor) {
                        canvas.set_between(cell, neighbor, Tile::Empty);
                    }
                }
            }
        }
        let (entrance, exit) = maze.openings();
        canvas.set_cell(entrance, Tile::Start);
        canvas.set_cell(exit, Tile::Goal);
        canvas
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn ravel_index(&self, x: usize, y: usize) -> usize {
        y * self.width as usize + x
    }

    pub fn get(&self, x: usize, y: usize) -> Tile {
        self.tiles[self.ravel_index(x, y)]
    }

    fn set(&mut self, x: usize, y: usize, tile: Tile) {
        let idx = self.ravel_index(x, y);
        self.tiles[idx] = tile;
    }

    /// Paints a maze cell.
    pub fn set_cell(&mut self, cell: Coords, tile: Tile) {
        self.set(cell.x * 2 + 1, cell.y * 2 + 1, tile);
    }

    /// Paints the tile between two adjacent cells.
    pub fn set_between(&mut self, a: Coords, b: Coords, tile: Tile) {
        self.set(a.x + b.x + 1, a.y + b.y + 1, tile);
    }

    /// Paints cells unless they hold the entrance or exit.
    pub fn paint_cells(&mut self, cells: impl IntoIterator<Item = Coords>, tile: Tile) {
        for cell in cells {
            let idx = self.ravel_index(cell.x * 2 + 1, cell.y * 2 + 1);
            if !matches!(self.tiles[idx], Tile::Start | Tile::Goal) {
                self.tiles[idx] = tile;
            }
        }
    }

    /// Paints a path of adjacent cells, including the passages between them.
    pub fn paint_route(&mut self, path: &[Coords]) {
        for pair in path.windows(2) {
            self.set_between(pair[0], pair[1], Tile::Route);
        }
        self.paint_cells(path.iter().copied(), Tile::Route);
    }

    /// Queues the whole canvas at the top left of the terminal.
    pub fn queue_draw(&self, out: &mut impl Write) -> std::io::Result<()> {
        out.queue(cursor::MoveTo(0, 0))?;
        for row in self.tiles.chunks(self.width as usize) {
            for tile in row {
                out.queue(style::Print(tile))?;
            }
            out.queue(style::Print("\r\n"))?;
        }
        Ok(())
    }
}
