use crossterm::event::KeyCode;

use crate::maze::{Coords, MazeView};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Arrow keys move the player, anything else is ignored.
    pub fn from_key(code: KeyCode) -> Option<Direction> {
        match code {
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Down => Some(Direction::Down),
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Right => Some(Direction::Right),
            _ => None,
        }
    }

    /// The cell one step away, or `None` when it would leave the grid.
    fn apply(self, from: Coords, maze: &impl MazeView) -> Option<Coords> {
        let Coords { x, y } = from;
        let to = match self {
            Direction::Up => Coords::new(x, y.checked_sub(1)?),
            Direction::Down => Coords::new(x, y + 1),
            Direction::Left => Coords::new(x.checked_sub(1)?, y),
            Direction::Right => Coords::new(x + 1, y),
        };
        maze.contains(to).then_some(to)
    }
}

/// A player walking from the entrance to the exit by hand.
///
/// The trail holds the cells from the entrance to the player. Stepping back
/// onto the previous cell shortens it instead of growing it.
pub struct PlayState {
    trail: Vec<Coords>,
    goal: Coords,
    moves: usize,
}

impl PlayState {
    pub fn new(maze: &impl MazeView) -> Self {
        let (entrance, exit) = maze.openings();
        PlayState {
            trail: vec![entrance],
            goal: exit,
            moves: 0,
        }
    }

    pub fn position(&self) -> Coords {
        self.trail[self.trail.len() - 1]
    }

    pub fn trail(&self) -> &[Coords] {
        &self.trail
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn goal_reached(&self) -> bool {
        self.position() == self.goal
    }

    /// Moves the player unless a wall or the border is in the way.
    /// Returns the new position if the move is successful, None otherwise.
    pub fn move_player(&mut self, maze: &impl MazeView, direction: Direction) -> Option<Coords> {
        let from = self.position();
        let to = direction.apply(from, maze)?;
        if maze.is_wall_between(from, to) {
            return None;
        }

        let len = self.trail.len();
        if len >= 2 && self.trail[len - 2] == to {
            tracing::debug!("[play] back to {}", to);
            self.trail.pop();
        } else {
            tracing::debug!("[play] moving to {}", to);
            self.trail.push(to);
        }
        self.moves += 1;
        Some(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Maze;

    fn c(x: usize, y: usize) -> Coords {
        Coords::new(x, y)
    }

    /// 2x2 maze shaped like a U: (0,0) (0,1) (1,1) (1,0)
    fn u_maze() -> Maze {
        let mut maze = Maze::new(2, 2).unwrap();
        maze.open_passage(c(0, 0), c(0, 1)).unwrap();
        maze.open_passage(c(0, 1), c(1, 1)).unwrap();
        maze.open_passage(c(1, 1), c(1, 0)).unwrap();
        maze.set_openings(c(0, 0), c(1, 0)).unwrap();
        maze
    }

    #[test]
    fn test_walls_and_border_block_moves() {
        let maze = u_maze();
        let mut play = PlayState::new(&maze);
        assert_eq!(play.move_player(&maze, Direction::Right), None);
        assert_eq!(play.move_player(&maze, Direction::Up), None);
        assert_eq!(play.move_player(&maze, Direction::Left), None);
        assert_eq!(play.position(), c(0, 0));
        assert_eq!(play.moves(), 0);
    }

    #[test]
    fn test_reaches_goal_through_passages() {
        let maze = u_maze();
        let mut play = PlayState::new(&maze);
        assert_eq!(play.move_player(&maze, Direction::Down), Some(c(0, 1)));
        assert_eq!(play.move_player(&maze, Direction::Right), Some(c(1, 1)));
        assert!(!play.goal_reached());
        assert_eq!(play.move_player(&maze, Direction::Up), Some(c(1, 0)));
        assert!(play.goal_reached());
        assert_eq!(play.trail(), &[c(0, 0), c(0, 1), c(1, 1), c(1, 0)]);
        assert_eq!(play.moves(), 3);
    }

    #[test]
    fn test_stepping_back_shortens_trail() {
        let maze = u_maze();
        let mut play = PlayState::new(&maze);
        play.move_player(&maze, Direction::Down);
        play.move_player(&maze, Direction::Right);
        play.move_player(&maze, Direction::Left);
        assert_eq!(play.trail(), &[c(0, 0), c(0, 1)]);
        assert_eq!(play.moves(), 3);
    }

    #[test]
    fn test_only_arrows_move() {
        assert_eq!(Direction::from_key(KeyCode::Left), Some(Direction::Left));
        assert_eq!(Direction::from_key(KeyCode::Down), Some(Direction::Down));
        assert_eq!(Direction::from_key(KeyCode::Char('w')), None);
        assert_eq!(Direction::from_key(KeyCode::Esc), None);
    }
}
