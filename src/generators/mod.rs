use rand::{Rng, SeedableRng, rngs::StdRng};

mod aldous_broder;
mod fusion;
mod growing_tree;
mod random;
mod recursive_division;

pub use aldous_broder::AldousBroderGenerator;
pub use fusion::FusionGenerator;
pub use growing_tree::{GrowingTreeGenerator, Selection};
pub use random::RandomGenerator;
pub use recursive_division::RecursiveDivisionGenerator;

use crate::{
    ParseAlgorithmError,
    maze::{Coords, Maze, MazeView, Result, Wall},
};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Uniformly random cell of the maze.
fn random_cell(maze: &Maze, rng: &mut StdRng) -> Coords {
    Coords::new(
        rng.random_range(0..maze.width()),
        rng.random_range(0..maze.height()),
    )
}

/// What a generation step did to the walls of the maze.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum WallChange {
    #[default]
    None,
    /// The wall was opened into a passage.
    Opened(Wall),
    /// The wall was examined and left closed.
    Kept(Wall),
    /// A line of walls was closed, leaving `door` open.
    Closed { walls: Vec<Wall>, door: Wall },
}

/// Description of one generation step, for display only.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StepInfo {
    /// The cell the step worked on
    pub cell: Option<Coords>,
    pub change: WallChange,
}

/// A resumable maze generation algorithm.
///
/// A generator borrows the maze it was built for until it is dropped, so it
/// can only ever carve that maze. Each call to [`MazeGenerator::step`]
/// performs one unit of work; once [`MazeGenerator::has_more_steps`] returns
/// false the generator is spent and stepping it again fails with
/// [`crate::maze::MazeError::Exhausted`].
pub trait MazeGenerator {
    fn kind(&self) -> Generator;

    /// The maze being carved.
    fn maze(&self) -> &Maze;

    fn step(&mut self) -> Result<StepInfo>;

    fn has_more_steps(&self) -> bool;

    /// Cells reached so far, indexed by vertex identifier.
    fn visited(&self) -> Option<&[bool]> {
        None
    }

    /// Connected-component label of every cell, indexed by vertex identifier.
    fn labels(&self) -> Option<&[usize]> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Random,
    Fusion,
    Prim,
    Backtrack,
    AldousBroder,
    RecursiveDivision,
}

impl Generator {
    pub const ALL: [Generator; 6] = [
        Generator::Random,
        Generator::Fusion,
        Generator::Prim,
        Generator::Backtrack,
        Generator::AldousBroder,
        Generator::RecursiveDivision,
    ];

    /// Name accepted by [`std::str::FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Generator::Random => "random",
            Generator::Fusion => "fusion",
            Generator::Prim => "prim",
            Generator::Backtrack => "backtrack",
            Generator::AldousBroder => "aldous-broder",
            Generator::RecursiveDivision => "recursive-division",
        }
    }

    /// True if the algorithm always produces a spanning tree.
    pub fn is_perfect(&self) -> bool {
        !matches!(self, Generator::Random)
    }

    /// Creates the generator for `maze`, resetting its walls to the algorithm's starting state.
    pub fn build(self, maze: &mut Maze, seed: Option<u64>) -> Box<dyn MazeGenerator + '_> {
        let rng = get_rng(seed);
        match self {
            Generator::Random => Box::new(RandomGenerator::new(maze, rng)),
            Generator::Fusion => Box::new(FusionGenerator::new(maze, rng)),
            Generator::Prim => Box::new(GrowingTreeGenerator::new(maze, Selection::Random, rng)),
            Generator::Backtrack => {
                Box::new(GrowingTreeGenerator::new(maze, Selection::Newest, rng))
            }
            Generator::AldousBroder => Box::new(AldousBroderGenerator::new(maze, rng)),
            Generator::RecursiveDivision => Box::new(RecursiveDivisionGenerator::new(maze, rng)),
        }
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::Random => write!(f, "Random Passages"),
            Generator::Fusion => write!(f, "Random Fusion (Kruskal's Algorithm)"),
            Generator::Prim => write!(f, "Growing Tree, random cell (Prim's Algorithm)"),
            Generator::Backtrack => write!(f, "Growing Tree, newest cell (Recursive Backtracker)"),
            Generator::AldousBroder => write!(f, "Aldous-Broder Random Walk"),
            Generator::RecursiveDivision => write!(f, "Recursive Division"),
        }
    }
}

impl std::str::FromStr for Generator {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Generator::ALL
            .into_iter()
            .find(|generator| generator.name() == name)
            .ok_or_else(|| ParseAlgorithmError::new("generator", s))
    }
}

/// Runs a generator on `maze` until it is spent. Returns the number of steps taken.
pub fn generate_maze(maze: &mut Maze, generator: Generator, seed: Option<u64>) -> Result<usize> {
    let mut generation = generator.build(maze, seed);
    let mut steps = 0;
    while generation.has_more_steps() {
        generation.step()?;
        steps += 1;
    }
    tracing::debug!("[generate] {} finished after {} steps", generator.name(), steps);
    Ok(steps)
}
