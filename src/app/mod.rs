pub mod canvas;
pub mod play;

use std::{
    io::{Stdout, Write},
    path::PathBuf,
    time::{Duration, Instant},
};

use crossterm::{
    ExecutableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    app::{
        canvas::{Canvas, Tile},
        play::{Direction, PlayState},
    },
    generators::{Generator, MazeGenerator, StepInfo, WallChange, generate_maze},
    maze::{Coords, Maze, MazeError, MazeView},
    solvers::{MazeSolver, SolveStep, Solver},
};

/// Runtime settings of the visualizer.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Maze width in cells
    pub width: usize,
    /// Maze height in cells
    pub height: usize,
    pub generator: Generator,
    pub solver: Solver,
    /// Seed for reproducible generation, random if `None`
    pub seed: Option<u64>,
    /// Pause between two generation frames. Zero skips the animation.
    pub generate_delay: Duration,
    /// Pause between two solving frames. Zero skips the animation.
    pub solve_delay: Duration,
    /// Directory holding `mazegraph.log`
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 12,
            generator: Generator::Fusion,
            solver: Solver::AStar,
            seed: None,
            generate_delay: Duration::from_millis(15),
            solve_delay: Duration::from_millis(30),
            log_dir: PathBuf::from("logs"),
        }
    }
}

/// Whether the animation goes on after a frame.
enum Flow {
    Continue,
    Cancel,
}

/// Result of one generate-and-solve run in profiling mode.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub generate_steps: usize,
    pub generate_time: Duration,
    pub solve_steps: usize,
    pub solve_time: Duration,
    pub path_len: usize,
}

pub struct App {
    config: AppConfig,
}

impl App {
    /// Slowest animation speed reachable with the Down key
    const MAX_DELAY: Duration = Duration::from_secs(1);

    pub fn new(config: AppConfig) -> Self {
        App { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Generate a maze, place its openings, then solve it, drawing each step.
    pub fn run(&self, stdout: &mut Stdout) -> std::io::Result<()> {
        let mut maze = Maze::new(self.config.width, self.config.height).map_err(io_error)?;

        if !App::check_size(stdout, &maze)? {
            App::wait_for_esc()?;
            return Ok(());
        }
        tracing::info!(
            "Started app with {}x{} maze, {} then {}",
            maze.width(),
            maze.height(),
            self.config.generator.name(),
            self.config.solver.name()
        );

        if let Flow::Cancel = self.animate_generation(stdout, &mut maze)? {
            tracing::info!("Generation was cancelled by user.");
            return Ok(());
        }
        let (entrance, exit) = maze.find_longest_shortest_path();
        tracing::info!("Openings placed at {} and {}", entrance, exit);

        let path = match self.animate_solving(stdout, &maze)? {
            (Flow::Cancel, _) => {
                tracing::info!("Solving was cancelled by user.");
                return Ok(());
            }
            (Flow::Continue, path) => path,
        };

        let mut canvas = Canvas::from_maze(&maze);
        canvas.paint_route(&path);
        canvas.queue_draw(stdout)?;
        let msg = if path.is_empty() {
            "No path found. ".to_string()
        } else {
            format!("Path found! {} cells. ", path.len())
        };
        stdout.execute(style::PrintStyledContent(
            msg.with(Color::Green).attribute(Attribute::Bold),
        ))?;
        stdout.execute(style::PrintStyledContent(
            "Arrows: walk it yourself  Esc: exit\r\n"
                .with(Color::Blue)
                .attribute(Attribute::Bold),
        ))?;
        App::play(stdout, &maze)
    }

    /// Lets the user walk from the entrance to the exit with the arrow keys.
    /// Returns when Esc is pressed.
    fn play(stdout: &mut Stdout, maze: &Maze) -> std::io::Result<()> {
        let mut state = PlayState::new(maze);
        loop {
            let event::Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != event::KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Esc {
                tracing::debug!("[play] Esc key pressed, exiting");
                return Ok(());
            }
            let Some(direction) = Direction::from_key(key.code) else {
                continue;
            };
            if state.move_player(maze, direction).is_none() {
                continue;
            }

            let mut canvas = Canvas::from_maze(maze);
            canvas.paint_route(state.trail());
            canvas.paint_cells([state.position()], Tile::Active);
            canvas.queue_draw(stdout)?;
            if state.goal_reached() {
                tracing::info!("Player reached the exit in {} moves", state.moves());
                let msg = format!(
                    "You reached the exit in {} moves! Press Esc to exit...\r\n",
                    state.moves()
                );
                queue!(
                    stdout,
                    terminal::Clear(ClearType::CurrentLine),
                    style::PrintStyledContent(msg.with(Color::Green).attribute(Attribute::Bold))
                )?;
                stdout.flush()?;
                return App::wait_for_esc();
            }
            App::queue_status(stdout, &format!("moves {}  Esc: exit", state.moves()))?;
            stdout.flush()?;
        }
    }

    /// Checks that the terminal can hold the maze drawing plus a status line.
    /// Prints a message and returns false if it cannot.
    fn check_size(stdout: &mut Stdout, maze: &Maze) -> std::io::Result<bool> {
        let (width, height) = Canvas::dimensions(maze.width(), maze.height());
        let needed_width = width * Tile::WIDTH as usize;
        let needed_height = height + 1;
        let (term_width, term_height) = terminal::size()?;
        if (term_width as usize) < needed_width || (term_height as usize) < needed_height {
            let msg = format!(
                "Terminal size is too small ({}x{}) for the maze ({}x{} needed). Please resize the terminal.\r\n",
                term_width, term_height, needed_width, needed_height
            );
            queue!(
                stdout,
                terminal::Clear(ClearType::All),
                cursor::MoveTo(0, 0),
                style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
                style::PrintStyledContent(
                    "Press Esc to exit...\r\n"
                        .with(Color::Blue)
                        .attribute(Attribute::Bold)
                )
            )?;
            stdout.flush()?;
            return Ok(false);
        }
        Ok(true)
    }

    fn animate_generation(&self, stdout: &mut Stdout, maze: &mut Maze) -> std::io::Result<Flow> {
        let mut generation = self.config.generator.build(maze, self.config.seed);
        let mut delay = self.config.generate_delay;
        let mut steps = 0;
        while generation.has_more_steps() {
            let info = generation.step().map_err(io_error)?;
            steps += 1;
            if delay.is_zero() {
                continue;
            }
            let canvas = App::generation_frame(generation.as_ref(), &info);
            canvas.queue_draw(stdout)?;
            let status = format!(
                "{} | step {} | ↑/↓: speed  Esc: exit",
                generation.kind(),
                steps
            );
            App::queue_status(stdout, &status)?;
            stdout.flush()?;
            if let Flow::Cancel = App::pause(&mut delay)? {
                return Ok(Flow::Cancel);
            }
        }
        tracing::info!("{} finished after {} steps", self.config.generator, steps);
        Ok(Flow::Continue)
    }

    fn generation_frame(generation: &dyn MazeGenerator, info: &StepInfo) -> Canvas {
        let maze = generation.maze();
        let mut canvas = Canvas::from_maze(maze);
        if let Some(labels) = generation.labels() {
            for (id, &label) in labels.iter().enumerate() {
                canvas.set_cell(maze.coords_of(id), Tile::region(label));
            }
        } else if let Some(visited) = generation.visited() {
            let cells = visited
                .iter()
                .enumerate()
                .filter(|&(_, &v)| v)
                .map(|(id, _)| maze.coords_of(id));
            canvas.paint_cells(cells, Tile::Visited);
        }
        if let WallChange::Closed { door, .. } = &info.change {
            canvas.set_between(door.a(), door.b(), Tile::Active);
        }
        if let Some(cell) = info.cell {
            canvas.set_cell(cell, Tile::Active);
        }
        canvas
    }

    /// Returns the solver's path, empty if the exit is unreachable.
    fn animate_solving(
        &self,
        stdout: &mut Stdout,
        maze: &Maze,
    ) -> std::io::Result<(Flow, Vec<Coords>)> {
        let mut search = self.config.solver.build(maze);
        let mut delay = self.config.solve_delay;
        let mut steps = 0;
        while search.has_more_steps() {
            let step = search.step();
            steps += 1;
            if delay.is_zero() {
                continue;
            }
            let canvas = App::solving_frame(maze, search.as_ref(), step);
            canvas.queue_draw(stdout)?;
            let status = format!("{} | step {} | ↑/↓: speed  Esc: exit", search.kind(), steps);
            App::queue_status(stdout, &status)?;
            stdout.flush()?;
            if let Flow::Cancel = App::pause(&mut delay)? {
                return Ok((Flow::Cancel, Vec::new()));
            }
        }
        tracing::info!(
            "{} finished after {} steps, path of {} cells",
            self.config.solver,
            steps,
            search.path().len()
        );
        Ok((Flow::Continue, search.path().to_vec()))
    }

    fn solving_frame(maze: &Maze, search: &dyn MazeSolver, step: SolveStep) -> Canvas {
        let mut canvas = Canvas::from_maze(maze);
        let visited = search
            .visited()
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v)
            .map(|(id, _)| maze.coords_of(id));
        canvas.paint_cells(visited, Tile::Visited);
        if let Some(cell) = step.current {
            canvas.paint_cells([cell], Tile::Active);
        }
        canvas.paint_route(search.path());
        canvas
    }

    /// Prints a status line under the maze, cut to the terminal width.
    fn queue_status(stdout: &mut Stdout, status: &str) -> std::io::Result<()> {
        let (term_width, _) = terminal::size()?;
        let (status, _) = status.unicode_truncate(term_width as usize);
        queue!(
            stdout,
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(status.with(Color::Cyan))
        )
    }

    /// Waits for `delay`, handling speed keys and Esc meanwhile.
    fn pause(delay: &mut Duration) -> std::io::Result<Flow> {
        let deadline = Instant::now() + *delay;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                return Ok(Flow::Continue);
            }
            if let event::Event::Key(key) = event::read()? {
                if key.kind != event::KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Esc => {
                        tracing::debug!("[app loop] Esc key pressed, cancelling");
                        return Ok(Flow::Cancel);
                    }
                    KeyCode::Up => {
                        *delay = (*delay / 2).max(Duration::from_millis(1));
                        tracing::debug!("[app loop] speed up, delay is now {:?}", delay);
                    }
                    KeyCode::Down => {
                        *delay = (*delay * 2).min(App::MAX_DELAY);
                        tracing::debug!("[app loop] slow down, delay is now {:?}", delay);
                    }
                    _ => {}
                }
            }
        }
    }

    /// Wait for the user to press the Esc key
    /// This function blocks until Esc is pressed
    fn wait_for_esc() -> std::io::Result<()> {
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if code == KeyCode::Esc && kind == event::KeyEventKind::Press {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Generates and solves one maze without drawing anything.
    pub fn compute(&self) -> Result<RunStats, MazeError> {
        let mut maze = Maze::new(self.config.width, self.config.height)?;

        let started = Instant::now();
        let generate_steps = generate_maze(&mut maze, self.config.generator, self.config.seed)?;
        maze.find_longest_shortest_path();
        let generate_time = started.elapsed();

        let started = Instant::now();
        let mut search = self.config.solver.build(&maze);
        let mut solve_steps = 0;
        while search.has_more_steps() {
            search.step();
            solve_steps += 1;
        }
        let solve_time = started.elapsed();

        Ok(RunStats {
            generate_steps,
            generate_time,
            solve_steps,
            solve_time,
            path_len: search.path().len(),
        })
    }

    /// Profiling mode: run generation and solving repeatedly without rendering
    pub fn profile(&self, iterations: usize) -> Result<Vec<RunStats>, MazeError> {
        (0..iterations)
            .map(|i| {
                let stats = self.compute()?;
                tracing::info!("[profile] run {}: {:?}", i, stats);
                Ok(stats)
            })
            .collect()
    }
}

fn io_error(err: MazeError) -> std::io::Error {
    std::io::Error::other(err)
}
