use std::{path::PathBuf, time::Duration};

use clap::Parser;
use mazegraph::{
    app::{App, AppConfig},
    generators::Generator,
    solvers::Solver,
};

/// Watch a maze being generated, then solved, in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Maze width in cells
    #[arg(short = 'W', long)]
    width: Option<usize>,
    /// Maze height in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,
    /// Generation algorithm: random, fusion, prim, backtrack, aldous-broder or recursive-division
    #[arg(short, long)]
    generator: Option<Generator>,
    /// Solving algorithm: breadth-first (bfs) or a-star (astar)
    #[arg(short, long)]
    solver: Option<Solver>,
    /// Seed for a reproducible maze
    #[arg(long)]
    seed: Option<u64>,
    /// Milliseconds between generation frames, 0 to skip the animation
    #[arg(long)]
    generate_delay_ms: Option<u64>,
    /// Milliseconds between solving frames, 0 to skip the animation
    #[arg(long)]
    solve_delay_ms: Option<u64>,
    /// Directory of the log file
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Most verbose level written to the log file
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

impl Args {
    fn config(&self) -> AppConfig {
        let defaults = AppConfig::default();
        AppConfig {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            generator: self.generator.unwrap_or(defaults.generator),
            solver: self.solver.unwrap_or(defaults.solver),
            seed: self.seed,
            generate_delay: self
                .generate_delay_ms
                .map_or(defaults.generate_delay, Duration::from_millis),
            solve_delay: self
                .solve_delay_ms
                .map_or(defaults.solve_delay, Duration::from_millis),
            log_dir: self.log_dir.clone().unwrap_or(defaults.log_dir),
        }
    }
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    let config = args.config();

    // The terminal is taken by the drawing, so logs go to a file
    std::fs::create_dir_all(&config.log_dir)?;
    let file_appender = tracing_appender::rolling::never(&config.log_dir, "mazegraph.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(args.log_level)
        .init();

    let app = App::new(config);
    tracing::debug!("[main] starting with {:?}", app.config());

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = app.run(&mut stdout);
    App::restore_terminal(&mut stdout)?;
    if let Err(e) = &result {
        tracing::error!("[main] app exited with error: {}", e);
    }
    result
}
