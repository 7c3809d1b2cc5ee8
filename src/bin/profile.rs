use mazegraph::app::{App, AppConfig};

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(10);
    let app = App::new(AppConfig {
        width: 255,
        height: 255,
        seed: Some(0),
        ..AppConfig::default()
    });
    let runs = app.profile(num_iters).map_err(std::io::Error::other)?;

    let total_steps: usize = runs.iter().map(|r| r.generate_steps + r.solve_steps).sum();
    let total_time: std::time::Duration = runs.iter().map(|r| r.generate_time + r.solve_time).sum();
    tracing::info!(
        "[profile] {} runs, {} steps in {:?}",
        runs.len(),
        total_steps,
        total_time
    );
    Ok(())
}
