//! pathlab: draw walls on a grid and watch A* find the shortest path.

use std::time::Duration;

use clap::Parser;
use pathlab_crossterm::{App, AppConfig, CrosstermDriver};
use pathlab_editor::SessionConfig;

#[derive(Parser, Debug)]
#[command(name = "pathlab")]
#[command(about = "Interactive A* shortest-path visualizer")]
#[command(version)]
struct Cli {
    /// Side length of the square board
    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(i32).range(2..=200))]
    rows: i32,

    /// Search steps drawn per frame
    #[arg(long, default_value_t = 1)]
    batch: usize,

    /// Pause between search frames, in milliseconds
    #[arg(long, default_value_t = 10)]
    delay_ms: u64,

    /// Give up after this many expansions
    #[arg(long)]
    step_limit: Option<usize>,

    /// Seed for scattering walls with `r`
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Wall probability when scattering
    #[arg(long, default_value_t = 0.3)]
    density: f64,
}

impl Cli {
    fn app_config(&self) -> AppConfig {
        AppConfig {
            session: SessionConfig::default().with_rows(self.rows),
            batch: self.batch.max(1),
            frame_delay: Duration::from_millis(self.delay_ms),
            step_limit: self.step_limit,
            wall_density: self.density,
            seed: self.seed,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let config = cli.app_config();
    log::debug!("starting with {config:?}");

    let mut app = App::new(CrosstermDriver::new(), config);
    if let Err(e) = app.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
