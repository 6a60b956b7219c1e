//! The cooperative main loop tying a [`Driver`] to an [`EditorSession`].

use std::error::Error;
use std::time::Duration;

use pathlab_editor::{EditorSession, SessionConfig};
use pathlab_paths::CancelToken;

use crate::driver::Driver;
use crate::input::{CELL_COLUMNS, Command};
use crate::screen::{self, Screen};
use crate::view::{self, Layout, Overlay};

/// How long the idle loop waits for input before polling again.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Configuration of the terminal front end.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub session: SessionConfig,
    /// Search events consumed between two frames.
    pub batch: usize,
    /// Pause after each frame of a running search.
    pub frame_delay: Duration,
    /// Maximum number of expansions per search.
    pub step_limit: Option<usize>,
    /// Wall probability used by scatter.
    pub wall_density: f64,
    /// Seed of the first scatter; later scatters use the following seeds.
    pub seed: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default().with_cell_size(CELL_COLUMNS),
            batch: 1,
            frame_delay: Duration::from_millis(10),
            step_limit: None,
            wall_density: 0.3,
            seed: 0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Front and back screen buffers.
struct Canvas {
    layout: Layout,
    prev: Screen,
    curr: Screen,
}

impl Canvas {
    fn new(layout: Layout) -> Self {
        Self {
            layout,
            prev: Screen::new(0, 0),
            curr: Screen::new(layout.width, layout.height),
        }
    }

    /// Forget what the terminal shows so the next frame is drawn in full.
    fn invalidate(&mut self) {
        self.prev = Screen::new(0, 0);
    }

    fn present<D: Driver>(
        &mut self,
        driver: &mut D,
        session: &EditorSession,
        overlay: &Overlay,
        notice: Option<&str>,
    ) -> Result<(), Box<dyn Error>> {
        view::draw(&mut self.curr, &self.layout, session, overlay, notice);
        let frame = screen::diff(&self.prev, &self.curr);
        if !frame.is_empty() {
            driver.flush(&frame)?;
        }
        self.prev.clone_from(&self.curr);
        Ok(())
    }
}

/// The pathlab terminal application.
pub struct App<D: Driver> {
    driver: D,
    session: EditorSession,
    config: AppConfig,
    canvas: Canvas,
    overlay: Overlay,
    notice: Option<String>,
    scatters: u64,
}

impl<D: Driver> App<D> {
    /// Create the app. The session's cell size is forced to the terminal
    /// cell width so mouse positions map onto the drawn board.
    pub fn new(driver: D, mut config: AppConfig) -> Self {
        config.session.cell_size = CELL_COLUMNS;
        let session = EditorSession::new(config.session).with_step_limit(config.step_limit);
        let canvas = Canvas::new(Layout::for_board(config.session.rows));
        Self {
            driver,
            session,
            config,
            canvas,
            overlay: Overlay::new(),
            notice: None,
            scatters: 0,
        }
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run until the user quits. The driver is closed on every exit path.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.driver.init()?;
        let res = self.main_loop();
        self.driver.close();
        res
    }

    fn main_loop(&mut self) -> Result<(), Box<dyn Error>> {
        self.render()?;
        loop {
            let msgs = self.driver.poll_msgs(IDLE_POLL)?;
            if msgs.is_empty() {
                continue;
            }
            for msg in msgs {
                let Some(cmd) = Command::from_msg(&msg, false) else {
                    continue;
                };
                if self.handle(cmd)? == Flow::Quit {
                    log::debug!("quit requested");
                    return Ok(());
                }
            }
            self.render()?;
        }
    }

    fn render(&mut self) -> Result<(), Box<dyn Error>> {
        self.canvas.present(
            &mut self.driver,
            &self.session,
            &self.overlay,
            self.notice.as_deref(),
        )
    }

    fn handle(&mut self, cmd: Command) -> Result<Flow, Box<dyn Error>> {
        match cmd {
            Command::Place { x, y } => {
                if let Some(p) = self.session.cell_at_pixel(x, y) {
                    if self.session.place(p.row(), p.col())?.is_some() {
                        self.after_edit();
                    }
                }
            }
            Command::Clear { x, y } => {
                if let Some(p) = self.session.cell_at_pixel(x, y) {
                    if self.session.clear_cell(p.row(), p.col())?.is_some() {
                        self.after_edit();
                    }
                }
            }
            Command::Search => return self.search(),
            Command::Reset => {
                self.session.reset_grid();
                self.after_edit();
            }
            Command::Scatter => {
                let seed = self.config.seed.wrapping_add(self.scatters);
                self.scatters += 1;
                let added = self.session.scatter_walls(self.config.wall_density, seed);
                self.after_edit();
                self.notice = Some(format!("{added} walls scattered"));
            }
            Command::Redraw => self.canvas.invalidate(),
            Command::Cancel => {}
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn after_edit(&mut self) {
        self.overlay.clear();
        self.notice = None;
    }

    /// Animate a search: pull a batch of events, draw, wait for input,
    /// repeat. Esc cancels the search; quit cancels it and leaves the app.
    fn search(&mut self) -> Result<Flow, Box<dyn Error>> {
        self.overlay.clear();
        self.notice = None;
        let token = CancelToken::new();
        let mut run = match self.session.run_search_with(Some(token.clone())) {
            Ok(run) => run,
            Err(e) => {
                log::debug!("search not started: {e}");
                return Ok(Flow::Continue);
            }
        };

        let batch = self.config.batch.max(1);
        let mut flow = Flow::Continue;
        while !run.is_finished() {
            for ev in run.by_ref().take(batch) {
                self.overlay.apply(&ev);
            }
            self.canvas
                .present(&mut self.driver, run.session(), &self.overlay, None)?;
            if run.is_finished() {
                break;
            }
            for msg in self.driver.poll_msgs(self.config.frame_delay)? {
                match Command::from_msg(&msg, true) {
                    Some(Command::Cancel) => token.cancel(),
                    Some(Command::Quit) => {
                        token.cancel();
                        flow = Flow::Quit;
                    }
                    Some(Command::Redraw) => self.canvas.invalidate(),
                    _ => {}
                }
            }
        }
        drop(run);

        if let Some(report) = self.session.report() {
            log::debug!("search finished: {report:?}");
        }
        Ok(flow)
    }
}
