//! The event loop: [`Driver`] and [`run`].

use std::error::Error;
use std::time::{Duration, Instant};

use log::debug;
use pathstep_core::Msg;

use crate::frame::Frame;
use crate::visualizer::{Action, Visualizer};

/// How long to wait for input when nothing is animating.
const IDLE_POLL: Duration = Duration::from_millis(250);

// ---------------------------------------------------------------------------
// Driver trait
// ---------------------------------------------------------------------------

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Wait up to `timeout` for input, appending any messages to `msgs`.
    fn poll_msgs(&mut self, timeout: Duration, msgs: &mut Vec<Msg>) -> Result<(), Box<dyn Error>>;

    /// Blank the whole screen before the next flush.
    fn clear(&mut self) -> Result<(), Box<dyn Error>>;

    /// Draw the changed cells of a frame.
    fn flush(&mut self, frame: &Frame) -> Result<(), Box<dyn Error>>;

    /// Clean up / restore the screen.
    fn close(&mut self);
}

/// Run the visualizer until it asks to quit.
///
/// 1. Initialises the driver.
/// 2. Sends `Msg::Init` through the visualizer.
/// 3. Loops: poll → update → tick → draw → diff → flush.
///
/// When the new frame no longer lines up with the previous one (first draw,
/// terminal resize, grid resize) the screen is cleared and redrawn in full,
/// so nothing from the old layout stays visible.
///
/// The driver is closed on every exit path once `init` succeeded.
pub fn run<D: Driver>(vis: &mut Visualizer, driver: &mut D) -> Result<(), Box<dyn Error>> {
    driver.init()?;
    let r = event_loop(vis, driver);
    driver.close();
    r
}

fn event_loop<D: Driver>(vis: &mut Visualizer, driver: &mut D) -> Result<(), Box<dyn Error>> {
    let tick = vis.config().tick;
    let mut prev = Frame::new();
    let mut msgs = vec![Msg::Init];
    let mut last_tick = Instant::now();

    loop {
        let mut dirty = false;
        for msg in msgs.drain(..) {
            if let Msg::Screen { width, height } = msg {
                debug!("app: screen resized to {width}x{height}");
                prev = Frame::new();
            }
            if vis.update(msg) == Action::Quit {
                debug!("app: quit");
                return Ok(());
            }
            dirty = true;
        }

        if vis.auto_running() && last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            vis.update(Msg::Tick);
            dirty = true;
        }

        if dirty {
            let curr = vis.draw();
            if !curr.aligned(&prev) {
                driver.clear()?;
            }
            let changed = Frame {
                cells: curr.diff(&prev).into_iter().copied().collect(),
            };
            if !changed.cells.is_empty() {
                driver.flush(&changed)?;
            }
            prev = curr;
        }

        let timeout = if vis.auto_running() {
            tick.saturating_sub(last_tick.elapsed())
        } else {
            IDLE_POLL
        };
        driver.poll_msgs(timeout, &mut msgs)?;
    }
}
