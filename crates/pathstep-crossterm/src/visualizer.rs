//! The interaction model: turns input [`Msg`]s into session edits and steps,
//! and renders the session into a [`Frame`].
//!
//! Nothing here touches the terminal, so the whole model is testable by
//! feeding it messages.

use log::debug;
use pathstep_core::{AttrMask, Color, Key, ModMask, MouseAction, Msg, Point, Style};
use pathstep_search::{CellKind, Session};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::Config;
use crate::frame::Frame;

/// Terminal columns used per grid cell, so cells look roughly square.
pub const CELL_WIDTH: i32 = 2;

const MIN_TEXT_WIDTH: i32 = 72;

// Colours
const COL_START: Color = Color::from_hex(0x10b981);
const COL_END: Color = Color::from_hex(0xef4444);
const COL_PATH: Color = Color::from_hex(0xf59e0b);
const COL_OBSTACLE: Color = Color::from_hex(0x374151);
const COL_VISITED: Color = Color::from_hex(0x5eead4);
const COL_EMPTY: Color = Color::from_hex(0xffffff);
const COL_HOVER: Color = Color::from_hex(0x0f766e);
const COL_MARK_FG: Color = Color::from_hex(0xffffff);
const COL_TEXT_FG: Color = Color::from_hex(0x134e4a);
const COL_TEXT_BG: Color = Color::from_hex(0xf0fdfa);
const COL_HELP_FG: Color = Color::from_hex(0x6b7280);

const HOVER_ALPHA: f32 = 0.3;

const HELP_TEXT: &str =
    "s start  e end  o walls  n step  a auto  c clear  x no walls  g random  +/- size  r reset  q quit";

const MSG_SET_START: &str = "Click a cell to set the start point.";
const MSG_SET_END: &str = "Click a cell to set the end point.";
const MSG_OBSTACLES: &str = "Click or drag to add/remove obstacles.";

/// Background colour for a cell class.
pub fn kind_color(kind: CellKind) -> Color {
    match kind {
        CellKind::Start => COL_START,
        CellKind::End => COL_END,
        CellKind::Path => COL_PATH,
        CellKind::Obstacle => COL_OBSTACLE,
        CellKind::Visited => COL_VISITED,
        CellKind::Empty => COL_EMPTY,
    }
}

/// What a click on the grid does.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    SetStart,
    SetEnd,
    AddObstacle,
}

impl Mode {
    fn label(self) -> &'static str {
        match self {
            Self::SetStart => "set start",
            Self::SetEnd => "set end",
            Self::AddObstacle => "obstacles",
        }
    }
}

/// Whether the event loop should keep going.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Interaction state around one [`Session`].
pub struct Visualizer {
    session: Session,
    config: Config,
    rng: StdRng,
    mode: Mode,
    info: String,
    mouse_down: bool,
    // value painted by the current drag, fixed by its first cell
    drag: Option<bool>,
    hover: Option<Point>,
    auto_run: bool,
}

impl Visualizer {
    pub fn new(config: Config) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            session: Session::new(config.grid),
            rng: StdRng::seed_from_u64(seed),
            config,
            mode: Mode::SetStart,
            info: MSG_SET_START.to_string(),
            mouse_down: false,
            drag: None,
            hover: None,
            auto_run: false,
        }
    }

    #[inline]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The line shown to the user under the grid.
    #[inline]
    pub fn info(&self) -> &str {
        &self.info
    }

    #[inline]
    pub fn hover(&self) -> Option<Point> {
        self.hover
    }

    #[inline]
    pub fn auto_running(&self) -> bool {
        self.auto_run
    }

    /// Map a screen position to the grid cell under it.
    pub fn cell_at(&self, screen: Point) -> Option<Point> {
        if screen.x < 0 || screen.y < 0 {
            return None;
        }
        let p = Point::new(screen.x / CELL_WIDTH, screen.y);
        self.session.grid().contains(p).then_some(p)
    }

    /// Process one input message.
    pub fn update(&mut self, msg: Msg) -> Action {
        match msg {
            Msg::KeyDown { key, modifiers } => return self.key(key, modifiers),
            Msg::Mouse { action, pos, .. } => self.mouse(action, pos),
            Msg::MouseLeave => {
                self.end_drag();
                self.hover = None;
            }
            Msg::Tick => {
                if self.auto_run && !self.step_once() {
                    debug!("visualizer: auto-run finished");
                    self.auto_run = false;
                }
            }
            Msg::Quit => return Action::Quit,
            Msg::Screen { .. } | Msg::Init => {}
        }
        Action::Continue
    }

    fn key(&mut self, key: Key, modifiers: ModMask) -> Action {
        match key {
            Key::Escape | Key::Char('q') => return Action::Quit,
            Key::Char('c') if modifiers.contains(ModMask::CTRL) => return Action::Quit,
            Key::Char('s') => self.set_mode(Mode::SetStart, MSG_SET_START),
            Key::Char('e') => self.set_mode(Mode::SetEnd, MSG_SET_END),
            Key::Char('o') => self.set_mode(Mode::AddObstacle, MSG_OBSTACLES),
            Key::Char('n') | Key::Space | Key::Enter => {
                self.step_once();
            }
            Key::Char('a') => {
                self.auto_run = !self.auto_run;
                debug!("visualizer: auto-run {}", if self.auto_run { "on" } else { "off" });
                if !self.auto_run {
                    self.info = "Auto run paused.".to_string();
                }
            }
            Key::Char('c') => {
                self.auto_run = false;
                self.session.clear_search();
                self.info = "Search cleared.".to_string();
            }
            Key::Char('x') => {
                self.auto_run = false;
                self.session.clear_obstacles();
                self.info = "Obstacles cleared.".to_string();
            }
            Key::Char('g') => {
                self.auto_run = false;
                let n = self
                    .session
                    .scatter_obstacles(&mut self.rng, self.config.obstacle_density);
                self.info = format!("Placed {n} obstacles.");
            }
            Key::Char('+') | Key::Char('=') => self.resize(self.session.size() + 1),
            Key::Char('-') => self.resize(self.session.size() - 1),
            Key::Char('r') => self.resize(self.session.size()),
            _ => {}
        }
        Action::Continue
    }

    fn set_mode(&mut self, mode: Mode, info: &str) {
        self.mode = mode;
        self.info = info.to_string();
    }

    /// Fresh grid of the (clamped) size; endpoints, walls and search go.
    fn resize(&mut self, n: i32) {
        self.session.resize(n);
        self.auto_run = false;
        self.end_drag();
        self.hover = None;
        self.set_mode(Mode::SetStart, MSG_SET_START);
    }

    /// Run one search step and show its message. Returns whether more work
    /// remains.
    fn step_once(&mut self) -> bool {
        match self.session.step() {
            Ok(step) => {
                self.info = step.message();
                step.more_work
            }
            Err(e) => {
                self.info = e.to_string();
                false
            }
        }
    }

    fn end_drag(&mut self) {
        self.mouse_down = false;
        self.drag = None;
    }

    fn mouse(&mut self, action: MouseAction, pos: Point) {
        let cell = self.cell_at(pos);
        match action {
            MouseAction::Main => {
                self.mouse_down = true;
                if let Some(p) = cell {
                    self.press(p);
                }
            }
            MouseAction::Move => {
                self.hover = cell;
                if let (true, Some(value), Some(p)) = (self.mouse_down, self.drag, cell) {
                    // Endpoints and out-of-range cells are skipped mid-drag.
                    let _ = self.session.set_obstacle(p, value);
                }
            }
            MouseAction::Release => self.end_drag(),
            MouseAction::Secondary => {}
        }
    }

    fn press(&mut self, p: Point) {
        match self.mode {
            Mode::SetStart => {
                if self.session.set_start(p).is_ok() {
                    self.set_mode(Mode::SetEnd, "Start set. Now set the end point.");
                }
            }
            Mode::SetEnd => {
                if self.session.set_end(p).is_ok() {
                    self.set_mode(
                        Mode::AddObstacle,
                        "End set. Add obstacles or start the algorithm.",
                    );
                }
            }
            Mode::AddObstacle => {
                let Some(cell) = self.session.grid().cell(p) else {
                    return;
                };
                let value = !cell.is_obstacle();
                if self.session.set_obstacle(p, value).is_ok() {
                    self.drag = Some(value);
                }
            }
        }
    }

    /// Render the grid and the status lines below it.
    pub fn draw(&self) -> Frame {
        let grid = self.session.grid();
        let mut frame = Frame::new();

        for c in grid.cells() {
            let kind = c.kind();
            let mut bg = kind_color(kind);
            if self.mode == Mode::AddObstacle && self.hover == Some(c.pos()) {
                bg = bg.blend(COL_HOVER, HOVER_ALPHA);
            }
            let style = Style::default().with_fg(COL_MARK_FG).with_bg(bg);
            let mark = match kind {
                CellKind::Start => 'S',
                CellKind::End => 'E',
                _ => ' ',
            };
            let x = c.pos().x * CELL_WIDTH;
            frame.push(Point::new(x, c.pos().y), mark, style);
            for dx in 1..CELL_WIDTH {
                frame.push(Point::new(x + dx, c.pos().y), ' ', style);
            }
        }

        let width = (grid.size() * CELL_WIDTH).max(MIN_TEXT_WIDTH);
        let y = grid.size();
        let text = Style::default().with_fg(COL_TEXT_FG).with_bg(COL_TEXT_BG);
        frame.text(Point::new(0, y), width, "", text);
        frame.text(
            Point::new(0, y + 1),
            width,
            &self.info,
            text.with_attrs(AttrMask::BOLD),
        );
        frame.text(Point::new(0, y + 2), width, &self.status_line(), text);
        frame.text(
            Point::new(0, y + 3),
            width,
            HELP_TEXT,
            text.with_fg(COL_HELP_FG),
        );
        frame
    }

    fn status_line(&self) -> String {
        let n = self.session.size();
        let search = self.session.search();
        format!(
            "mode: {}   grid: {n}x{n}   auto: {}   settled: {}   frontier: {}",
            self.mode.label(),
            if self.auto_run { "on" } else { "off" },
            search.settled(),
            search.frontier_len(),
        )
    }
}
