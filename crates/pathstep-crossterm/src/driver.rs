//! Crossterm terminal driver.
//!
//! [`CrosstermDriver`] implements [`Driver`], translating crossterm events
//! into [`Msg`]s and frames into styled terminal output.

use std::error::Error;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{self, Attribute, Color as CtColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::debug;
use pathstep_core::{AttrMask, Color, Key, ModMask, MouseAction, Msg, Point};

use crate::app::Driver;
use crate::frame::Frame;

/// Maps a [`Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    if c == Color::DEFAULT {
        CtColor::Reset
    } else {
        let (r, g, b) = (c.r(), c.g(), c.b());
        CtColor::Rgb { r, g, b }
    }
}

/// Maps crossterm key modifiers to a [`ModMask`].
fn to_mod_mask(mods: KeyModifiers) -> ModMask {
    let mut m = ModMask::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        m = m | ModMask::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        m = m | ModMask::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        m = m | ModMask::ALT;
    }
    m
}

/// Maps a crossterm [`KeyCode`] to a [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

fn to_mouse_action(kind: MouseEventKind) -> Option<MouseAction> {
    match kind {
        MouseEventKind::Down(MouseButton::Left) => Some(MouseAction::Main),
        MouseEventKind::Down(MouseButton::Right) => Some(MouseAction::Secondary),
        MouseEventKind::Up(_) => Some(MouseAction::Release),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(MouseAction::Move),
        _ => None,
    }
}

/// Translate one crossterm event. Key releases and repeats are dropped.
fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => to_key(code).map(|key| Msg::KeyDown {
            key,
            modifiers: to_mod_mask(modifiers),
        }),
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers,
        }) => to_mouse_action(kind).map(|action| Msg::Mouse {
            action,
            pos: Point::new(column as i32, row as i32),
            modifiers: to_mod_mask(modifiers),
        }),
        Event::Resize(w, h) => Some(Msg::Screen {
            width: w as i32,
            height: h as i32,
        }),
        Event::FocusLost => Some(Msg::MouseLeave),
        _ => None,
    }
}

/// A terminal back-end using crossterm.
pub struct CrosstermDriver {
    mouse_enabled: bool,
}

impl CrosstermDriver {
    /// Create a new driver.
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        debug!("crossterm: initialised (mouse: {})", self.mouse_enabled);
        Ok(())
    }

    fn poll_msgs(&mut self, timeout: Duration, msgs: &mut Vec<Msg>) -> Result<(), Box<dyn Error>> {
        if !event::poll(timeout)? {
            return Ok(());
        }
        // Drain everything already queued.
        while event::poll(Duration::ZERO)? {
            if let Some(msg) = to_msg(event::read()?) {
                msgs.push(msg);
            }
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error>> {
        execute!(
            io::stdout(),
            style::ResetColor,
            terminal::Clear(ClearType::All)
        )?;
        Ok(())
    }

    fn flush(&mut self, frame: &Frame) -> Result<(), Box<dyn Error>> {
        let mut stdout = io::stdout();

        for fc in &frame.cells {
            if fc.pos.x < 0 || fc.pos.y < 0 {
                continue;
            }
            queue!(
                stdout,
                cursor::MoveTo(fc.pos.x as u16, fc.pos.y as u16),
                SetForegroundColor(to_ct_color(fc.style.fg)),
                SetBackgroundColor(to_ct_color(fc.style.bg))
            )?;

            let attrs = fc.style.attrs;
            if attrs.contains(AttrMask::BOLD) {
                queue!(stdout, style::SetAttribute(Attribute::Bold))?;
            }
            if attrs.contains(AttrMask::REVERSE) {
                queue!(stdout, style::SetAttribute(Attribute::Reverse))?;
            }
            if attrs.contains(AttrMask::DIM) {
                queue!(stdout, style::SetAttribute(Attribute::Dim))?;
            }

            write!(stdout, "{}", fc.ch)?;

            if !attrs.is_empty() {
                queue!(stdout, style::SetAttribute(Attribute::Reset))?;
            }
        }

        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(
            stdout,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        debug!("crossterm: terminal restored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key_event(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn mouse_event(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn colors() {
        assert_eq!(to_ct_color(Color::DEFAULT), CtColor::Reset);
        assert_eq!(
            to_ct_color(Color::from_hex(0x10b981)),
            CtColor::Rgb {
                r: 0x10,
                g: 0xb9,
                b: 0x81
            }
        );
    }

    #[test]
    fn keys() {
        assert_eq!(
            to_msg(key_event(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press)),
            Some(Msg::KeyDown {
                key: Key::Char('c'),
                modifiers: ModMask::CTRL
            })
        );
        assert_eq!(
            to_msg(key_event(KeyCode::Char(' '), KeyModifiers::NONE, KeyEventKind::Press)),
            Some(Msg::key(Key::Space))
        );
        assert_eq!(
            to_msg(key_event(KeyCode::Char('n'), KeyModifiers::NONE, KeyEventKind::Release)),
            None
        );
        assert_eq!(
            to_msg(key_event(KeyCode::F(1), KeyModifiers::NONE, KeyEventKind::Press)),
            None
        );
    }

    #[test]
    fn mouse() {
        assert_eq!(
            to_msg(mouse_event(MouseEventKind::Down(MouseButton::Left), 7, 3)),
            Some(Msg::mouse(MouseAction::Main, Point::new(7, 3)))
        );
        assert_eq!(
            to_msg(mouse_event(MouseEventKind::Drag(MouseButton::Left), 8, 3)),
            Some(Msg::mouse(MouseAction::Move, Point::new(8, 3)))
        );
        assert_eq!(
            to_msg(mouse_event(MouseEventKind::Up(MouseButton::Left), 8, 3)),
            Some(Msg::mouse(MouseAction::Release, Point::new(8, 3)))
        );
        assert_eq!(to_msg(mouse_event(MouseEventKind::ScrollUp, 0, 0)), None);
    }

    #[test]
    fn resize_and_focus() {
        assert_eq!(
            to_msg(Event::Resize(80, 24)),
            Some(Msg::Screen {
                width: 80,
                height: 24
            })
        );
        assert_eq!(to_msg(Event::FocusLost), Some(Msg::MouseLeave));
        assert_eq!(to_msg(Event::FocusGained), None);
    }
}
