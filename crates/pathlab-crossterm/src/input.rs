//! Input messages and the commands they trigger.
//!
//! [`from_event`] turns raw crossterm events into [`Msg`]s; [`Command::from_msg`]
//! decides what a message means for the editor.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use pathlab_core::Point;

/// Terminal columns per board cell.
pub const CELL_COLUMNS: i32 = 2;

// ---------------------------------------------------------------------------
// Key / MouseAction / Msg
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    /// A printable character.
    Char(char),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Left button pressed or dragged.
    Main,
    /// Right button pressed or dragged.
    Secondary,
    Release,
}

/// An input message read from the terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    KeyDown { key: Key },
    /// `pos` is the terminal position: `x` column, `y` line.
    Mouse { action: MouseAction, pos: Point },
    Screen { width: i32, height: i32 },
    Quit,
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

/// Map a crossterm event to a [`Msg`], dropping events the editor ignores.
///
/// Dragging with a button held repeats the press so walls can be painted.
/// Ctrl-C is reported as [`Msg::Quit`] since raw mode swallows the signal.
pub fn from_event(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) => {
            if kind == KeyEventKind::Release {
                return None;
            }
            if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
                return Some(Msg::Quit);
            }
            to_key(code).map(|key| Msg::KeyDown { key })
        }
        Event::Mouse(me) => {
            let pos = Point::new(me.column as i32, me.row as i32);
            let action = match me.kind {
                MouseEventKind::Down(MouseButton::Left)
                | MouseEventKind::Drag(MouseButton::Left) => MouseAction::Main,
                MouseEventKind::Down(MouseButton::Right)
                | MouseEventKind::Drag(MouseButton::Right) => MouseAction::Secondary,
                MouseEventKind::Up(_) => MouseAction::Release,
                _ => return None,
            };
            Some(Msg::Mouse { action, pos })
        }
        Event::Resize(w, h) => Some(Msg::Screen {
            width: w as i32,
            height: h as i32,
        }),
        _ => None,
    }
}

/// Pixel coordinates of a terminal position. A line is two pixel units
/// tall, so a board cell (two columns by one line) is a 2×2 pixel square.
pub const fn terminal_to_pixel(pos: Point) -> (i32, i32) {
    (pos.x, pos.y * CELL_COLUMNS)
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// What the user asked for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Place start, end or a wall at a pixel position.
    Place { x: i32, y: i32 },
    /// Clear the cell at a pixel position.
    Clear { x: i32, y: i32 },
    Search,
    Reset,
    Scatter,
    /// Stop the running search.
    Cancel,
    Quit,
    Redraw,
}

impl Command {
    /// Interpret `msg`. While `searching`, only cancel and quit requests are
    /// honoured and Esc cancels instead of quitting.
    pub fn from_msg(msg: &Msg, searching: bool) -> Option<Command> {
        let cmd = match *msg {
            Msg::Quit => Command::Quit,
            Msg::Screen { .. } => Command::Redraw,
            Msg::KeyDown { key } => match key {
                Key::Escape if searching => Command::Cancel,
                Key::Escape | Key::Char('q') => Command::Quit,
                Key::Space | Key::Enter => Command::Search,
                Key::Char('c') => Command::Reset,
                Key::Char('r') => Command::Scatter,
                Key::Char(_) => return None,
            },
            Msg::Mouse { action, pos } => {
                let (x, y) = terminal_to_pixel(pos);
                match action {
                    MouseAction::Main => Command::Place { x, y },
                    MouseAction::Secondary => Command::Clear { x, y },
                    MouseAction::Release => return None,
                }
            }
        };
        let allowed = !searching || matches!(cmd, Command::Cancel | Command::Quit | Command::Redraw);
        allowed.then_some(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn keys_map_to_messages() {
        assert_eq!(
            from_event(key(KeyCode::Char(' '))),
            Some(Msg::KeyDown { key: Key::Space })
        );
        assert_eq!(
            from_event(key(KeyCode::Char('C'))),
            Some(Msg::KeyDown { key: Key::Char('c') })
        );
        assert_eq!(
            from_event(key(KeyCode::Esc)),
            Some(Msg::KeyDown { key: Key::Escape })
        );
        assert_eq!(from_event(key(KeyCode::F(1))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let ev = KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(from_event(Event::Key(ev)), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let ev = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(from_event(ev), Some(Msg::Quit));
    }

    #[test]
    fn mouse_buttons_and_drag() {
        assert_eq!(
            from_event(mouse(MouseEventKind::Down(MouseButton::Left), 4, 3)),
            Some(Msg::Mouse {
                action: MouseAction::Main,
                pos: Point::new(4, 3)
            })
        );
        assert_eq!(
            from_event(mouse(MouseEventKind::Drag(MouseButton::Right), 0, 0)),
            Some(Msg::Mouse {
                action: MouseAction::Secondary,
                pos: Point::ZERO
            })
        );
        assert_eq!(from_event(mouse(MouseEventKind::Moved, 1, 1)), None);
        assert_eq!(
            from_event(mouse(MouseEventKind::Down(MouseButton::Middle), 1, 1)),
            None
        );
    }

    #[test]
    fn resize_message() {
        assert_eq!(
            from_event(Event::Resize(80, 24)),
            Some(Msg::Screen {
                width: 80,
                height: 24
            })
        );
    }

    #[test]
    fn terminal_lines_are_two_pixels_tall() {
        assert_eq!(terminal_to_pixel(Point::new(5, 3)), (5, 6));
    }

    #[test]
    fn commands_when_editing() {
        let click = Msg::Mouse {
            action: MouseAction::Main,
            pos: Point::new(3, 2),
        };
        assert_eq!(
            Command::from_msg(&click, false),
            Some(Command::Place { x: 3, y: 4 })
        );
        let esc = Msg::KeyDown { key: Key::Escape };
        assert_eq!(Command::from_msg(&esc, false), Some(Command::Quit));
        let r = Msg::KeyDown { key: Key::Char('r') };
        assert_eq!(Command::from_msg(&r, false), Some(Command::Scatter));
        let x = Msg::KeyDown { key: Key::Char('x') };
        assert_eq!(Command::from_msg(&x, false), None);
    }

    #[test]
    fn commands_while_searching() {
        let esc = Msg::KeyDown { key: Key::Escape };
        assert_eq!(Command::from_msg(&esc, true), Some(Command::Cancel));
        let q = Msg::KeyDown { key: Key::Char('q') };
        assert_eq!(Command::from_msg(&q, true), Some(Command::Quit));
        let click = Msg::Mouse {
            action: MouseAction::Main,
            pos: Point::ZERO,
        };
        assert_eq!(Command::from_msg(&click, true), None);
        let space = Msg::KeyDown { key: Key::Space };
        assert_eq!(Command::from_msg(&space, true), None);
    }
}
