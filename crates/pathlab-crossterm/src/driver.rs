//! The [`Driver`] seam between the app loop and a terminal, and its
//! crossterm implementation.

use std::error::Error;
use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor, event, queue,
    style::{self, Attribute, Color as CtColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::input::{Msg, from_event};
use crate::screen::Frame;
use crate::style::{AttrMask, Color, Style};

/// A back end that can show frames and deliver input.
pub trait Driver {
    /// Prepare the output device.
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Wait up to `timeout` for input and return every message that is
    /// ready. A zero timeout never blocks.
    fn poll_msgs(&mut self, timeout: Duration) -> Result<Vec<Msg>, Box<dyn Error>>;

    /// Write the changed glyphs of a frame.
    fn flush(&mut self, frame: &Frame) -> Result<(), Box<dyn Error>>;

    /// Restore the output device. Called once, also after errors.
    fn close(&mut self);
}

fn to_ct_color(c: Color) -> CtColor {
    if c == Color::DEFAULT {
        CtColor::Reset
    } else {
        CtColor::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        }
    }
}

/// A terminal back end using crossterm: alternate screen, raw mode, mouse
/// capture.
pub struct CrosstermDriver {
    out: Stdout,
    mouse_enabled: bool,
}

impl CrosstermDriver {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            mouse_enabled: true,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    fn set_style(&mut self, style: Style) -> io::Result<()> {
        queue!(
            self.out,
            style::SetAttribute(Attribute::Reset),
            SetForegroundColor(to_ct_color(style.fg)),
            SetBackgroundColor(to_ct_color(style.bg))
        )?;
        if style.attrs.contains(AttrMask::BOLD) {
            queue!(self.out, style::SetAttribute(Attribute::Bold))?;
        }
        if style.attrs.contains(AttrMask::DIM) {
            queue!(self.out, style::SetAttribute(Attribute::Dim))?;
        }
        Ok(())
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
        queue!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            queue!(self.out, event::EnableMouseCapture)?;
        }
        self.out.flush()?;
        log::debug!("terminal initialised");
        Ok(())
    }

    fn poll_msgs(&mut self, timeout: Duration) -> Result<Vec<Msg>, Box<dyn Error>> {
        let mut msgs = Vec::new();
        if !event::poll(timeout)? {
            return Ok(msgs);
        }
        while event::poll(Duration::ZERO)? {
            if let Some(msg) = from_event(event::read()?) {
                msgs.push(msg);
            }
        }
        Ok(msgs)
    }

    fn flush(&mut self, frame: &Frame) -> Result<(), Box<dyn Error>> {
        let mut current: Option<Style> = None;
        for fc in &frame.cells {
            let p = fc.pos;
            if p.x < 0 || p.y < 0 || p.x > u16::MAX as i32 || p.y > u16::MAX as i32 {
                continue;
            }
            queue!(self.out, cursor::MoveTo(p.x as u16, p.y as u16))?;
            if current != Some(fc.glyph.style) {
                self.set_style(fc.glyph.style)?;
                current = Some(fc.glyph.style);
            }
            queue!(self.out, style::Print(fc.glyph.ch))?;
        }
        queue!(self.out, style::SetAttribute(Attribute::Reset))?;
        self.out.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        if self.mouse_enabled {
            let _ = queue!(self.out, event::DisableMouseCapture);
        }
        let _ = queue!(
            self.out,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = self.out.flush();
        let _ = terminal::disable_raw_mode();
        log::debug!("terminal restored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_color_resets() {
        assert_eq!(to_ct_color(Color::DEFAULT), CtColor::Reset);
        assert_eq!(
            to_ct_color(Color::from_rgb(1, 2, 3)),
            CtColor::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
