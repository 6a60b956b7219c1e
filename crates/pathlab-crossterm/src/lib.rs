//! **pathlab-crossterm**: the terminal front end of the pathlab visualizer.
//!
//! Each board cell is drawn two columns wide and one line tall, with the
//! board's rows running left to right. A sidebar on the right lists the
//! controls, the session state and the outcome of the last search.
//!
//! [`App`] runs a cooperative loop over any [`Driver`]: while a search runs
//! it pulls a batch of events, draws the frame, then polls input so the
//! search can be cancelled between frames. [`CrosstermDriver`] is the real
//! terminal back end.

pub mod app;
pub mod driver;
pub mod input;
pub mod palette;
pub mod screen;
pub mod style;
pub mod view;

pub use app::{App, AppConfig};
pub use driver::{CrosstermDriver, Driver};
pub use input::{Command, Key, MouseAction, Msg};
pub use palette::color_of;
pub use screen::{Frame, FrameCell, Glyph, Screen};
pub use style::{AttrMask, Color, Style};
pub use view::{Layout, Overlay};
