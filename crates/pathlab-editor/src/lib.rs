//! **pathlab-editor**: the interaction layer of the pathlab visualizer.
//!
//! [`EditorSession`] owns the board, applies place/clear edits under the
//! one-start/one-end rules, and hands out [`SearchRun`]s that relay A*
//! events to the presentation while keeping the board locked.

pub mod config;
pub mod session;

pub use config::SessionConfig;
pub use session::{EditorSession, Report, SearchRun, SessionState};
