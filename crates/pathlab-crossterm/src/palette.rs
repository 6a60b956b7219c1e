//! The neon colour scheme.

use pathlab_core::Role;

use crate::style::Color;

pub const BG_DARK: Color = Color::from_rgb(18, 18, 18);
pub const SIDEBAR: Color = Color::from_rgb(25, 25, 25);
pub const NEON_GREEN: Color = Color::from_rgb(57, 255, 20);
pub const NEON_BLUE: Color = Color::from_rgb(0, 255, 255);
pub const NEON_RED: Color = Color::from_rgb(255, 49, 49);
pub const NEON_WALL: Color = Color::from_rgb(255, 215, 0);
pub const TEXT: Color = Color::from_rgb(200, 200, 200);
pub const GRID_DOT: Color = Color::from_rgb(48, 48, 48);

/// Cells already expanded by a running search.
pub const VISITED: Color = Color::from_rgb(20, 70, 78);
/// Cells waiting in the frontier.
pub const FRONTIER: Color = Color::from_rgb(24, 110, 40);
/// The cell being expanded this frame.
pub const CURRENT: Color = Color::from_rgb(230, 230, 230);

/// Fill colour of a cell with the given role.
pub const fn color_of(role: Role) -> Color {
    match role {
        Role::Empty => BG_DARK,
        Role::Start => NEON_GREEN,
        Role::End => NEON_BLUE,
        Role::Wall => NEON_WALL,
        Role::Path => NEON_RED,
    }
}
