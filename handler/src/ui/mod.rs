//! UI module for the Handler TUI

pub mod layout;
pub mod render;
pub mod theme;
pub mod widgets;
