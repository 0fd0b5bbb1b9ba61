//! Abstract display + input provider the driver loop runs against.
//!
//! Separates *what* a running program needs from a terminal -- present a
//! frame of grayscale pixels, report which keys are currently down -- from
//! *how* a concrete backend does it, so `tui::Tui` is the only module that
//! touches `ratatui`/`crossterm` directly.

use std::collections::HashSet;

use axe_interpreter::calculator::raster::PixelLevel;

pub trait Display {
    fn present(&mut self, pixels: &[PixelLevel], width: usize, height: usize);
    fn set_title(&mut self, title: &str);
}

pub trait Input {
    /// Host key names currently held, in the same naming scheme the
    /// keybindings file uses (`keybindings::load`).
    fn pressed_keys(&mut self) -> HashSet<String>;
    fn should_quit(&mut self) -> bool;
}
