//! # Calculator
//!
//! Owns the 65,536-byte memory, the two drawing buffers, and key state.
//! Graphics operations write through `memory` via [`raster`]; [`keys`]
//! tracks which host keys are held. `Calculator` itself holds no notion of
//! instruction pointers or labels -- `interp::ExecState` layers that on top
//! to satisfy `flattener::expr::EvalContext`.

pub mod keys;
pub mod memory;
pub mod raster;


use keys::Keys;
use memory::Memory;
use raster::PixelLevel;
use rand::Rng;

use crate::parser::ast::{Axis, PixelOp, Region};

pub struct Calculator {
    memory: Memory,
    keys: Keys,
    rng: rand::rngs::ThreadRng,
}

impl Calculator {
    pub fn new() -> Self {
        Calculator {
            memory: Memory::new(),
            keys: Keys::empty(),
            rng: rand::thread_rng(),
        }
    }

    pub fn with_keybindings(config_text: &str) -> Self {
        Calculator {
            memory: Memory::new(),
            keys: Keys::from_config(config_text),
            rng: rand::thread_rng(),
        }
    }

    pub fn reset(&mut self) {
        self.memory.reset();
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn keys_mut(&mut self) -> &mut Keys {
        &mut self.keys
    }

    // -- memory --

    pub fn get_var(&self, addr: i64, width: u8) -> i64 {
        self.memory.get(addr, width)
    }

    pub fn set_var(&mut self, addr: i64, width: u8, value: i64) -> i64 {
        self.memory.set(addr, width, value)
    }

    // -- rng / keys --

    /// `rand`: a fresh value in `0..=65535` each call.
    pub fn rand(&mut self) -> i64 {
        self.rng.gen_range(0..=65535)
    }

    pub fn get_key(&self, code: i64) -> i64 {
        self.keys.get(code)
    }

    // -- pixels --

    pub fn pxl_test(&self, buf: i64, x: i64, y: i64) -> i64 {
        raster::pxl_get(&self.memory, buf, x, y)
    }

    pub fn pixel(&mut self, op: PixelOp, buf: i64, x: i64, y: i64) {
        match op {
            PixelOp::On => raster::rect(&mut self.memory, buf, x, y, 1, 1),
            PixelOp::Off => raster::clear_rect(&mut self.memory, buf, x, y, 1, 1),
            PixelOp::Change => raster::inverse_rect(&mut self.memory, buf, x, y, 1, 1),
        }
    }

    pub fn rect(&mut self, inverse: bool, buf: i64, x: i64, y: i64, w: i64, h: i64) {
        if inverse {
            raster::inverse_rect(&mut self.memory, buf, x, y, w, h);
        } else {
            raster::rect(&mut self.memory, buf, x, y, w, h);
        }
    }

    pub fn circle(&mut self, buf: i64, x: i64, y: i64, r: i64) {
        raster::circle(&mut self.memory, buf, x, y, r);
    }

    pub fn line(&mut self, buf: i64, x1: i64, y1: i64, x2: i64, y2: i64) {
        raster::line(&mut self.memory, buf, x1, y1, x2, y2);
    }

    pub fn shift(&mut self, axis: Axis, dir: i8, buf: i64) {
        match axis {
            Axis::Horizontal => raster::shift_buffer_horizontal(&mut self.memory, buf, dir),
            Axis::Vertical => raster::shift_buffer_vertical(&mut self.memory, buf, dir),
        }
    }

    pub fn and_sprite(&mut self, buf: i64, x: i64, y: i64, w: i64, h: i64, data_buf: i64) {
        raster::and_sprite(&mut self.memory, buf, x, y, w, h, data_buf);
    }

    pub fn clr_draw(&mut self, buf: i64) {
        raster::clear_rect(&mut self.memory, buf, 0, 0, raster::WIDTH, raster::HEIGHT);
    }

    /// Renders the primary buffer (and the back buffer, for scale 3/4) as a
    /// grid of grayscale intensities for a `Display` to blit.
    pub fn disp_screen(&self, buf: i64, backbuf: Option<i64>, scale: u8) -> Vec<PixelLevel> {
        raster::disp_screen(&self.memory, buf, backbuf, scale)
    }

    pub fn primary_buffer(&self) -> i64 {
        Region::primary_buffer().offset()
    }

    pub fn back_buffer(&self) -> i64 {
        Region::back_buffer().offset()
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}
