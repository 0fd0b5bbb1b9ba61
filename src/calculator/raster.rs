//! # Rasterizer
//!
//! Bit-level framebuffer operations: rectangles, Bresenham line and
//! circle, directional scroll, sprite blit, and the grayscale screen
//! blit. A framebuffer is 768 bytes (96x64 bits, row-major); the stride
//! between rows is 12 bytes (96 bits / 8).
//!
//! Bit ordering: bit 0 (LSB) of a byte is the *leftmost* pixel in that
//! byte's 8-pixel span. `rect`'s `1 << (i % 8)` mask and the grayscale
//! blit's per-pixel read agree on this once both go through `pxl_get` --
//! the original's blit path derives the same pixel differently (by
//! reversing an MSB-first bit string) and the two conventions conflict on
//! paper; going through one shared addressing function sidesteps that
//! rather than reproducing the conflict.

use super::memory::Memory;

pub const WIDTH: i64 = 96;
pub const HEIGHT: i64 = 64;
pub const ROW_STRIDE: i64 = 12;
pub const BUFFER_SIZE: i64 = WIDTH * HEIGHT / 8;

fn addr_bit(buf: i64, x: i64, y: i64) -> (i64, u32) {
    let byte = buf + x.div_euclid(8) + y * ROW_STRIDE;
    (byte, x.rem_euclid(8) as u32)
}

pub fn rect(mem: &mut Memory, buf: i64, x: i64, y: i64, w: i64, h: i64) {
    for j in y..y + h {
        for i in x..x + w {
            let (byte, bit) = addr_bit(buf, i, j);
            mem.set_bit(byte, bit);
        }
    }
}

pub fn clear_rect(mem: &mut Memory, buf: i64, x: i64, y: i64, w: i64, h: i64) {
    for j in y..y + h {
        for i in x..x + w {
            let (byte, bit) = addr_bit(buf, i, j);
            mem.clear_bit(byte, bit);
        }
    }
}

pub fn inverse_rect(mem: &mut Memory, buf: i64, x: i64, y: i64, w: i64, h: i64) {
    for j in y..y + h {
        for i in x..x + w {
            let (byte, bit) = addr_bit(buf, i, j);
            mem.flip_bit(byte, bit);
        }
    }
}

pub fn pxl_get(mem: &Memory, buf: i64, x: i64, y: i64) -> i64 {
    let (byte, bit) = addr_bit(buf, x, y);
    mem.get_bit(byte, bit) as i64
}

/// Bresenham's line algorithm, inclusive of both endpoints.
pub fn line(mem: &mut Memory, buf: i64, x0: i64, y0: i64, x1: i64, y1: i64) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut error = dx - dy;
    loop {
        rect(mem, buf, x0, y0, 1, 1);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * error;
        if e2 > -dy {
            error -= dy;
            x0 += sx;
        }
        if e2 < dx {
            error += dx;
            y0 += sy;
        }
    }
}

/// Bresenham's midpoint circle algorithm, 8-way symmetry. `r == 0` draws
/// nothing.
pub fn circle(mem: &mut Memory, buf: i64, cx: i64, cy: i64, r: i64) {
    if r == 0 {
        return;
    }
    let mut x = 0i64;
    let mut y = r;
    let mut error = 3 - 2 * r;
    while y >= x {
        rect(mem, buf, cx - x, cy - y, 1, 1);
        rect(mem, buf, cx - y, cy - x, 1, 1);
        rect(mem, buf, cx + y, cy - x, 1, 1);
        rect(mem, buf, cx + x, cy - y, 1, 1);
        rect(mem, buf, cx - x, cy + y, 1, 1);
        rect(mem, buf, cx - y, cy + x, 1, 1);
        rect(mem, buf, cx + y, cy + x, 1, 1);
        rect(mem, buf, cx + x, cy + y, 1, 1);
        if error < 0 {
            error += 4 * x + 6;
            x += 1;
        } else {
            error += 4 * (x - y) + 10;
            x += 1;
            y -= 1;
        }
    }
}

/// Scrolls the whole 96x64 bitmap by one row. The row scrolled into view
/// keeps its prior contents (matching the source's behavior, not
/// clearing it) rather than the 96-byte stride the source uses here (a
/// latent bug -- everywhere else in the file uses the correct 12-byte
/// row stride).
pub fn shift_buffer_vertical(mem: &mut Memory, buf: i64, dir: i8) {
    match dir {
        1 => {
            for current in (0..HEIGHT - 1).rev() {
                for b in 0..ROW_STRIDE {
                    let v = mem.get1(buf + current * ROW_STRIDE + b);
                    mem.set1(buf + (current + 1) * ROW_STRIDE + b, v);
                }
            }
        }
        -1 => {
            for current in 1..HEIGHT {
                for b in 0..ROW_STRIDE {
                    let v = mem.get1(buf + current * ROW_STRIDE + b);
                    mem.set1(buf + (current - 1) * ROW_STRIDE + b, v);
                }
            }
        }
        _ => {}
    }
}

/// Scrolls every row by one column; the column vacated at the trailing
/// edge is cleared. Does not wrap.
pub fn shift_buffer_horizontal(mem: &mut Memory, buf: i64, dir: i8) {
    for row in 0..HEIGHT {
        match dir {
            1 => {
                for x in (1..WIDTH).rev() {
                    if pxl_get(mem, buf, x - 1, row) != 0 {
                        rect(mem, buf, x, row, 1, 1);
                    } else {
                        clear_rect(mem, buf, x, row, 1, 1);
                    }
                }
                clear_rect(mem, buf, 0, row, 1, 1);
            }
            -1 => {
                for x in 0..WIDTH - 1 {
                    if pxl_get(mem, buf, x + 1, row) != 0 {
                        rect(mem, buf, x, row, 1, 1);
                    } else {
                        clear_rect(mem, buf, x, row, 1, 1);
                    }
                }
                clear_rect(mem, buf, WIDTH - 1, row, 1, 1);
            }
            _ => {}
        }
    }
}

/// Sprite blit (`Pt-On`-equivalent in the original): ANDs `w`x`h` packed
/// 1bpp sprite data at `data_buf` into the framebuffer at `(x, y)`.
/// Fixes the source's `for i in 0..x` sprite-data extraction (almost
/// certainly meant `0..w`) and its write-back through the x coordinate
/// instead of the buffer address.
pub fn and_sprite(mem: &mut Memory, buf: i64, x: i64, y: i64, w: i64, h: i64, data_buf: i64) {
    let mut bits = Vec::with_capacity((w * h) as usize);
    for j in 0..h {
        for i in 0..w {
            let bit_index = j * w + i;
            let byte = data_buf + bit_index.div_euclid(8);
            let bit = bit_index.rem_euclid(8) as u32;
            bits.push(mem.get_bit(byte, bit));
        }
    }
    let mut count = 0usize;
    for j in y..y + h {
        for i in x..x + w {
            let (byte, bit) = addr_bit(buf, i, j);
            if bits[count] {
                mem.set_bit(byte, bit);
            } else {
                mem.clear_bit(byte, bit);
            }
            count += 1;
        }
    }
}

/// Grayscale intensity a display renders a pixel as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLevel {
    White,
    LightGray,
    Gray,
    DarkGray,
    Black,
}

fn palette3(index: u8) -> PixelLevel {
    match index {
        0 => PixelLevel::White,
        1 => PixelLevel::Gray,
        _ => PixelLevel::Black,
    }
}

fn palette4(index: u8) -> PixelLevel {
    match index {
        0 => PixelLevel::White,
        1 => PixelLevel::LightGray,
        2 => PixelLevel::DarkGray,
        _ => PixelLevel::Black,
    }
}

/// Renders `buf1` (and `buf2` for scales 3/4) into a `WIDTH * HEIGHT`
/// row-major grid of intensities, for a `Display` implementation to blit.
/// Scale 2 is pure monochrome from `buf1` alone; scales 3/4 combine a bit
/// from each buffer into a 2-bit intensity index `2*b1 + b2`.
pub fn disp_screen(mem: &Memory, buf1: i64, buf2: Option<i64>, scale: u8) -> Vec<PixelLevel> {
    let mut out = Vec::with_capacity((WIDTH * HEIGHT) as usize);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let b1 = pxl_get(mem, buf1, x, y);
            let level = if scale == 2 {
                if b1 != 0 {
                    PixelLevel::Black
                } else {
                    PixelLevel::White
                }
            } else {
                let b2 = buf2.map(|b| pxl_get(mem, b, x, y)).unwrap_or(0);
                let idx = (2 * b1 + b2) as u8;
                if scale == 3 {
                    palette3(idx)
                } else {
                    palette4(idx)
                }
            };
            out.push(level);
        }
    }
    out
}
