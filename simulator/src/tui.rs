//! Concrete terminal backend: a `ratatui` + `crossterm` implementation of
//! [`Display`]/[`Input`], and the `Host` adapter `interp::execute` drives.
//!
//! Grounded on the same `ratatui`/`crossterm` pairing
//! `TheBlueFireFox-Chip8` uses for its own monochrome framebuffer + key
//! polling, reusing `crossterm`'s raw-mode key-press tracking the way that
//! interpreter uses `pygame.key.get_pressed()`.

use std::collections::HashSet;
use std::io::{self, Stdout};
use std::time::Duration;

use axe_interpreter::calculator::raster::PixelLevel;
use axe_interpreter::calculator::Calculator;
use axe_interpreter::interp::Host;
use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::style::Color;
use ratatui::widgets::Block;
use ratatui::Terminal;

use crate::display::{Display, Input};

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pressed: HashSet<String>,
    quit: bool,
}

impl Tui {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Tui {
            terminal,
            pressed: HashSet::new(),
            quit: false,
        })
    }

    pub fn shutdown(mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        Ok(())
    }

    fn drain_events(&mut self) -> io::Result<()> {
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                CtEvent::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if key.code == KeyCode::Esc {
                            self.quit = true;
                        }
                        self.pressed.insert(host_key_name(key.code));
                    }
                    KeyEventKind::Release => {
                        self.pressed.remove(&host_key_name(key.code));
                    }
                    KeyEventKind::Repeat => {}
                },
                _ => {}
            }
        }
        Ok(())
    }
}

/// Formats a `crossterm` key code the same way `keybindings.config` names
/// host keys: `Char<C>` for printable characters, the variant's own name
/// otherwise (`Up`, `Down`, `Enter`, ...).
fn host_key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(c) => format!("Char{}", c.to_ascii_uppercase()),
        other => format!("{other:?}"),
    }
}

fn color_for(level: PixelLevel) -> Color {
    match level {
        PixelLevel::White => Color::White,
        PixelLevel::LightGray => Color::Gray,
        PixelLevel::Gray => Color::DarkGray,
        PixelLevel::DarkGray => Color::Indexed(238),
        PixelLevel::Black => Color::Black,
    }
}

impl Display for Tui {
    fn present(&mut self, pixels: &[PixelLevel], width: usize, height: usize) {
        let _ = self.terminal.draw(|frame| {
            let area = frame.area();
            let block = Block::bordered().title("Axe Interpreter");
            let inner = block.inner(area);
            frame.render_widget(block, area);

            let buf = frame.buffer_mut();
            for row in 0..(inner.height as usize).min(height) {
                for col in 0..(inner.width as usize).min(width) {
                    let level = pixels[row * width + col];
                    if let Some(cell) =
                        buf.cell_mut((inner.x + col as u16, inner.y + row as u16))
                    {
                        cell.set_bg(color_for(level));
                        cell.set_symbol(" ");
                    }
                }
            }
        });
    }

    fn set_title(&mut self, title: &str) {
        let _ = execute!(io::stdout(), crossterm::terminal::SetTitle(title));
    }
}

impl Input for Tui {
    fn pressed_keys(&mut self) -> HashSet<String> {
        self.pressed.clone()
    }

    fn should_quit(&mut self) -> bool {
        self.quit
    }
}

impl Host for Tui {
    fn poll(&mut self, calc: &mut Calculator) -> bool {
        if self.drain_events().is_err() {
            return false;
        }
        calc.keys_mut().set_pressed(self.pressed_keys());
        !self.should_quit()
    }

    fn present(&mut self, calc: &Calculator, buf: i64, backbuf: Option<i64>, scale: u8) {
        use axe_interpreter::calculator::raster::{HEIGHT, WIDTH};
        let pixels = calc.disp_screen(buf, backbuf, scale);
        Display::present(self, &pixels, WIDTH as usize, HEIGHT as usize);
    }
}
