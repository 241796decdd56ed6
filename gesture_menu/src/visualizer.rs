//! Software-rendered menu window using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  screen title                    gesture     │
//! │  ┌────────────────┐  ┌────────────────┐      │
//! │  │ item 0         │  │ item 1         │      │
//! │  └────────────────┘  └────────────────┘      │
//! │  ┌────────────────┐  ┌────────────────┐      │
//! │  │ item 2 (cursor)│  │ item 3         │      │
//! │  └────────────────┘  └────────────────┘      │
//! │  …                                           │
//! │  status bar                                  │
//! │  key legend                                  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The window also acts as the simulated camera and simulated channel: keys
//! become [`SimInput`]s for the frame source and raw codes for the
//! [`SimChannelHandle`].

use std::sync::mpsc::Sender;

use menu_nav::NavLayout;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::sim_channel::SimChannelHandle;
use crate::source::{SimInput, SimKey};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:    usize = 720;
pub const WIN_H:    usize = 560;
const MARGIN:       usize = 24;
const CELL_W:       usize = (WIN_W - 3 * MARGIN) / 2;
const CELL_H:       usize = 34;
const ROW_GAP:      usize = 8;
const GRID_Y:       usize = 48;
const STATUS_Y:     usize = WIN_H - 44;
const BG_COLOR:     u32   = 0xFF1A1A2E;
const CELL_COLOR:   u32   = 0xFF16213E;
const CURSOR_COLOR: u32   = 0xFF1F6FEB;
const BORDER_COLOR: u32   = 0xFF0F3460;
const TEXT_BG:      u32   = 0xFF0F3460;
const DONE_COLOR:   u32   = 0xFFFFD700;

// ════════════════════════════════════════════════════════════════════════════
// Key bindings
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    /// Hand shape shown while the key is held.
    Hand(SimKey),
    /// Secondary channel code.
    Channel(i32),
    /// Secondary channel "finished".
    Finished,
    Quit,
}

pub const LEGEND: &str =
    "arrows=point  z/x=palm l/r  f=fist  a/d=swipe  1-4=channel  enter=finished  q=quit";

pub fn binding(key: Key) -> Option<Binding> {
    Some(match key {
        Key::Up     => Binding::Hand(SimKey::PointUp),
        Key::Down   => Binding::Hand(SimKey::PointDown),
        Key::Left   => Binding::Hand(SimKey::PointLeft),
        Key::Right  => Binding::Hand(SimKey::PointRight),
        Key::Z      => Binding::Hand(SimKey::PalmLeft),
        Key::X      => Binding::Hand(SimKey::PalmRight),
        Key::F      => Binding::Hand(SimKey::Fist),
        Key::A      => Binding::Hand(SimKey::SwipeLeft),
        Key::D      => Binding::Hand(SimKey::SwipeRight),
        Key::Key1   => Binding::Channel(1),
        Key::Key2   => Binding::Channel(2),
        Key::Key3   => Binding::Channel(3),
        Key::Key4   => Binding::Channel(4),
        Key::Enter  => Binding::Finished,
        Key::Q | Key::Escape => Binding::Quit,
        _ => return None,
    })
}

const BOUND_KEYS: [Key; 16] = [
    Key::Up, Key::Down, Key::Left, Key::Right, Key::Z, Key::X, Key::F, Key::A, Key::D,
    Key::Key1, Key::Key2, Key::Key3, Key::Key4, Key::Enter, Key::Q, Key::Escape,
];

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

/// What one frame shows.
pub struct View<'a> {
    pub title:    &'a str,
    pub layout:   &'a NavLayout,
    pub selected: usize,
    pub gesture:  &'a str,
    pub status:   &'a str,
    pub done:     bool,
}

pub struct Visualizer {
    window:  Window,
    buf:     Vec<u32>,
    sim_tx:  Sender<SimInput>,
    channel: SimChannelHandle,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>, channel: SimChannelHandle) -> Result<Self, minifb::Error> {
        let mut window = Window::new(
            "Gesture Menu",
            WIN_W, WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
            channel,
        })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Translate key edges into simulated input.  Returns false on quit.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        for key in BOUND_KEYS {
            let Some(b) = binding(key) else { continue };
            if self.window.is_key_pressed(key, KeyRepeat::No) {
                match b {
                    Binding::Hand(k)    => { let _ = self.sim_tx.send(SimInput::KeyDown(k)); }
                    Binding::Channel(c) => self.channel.press(c),
                    Binding::Finished   => self.channel.finish(),
                    Binding::Quit       => {
                        let _ = self.sim_tx.send(SimInput::Quit);
                        return false;
                    }
                }
            }
            if let Binding::Hand(k) = b {
                if self.window.is_key_released(key) {
                    let _ = self.sim_tx.send(SimInput::KeyUp(k));
                }
            }
        }
        true
    }

    /// Render one frame.
    pub fn render(&mut self, view: &View) {
        self.buf.fill(BG_COLOR);

        self.draw_label(view.title, MARGIN, 18, 0xFFAADDFF);
        self.draw_label(view.gesture, WIN_W - MARGIN - 4 * view.gesture.len(), 18, 0xFFFFBBAA);

        for (i, item) in view.layout.items().iter().enumerate() {
            let (row, col) = view.layout.cell(i);
            let x = MARGIN + col * (CELL_W + MARGIN);
            let y = GRID_Y + row * (CELL_H + ROW_GAP);
            if y + CELL_H > STATUS_Y { break; }

            let color = match (i == view.selected, view.done) {
                (true, true)  => blend(CURSOR_COLOR, DONE_COLOR, 0.6),
                (true, false) => CURSOR_COLOR,
                _             => CELL_COLOR,
            };
            self.fill_rect(x, y, CELL_W, CELL_H, color);
            self.draw_border(x, y, CELL_W, CELL_H, BORDER_COLOR);
            self.draw_label(item, x + 10, y + CELL_H / 2 - 2, 0xFFEEEEEE);
        }

        self.fill_rect(0, STATUS_Y, WIN_W, WIN_H - STATUS_Y, TEXT_BG);
        self.draw_label(view.status, 10, STATUS_Y + 10, 0xFFEEEEEE);
        self.draw_label(LEGEND, 10, WIN_H - 16, 0xFF888888);

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(WIN_H) {
            for col in x..(x + w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        if w == 0 || h == 0 { return; }
        for col in x..(x + w).min(WIN_W) {
            self.set_pixel(col, y, color);
            self.set_pixel(col, y + h - 1, color);
        }
        for row in y..(y + h).min(WIN_H) {
            self.set_pixel(x, row, color);
            self.set_pixel(x + w - 1, row, color);
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < WIN_W && y < WIN_H {
            self.buf[y * WIN_W + x] = color;
        }
    }

    /// 3×5 bitmap text.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            for (row, &bits) in char_glyph(ch).iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.set_pixel(cx + col, y + row, color);
                    }
                }
            }
            cx += 4;
            if cx + 4 > WIN_W { break; }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c.to_ascii_lowercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '>' => [0b100, 0b010, 0b001, 0b010, 0b100],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000],
    }
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |shift: u32| {
        let ca = ((a >> shift) & 0xFF) as f32;
        let cb = ((b >> shift) & 0xFF) as f32;
        ((ca * (1.0 - t) + cb * t) as u32) << shift
    };
    0xFF000000 | lerp(16) | lerp(8) | lerp(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_bound_key_has_a_binding() {
        for key in BOUND_KEYS {
            assert!(binding(key).is_some(), "{:?}", key);
        }
        assert_eq!(binding(Key::P), None);
    }

    #[test]
    fn channel_keys_use_raw_codes() {
        assert_eq!(binding(Key::Key1), Some(Binding::Channel(1)));
        assert_eq!(binding(Key::Key4), Some(Binding::Channel(4)));
        assert_eq!(binding(Key::Enter), Some(Binding::Finished));
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend(0xFF102030, 0xFFFFFFFF, 0.0), 0xFF102030);
        assert_eq!(blend(0xFF102030, 0xFFFFFFFF, 1.0), 0xFFFFFFFF);
    }

    #[test]
    fn two_columns_fit_the_window() {
        assert!(2 * CELL_W + 3 * MARGIN <= WIN_W);
    }
}
