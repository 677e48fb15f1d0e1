//! The xterm 256-colour palette and RGB quantization.
//!
//! Only indices 16..256 are modelled: the 6x6x6 colour cube followed by the
//! 24-step gray ramp. The basic 16 colours are left out because their RGB
//! values depend on the terminal's theme.

use std::sync::LazyLock;

use rgb::RGB8;

use crate::error::ColorError;

/// First index of the colour cube.
pub const CUBE_START: u8 = 16;
/// Length of one side of the colour cube.
pub const CUBE_SIZE: u8 = 6;
/// First index of the gray ramp.
pub const GRAY_START: u8 = CUBE_START + CUBE_SIZE * CUBE_SIZE * CUBE_SIZE;

// Values from xterm's 256colres.h
const CUBE_STEPS: [u8; 6] = [0x00, 0x5f, 0x87, 0xaf, 0xd7, 0xff];
const GRAY_STEPS: [u8; 24] = [
    0x08, 0x12, 0x1c, 0x26, 0x30, 0x3a, 0x44, 0x4e, 0x58, 0x62, 0x6c, 0x76, 0x80, 0x84, 0x94,
    0x9e, 0xa8, 0xb2, 0xbc, 0xc6, 0xd0, 0xda, 0xe4, 0xee,
];

const TABLE_LEN: usize = 256 - CUBE_START as usize;

static PALETTE: LazyLock<ColorPalette> = LazyLock::new(ColorPalette::new);

/// Immutable lookup table from palette index to RGB.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    entries: [RGB8; TABLE_LEN],
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorPalette {
    /// Build the table from the cube and gray step tables.
    pub fn new() -> Self {
        let mut entries = [RGB8::default(); TABLE_LEN];
        for (slot, index) in entries.iter_mut().zip(CUBE_START..=u8::MAX) {
            *slot = compute_rgb(index);
        }
        Self { entries }
    }

    /// The process-wide palette, built on first use.
    pub fn global() -> &'static ColorPalette {
        &PALETTE
    }

    /// RGB value of a palette index, `None` for the basic 16 colours.
    pub fn rgb(&self, index: u8) -> Option<RGB8> {
        index
            .checked_sub(CUBE_START)
            .map(|offset| self.entries[usize::from(offset)])
    }

    /// All entries in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, RGB8)> + '_ {
        (CUBE_START..=u8::MAX).zip(self.entries.iter().copied())
    }

    /// Nearest palette index by squared Euclidean distance.
    ///
    /// Exact ties keep the lowest index.
    pub fn xterm_from_rgb(&self, target: RGB8) -> u8 {
        let mut best_index = CUBE_START;
        let mut best_distance = u32::MAX;

        for (index, candidate) in self.iter() {
            let distance = squared_distance(candidate, target);
            if distance < best_distance {
                best_distance = distance;
                best_index = index;
            }
        }

        best_index
    }
}

fn squared_distance(a: RGB8, b: RGB8) -> u32 {
    let dr = u32::from(a.r.abs_diff(b.r));
    let dg = u32::from(a.g.abs_diff(b.g));
    let db = u32::from(a.b.abs_diff(b.b));
    dr * dr + dg * dg + db * db
}

fn compute_rgb(index: u8) -> RGB8 {
    match cube_coordinates(index) {
        Some((a, b, c)) => RGB8::new(
            CUBE_STEPS[usize::from(a)],
            CUBE_STEPS[usize::from(b)],
            CUBE_STEPS[usize::from(c)],
        ),
        None => {
            let gray = GRAY_STEPS[usize::from(index - GRAY_START)];
            RGB8::new(gray, gray, gray)
        }
    }
}

/// Base-6 cube coordinates of a cube index, `None` outside the cube.
pub fn cube_coordinates(index: u8) -> Option<(u8, u8, u8)> {
    if !(CUBE_START..GRAY_START).contains(&index) {
        return None;
    }
    let val = index - CUBE_START;
    let c = val % CUBE_SIZE;
    let val = val / CUBE_SIZE;
    let b = val % CUBE_SIZE;
    let a = val / CUBE_SIZE;
    Some((a, b, c))
}

/// RGB value of a palette index from the global palette.
pub fn rgb_from_xterm(index: u8) -> Option<RGB8> {
    ColorPalette::global().rgb(index)
}

/// Nearest palette index for an RGB triple.
pub fn xterm_from_rgb(rgb: RGB8) -> u8 {
    ColorPalette::global().xterm_from_rgb(rgb)
}

/// Nearest palette index for a hex string such as `"ff8700"`.
///
/// Bytes past the third are ignored.
pub fn xterm_from_rgb_string(text: &str) -> Result<u8, ColorError> {
    let bytes = hex::decode(text).map_err(|_| ColorError::invalid_color(text, "bad hex digits"))?;
    match bytes.as_slice() {
        [r, g, b, ..] => Ok(xterm_from_rgb(RGB8::new(*r, *g, *b))),
        _ => Err(ColorError::invalid_color(text, "need three RGB bytes")),
    }
}
