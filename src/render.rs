//! Character-grid rasterizer for garden snapshots.
//!
//! Rendering is a pure function of the views passed in: the rasterizer never
//! touches the garden and never prints. Callers pick plain or ANSI output.

use std::fmt::Write as _;

use crate::snapshot::FlowerView;

/// Glyphs from thinnest to heaviest stroke.
pub const GLYPHS: [char; 6] = ['.', ':', '*', 'o', 'O', '@'];
const MAX_GLYPH: usize = GLYPHS.len() - 1;
const RESET: &str = "\x1b[0m";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Yellow,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightMagenta,
    BrightCyan,
}

impl Color {
    pub fn ansi(self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::BrightRed => "\x1b[91m",
            Color::BrightGreen => "\x1b[92m",
            Color::BrightYellow => "\x1b[93m",
            Color::BrightMagenta => "\x1b[95m",
            Color::BrightCyan => "\x1b[96m",
        }
    }

    /// Map a sentiment-derived intensity in `[-1, 1]` to a palette entry.
    pub fn for_intensity(intensity: f64, is_nomad: bool) -> Self {
        let normalized = (intensity + 1.0) / 2.0;
        if is_nomad {
            return if normalized < 0.33 {
                Color::BrightCyan
            } else if normalized < 0.66 {
                Color::BrightMagenta
            } else {
                Color::BrightYellow
            };
        }
        match normalized {
            n if n > 0.75 => Color::BrightGreen,
            n if n > 0.55 => Color::Green,
            n if n > 0.45 => Color::BrightYellow,
            n if n > 0.25 => Color::Yellow,
            n if n > 0.05 => Color::Red,
            _ => Color::BrightRed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: Option<Color>,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        color: None,
    };

    pub fn is_blank(&self) -> bool {
        *self == Self::BLANK
    }
}

/// One rendered picture, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Frame {
    fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks() panics on zero; an empty frame has no rows anyway.
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    pub fn to_plain_string(&self) -> String {
        self.rows()
            .map(|row| row.iter().map(|cell| cell.glyph).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Each colored cell is wrapped in its escape code and a reset.
    pub fn to_ansi_string(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() * 4);
        for (index, row) in self.rows().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            for cell in row {
                match cell.color {
                    Some(color) => {
                        let _ = write!(out, "{}{}{}", color.ansi(), cell.glyph, RESET);
                    }
                    None => out.push(cell.glyph),
                }
            }
        }
        out
    }

    /// Number of non-blank cells.
    pub fn ink(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_blank()).count()
    }
}

/// Draws flower views onto a reusable grid with a per-cell depth buffer.
///
/// A flower's depth is its scale. A cell is overwritten when the incoming
/// depth is at least the stored one, so among equal scales the later flower
/// wins.
pub struct Rasterizer {
    frame: Frame,
    depth: Vec<f64>,
}

impl Rasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            frame: Frame::blank(width, height),
            depth: vec![f64::NEG_INFINITY; width * height],
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn render(&mut self, flowers: &[FlowerView]) -> &Frame {
        self.frame.cells.fill(Cell::BLANK);
        self.depth.fill(f64::NEG_INFINITY);

        for flower in flowers {
            let color = Color::for_intensity(flower.color_intensity, flower.is_nomad);
            let scale = flower.scale;
            let origin = flower.position;

            for segment in flower.geometry.iter() {
                let glyph = glyph_for(segment.thickness * scale, flower.thickness_boost);
                let cell = Cell {
                    glyph,
                    color: Some(color),
                };
                self.draw_line(
                    (segment.x1 * scale + origin.x).floor() as i64,
                    (segment.y1 * scale + origin.y).floor() as i64,
                    (segment.x2 * scale + origin.x).floor() as i64,
                    (segment.y2 * scale + origin.y).floor() as i64,
                    cell,
                    scale,
                );
            }
        }

        &self.frame
    }

    fn draw_line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, cell: Cell, depth: f64) {
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x1, y1);

        loop {
            self.plot(x, y, cell, depth);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn plot(&mut self, x: i64, y: i64, cell: Cell, depth: f64) {
        let (width, height) = (self.frame.width as i64, self.frame.height as i64);
        if x < 0 || y < 0 || x >= width || y >= height {
            return;
        }
        let index = (y * width + x) as usize;
        if depth >= self.depth[index] {
            self.frame.cells[index] = cell;
            self.depth[index] = depth;
        }
    }
}

/// Pick the stroke glyph for a scaled thickness; boosted strokes go one
/// level heavier.
pub fn glyph_for(scaled_thickness: f64, boosted: bool) -> char {
    let level = (scaled_thickness / 5.0 * MAX_GLYPH as f64).floor();
    let mut index = level.clamp(0.0, MAX_GLYPH as f64) as usize;
    if boosted {
        index = (index + 1).min(MAX_GLYPH);
    }
    GLYPHS[index]
}
