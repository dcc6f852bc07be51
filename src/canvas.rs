//! Character-cell rendering surface for the progress ring.
//!
//! A terminal cell is roughly twice as tall as it is wide, so the canvas
//! treats each cell as one surface unit wide and two units tall. A
//! [`DrawPlan`] built for [`Canvas::surface`] therefore comes out round on
//! screen.
//!
//! ```rust
//! use ring_timer::canvas::{Canvas, Layer};
//! use ring_timer::geometry::DrawPlan;
//!
//! let mut canvas = Canvas::new(21, 10);
//! canvas.paint(&DrawPlan::new(0.0, canvas.surface()));
//!
//! // The indicator dot rests at the top centre at zero progress
//! assert_eq!(canvas.layer(10, 0), Some(Layer::Dot));
//! ```

use crate::geometry::{angle_of, DrawPlan, Point, Size, Tone};
use lipgloss_extras::lipgloss;
use lipgloss_extras::lipgloss::blending::blend_1d;
use lipgloss_extras::prelude::*;

/// Steps in the fade ramp used for pulsing text.
const FADE_STEPS: usize = 11;

/// What occupies a cell, in increasing draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Nothing drawn.
    Blank,
    /// Background ring.
    Background,
    /// Inner ring.
    Inner,
    /// Progress arc.
    Arc,
    /// Indicator dot.
    Dot,
    /// A character of a text label.
    Text(char),
}

impl Layer {
    fn glyph(self) -> char {
        match self {
            Layer::Blank => ' ',
            Layer::Background => '░',
            Layer::Inner => '▒',
            Layer::Arc => '█',
            Layer::Dot => '●',
            Layer::Text(c) => c,
        }
    }
}

/// Colors used to render the ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Background ring.
    pub neutral: String,
    /// Inner ring.
    pub contrast: String,
    /// Arc, dot and labels.
    pub accent: String,
    /// Screen background; labels fade towards it.
    pub background: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            neutral: "#1F1F1F".to_string(),
            contrast: "#E0E0E0".to_string(),
            accent: "#03DAC5".to_string(),
            background: "#000000".to_string(),
        }
    }
}

impl Palette {
    /// Color for a primitive's tone.
    pub fn color(&self, tone: Tone) -> lipgloss::Color {
        let hex = match tone {
            Tone::Neutral => &self.neutral,
            Tone::Contrast => &self.contrast,
            Tone::Accent => &self.accent,
        };
        lipgloss::Color::from(hex.as_str())
    }

    /// Accent color mixed towards the background; `alpha` 1.0 is full accent.
    pub fn faded_accent(&self, alpha: f32) -> lipgloss::Color {
        if alpha >= 1.0 {
            return lipgloss::Color::from(self.accent.as_str());
        }

        let ramp = blend_1d(
            FADE_STEPS,
            vec![
                lipgloss::Color::from(self.background.as_str()),
                lipgloss::Color::from(self.accent.as_str()),
            ],
        );
        let idx = (alpha.clamp(0.0, 1.0) * (FADE_STEPS - 1) as f32).round() as usize;
        ramp[idx.min(ramp.len().saturating_sub(1))].clone()
    }
}

/// Grid of cells the ring and labels are painted onto.
#[derive(Debug, Clone)]
pub struct Canvas {
    cols: usize,
    rows: usize,
    cells: Vec<Layer>,
    tones: Vec<Option<Tone>>,
}

impl Canvas {
    /// Creates a blank canvas of `cols` × `rows` cells.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Layer::Blank; cols * rows],
            tones: vec![None; cols * rows],
        }
    }

    /// Width in cells.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Height in cells.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Surface size for building a [`DrawPlan`] that fits this canvas.
    pub fn surface(&self) -> Size {
        Size::new(self.cols as f32, self.rows as f32 * 2.0)
    }

    /// Layer at `(col, row)`, or `None` outside the canvas.
    pub fn layer(&self, col: usize, row: usize) -> Option<Layer> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }

    /// Tone of the ring primitive painted at `(col, row)`. Blank cells, text
    /// and cells outside the canvas have none.
    pub fn tone(&self, col: usize, row: usize) -> Option<Tone> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.tones[row * self.cols + col]
    }

    /// Paints the ring primitives of `plan`, later primitives over earlier ones.
    pub fn paint(&mut self, plan: &DrawPlan) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let point = Point {
                    x: col as f32 + 0.5,
                    y: (row as f32 + 0.5) * 2.0,
                };
                let dx = point.x - plan.center.x;
                let dy = point.y - plan.center.y;
                let distance = (dx * dx + dy * dy).sqrt();

                let mut cell = (Layer::Blank, None);
                if plan.background.covers(distance) {
                    cell = (Layer::Background, Some(plan.background.tone));
                }
                if plan.inner.covers(distance) {
                    cell = (Layer::Inner, Some(plan.inner.tone));
                }
                if (distance - plan.arc.radius).abs() <= plan.arc.stroke / 2.0
                    && plan.arc.contains_angle(angle_of(plan.center, point))
                {
                    cell = (Layer::Arc, Some(plan.arc.tone));
                }
                if plan.dot.covers(point) {
                    cell = (Layer::Dot, Some(plan.dot.tone));
                }

                let idx = row * self.cols + col;
                self.cells[idx] = cell.0;
                self.tones[idx] = cell.1;
            }
        }
    }

    /// Writes `text` centered on `row`. Rows outside the canvas are ignored and
    /// text wider than the canvas is clipped.
    pub fn stamp(&mut self, row: usize, text: &str) {
        if row >= self.rows {
            return;
        }

        let width = text.chars().count();
        let start = self.cols.saturating_sub(width) / 2;
        for (i, c) in text.chars().enumerate() {
            let col = start + i;
            if col >= self.cols {
                break;
            }
            self.cells[row * self.cols + col] = Layer::Text(c);
            self.tones[row * self.cols + col] = None;
        }
    }

    /// Plain glyphs without styling, one line per row.
    pub fn plain(&self) -> String {
        self.cells
            .chunks(self.cols.max(1))
            .map(|row| row.iter().map(|l| l.glyph()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Styled output; text cells are faded by `alpha`.
    pub fn render(&self, palette: &Palette, alpha: f32) -> String {
        let mut lines = Vec::with_capacity(self.rows);

        let width = self.cols.max(1);
        for (cells, tones) in self.cells.chunks(width).zip(self.tones.chunks(width)) {
            let mut line = String::new();
            let mut run = String::new();
            let mut run_kind: Option<(Layer, Option<Tone>)> = None;

            // Consecutive cells of the same kind and tone share one styled span
            for (&layer, &tone) in cells.iter().zip(tones) {
                let kind = match layer {
                    Layer::Text(_) => (Layer::Text(' '), None),
                    other => (other, tone),
                };
                if run_kind != Some(kind) {
                    if let Some((prev, prev_tone)) = run_kind {
                        line.push_str(&style_run(palette, prev, prev_tone, alpha, &run));
                    }
                    run.clear();
                    run_kind = Some(kind);
                }
                run.push(layer.glyph());
            }
            if let Some((prev, prev_tone)) = run_kind {
                line.push_str(&style_run(palette, prev, prev_tone, alpha, &run));
            }

            lines.push(line);
        }

        lines.join("\n")
    }
}

fn style_run(palette: &Palette, kind: Layer, tone: Option<Tone>, alpha: f32, run: &str) -> String {
    if matches!(kind, Layer::Text(_)) {
        return Style::new()
            .foreground(palette.faded_accent(alpha))
            .bold(true)
            .render(run);
    }

    match tone {
        Some(tone) => Style::new().foreground(palette.color(tone)).render(run),
        None => run.to_string(),
    }
}
