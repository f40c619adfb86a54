//! Summary image renderer.
//!
//! Draws the top countries by estimated GDP as a bar chart and encodes the
//! result as a PNG at a well-known path, overwriting the previous image.
//! The record count and batch timestamp are embedded as `tEXt` metadata
//! chunks. Rendering is a pure function of the snapshot it is handed;
//! callers invoke it fire-and-forget after a refresh.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Utc};
use thiserror::Error;

use country_store::Country;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 700;
const MARGIN: u32 = 60;

const BACKGROUND: [u8; 3] = [0xff, 0xff, 0xff];
const BAR_COLOR: [u8; 3] = [0x4c, 0xaf, 0x50];
const AXIS_COLOR: [u8; 3] = [0x33, 0x33, 0x33];

/// Errors that can occur while producing the summary image.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Creating or writing the image file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding failed.
    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// A fixed-size RGB pixel buffer.
struct Canvas {
    pixels: Vec<u8>,
}

impl Canvas {
    fn new() -> Self {
        let mut pixels = Vec::with_capacity((WIDTH * HEIGHT * 3) as usize);
        for _ in 0..WIDTH * HEIGHT {
            pixels.extend_from_slice(&BACKGROUND);
        }
        Self { pixels }
    }

    /// Fills the rectangle [x0, x1) × [y0, y1), clamped to the canvas.
    fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: [u8; 3]) {
        let x1 = x1.min(WIDTH);
        let y1 = y1.min(HEIGHT);
        for y in y0..y1 {
            for x in x0..x1 {
                let offset = ((y * WIDTH + x) * 3) as usize;
                self.pixels[offset..offset + 3].copy_from_slice(&color);
            }
        }
    }
}

/// Renders the summary chart for the given snapshot and writes it to `path`.
///
/// `top` is expected sorted descending by estimated GDP (at most five
/// records); bars are scaled against the largest estimate. The parent
/// directory is created on demand and an existing image is overwritten.
pub fn render_summary(
    path: &Path,
    total: i64,
    top: &[Country],
    refreshed_at: DateTime<Utc>,
) -> Result<()> {
    let mut canvas = Canvas::new();

    let baseline = HEIGHT - MARGIN;
    canvas.fill_rect(MARGIN - 2, MARGIN, MARGIN, baseline, AXIS_COLOR);
    canvas.fill_rect(MARGIN - 2, baseline, WIDTH - MARGIN, baseline + 2, AXIS_COLOR);

    // Estimates in billions, like the chart the image summarizes.
    let values: Vec<f64> = top
        .iter()
        .map(|c| c.estimated_gdp.unwrap_or(0.0) / 1e9)
        .collect();
    let max = values.iter().copied().fold(0.0_f64, f64::max);

    if max > 0.0 {
        let plot_width = WIDTH - 2 * MARGIN;
        let plot_height = baseline - MARGIN;
        let slot = plot_width / values.len() as u32;

        for (i, value) in values.iter().enumerate() {
            let bar_height = ((value / max) * plot_height as f64) as u32;
            if bar_height == 0 {
                continue;
            }
            let x0 = MARGIN + i as u32 * slot + slot / 5;
            let x1 = x0 + slot * 3 / 5;
            canvas.fill_rect(x0, baseline - bar_height, x1, baseline, BAR_COLOR);
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), WIDTH, HEIGHT);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.add_text_chunk(
        "Title".to_string(),
        "Top 5 Countries by Estimated GDP (Billions USD)".to_string(),
    )?;
    encoder.add_text_chunk("Total Countries".to_string(), total.to_string())?;
    encoder.add_text_chunk(
        "Refreshed".to_string(),
        refreshed_at.format("%Y-%m-%d %H:%M:%SZ").to_string(),
    )?;

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&canvas.pixels)?;

    tracing::debug!(path = %path.display(), total, "summary image written");
    Ok(())
}
