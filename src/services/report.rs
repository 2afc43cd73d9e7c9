// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PDF performance report rendering.
//!
//! Layout: a title line with the username, one line per statistic, then
//! a bordered five-column table with one row per filtered record in
//! input order. Rows that run off the page continue on a new page with
//! a fresh header row.

use std::fs;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};

use crate::models::{SessionRecord, Statistics};

// A4 portrait geometry, in millimeters.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 15.0;
const MARGIN_BOTTOM: f32 = 20.0;
const COLUMN_WIDTH: f32 = 36.0;
const ROW_HEIGHT: f32 = 8.0;
const COLUMNS: usize = 5;

const TABLE_HEADER: [&str; COLUMNS] = [
    "Date",
    "Distance (km)",
    "Time (min)",
    "Calories (kcal)",
    "Avg HR (bpm)",
];

/// Renders performance reports and writes the artifact to disk.
#[derive(Debug, Clone)]
pub struct ReportService {
    reports_dir: PathBuf,
}

impl ReportService {
    pub fn new<P: AsRef<Path>>(reports_dir: P) -> Self {
        Self {
            reports_dir: reports_dir.as_ref().to_path_buf(),
        }
    }

    /// Deterministic artifact name for a user's report.
    pub fn artifact_name(username: &str) -> String {
        format!("{}_performance_report.pdf", username)
    }

    /// Render the report as PDF bytes.
    ///
    /// An empty `filtered_records` still yields a valid document with a
    /// header row and no data rows; callers are expected to have
    /// short-circuited on absent statistics before getting here.
    pub fn render(
        &self,
        statistics: &Statistics,
        filtered_records: &[SessionRecord],
        username: &str,
    ) -> Result<Vec<u8>, ReportError> {
        let (doc, page, layer) = PdfDocument::new(
            format!("Performance report for {}", username),
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "Layer 1",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;

        let mut layer = doc.get_page(page).get_layer(layer);
        let mut y = PAGE_HEIGHT - 20.0;

        // Title line
        layer.use_text(
            format!("Performance report for {}", username),
            16.0,
            Mm(MARGIN_LEFT),
            Mm(y),
            &bold,
        );
        y -= 14.0;

        // One line per statistic key/value pair
        for (key, value) in statistic_lines(statistics) {
            layer.use_text(
                format!("{}: {}", key, value),
                12.0,
                Mm(MARGIN_LEFT),
                Mm(y),
                &regular,
            );
            y -= 7.0;
        }
        y -= 6.0;

        // Bordered table: header row, then one row per record in input order
        draw_table_row(&layer, y, &TABLE_HEADER, &bold);
        y -= ROW_HEIGHT;

        for record in filtered_records {
            if y < MARGIN_BOTTOM {
                let (next_page, next_layer) =
                    doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
                layer = doc.get_page(next_page).get_layer(next_layer);
                y = PAGE_HEIGHT - 20.0;
                draw_table_row(&layer, y, &TABLE_HEADER, &bold);
                y -= ROW_HEIGHT;
            }

            let cells = [
                record.date.to_string(),
                format!("{}", record.distance_km),
                format!("{}", record.time_min),
                format!("{}", record.calories),
                format!("{}", record.avg_heart_rate_bpm),
            ];
            let cell_refs: Vec<&str> = cells.iter().map(String::as_str).collect();
            draw_table_row(&layer, y, &cell_refs, &regular);
            y -= ROW_HEIGHT;
        }

        doc.save_to_bytes().map_err(|e| ReportError::Pdf(e.to_string()))
    }

    /// Render and write the artifact, overwriting any prior report for
    /// this user. Returns the artifact path.
    pub fn render_to_file(
        &self,
        statistics: &Statistics,
        filtered_records: &[SessionRecord],
        username: &str,
    ) -> Result<PathBuf, ReportError> {
        let bytes = self.render(statistics, filtered_records, username)?;

        fs::create_dir_all(&self.reports_dir).map_err(|e| ReportError::Io(e.to_string()))?;
        let path = self.reports_dir.join(Self::artifact_name(username));
        fs::write(&path, &bytes).map_err(|e| ReportError::Io(e.to_string()))?;

        tracing::info!(path = %path.display(), bytes = bytes.len(), "Wrote report artifact");
        Ok(path)
    }
}

/// Statistic labels and formatted values, in display order.
fn statistic_lines(stats: &Statistics) -> Vec<(&'static str, String)> {
    vec![
        ("Total distance (km)", format!("{:.2}", stats.total_distance_km)),
        ("Total time (min)", format!("{:.1}", stats.total_time_min)),
        ("Total calories (kcal)", format!("{:.0}", stats.total_calories)),
        (
            "Average heart rate (bpm)",
            format!("{:.0}", stats.avg_heart_rate_bpm),
        ),
        ("Average speed (km/h)", format!("{:.2}", stats.avg_speed_kmh)),
    ]
}

/// Draw one bordered table row with `y` as its top edge.
fn draw_table_row(layer: &PdfLayerReference, y: f32, cells: &[&str], font: &IndirectFontRef) {
    let top = y;
    let bottom = y - ROW_HEIGHT;
    let right = MARGIN_LEFT + COLUMN_WIDTH * COLUMNS as f32;

    layer.set_outline_thickness(0.4);

    // Horizontal borders
    add_segment(layer, MARGIN_LEFT, top, right, top);
    add_segment(layer, MARGIN_LEFT, bottom, right, bottom);

    // Vertical borders, including the outer edges
    for i in 0..=COLUMNS {
        let x = MARGIN_LEFT + COLUMN_WIDTH * i as f32;
        add_segment(layer, x, top, x, bottom);
    }

    for (i, cell) in cells.iter().enumerate() {
        let x = MARGIN_LEFT + COLUMN_WIDTH * i as f32 + 2.0;
        layer.use_text(cell.to_string(), 10.0, Mm(x), Mm(bottom + 2.5), font);
    }
}

fn add_segment(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y1)), false),
            (Point::new(Mm(x2), Mm(y2)), false),
        ],
        is_closed: false,
    });
}

/// Errors from report rendering.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<ReportError> for crate::error::AppError {
    fn from(err: ReportError) -> Self {
        crate::error::AppError::Storage(err.to_string())
    }
}
