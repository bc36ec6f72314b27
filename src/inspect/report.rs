//! Inspect report types and terminal formatting.

use std::fmt;

use serde::Serialize;

use crate::idx::IdxKind;

/// The result of inspecting an IDX file.
#[derive(Clone, Debug, Serialize)]
pub struct InspectReport {
    /// Which kind of file was inspected.
    pub kind: IdxKind,
    /// Number of items (labels or images).
    pub item_count: usize,
    /// Image dimensions; `None` for label files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    /// Label distribution; `None` for image files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<LabelsSection>,
    /// Pixel statistics; `None` for label files and empty image files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixels: Option<PixelStats>,
    /// Display options for formatting.
    #[serde(skip)]
    pub(crate) bar_width: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

/// Label distribution section.
#[derive(Clone, Debug, Serialize)]
pub struct LabelsSection {
    /// How many top labels to show.
    pub top_n: usize,
    /// Distinct label values present.
    pub total_distinct: usize,
    /// Labels counted in the histogram.
    pub total_labels: usize,
    /// Top label entries (sorted by count descending).
    pub entries: Vec<LabelCount>,
    /// Sum of counts for labels not in the top N.
    pub other_count: usize,
    /// Values left out because they are not whole numbers in `0..=255`.
    pub skipped: usize,
}

/// A single label value with its count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: u8,
    pub count: usize,
}

/// Pixel value statistics over every image in a file.
#[derive(Clone, Debug, Serialize)]
pub struct PixelStats {
    /// Total pixels analysed.
    pub total: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Pixels with a value other than zero.
    pub nonzero: usize,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "IDX Inspection Report ({})", self.kind)?;
        writeln!(f)?;

        self.fmt_summary(f)?;
        writeln!(f)?;

        if let Some(labels) = &self.labels {
            self.fmt_labels(f, labels)?;
        } else {
            self.fmt_pixels(f)?;
        }

        Ok(())
    }
}

impl InspectReport {
    fn fmt_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "┌─ Summary")?;
        writeln!(f, "│   Kind:          {:>12}", self.kind.to_string())?;
        writeln!(f, "│   Magic:         {:>12}", self.kind.magic())?;
        writeln!(f, "│   Items:         {:>12}", format_number(self.item_count))?;
        if let Some(dims) = &self.dimensions {
            writeln!(
                f,
                "│   Dimensions:    {:>12}",
                format!("{}x{}", dims.rows, dims.cols)
            )?;
        }
        writeln!(f, "└─")?;
        Ok(())
    }

    fn fmt_labels(&self, f: &mut fmt::Formatter<'_>, l: &LabelsSection) -> fmt::Result {
        if l.total_distinct > l.top_n {
            writeln!(f, "┌─ Labels (top {} of {})", l.top_n, l.total_distinct)?;
        } else {
            writeln!(f, "┌─ Labels ({})", l.total_distinct)?;
        }

        if l.entries.is_empty() {
            writeln!(f, "│   No labels found.")?;
        } else {
            let max_count = l.entries.iter().map(|e| e.count).max().unwrap_or(1);

            for entry in &l.entries {
                writeln!(
                    f,
                    "│   {:>7} {:>9} {:>7}  {}",
                    entry.label,
                    format_number(entry.count),
                    fmt_percent(entry.count, l.total_labels),
                    render_bar(entry.count, max_count, self.bar_width)
                )?;
            }

            if l.other_count > 0 {
                writeln!(
                    f,
                    "│   {:>7} {:>9} {:>7}  {}",
                    "(other)",
                    format_number(l.other_count),
                    fmt_percent(l.other_count, l.total_labels),
                    render_bar(l.other_count, max_count, self.bar_width)
                )?;
            }
        }

        if l.skipped > 0 {
            writeln!(
                f,
                "│   Skipped {} value(s) outside 0..=255",
                format_number(l.skipped)
            )?;
        }

        writeln!(f, "└─")?;
        Ok(())
    }

    fn fmt_pixels(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "┌─ Pixels")?;
        match &self.pixels {
            None => writeln!(f, "│   No images found.")?,
            Some(p) => {
                writeln!(f, "│   Total:         {:>12}", format_number(p.total))?;
                writeln!(f, "│   Range:         {:>5} .. {:<5}", p.min, p.max)?;
                writeln!(f, "│   Mean:          {:>12.3}", p.mean)?;
                writeln!(
                    f,
                    "│   Non-zero:      {:>12}  ({})",
                    format_number(p.nonzero),
                    fmt_percent(p.nonzero, p.total)
                )?;
            }
        }
        writeln!(f, "└─")?;
        Ok(())
    }
}

/// Format a number with thousands separators.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a percentage, handling zero denominators.
fn fmt_percent(numerator: usize, denominator: usize) -> String {
    if denominator == 0 {
        "n/a".to_string()
    } else {
        format!("{:.1}%", (numerator as f64 / denominator as f64) * 100.0)
    }
}

/// Render a horizontal bar using Unicode block characters.
fn render_bar(count: usize, max_count: usize, width: usize) -> String {
    if max_count == 0 || width == 0 {
        return String::new();
    }

    let filled = ((count * width) / max_count).min(width);
    "█".repeat(filled) + &"░".repeat(width - filled)
}
