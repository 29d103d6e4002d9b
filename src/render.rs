//! Terminal output for the `backdrop` binary.
//!
//! Data (candidates, rows, swatches) goes to stdout; status, warnings, and
//! errors go to stderr.

use crossterm::style::{Color, Stylize};

use crate::color::{Foreground, Rgb};
use crate::resolve::ImageCandidate;
use crate::store::Row;

const LABEL_WARNING: &str = "warning:";
const LABEL_ERROR: &str = "error:";
const GLYPH_SECTION_BULLET: &str = "•";
const INDENT_1: &str = "  ";

/// Handles all terminal output formatting.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Print a small section header.
    pub fn section(&self, title: &str) {
        if self.color {
            println!(
                "{} {}",
                GLYPH_SECTION_BULLET.with(Color::DarkGrey),
                title.with(Color::Cyan).bold()
            );
        } else {
            println!("{title}:");
        }
    }

    /// Print a key/value line under a section.
    pub fn field(&self, key: &str, value: &str) {
        if self.color {
            println!(
                "{INDENT_1}{} {}",
                format!("{key}:").with(Color::DarkGrey),
                value.with(Color::White),
            );
        } else {
            println!("{INDENT_1}{key}: {value}");
        }
    }

    /// Print one numbered candidate (1-based, as `--pick` expects).
    pub fn candidate(&self, position: usize, candidate: &ImageCandidate) {
        if self.color {
            println!(
                "{INDENT_1}{} {} {}",
                format!("{position:>2}.").with(Color::DarkGrey),
                candidate.url.as_str().with(Color::White),
                format!("({})", candidate.title).with(Color::DarkGrey),
            );
        } else {
            println!("{INDENT_1}{position:>2}. {} ({})", candidate.url, candidate.title);
        }
    }

    /// Print `label` over `background` in the readable foreground.
    pub fn swatch(&self, label: &str, background: Rgb, foreground: Foreground) {
        if self.color {
            let fg = foreground.rgb();
            println!(
                "{INDENT_1}{}",
                format!(" {label} ")
                    .with(Color::Rgb {
                        r: fg.r,
                        g: fg.g,
                        b: fg.b,
                    })
                    .on(Color::Rgb {
                        r: background.r,
                        g: background.g,
                        b: background.b,
                    })
            );
        } else {
            println!("{INDENT_1}{label} [{background} on {}]", foreground.label());
        }
    }

    /// Print one table row.
    pub fn row(&self, row: &Row) {
        println!("{}", format_row(row));
    }

    /// Print a warning (to stderr).
    pub fn warn(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", LABEL_WARNING.with(Color::Yellow).bold());
        } else {
            eprintln!("{LABEL_WARNING} {msg}");
        }
    }

    /// Print an error (to stderr).
    pub fn error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", LABEL_ERROR.with(Color::Red).bold());
        } else {
            eprintln!("{LABEL_ERROR} {msg}");
        }
    }
}

/// One-line, tab-separated rendering of a row.
pub fn format_row(row: &Row) -> String {
    match row {
        Row::Color(color) => format!(
            "{}\t{}\tactive={}",
            color.id, color.color_name, color.is_active
        ),
        Row::Splash(splash) => format!(
            "{}\t{}\t{}\tactive={}",
            splash.id,
            splash.splash_name,
            splash.image_url.as_deref().unwrap_or("-"),
            splash.is_active
        ),
        Row::Background(background) => format!(
            "{}\t{}\t{}\tcurrent={}\tsaved_at={}",
            background.id,
            background.image_url,
            if background.color_name.is_empty() {
                "-"
            } else {
                background.color_name.as_str()
            },
            background.is_current,
            background.saved_at_millis
        ),
    }
}
