//! File I/O operations for Game of Life grids
//!
//! The text format is a header line `"<width> <height>"` followed by exactly
//! `height` rows of exactly `width` characters, `'#'` for alive and `' '` for
//! dead, each terminated by a newline.

use super::{binary, Cell, Grid};
use crate::error::{LifeError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// On-disk grid formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Text,
    Binary,
}

impl Format {
    /// Pick a format from the file extension: `.bgol` is binary, anything else is text
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bgol") => Format::Binary,
            _ => Format::Text,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Format::Text => "gol",
            Format::Binary => "bgol",
        }
    }
}

/// Load a grid, choosing the format from the file extension
pub fn load<P: AsRef<Path>>(path: P) -> Result<Grid> {
    match Format::from_path(&path) {
        Format::Text => load_text(path),
        Format::Binary => binary::load_binary(path),
    }
}

/// Save a grid, choosing the format from the file extension
pub fn save<P: AsRef<Path>>(path: P, grid: &Grid) -> Result<()> {
    match Format::from_path(&path) {
        Format::Text => save_text(path, grid),
        Format::Binary => binary::save_binary(path, grid),
    }
}

/// Load a grid from a text file
///
/// A file that cannot be read is `LifeError::Io`, not a parse error, so the
/// path and OS error survive. Malformed content is `LifeError::Parse`.
pub fn load_text<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| LifeError::io(path, e))?;
    let content = std::str::from_utf8(&bytes).map_err(|e| {
        LifeError::parse_at_offset(e.valid_up_to(), "grid file is not valid UTF-8")
    })?;

    let grid = parse_grid_from_str(content)?;
    debug!(
        path = %path.display(),
        width = grid.width(),
        height = grid.height(),
        alive = grid.alive_cells(),
        "loaded text grid"
    );
    Ok(grid)
}

/// Parse a grid from its text representation
///
/// Every line, the header included, must end with `\n`; a `\r` before it is
/// dropped. Empty lines after the last row are ignored.
pub fn parse_grid_from_str(content: &str) -> Result<Grid> {
    let mut lines = content
        .split_inclusive('\n')
        .enumerate()
        .map(|(i, line)| (i + 1, line));

    let (_, header) = lines
        .next()
        .ok_or_else(|| LifeError::parse_at_line(1, "missing \"<width> <height>\" header"))?;
    let (width, height) = parse_header(strip_newline(1, header)?)?;

    let total = width as usize * height as usize;
    let mut cells = Vec::with_capacity(total.min(content.len()));

    for row in 0..height {
        let (line_no, line) = lines.next().ok_or_else(|| {
            LifeError::parse_at_line(
                row as usize + 2,
                format!("expected {} rows, found {}", height, row),
            )
        })?;
        let line = strip_newline(line_no, line)?;

        let len = line.chars().count();
        if len != width as usize {
            return Err(LifeError::parse_at_line(
                line_no,
                format!("row has length {}, expected {}", len, width),
            ));
        }

        for (col, ch) in line.chars().enumerate() {
            let cell = Cell::from_char(ch).ok_or_else(|| {
                LifeError::parse_at_line(
                    line_no,
                    format!("invalid character {:?} at column {}; only '#' and ' ' are allowed", ch, col),
                )
            })?;
            cells.push(cell);
        }
    }

    if let Some((line_no, _)) = lines.find(|(_, line)| !line.trim_end_matches(|c| c == '\r' || c == '\n').is_empty()) {
        return Err(LifeError::parse_at_line(
            line_no,
            format!("unexpected content after the last of {} rows", height),
        ));
    }

    Ok(Grid::from_cells(width, height, cells))
}

fn strip_newline(line_no: usize, line: &str) -> Result<&str> {
    let Some(body) = line.strip_suffix('\n') else {
        return Err(LifeError::parse_at_line(line_no, "line is not terminated by a newline"));
    };
    Ok(body.strip_suffix('\r').unwrap_or(body))
}

fn parse_header(header: &str) -> Result<(u32, u32)> {
    let mut fields = header.split_whitespace();
    let (Some(width), Some(height), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(LifeError::parse_at_line(
            1,
            format!("expected \"<width> <height>\", found {:?}", header),
        ));
    };

    let positive = |field: &str, name: &str| -> Result<u32> {
        // Digits only: `u32::from_str` would also take a leading '+'.
        let digits = !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit());
        match field.parse::<u32>() {
            Ok(value) if digits && value > 0 => Ok(value),
            _ => Err(LifeError::parse_at_line(
                1,
                format!("{} must be a positive integer, found {:?}", name, field),
            )),
        }
    };

    Ok((positive(width, "width")?, positive(height, "height")?))
}

/// Save a grid to a text file
pub fn save_text<P: AsRef<Path>>(path: P, grid: &Grid) -> Result<()> {
    let path = path.as_ref();
    create_parent_dirs(path)?;
    std::fs::write(path, grid_to_string(grid)).map_err(|e| LifeError::io(path, e))?;

    debug!(path = %path.display(), width = grid.width(), height = grid.height(), "saved text grid");
    Ok(())
}

/// Convert a grid to its text representation
pub fn grid_to_string(grid: &Grid) -> String {
    let header = format!("{} {}\n", grid.width(), grid.height());
    let mut result = String::with_capacity(header.len() + (grid.width() as usize + 1) * grid.height() as usize);
    result.push_str(&header);

    for row in grid.rows() {
        result.extend(row.iter().map(|cell| cell.to_char()));
        result.push('\n');
    }

    result
}

pub(crate) fn create_parent_dirs(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| LifeError::io(parent, e))
        }
        _ => Ok(()),
    }
}
