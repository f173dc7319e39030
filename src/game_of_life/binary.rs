//! Packed-bit binary grid format
//!
//! Layout:
//! - bytes 0..4: width as a little-endian `u32`
//! - bytes 4..8: height as a little-endian `u32`
//! - `ceil(width * height / 8)` payload bytes holding the cells in row-major
//!   order, most significant bit first, `1` for alive. Unused bits of the
//!   final byte are written as zero and ignored when reading.

use super::io::create_parent_dirs;
use super::{Cell, Grid};
use crate::error::{LifeError, Result};
use std::path::Path;
use tracing::{debug, warn};

pub const HEADER_LEN: usize = 8;

/// Number of payload bytes needed for a `width` x `height` grid
pub fn payload_len(width: u32, height: u32) -> u64 {
    (width as u64 * height as u64).div_ceil(8)
}

/// Encode a grid into the binary format
pub fn encode(grid: &Grid) -> Vec<u8> {
    let payload = payload_len(grid.width(), grid.height()) as usize;
    let mut out = Vec::with_capacity(HEADER_LEN + payload);
    out.extend_from_slice(&grid.width().to_le_bytes());
    out.extend_from_slice(&grid.height().to_le_bytes());

    for chunk in grid.cells().chunks(8) {
        let byte = chunk
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .fold(0u8, |acc, (bit, _)| acc | (0x80 >> bit));
        out.push(byte);
    }

    debug_assert_eq!(out.len(), HEADER_LEN + payload);
    out
}

fn read_u32_le(bytes: &[u8], offset: usize, field: &str) -> Result<u32> {
    bytes
        .get(offset..offset + 4)
        .and_then(|slice| slice.try_into().ok())
        .map(u32::from_le_bytes)
        .ok_or_else(|| {
            LifeError::parse_at_offset(
                bytes.len(),
                format!("file ended while reading the {} field", field),
            )
        })
}

/// Decode a grid from the binary format
pub fn decode(bytes: &[u8]) -> Result<Grid> {
    let width = read_u32_le(bytes, 0, "width")?;
    let height = read_u32_le(bytes, 4, "height")?;

    let payload = &bytes[HEADER_LEN..];
    let needed = payload_len(width, height);
    if (payload.len() as u64) < needed {
        return Err(LifeError::parse_at_offset(
            bytes.len(),
            format!(
                "{}x{} grid needs {} payload bytes, found {}",
                width,
                height,
                needed,
                payload.len()
            ),
        ));
    }
    if payload.len() as u64 > needed {
        warn!(
            extra = payload.len() as u64 - needed,
            "ignoring trailing bytes after binary grid payload"
        );
    }

    let total = width as usize * height as usize;
    let cells = (0..total)
        .map(|i| Cell::from(payload[i / 8] & (0x80 >> (i % 8)) != 0))
        .collect();

    Ok(Grid::from_cells(width, height, cells))
}

/// Load a grid from a binary file
///
/// As with `load_text`, an unreadable file is `LifeError::Io` and a short or
/// malformed payload is `LifeError::Parse` with the byte offset.
pub fn load_binary<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| LifeError::io(path, e))?;
    let grid = decode(&bytes)?;

    debug!(
        path = %path.display(),
        width = grid.width(),
        height = grid.height(),
        alive = grid.alive_cells(),
        "loaded binary grid"
    );
    Ok(grid)
}

/// Save a grid to a binary file
pub fn save_binary<P: AsRef<Path>>(path: P, grid: &Grid) -> Result<()> {
    let path = path.as_ref();
    create_parent_dirs(path)?;
    let bytes = encode(grid);
    std::fs::write(path, &bytes).map_err(|e| LifeError::io(path, e))?;

    debug!(path = %path.display(), bytes = bytes.len(), "saved binary grid");
    Ok(())
}
