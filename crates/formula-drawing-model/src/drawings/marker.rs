use core::fmt;

use serde::{Deserialize, Serialize};

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;
/// English Metric Units per pixel at 96 DPI.
pub const EMU_PER_PIXEL: i64 = 9_525;

/// A position within the worksheet grid (`xdr:from` / `xdr:to`).
///
/// Rows and columns are **0-indexed**. Offsets are in EMUs measured from the top-left corner of
/// the cell.
///
/// Offsets are optional so a parsed marker can record whether the source XML carried them. They
/// read as `0` when absent, and the drawing writer always emits them: some consumers (Mac Excel)
/// reject markers without `<xdr:colOff>` / `<xdr:rowOff>`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellMarker {
    pub col: u32,
    pub row: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_off: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_off: Option<i64>,
}

impl CellMarker {
    /// Marker with explicit zero offsets.
    pub const fn new(col: u32, row: u32) -> Self {
        Self {
            col,
            row,
            col_off: Some(0),
            row_off: Some(0),
        }
    }

    pub const fn with_offsets(col: u32, row: u32, col_off: i64, row_off: i64) -> Self {
        Self {
            col,
            row,
            col_off: Some(col_off),
            row_off: Some(row_off),
        }
    }

    pub fn col(&self) -> u32 {
        self.col
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn set_col(&mut self, col: u32) {
        self.col = col;
    }

    pub fn set_row(&mut self, row: u32) {
        self.row = row;
    }

    /// Column offset in EMUs (`0` when absent).
    pub fn col_offset(&self) -> i64 {
        self.col_off.unwrap_or(0)
    }

    /// Row offset in EMUs (`0` when absent).
    pub fn row_offset(&self) -> i64 {
        self.row_off.unwrap_or(0)
    }

    pub fn set_col_offset(&mut self, emu: i64) {
        self.col_off = Some(emu);
    }

    pub fn set_row_offset(&mut self, emu: i64) {
        self.row_off = Some(emu);
    }

    /// Move the marker to an A1-style cell without touching offsets.
    pub fn move_to(&mut self, col: u32, row: u32) {
        self.col = col;
        self.row = row;
    }

    /// Excel A1 notation for the marker's cell (e.g. `F1`).
    pub fn to_a1(&self) -> String {
        format!("{}{}", col_to_name(self.col), u64::from(self.row) + 1)
    }
}

impl fmt::Display for CellMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())?;
        let (dx, dy) = (self.col_offset(), self.row_offset());
        if dx != 0 || dy != 0 {
            write!(f, "+({dx},{dy})")?;
        }
        Ok(())
    }
}

fn col_to_name(col: u32) -> String {
    let mut n = u64::from(col) + 1;
    let mut out = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        out.push(b'A' + rem);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// An extent in EMUs (`xdr:ext`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmuSize {
    pub cx: i64,
    pub cy: i64,
}

impl EmuSize {
    pub const fn new(cx: i64, cy: i64) -> Self {
        Self { cx, cy }
    }

    pub const fn from_pixels(width: i64, height: i64) -> Self {
        Self {
            cx: width.saturating_mul(EMU_PER_PIXEL),
            cy: height.saturating_mul(EMU_PER_PIXEL),
        }
    }
}
