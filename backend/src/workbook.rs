//! In-memory view of a spreadsheet: every worksheet as a grid of optional
//! cell strings at absolute sheet coordinates.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};

use crate::errors::Result;
use crate::logger::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Worksheet {
    pub title: String,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Worksheet {
    pub fn new(title: &str) -> Self {
        Worksheet {
            title: title.to_string(),
            rows: Vec::new(),
        }
    }

    /// Builds a sheet from string rows; empty strings become empty cells.
    pub fn from_rows<R, C>(title: &str, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|value| {
                        let value = value.as_ref();
                        if value.is_empty() { None } else { Some(value.to_string()) }
                    })
                    .collect()
            })
            .collect();
        Worksheet {
            title: title.to_string(),
            rows,
        }
    }

    fn from_range(title: &str, range: &Range<Data>) -> Self {
        let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
        let width = col_offset as usize + range.width();

        let mut rows: Vec<Vec<Option<String>>> = vec![vec![None; width]; row_offset as usize];
        for row in range.rows() {
            let mut cells = vec![None; col_offset as usize];
            cells.extend(row.iter().map(|cell| match cell {
                Data::Empty => None,
                other => Some(other.to_string()),
            }));
            rows.push(cells);
        }

        Worksheet {
            title: title.to_string(),
            rows,
        }
    }

    /// Cell value at 0-based coordinates. Out-of-range cells are empty.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }

    pub fn row(&self, row: usize) -> &[Option<String>] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn max_row(&self) -> usize {
        self.rows.len()
    }

    pub fn max_column(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub worksheets: Vec<Worksheet>,
}

impl Workbook {
    /// Opens `.xlsx`, `.xlsm`, `.xls` or `.ods` files.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug(&format!("Opening workbook {}", path.display()));
        let sheets = open_workbook_auto(path)?;
        Workbook::read_sheets(sheets)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let sheets = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        Workbook::read_sheets(sheets)
    }

    fn read_sheets<RS: Read + Seek>(mut sheets: Sheets<RS>) -> Result<Self> {
        let mut worksheets = Vec::new();
        for name in sheets.sheet_names().to_vec() {
            let range = sheets.worksheet_range(&name)?;
            worksheets.push(Worksheet::from_range(&name, &range));
        }
        Ok(Workbook { worksheets })
    }

    pub fn from_worksheets(worksheets: Vec<Worksheet>) -> Self {
        Workbook { worksheets }
    }
}
