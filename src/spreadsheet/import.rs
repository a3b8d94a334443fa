use crate::model::{Category, RecordDraft};
use crate::spreadsheet::columns::rows_to_drafts;
use crate::spreadsheet::SpreadsheetError;
use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;

/// Reads the first sheet of an xlsx workbook into drafts of `category`.
///
/// The first row is the header. Blank rows are skipped.
pub fn read_drafts(bytes: &[u8], category: Category) -> Result<Vec<RecordDraft>, SpreadsheetError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(SpreadsheetError::NoSheet)?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };

    Ok(rows_to_drafts(&header, rows, category))
}

/// Text of one cell. Integral numbers lose their decimal part; dates render
/// as `YYYY-MM-DD`.
pub(crate) fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.0}"),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => datetime.format("%Y-%m-%d").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) => s.split('T').next().unwrap_or_default().to_string(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Float(12.0)), "12");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::String("  S1 ".into())), "S1");
        assert_eq!(cell_text(&Data::DateTimeIso("2024-01-10T00:00:00".into())), "2024-01-10");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn test_garbage_bytes_are_an_error() {
        let result = read_drafts(b"not a workbook", Category::Ink);
        assert!(matches!(result, Err(SpreadsheetError::Read(_))));
    }
}
