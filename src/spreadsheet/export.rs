use crate::model::{Category, InventoryRecord};
use crate::query::Field;
use crate::spreadsheet::columns::columns_for;
use crate::spreadsheet::SpreadsheetError;
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

/// Name of the single sheet an export contains.
pub const SHEET_NAME: &str = "Estoque";

/// Writes `records` to an xlsx workbook with one sheet, [`SHEET_NAME`].
///
/// Columns follow the import table, so an exported file imports back into
/// the same category. Empty values are written as `-`, except the code,
/// which is left blank.
pub fn write_workbook(
    records: &[&InventoryRecord],
    category: Category,
) -> Result<Vec<u8>, SpreadsheetError> {
    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name(SHEET_NAME)?;

    let bold = Format::new().set_bold();
    for (col, spec) in columns_for(category).enumerate() {
        worksheet.write_string_with_format(0, col as u16, spec.header, &bold)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        for (col, spec) in columns_for(category).enumerate() {
            let col = col as u16;
            match spec.field {
                Field::Quantity => {
                    worksheet.write_number(row, col, record.quantity as f64)?;
                }
                Field::Code => {
                    if let Some(code) = record.code.as_deref().filter(|code| !code.is_empty()) {
                        worksheet.write_string(row, col, code)?;
                    }
                }
                field => {
                    worksheet.write_string(row, col, &*field.display_value(record))?;
                }
            }
        }
    }

    workbook.push_worksheet(worksheet);
    Ok(workbook.save_to_buffer()?)
}

/// `Estoque de Tintas` on 2024-01-10 becomes
/// `estoque_de_tintas_2024-01-10.xlsx`. Every whitespace run turns into one
/// underscore.
pub fn export_file_name(title: &str, date: NaiveDate) -> String {
    let mut stem = String::with_capacity(title.len());
    let mut in_space = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
        } else {
            stem.extend(c.to_lowercase());
            in_space = false;
        }
    }
    format!("{stem}_{}.xlsx", date.format("%Y-%m-%d"))
}

/// Title of a category's stock table.
pub fn sheet_title(category: Category) -> &'static str {
    match category {
        Category::Ink => "Estoque de Tintas",
        Category::Fiber => "Estoque de Fibras",
        Category::Packaging => "Estoque de Embalagens",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RecordDraft, RecordId};
    use crate::spreadsheet::read_drafts;

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(
            export_file_name(sheet_title(Category::Ink), date),
            "estoque_de_tintas_2024-01-10.xlsx"
        );
        assert_eq!(export_file_name("A  B\tC", date), "a_b_c_2024-01-10.xlsx");
    }

    #[test]
    fn test_exported_workbook_imports_back() {
        let drafts = [
            RecordDraft::new(Category::Fiber, "Fibra de Vidro E")
                .with_code("M6010482")
                .with_quantity(300)
                .with_status("PAGO")
                .with_room("S1")
                .with_supplied_machine("Ext 6"),
            RecordDraft::new(Category::Fiber, "Kevlar 49"),
        ];
        let records: Vec<InventoryRecord> = drafts
            .into_iter()
            .enumerate()
            .map(|(i, draft)| {
                InventoryRecord::from_insert(RecordId::from(i as u32 + 1), &draft.into_insert())
            })
            .collect();
        let refs: Vec<&InventoryRecord> = records.iter().collect();

        let bytes = write_workbook(&refs, Category::Fiber).unwrap();
        let back = read_drafts(&bytes, Category::Fiber).unwrap();

        assert_eq!(back.len(), 2);
        assert_eq!(back[0].code.as_deref(), Some("M6010482"));
        assert_eq!(back[0].material, "Fibra de Vidro E");
        assert_eq!(back[0].quantity, Some(300));
        assert_eq!(back[0].status.as_deref(), Some("PAGO"));
        assert_eq!(back[0].room.as_deref(), Some("S1"));
        assert_eq!(back[0].supplied_machine.as_deref(), Some("Ext 6"));
        assert_eq!(back[1].code, None);
        assert_eq!(back[1].quantity, Some(0));
        assert_eq!(back[1].lot.as_deref(), Some("-"));
    }
}
