//! Spreadsheet column table.
//!
//! One entry per canonical column, in sheet order: the field it fills, the
//! headers accepted for it on import, and the value used when the cell is
//! missing or blank.

use crate::model::{coerce_quantity, Category, RecordDraft};
use crate::query::Field;

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub field: Field,
    /// Header written on export.
    pub header: &'static str,
    /// Headers accepted on import, already folded (see [`fold_header`]).
    pub aliases: &'static [&'static str],
    /// `None` leaves the field unset.
    pub default: Option<&'static str>,
    /// Location columns only exist for ink and fiber.
    pub location: bool,
}

const fn column(
    field: Field,
    header: &'static str,
    aliases: &'static [&'static str],
    default: Option<&'static str>,
    location: bool,
) -> ColumnSpec {
    ColumnSpec {
        field,
        header,
        aliases,
        default,
        location,
    }
}

pub static COLUMNS: [ColumnSpec; 12] = [
    column(Field::Code, "Codigo", &["codigo", "code"], None, false),
    column(Field::Material, "Material", &["material"], Some("Desconhecido"), false),
    column(Field::Quantity, "Qtd", &["qtd", "quantidade"], Some("0"), false),
    column(Field::Status, "Status", &["status"], Some("EM ESTOQUE"), false),
    column(Field::Responsible, "Responsavel", &["responsavel"], Some("-"), false),
    column(Field::ExitDate, "DataSaida", &["datasaida"], Some("-"), false),
    column(Field::ServiceOrder, "SM", &["sm"], Some("-"), false),
    column(Field::Lot, "Lote", &["lote"], Some("-"), true),
    column(Field::Room, "Sala", &["sala", "rua"], Some("-"), true),
    column(Field::Shelf, "Prateleira", &["prateleira"], Some("-"), true),
    column(Field::Row, "Fileira", &["fileira", "posicao"], Some("-"), true),
    column(
        Field::SuppliedMachine,
        "Maquina",
        &["maquina", "maquinafornecida"],
        Some("-"),
        true,
    ),
];

/// Columns used for `category`, in sheet order.
pub fn columns_for(category: Category) -> impl Iterator<Item = &'static ColumnSpec> {
    COLUMNS
        .iter()
        .filter(move |spec| !spec.location || category.has_location())
}

/// Lower-cases a header and drops whitespace, underscores and accents, so
/// `Data Saída` and `data_saida` both become `datasaida`.
pub fn fold_header(header: &str) -> String {
    header
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// Builds one draft per non-blank row. `header` is the sheet's first row;
/// unknown headers are ignored and missing columns take their default.
pub fn rows_to_drafts<R>(header: &[String], rows: R, category: Category) -> Vec<RecordDraft>
where
    R: IntoIterator<Item = Vec<String>>,
{
    let folded: Vec<String> = header.iter().map(|h| fold_header(h)).collect();
    let positions: Vec<(&ColumnSpec, Option<usize>)> = columns_for(category)
        .map(|spec| {
            let index = folded
                .iter()
                .position(|h| spec.aliases.iter().any(|alias| *alias == h.as_str()));
            (spec, index)
        })
        .collect();

    rows.into_iter()
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .map(|row| {
            let mut draft = RecordDraft::new(category, String::new());
            for (spec, index) in &positions {
                let cell = index
                    .and_then(|i| row.get(i))
                    .map(|cell| cell.trim())
                    .filter(|cell| !cell.is_empty());
                if let Some(value) = cell.or(spec.default) {
                    assign(&mut draft, spec.field, value);
                }
            }
            draft
        })
        .collect()
}

fn assign(draft: &mut RecordDraft, field: Field, value: &str) {
    let text = Some(value.to_string());
    match field {
        Field::Code => draft.code = text,
        Field::Material => draft.material = value.to_string(),
        Field::Quantity => draft.quantity = Some(coerce_quantity(value)),
        Field::Status => draft.status = text,
        Field::Responsible => draft.responsible = text,
        Field::ExitDate => draft.exit_date = text,
        Field::ServiceOrder => draft.service_order = text,
        Field::Lot => draft.lot = text,
        Field::Room => draft.room = text,
        Field::Shelf => draft.shelf = text,
        Field::Row => draft.row = text,
        Field::SuppliedMachine => draft.supplied_machine = text,
        Field::Id | Field::Category => {}
    }
}
