//! Columns a view can search, filter and sort on.

use crate::model::InventoryRecord;
use std::borrow::Cow;
use std::fmt::Display;
use std::str::FromStr;

/// Shown (and filtered on) in place of an empty or missing value.
pub const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Id,
    Category,
    Code,
    Material,
    Quantity,
    Status,
    Responsible,
    ExitDate,
    ServiceOrder,
    Lot,
    Room,
    Shelf,
    Row,
    SuppliedMachine,
}

impl Field {
    pub const ALL: [Field; 14] = [
        Field::Id,
        Field::Category,
        Field::Code,
        Field::Material,
        Field::Quantity,
        Field::Status,
        Field::Responsible,
        Field::ExitDate,
        Field::ServiceOrder,
        Field::Lot,
        Field::Room,
        Field::Shelf,
        Field::Row,
        Field::SuppliedMachine,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Category => "category",
            Field::Code => "code",
            Field::Material => "material",
            Field::Quantity => "quantity",
            Field::Status => "status",
            Field::Responsible => "responsible",
            Field::ExitDate => "exitDate",
            Field::ServiceOrder => "serviceOrder",
            Field::Lot => "lot",
            Field::Room => "room",
            Field::Shelf => "shelf",
            Field::Row => "row",
            Field::SuppliedMachine => "suppliedMachine",
        }
    }

    /// The field's value as text, `None` when the record has none.
    pub fn value<'a>(&self, record: &'a InventoryRecord) -> Option<Cow<'a, str>> {
        let text: &'a str = match self {
            Field::Id => record.id.as_str(),
            Field::Category => record.category.as_str(),
            Field::Quantity => return Some(Cow::Owned(record.quantity.to_string())),
            Field::Material => &record.material,
            Field::Status => &record.status,
            Field::Responsible => &record.responsible,
            Field::ExitDate => &record.exit_date,
            Field::ServiceOrder => &record.service_order,
            Field::Code => record.code.as_deref()?,
            Field::Lot => record.lot.as_deref()?,
            Field::Room => record.room.as_deref()?,
            Field::Shelf => record.shelf.as_deref()?,
            Field::Row => record.row.as_deref()?,
            Field::SuppliedMachine => record.supplied_machine.as_deref()?,
        };
        Some(Cow::Borrowed(text))
    }

    /// The value as a table cell shows it: [`PLACEHOLDER`] when empty.
    pub fn display_value<'a>(&self, record: &'a InventoryRecord) -> Cow<'a, str> {
        match self.value(record) {
            Some(value) if !value.is_empty() => value,
            _ => Cow::Borrowed(PLACEHOLDER),
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    /// Accepts the English keys and the table's Portuguese column names, in
    /// any case, with or without underscores (`exitDate`, `data_saida`,
    /// `maquinaFornecida`, …).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        let field = match folded.as_str() {
            "id" => Field::Id,
            "category" | "categoria" => Field::Category,
            "code" | "codigo" => Field::Code,
            "material" => Field::Material,
            "quantity" | "qtd" | "quantidade" => Field::Quantity,
            "status" => Field::Status,
            "responsible" | "responsavel" => Field::Responsible,
            "exitdate" | "datasaida" => Field::ExitDate,
            "serviceorder" | "sm" => Field::ServiceOrder,
            "lot" | "lote" => Field::Lot,
            "room" | "sala" | "rua" => Field::Room,
            "shelf" | "prateleira" => Field::Shelf,
            "row" | "fileira" | "posicao" => Field::Row,
            "suppliedmachine" | "maquinafornecida" | "maquina" => Field::SuppliedMachine,
            _ => return Err(UnknownField(s.to_string())),
        };
        Ok(field)
    }
}
