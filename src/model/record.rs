//! In-memory records and the partial payloads that create or change them.
//!
//! Records are produced from [`InventoryRow`](crate::model::InventoryRow)s
//! read back from the table, or built locally from an
//! [`InventoryInsert`](crate::model::InventoryInsert) when a write could not
//! reach the table.
use crate::model::category::{Category, STATUS_IN_STOCK};
use crate::model::row::InventoryInsert;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// Type-safe identifier for records.
///
/// Ids assigned by the table are numeric; ids minted during a local fallback
/// are `local-…` tokens. Both are carried as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for RecordId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => RecordId(n.to_string()),
            Raw::Text(s) => RecordId(s),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: RecordId,
    pub category: Category,
    pub code: Option<String>,
    pub material: String,
    pub quantity: u64,
    pub status: String,
    pub responsible: String,
    pub exit_date: String,
    pub service_order: String,
    pub lot: Option<String>,
    pub room: Option<String>,
    pub shelf: Option<String>,
    pub row: Option<String>,
    pub supplied_machine: Option<String>,
}

impl InventoryRecord {
    /// Builds a local-only record from a normalized insert payload.
    pub fn from_insert(id: RecordId, insert: &InventoryInsert) -> Self {
        Self {
            id,
            category: insert.category,
            code: insert.codigo.clone(),
            material: insert.material.clone(),
            quantity: insert.qtd,
            status: insert.status.clone(),
            responsible: insert.responsavel.clone(),
            exit_date: insert.data_saida.clone(),
            service_order: insert.sm.clone(),
            lot: insert.lote.clone(),
            room: insert.sala.clone(),
            shelf: insert.prateleira.clone(),
            row: insert.fileira.clone(),
            supplied_machine: insert.maquina_fornecida.clone(),
        }
    }

    /// Copies every field set in `patch` onto the record.
    pub fn merge(&mut self, patch: &RecordPatch) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }
        fn set_opt(target: &mut Option<String>, value: &Option<String>) {
            if let Some(value) = value {
                *target = Some(value.clone());
            }
        }

        set_opt(&mut self.code, &patch.code);
        set(&mut self.material, &patch.material);
        set(&mut self.quantity, &patch.quantity);
        set(&mut self.status, &patch.status);
        set(&mut self.responsible, &patch.responsible);
        set(&mut self.exit_date, &patch.exit_date);
        set(&mut self.service_order, &patch.service_order);
        set_opt(&mut self.lot, &patch.lot);
        set_opt(&mut self.room, &patch.room);
        set_opt(&mut self.shelf, &patch.shelf);
        set_opt(&mut self.row, &patch.row);
        set_opt(&mut self.supplied_machine, &patch.supplied_machine);
    }
}

/// Turns free-form quantity input into a stock count. Anything that is not a
/// finite, non-negative number becomes 0; fractions are truncated.
pub fn coerce_quantity(input: &str) -> u64 {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value.trunc() as u64,
        _ => 0,
    }
}

/// A partially filled record, as submitted by Add and Import.
///
/// Only `category` and `material` are required; everything else falls back
/// to a default when the draft is normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub category: Category,
    pub material: String,
    pub code: Option<String>,
    pub quantity: Option<u64>,
    pub status: Option<String>,
    pub responsible: Option<String>,
    pub exit_date: Option<String>,
    pub service_order: Option<String>,
    pub lot: Option<String>,
    pub room: Option<String>,
    pub shelf: Option<String>,
    pub row: Option<String>,
    pub supplied_machine: Option<String>,
}

impl RecordDraft {
    pub fn new(category: Category, material: impl Into<String>) -> Self {
        Self {
            category,
            material: material.into(),
            code: None,
            quantity: None,
            status: None,
            responsible: None,
            exit_date: None,
            service_order: None,
            lot: None,
            room: None,
            shelf: None,
            row: None,
            supplied_machine: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_quantity(mut self, quantity: u64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Sets the quantity from raw form or spreadsheet text.
    pub fn with_quantity_text(mut self, quantity: &str) -> Self {
        self.quantity = Some(coerce_quantity(quantity));
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_responsible(mut self, responsible: impl Into<String>) -> Self {
        self.responsible = Some(responsible.into());
        self
    }

    pub fn with_exit_date(mut self, exit_date: impl Into<String>) -> Self {
        self.exit_date = Some(exit_date.into());
        self
    }

    pub fn with_service_order(mut self, service_order: impl Into<String>) -> Self {
        self.service_order = Some(service_order.into());
        self
    }

    pub fn with_lot(mut self, lot: impl Into<String>) -> Self {
        self.lot = Some(lot.into());
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    pub fn with_shelf(mut self, shelf: impl Into<String>) -> Self {
        self.shelf = Some(shelf.into());
        self
    }

    pub fn with_row(mut self, row: impl Into<String>) -> Self {
        self.row = Some(row.into());
        self
    }

    pub fn with_supplied_machine(mut self, machine: impl Into<String>) -> Self {
        self.supplied_machine = Some(machine.into());
        self
    }

    /// True when the draft names a material.
    pub fn has_material(&self) -> bool {
        !self.material.trim().is_empty()
    }

    /// Fills every omitted field with its default: quantity 0, status
    /// `EM ESTOQUE`, empty text for the other labels. Location attributes are
    /// dropped for packaging.
    pub fn into_insert(self) -> InventoryInsert {
        let location = self.category.has_location();
        let keep = |value: Option<String>| if location { value } else { None };

        InventoryInsert {
            category: self.category,
            codigo: self.code,
            material: self.material,
            qtd: self.quantity.unwrap_or(0),
            status: self.status.unwrap_or_else(|| STATUS_IN_STOCK.to_string()),
            responsavel: self.responsible.unwrap_or_default(),
            data_saida: self.exit_date.unwrap_or_default(),
            sm: self.service_order.unwrap_or_default(),
            lote: keep(self.lot),
            sala: keep(self.room),
            prateleira: keep(self.shelf),
            fileira: keep(self.row),
            maquina_fornecida: keep(self.supplied_machine),
        }
    }
}

/// Partial update. Unset fields are left untouched, both on the table and in
/// a local merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordPatch {
    #[serde(rename = "codigo", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(rename = "qtd", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "responsavel", skip_serializing_if = "Option::is_none")]
    pub responsible: Option<String>,
    #[serde(rename = "data_saida", skip_serializing_if = "Option::is_none")]
    pub exit_date: Option<String>,
    #[serde(rename = "sm", skip_serializing_if = "Option::is_none")]
    pub service_order: Option<String>,
    #[serde(rename = "lote", skip_serializing_if = "Option::is_none")]
    pub lot: Option<String>,
    #[serde(rename = "sala", skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(rename = "prateleira", skip_serializing_if = "Option::is_none")]
    pub shelf: Option<String>,
    #[serde(rename = "fileira", skip_serializing_if = "Option::is_none")]
    pub row: Option<String>,
    #[serde(rename = "maquina_fornecida", skip_serializing_if = "Option::is_none")]
    pub supplied_machine: Option<String>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        *self == RecordPatch::default()
    }
}
