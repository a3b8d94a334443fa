//! Wire shapes of the `inventory` table.
//!
//! Column names are the table's snake_case ones (`codigo`, `qtd`,
//! `data_saida`, `maquina_fornecida`, …). [`InventoryRecord`] is the
//! in-memory shape; the `From` impl below is the only place rows are
//! turned into records.

use crate::model::category::Category;
use crate::model::record::{InventoryRecord, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A row as stored in the `inventory` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRow {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub category: Category,
    #[serde(default)]
    pub codigo: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub material: String,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub qtd: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub responsavel: Option<String>,
    #[serde(default)]
    pub data_saida: Option<String>,
    #[serde(default)]
    pub sm: Option<String>,
    #[serde(default)]
    pub lote: Option<String>,
    #[serde(default)]
    pub sala: Option<String>,
    #[serde(default)]
    pub prateleira: Option<String>,
    #[serde(default)]
    pub fileira: Option<String>,
    #[serde(default)]
    pub maquina_fornecida: Option<String>,
}

/// Payload of an insert. Built by [`RecordDraft::into_insert`](crate::model::RecordDraft::into_insert),
/// so every label already carries its default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryInsert {
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
    pub material: String,
    pub qtd: u64,
    pub status: String,
    pub responsavel: String,
    pub data_saida: String,
    pub sm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sala: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prateleira: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fileira: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maquina_fornecida: Option<String>,
}

/// Reads a null text column as empty text.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `qtd` as an integer, a float, numeric text or null. Anything that
/// is not a finite non-negative number reads as 0.
fn lenient_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(n)) => u64::try_from(n).unwrap_or(0),
        Some(Raw::Float(f)) if f.is_finite() && f >= 0.0 => f.trunc() as u64,
        Some(Raw::Text(s)) => crate::model::record::coerce_quantity(&s),
        _ => 0,
    })
}

impl From<InventoryRow> for InventoryRecord {
    fn from(row: InventoryRow) -> Self {
        Self {
            id: row.id,
            category: row.category,
            code: row.codigo,
            material: row.material,
            quantity: row.qtd,
            status: row.status.unwrap_or_default(),
            responsible: row.responsavel.unwrap_or_default(),
            exit_date: row.data_saida.unwrap_or_default(),
            service_order: row.sm.unwrap_or_default(),
            lot: row.lote,
            room: row.sala,
            shelf: row.prateleira,
            row: row.fileira,
            supplied_machine: row.maquina_fornecida,
        }
    }
}
