//! [`TableRow`] implementation for [`InventoryRow`].
//!
//! This is what lets the generic [`TableActor`](crate::framework::TableActor)
//! stand in for the hosted `inventory` table.

use crate::framework::TableRow;
use crate::inventory_table::error::RowError;
use crate::model::{InventoryInsert, InventoryRow, RecordId, RecordPatch};
use chrono::{DateTime, Utc};

impl TableRow for InventoryRow {
    type Id = RecordId;
    type Insert = InventoryInsert;
    type Patch = RecordPatch;
    type Error = RowError;

    const TABLE: &'static str = "inventory";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_insert(
        id: RecordId,
        created_at: DateTime<Utc>,
        insert: InventoryInsert,
    ) -> Result<Self, RowError> {
        Ok(Self {
            id,
            created_at: Some(created_at),
            category: insert.category,
            codigo: insert.codigo,
            material: insert.material,
            qtd: insert.qtd,
            status: Some(insert.status),
            responsavel: Some(insert.responsavel),
            data_saida: Some(insert.data_saida),
            sm: Some(insert.sm),
            lote: insert.lote,
            sala: insert.sala,
            prateleira: insert.prateleira,
            fileira: insert.fileira,
            maquina_fornecida: insert.maquina_fornecida,
        })
    }

    /// Applies every field set in the patch.
    ///
    /// # Errors
    /// - `ClearedMaterial`: the patch sets the material to blank text.
    fn apply_patch(&mut self, patch: RecordPatch) -> Result<(), RowError> {
        if let Some(material) = &patch.material {
            if material.trim().is_empty() {
                return Err(RowError::ClearedMaterial(self.id.to_string()));
            }
        }

        let RecordPatch {
            code,
            material,
            quantity,
            status,
            responsible,
            exit_date,
            service_order,
            lot,
            room,
            shelf,
            row,
            supplied_machine,
        } = patch;

        if let Some(material) = material {
            self.material = material;
        }
        if let Some(quantity) = quantity {
            self.qtd = quantity;
        }
        self.codigo = code.or(self.codigo.take());
        self.status = status.or(self.status.take());
        self.responsavel = responsible.or(self.responsavel.take());
        self.data_saida = exit_date.or(self.data_saida.take());
        self.sm = service_order.or(self.sm.take());
        self.lote = lot.or(self.lote.take());
        self.sala = room.or(self.sala.take());
        self.prateleira = shelf.or(self.prateleira.take());
        self.fileira = row.or(self.fileira.take());
        self.maquina_fornecida = supplied_machine.or(self.maquina_fornecida.take());
        Ok(())
    }

    fn on_insert(&self) -> Result<(), RowError> {
        if self.material.trim().is_empty() {
            return Err(RowError::EmptyMaterial);
        }
        Ok(())
    }
}
