//! Per-column allow-lists.

use crate::model::InventoryRecord;
use crate::query::field::Field;
use std::collections::{BTreeMap, BTreeSet};

/// Allowed values per column.
///
/// A column with no entry is unfiltered ("select all"). An entry holding an
/// empty set hides every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnFilters {
    allowed: BTreeMap<Field, BTreeSet<String>>,
}

impl ColumnFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// The allow-list for `field`, `None` when every value is allowed.
    pub fn allowed(&self, field: Field) -> Option<&BTreeSet<String>> {
        self.allowed.get(&field)
    }

    pub fn is_all_selected(&self, field: Field) -> bool {
        !self.allowed.contains_key(&field)
    }

    pub fn is_selected(&self, field: Field, value: &str) -> bool {
        self.allowed
            .get(&field)
            .map_or(true, |values| values.contains(value))
    }

    /// Drops the column's entry. The entry is never replaced by a snapshot of
    /// the current values, so values that appear later are shown too.
    pub fn select_all(&mut self, field: Field) {
        self.allowed.remove(&field);
    }

    pub fn set_allowed(&mut self, field: Field, values: impl IntoIterator<Item = String>) {
        self.allowed.insert(field, values.into_iter().collect());
    }

    /// Flips one value of a column. `universe` is the column's full value set,
    /// from [`unique_values`] over the unfiltered collection.
    ///
    /// A column without an entry starts from "everything selected"; when the
    /// selection grows back to the whole universe the entry is dropped.
    pub fn toggle(&mut self, field: Field, value: &str, universe: &BTreeSet<String>) {
        let mut selected = self
            .allowed
            .remove(&field)
            .unwrap_or_else(|| universe.clone());
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        if selected != *universe {
            self.allowed.insert(field, selected);
        }
    }

    /// True when `record` passes every column's allow-list.
    pub fn matches(&self, record: &InventoryRecord) -> bool {
        self.allowed
            .iter()
            .all(|(field, values)| values.contains(&*field.display_value(record)))
    }
}

/// Distinct display values of `field`, sorted.
pub fn unique_values(items: &[InventoryRecord], field: Field) -> BTreeSet<String> {
    items
        .iter()
        .map(|item| field.display_value(item).into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, RecordDraft, RecordId};

    fn items() -> Vec<InventoryRecord> {
        [
            RecordDraft::new(Category::Ink, "Tinta Azul").with_room("S1"),
            RecordDraft::new(Category::Ink, "Tinta Vermelha").with_room("S2"),
            RecordDraft::new(Category::Ink, "Solvente"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, draft)| InventoryRecord::from_insert(RecordId::from(i as u32 + 1), &draft.into_insert()))
        .collect()
    }

    #[test]
    fn test_unique_values_include_placeholder() {
        let values = unique_values(&items(), Field::Room);
        let values: Vec<&str> = values.iter().map(String::as_str).collect();
        assert_eq!(values, vec!["-", "S1", "S2"]);
    }

    #[test]
    fn test_select_all_clears_entry() {
        let items = items();
        let mut filters = ColumnFilters::new();
        filters.set_allowed(Field::Room, ["S1".to_string()]);
        assert!(!filters.is_all_selected(Field::Room));

        filters.select_all(Field::Room);
        assert!(filters.is_all_selected(Field::Room));
        assert_eq!(filters.allowed(Field::Room), None);
        assert!(items.iter().all(|item| filters.matches(item)));
    }

    #[test]
    fn test_toggle_starts_from_everything_and_collapses_back() {
        let items = items();
        let universe = unique_values(&items, Field::Room);
        let mut filters = ColumnFilters::new();

        filters.toggle(Field::Room, "S2", &universe);
        assert!(!filters.is_selected(Field::Room, "S2"));
        assert!(filters.is_selected(Field::Room, "-"));
        assert_eq!(items.iter().filter(|item| filters.matches(item)).count(), 2);

        filters.toggle(Field::Room, "S2", &universe);
        assert!(filters.is_all_selected(Field::Room));
        assert!(filters.is_empty());
    }

    #[test]
    fn test_empty_allow_list_hides_everything() {
        let items = items();
        let mut filters = ColumnFilters::new();
        filters.set_allowed(Field::Room, Vec::new());
        assert!(items.iter().all(|item| !filters.matches(item)));
    }
}
