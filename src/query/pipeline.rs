use crate::model::InventoryRecord;
use crate::query::field::{Field, PLACEHOLDER};
use crate::query::filters::ColumnFilters;
use std::cmp::Ordering;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: Field,
    pub direction: SortDirection,
}

/// Search text, column filters and sort for one table view.
///
/// [`ViewQuery::apply`] recomputes the whole view from the collection every
/// time; it never touches the collection and returns references into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: String,
    pub filters: ColumnFilters,
    pub sort: Option<SortSpec>,
}

impl ViewQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_sort(mut self, field: Field, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec { field, direction });
        self
    }

    /// First click sorts ascending, a second click on the same field sorts
    /// descending, another field starts over ascending.
    pub fn toggle_sort(&mut self, field: Field) {
        let direction = match self.sort {
            Some(SortSpec {
                field: current,
                direction: SortDirection::Ascending,
            }) if current == field => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        self.sort = Some(SortSpec { field, direction });
    }

    /// Sorts by a field given by name. Unknown names or directions leave the
    /// query unchanged; returns whether it changed.
    pub fn sort_by_name(&mut self, field: &str, direction: &str) -> bool {
        match (field.parse::<Field>(), direction.parse::<SortDirection>()) {
            (Ok(field), Ok(direction)) => {
                self.sort = Some(SortSpec { field, direction });
                true
            }
            _ => {
                debug!(field, direction, "Ignoring malformed sort");
                false
            }
        }
    }

    /// Sets a column's allow-list by field name. Unknown names leave the
    /// query unchanged; returns whether it changed.
    pub fn filter_by_name<I>(&mut self, field: &str, values: I) -> bool
    where
        I: IntoIterator<Item = String>,
    {
        match field.parse::<Field>() {
            Ok(field) => {
                self.filters.set_allowed(field, values);
                true
            }
            Err(e) => {
                debug!(error = %e, "Ignoring malformed filter");
                false
            }
        }
    }

    /// Search, then column filters, then sort.
    pub fn apply<'a>(&self, items: &'a [InventoryRecord]) -> Vec<&'a InventoryRecord> {
        let needle = self.search.to_lowercase();
        let mut view: Vec<&InventoryRecord> = items
            .iter()
            .filter(|item| needle.is_empty() || matches_search(item, &needle))
            .filter(|item| self.filters.matches(item))
            .collect();

        if let Some(SortSpec { field, direction }) = self.sort {
            let mut keyed = sort_keys(&view, field);
            keyed.sort_by(|(a, _), (b, _)| match direction {
                SortDirection::Ascending => a.cmp(b),
                SortDirection::Descending => b.cmp(a),
            });
            view = keyed.into_iter().map(|(_, item)| item).collect();
        }
        view
    }
}

/// Sort key of one cell. Text keys order before numeric keys, matching the
/// placeholder dash sorting ahead of digits.
#[derive(Debug)]
enum SortKey {
    Text(String),
    Number(f64),
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Less,
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Greater,
        }
    }
}

/// Picks the comparison mode once for the whole column: numeric when every
/// value without the placeholder dash is a number, text otherwise.
fn sort_keys<'a>(
    view: &[&'a InventoryRecord],
    field: Field,
) -> Vec<(SortKey, &'a InventoryRecord)> {
    let cells: Vec<(String, Option<f64>)> = view
        .iter()
        .map(|item| {
            let text = field.display_value(item).into_owned();
            let number = if text.contains(PLACEHOLDER) {
                None
            } else {
                as_number(&text)
            };
            (text, number)
        })
        .collect();

    let numeric = cells
        .iter()
        .all(|(text, number)| text.contains(PLACEHOLDER) || number.is_some());

    cells
        .into_iter()
        .zip(view.iter().copied())
        .map(|((text, number), item)| {
            let key = match number {
                Some(n) if numeric => SortKey::Number(n),
                _ => SortKey::Text(text.to_lowercase()),
            };
            (key, item)
        })
        .collect()
}

fn matches_search(item: &InventoryRecord, needle: &str) -> bool {
    Field::ALL.iter().any(|field| {
        field
            .value(item)
            .is_some_and(|value| value.to_lowercase().contains(needle))
    })
}

fn as_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
