//! Aggregates shown on the dashboard.
//!
//! Everything is derived from the collection in one pass per figure; nothing
//! is cached. Statuses are compared through [`StatusKind::classify`].

use crate::model::{Category, InventoryRecord, StatusKind};
use serde::Serialize;

const NO_ROOM: &str = "SEM SALA";
const NO_MATERIAL: &str = "Sem Material";
const TOP_MATERIALS: usize = 5;
const TOP_MACHINES: usize = 3;
const EMPTY_MACHINE_SCALE: usize = 10;

/// Number of in-stock lines per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineCounts {
    pub ink: usize,
    pub fiber: usize,
    pub packaging: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomTotal {
    pub room: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub in_stock_lines: LineCounts,
    /// Sum of quantity over paid fiber records.
    pub fiber_output_total: u64,
    /// Fiber quantity per room, in order of first appearance.
    pub fiber_by_room: Vec<RoomTotal>,
    /// Most frequent materials among paid fiber records.
    pub paid_fiber_materials: Vec<Tally>,
    pub paid_fiber_count: usize,
    /// Machines most often supplied with paid fiber.
    pub top_machines: Vec<Tally>,
    /// Full width of the machine bars: the top count, or 10 with no machines.
    pub machine_scale: usize,
}

impl DashboardStats {
    pub fn compute(items: &[InventoryRecord]) -> Self {
        let fiber: Vec<&InventoryRecord> = items
            .iter()
            .filter(|item| item.category == Category::Fiber)
            .collect();
        let paid_fiber: Vec<&InventoryRecord> = fiber
            .iter()
            .copied()
            .filter(|item| is(item, StatusKind::Paid))
            .collect();

        let in_stock_lines = LineCounts {
            ink: count_in_stock(items, Category::Ink),
            fiber: count_in_stock(items, Category::Fiber),
            packaging: count_in_stock(items, Category::Packaging),
        };

        // Totals saturate at u64::MAX.
        let fiber_output_total = paid_fiber
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(item.quantity));

        let mut fiber_by_room: Vec<RoomTotal> = Vec::new();
        for item in &fiber {
            let room = match item.room.as_deref() {
                Some(room) if !room.is_empty() => room.to_uppercase(),
                _ => NO_ROOM.to_string(),
            };
            match fiber_by_room.iter_mut().find(|total| total.room == room) {
                Some(total) => total.quantity = total.quantity.saturating_add(item.quantity),
                None => fiber_by_room.push(RoomTotal {
                    room,
                    quantity: item.quantity,
                }),
            }
        }

        let paid_fiber_materials = top(
            paid_fiber.iter().map(|item| {
                if item.material.is_empty() {
                    NO_MATERIAL.to_string()
                } else {
                    item.material.clone()
                }
            }),
            TOP_MATERIALS,
        );

        let top_machines = top(
            paid_fiber.iter().filter_map(|item| {
                let machine = item.supplied_machine.as_deref()?.trim();
                (!machine.is_empty() && machine != "-").then(|| machine.to_string())
            }),
            TOP_MACHINES,
        );
        let machine_scale = top_machines
            .first()
            .map_or(EMPTY_MACHINE_SCALE, |tally| tally.count);

        Self {
            in_stock_lines,
            fiber_output_total,
            fiber_by_room,
            paid_fiber_materials,
            paid_fiber_count: paid_fiber.len(),
            top_machines,
            machine_scale,
        }
    }
}

fn is(item: &InventoryRecord, kind: StatusKind) -> bool {
    StatusKind::classify(&item.status) == kind
}

fn count_in_stock(items: &[InventoryRecord], category: Category) -> usize {
    items
        .iter()
        .filter(|item| item.category == category && is(item, StatusKind::InStock))
        .count()
}

/// Counts occurrences, then keeps the `limit` most frequent. Ties keep the
/// order in which names first appeared.
fn top(names: impl Iterator<Item = String>, limit: usize) -> Vec<Tally> {
    let mut tallies: Vec<Tally> = Vec::new();
    for name in names {
        match tallies.iter_mut().find(|tally| tally.name == name) {
            Some(tally) => tally.count += 1,
            None => tallies.push(Tally { name, count: 1 }),
        }
    }
    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies.truncate(limit);
    tallies
}
