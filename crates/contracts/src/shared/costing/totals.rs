use serde::{Deserialize, Serialize};

use super::ledger::ValueLedger;
use super::line::CostLine;
use super::mode::{CostingMode, MaterialCosting};
use super::selection::SelectionSet;
use crate::domain::a002_wip::dto::WipDesgloseDto;

fn selected<'a, T: CostLine>(
    items: &'a [T],
    selection: &'a SelectionSet,
) -> impl Iterator<Item = &'a T> + 'a {
    items.iter().filter(move |item| selection.contains(&item.key()))
}

/// Σ over selected items of `base_unit_cost × factor × quantity_per_garment`
pub fn automatic_total<T: CostLine>(items: &[T], selection: &SelectionSet, factors: &ValueLedger) -> f64 {
    selected(items, selection)
        .map(|item| {
            item.base_unit_cost() * factors.factor(&item.key()) * item.quantity_per_garment()
        })
        .sum()
}

/// Σ over selected items of the entered cost, or the backend per-garment cost
pub fn detailed_total<T: CostLine>(items: &[T], selection: &SelectionSet, costing: &MaterialCosting) -> f64 {
    selected(items, selection)
        .map(|item| costing.detailed_cost(&item.key(), item.base_cost_per_garment()))
        .sum()
}

/// Category total for avíos and telas according to the active mode
pub fn category_total<T: CostLine>(
    items: &[T],
    selection: &SelectionSet,
    costing: &MaterialCosting,
    factors: &ValueLedger,
) -> f64 {
    match costing.mode {
        CostingMode::Detailed => detailed_total(items, selection, costing),
        CostingMode::FixedAmount => costing.fixed_amount(),
        CostingMode::Automatic => automatic_total(items, selection, factors),
    }
}

/// Per-garment cost of one row under the active mode.
///
/// In fixed-amount mode rows are informative only, they show the backend cost.
pub fn line_cost<T: CostLine>(item: &T, costing: &MaterialCosting, factors: &ValueLedger) -> f64 {
    match costing.mode {
        CostingMode::Detailed => costing.detailed_cost(&item.key(), item.base_cost_per_garment()),
        CostingMode::FixedAmount => item.base_cost_per_garment(),
        CostingMode::Automatic => {
            item.base_unit_cost() * factors.factor(&item.key()) * item.quantity_per_garment()
        }
    }
}

/// Hilos total per garment.
///
/// Hilo consumption is recorded per reference order, so the automatic sum is
/// averaged over the selected OPs. No OPs selected gives 0.
pub fn hilos_total<T: CostLine>(
    items: &[T],
    selection: &SelectionSet,
    factors: &ValueLedger,
    selected_op_count: usize,
) -> f64 {
    if selected_op_count == 0 {
        return 0.0;
    }
    automatic_total(items, selection, factors) / selected_op_count as f64
}

/// WIP totals per group
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WipTotals {
    pub textil: f64,
    pub manufactura: f64,
}

impl WipTotals {
    pub fn total(&self) -> f64 {
        self.textil + self.manufactura
    }
}

/// Rows that can be displayed and selected
pub fn eligible_wip_rows(rows: &[WipDesgloseDto]) -> Vec<WipDesgloseDto> {
    rows.iter().filter(|row| row.has_cost()).cloned().collect()
}

/// Keys of the eligible rows, in dataset order
pub fn eligible_wip_keys(rows: &[WipDesgloseDto]) -> Vec<String> {
    rows.iter()
        .filter(|row| row.has_cost())
        .map(|row| row.wip_id.clone())
        .collect()
}

/// Σ `group_subcost × factor` over selected, eligible rows
pub fn wip_totals(rows: &[WipDesgloseDto], selection: &SelectionSet, factors: &ValueLedger) -> WipTotals {
    rows.iter()
        .filter(|row| row.has_cost() && selection.contains(&row.wip_id))
        .fold(WipTotals::default(), |acc, row| {
            let factor = factors.factor(&row.wip_id);
            WipTotals {
                textil: acc.textil + row.costo_textil_por_prenda * factor,
                manufactura: acc.manufactura + row.costo_manufactura_por_prenda * factor,
            }
        })
}
