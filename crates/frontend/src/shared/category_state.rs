//! Реактивное состояние одной таблицы-категории (OPs, WIPs, hilos, avíos, telas).
//!
//! Вся арифметика живёт в `contracts::shared::costing`; здесь только сигналы
//! и применение ответов загрузки.

use std::collections::BTreeMap;

use contracts::shared::costing::line::{filtered_keys, keys_of};
use contracts::shared::costing::{CostLine, MaterialCosting, SelectionSet, StyleScope, ValueLedger};
use leptos::prelude::*;

use crate::shared::api_utils::ApiError;
use crate::shared::load_state::LoadState;
use crate::shared::request_guard::{RequestGuard, RequestTicket};

/// Factor map owned by a parent component.
///
/// When a widget receives one, the parent's map is canonical: the widget's
/// ledger only mirrors it and reports commits through `on_commit`.
#[derive(Clone, Copy)]
pub struct SharedFactors {
    pub values: Signal<BTreeMap<String, f64>>,
    pub on_commit: Callback<(String, f64)>,
}

pub struct CategoryState<T: Send + Sync + 'static> {
    pub items: RwSignal<Vec<T>>,
    pub selection: RwSignal<SelectionSet>,
    pub factors: RwSignal<ValueLedger>,
    pub costing: RwSignal<MaterialCosting>,
    pub query: RwSignal<String>,
    pub load: RwSignal<LoadState>,
    guard: StoredValue<RequestGuard>,
    scope: StoredValue<StyleScope>,
}

impl<T: Send + Sync + 'static> Clone for CategoryState<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for CategoryState<T> {}

impl<T> CategoryState<T>
where
    T: CostLine + Clone + Send + Sync + 'static,
{
    pub fn new(factors: ValueLedger) -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            selection: RwSignal::new(SelectionSet::new()),
            factors: RwSignal::new(factors),
            costing: RwSignal::new(MaterialCosting::default()),
            query: RwSignal::new(String::new()),
            load: RwSignal::new(LoadState::Idle),
            guard: StoredValue::new(RequestGuard::new()),
            scope: StoredValue::new(StyleScope::new()),
        }
    }

    /// Marks a new load as in flight; older responses become stale
    pub fn begin_load(&self) -> RequestTicket {
        self.load.set(LoadState::Loading);
        self.guard.with_value(|g| g.issue())
    }

    /// Called before a load for `codigo_estilo`: a different style than the
    /// previous load drops factors, detailed costs and the fixed amount, so
    /// the next dataset is seeded from defaults.
    pub fn enter_style(&self, codigo_estilo: &str) {
        let changed = self
            .scope
            .try_update_value(|s| s.enter(codigo_estilo))
            .unwrap_or(false);
        if changed {
            log::debug!("Style changed to {}, adjustments dropped", codigo_estilo);
            self.factors.update(ValueLedger::clear_all);
            self.costing.update(MaterialCosting::clear_entries);
        }
    }

    /// Inputs are incomplete: drop the dataset and anything in flight
    pub fn reset(&self) {
        self.guard.with_value(|g| g.invalidate());
        self.items.set(Vec::new());
        self.selection.set(SelectionSet::new());
        self.load.set(LoadState::Idle);
    }

    /// Applies a load result if it is still the latest request.
    ///
    /// A fresh dataset re-seeds the selection (from `preselection` when given)
    /// and the ledgers; a failure empties the table.
    pub fn apply(&self, ticket: RequestTicket, result: Result<Vec<T>, ApiError>, preselection: &[String]) -> bool {
        if !self.guard.with_value(|g| g.is_current(ticket)) {
            log::debug!("Stale response dropped");
            return false;
        }
        match result {
            Ok(items) => {
                let keys = keys_of(&items);
                self.selection.update(|s| s.seed(&keys, preselection));
                self.factors.update(|f| f.seed(&keys));
                self.costing.update(|c| c.detailed.seed(&keys));
                self.load.set(LoadState::from_count(items.len()));
                self.items.set(items);
            }
            Err(e) => {
                log::error!("Load failed: {}", e);
                self.items.set(Vec::new());
                self.selection.set(SelectionSet::new());
                self.load.set(LoadState::Failed(e.to_string()));
            }
        }
        true
    }

    /// Keys of the rows passing the search box
    pub fn visible_keys(&self) -> Vec<String> {
        self.items
            .with(|items| self.query.with(|q| filtered_keys(items, q)))
    }

    pub fn visible_items(&self) -> Vec<T> {
        self.items.with(|items| {
            self.query.with(|q| {
                items
                    .iter()
                    .filter(|item| item.matches_query(q))
                    .cloned()
                    .collect()
            })
        })
    }

    pub fn toggle(&self, key: &str) {
        self.selection.update(|s| s.toggle_one(key));
    }

    /// "Seleccionar todo" над видимыми строками
    pub fn toggle_visible(&self) {
        let keys = self.visible_keys();
        self.selection.update(|s| s.toggle_all(&keys));
    }

    pub fn all_visible_selected(&self) -> bool {
        let keys = self.visible_keys();
        !keys.is_empty() && self.selection.with(|s| s.is_all_selected(&keys))
    }

    pub fn some_visible_selected(&self) -> bool {
        let keys = self.visible_keys();
        self.selection
            .with(|s| keys.iter().any(|k| s.contains(k)))
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selection.with(|s| s.contains(key))
    }

    pub fn selected_count(&self) -> usize {
        self.selection.with(SelectionSet::len)
    }

    /// Hands factor ownership to `owner`: the local ledger follows the owner's
    /// map, including after every dataset reload.
    pub fn mirror_factors(&self, owner: SharedFactors) {
        let state = *self;
        Effect::new(move |_| {
            state.items.track();
            let values = owner.values.get();
            state.factors.update(|f| f.mirror(&values));
        });
    }
}
