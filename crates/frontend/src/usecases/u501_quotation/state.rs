//! Сессия котировки: то, что родительская страница держит для всех виджетов

use std::collections::BTreeMap;

use contracts::enums::calculation_version::CalculationVersion;
use contracts::shared::costing::quotation::price_factor_ledger;
use contracts::shared::costing::{CategoryTotals, PriceFactors, QuotationBreakdown, ValueLedger, WipTotals};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::a001_op::ui::selector::OpSelection;
use crate::shared::category_state::SharedFactors;
use crate::shared::storage;

const SESSION_STORAGE_KEY: &str = "cotizador-session";
const DEFAULT_PRENDAS: u32 = 1000;

/// Что переживает перезагрузку страницы
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionPrefs {
    #[serde(default)]
    pub codigo_estilo: String,
    #[serde(default)]
    pub version: CalculationVersion,
    /// OPs elegidas para `codigo_estilo`
    #[serde(default)]
    pub cod_ordpros: Vec<String>,
}

impl SessionPrefs {
    /// Stored OP choice, only when it belongs to `codigo_estilo`
    pub fn preselection_for(&self, codigo_estilo: &str) -> Vec<String> {
        if !codigo_estilo.is_empty() && self.codigo_estilo == codigo_estilo {
            self.cod_ordpros.clone()
        } else {
            Vec::new()
        }
    }
}

/// Cantidad de prendas del pedido; acepta separador de miles ","
pub fn parse_prendas(raw: &str) -> Option<u32> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',' && *c != ' ').collect();
    match cleaned.parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}

#[derive(Clone, Copy)]
pub struct QuotationSession {
    /// Текст поля ввода кода
    pub codigo_input: RwSignal<String>,
    /// Código de estilo aplicado (по кнопке)
    pub codigo_estilo: RwSignal<String>,
    pub version: RwSignal<CalculationVersion>,
    pub op_selection: RwSignal<OpSelection>,
    pub wip_totals: RwSignal<WipTotals>,
    /// Каноническая карта факторов WIP (виджет WIP только зеркалит её)
    pub wip_factors: RwSignal<BTreeMap<String, f64>>,
    pub hilos_total: RwSignal<f64>,
    pub avios_total: RwSignal<f64>,
    pub telas_total: RwSignal<f64>,
    pub price_factors: RwSignal<ValueLedger>,
    pub prendas_text: RwSignal<String>,
    pub prefs: RwSignal<SessionPrefs>,
}

impl QuotationSession {
    pub fn new() -> Self {
        let prefs: SessionPrefs = storage::load_json(SESSION_STORAGE_KEY).unwrap_or_default();
        Self {
            codigo_input: RwSignal::new(prefs.codigo_estilo.clone()),
            codigo_estilo: RwSignal::new(prefs.codigo_estilo.clone()),
            version: RwSignal::new(prefs.version),
            op_selection: RwSignal::new(OpSelection::default()),
            wip_totals: RwSignal::new(WipTotals::default()),
            wip_factors: RwSignal::new(BTreeMap::new()),
            hilos_total: RwSignal::new(0.0),
            avios_total: RwSignal::new(0.0),
            telas_total: RwSignal::new(0.0),
            price_factors: RwSignal::new(price_factor_ledger()),
            prendas_text: RwSignal::new(DEFAULT_PRENDAS.to_string()),
            prefs: RwSignal::new(prefs),
        }
    }

    /// Persists the style, version and OP choice to localStorage
    pub fn persist(&self) {
        let this = *self;
        Effect::new(move |prev: Option<()>| {
            let codes = this.op_selection.with(|s| s.codes.clone());
            let version = this.version.get();
            // первый запуск пропускаем: сохранённый выбор OP нужен как preselection
            if prev.is_none() {
                return;
            }
            // код стиля фиксируется только вместе с загруженными OP
            let codigo = this.codigo_estilo.get_untracked();
            this.prefs.update(|p| {
                p.codigo_estilo = codigo;
                p.version = version;
                p.cod_ordpros = codes;
            });
        });
        Effect::new(move |_| {
            this.prefs.with(|p| storage::save_json(SESSION_STORAGE_KEY, p));
        });
    }

    /// Applies the typed style code; a new style drops the WIP adjustments
    pub fn apply_codigo(&self) {
        let codigo = self.codigo_input.get_untracked().trim().to_uppercase();
        if codigo != self.codigo_estilo.get_untracked() {
            self.wip_factors.set(BTreeMap::new());
        }
        self.codigo_input.set(codigo.clone());
        self.codigo_estilo.set(codigo);
    }

    pub fn shared_wip_factors(&self) -> SharedFactors {
        let wip_factors = self.wip_factors;
        SharedFactors {
            values: wip_factors.into(),
            on_commit: Callback::new(move |(key, value): (String, f64)| {
                wip_factors.update(|m| {
                    m.insert(key, value);
                });
            }),
        }
    }

    pub fn prendas(&self) -> u32 {
        self.prendas_text.with(|t| parse_prendas(t)).unwrap_or(0)
    }

    pub fn breakdown(&self) -> QuotationBreakdown {
        let totals = CategoryTotals {
            wip: self.wip_totals.get(),
            hilos: self.hilos_total.get(),
            avios: self.avios_total.get(),
            telas: self.telas_total.get(),
        };
        let factors = self.price_factors.with(PriceFactors::from_ledger);
        QuotationBreakdown::build(totals, factors, self.prendas())
    }
}

impl Default for QuotationSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prendas() {
        assert_eq!(parse_prendas("1,500"), Some(1500));
        assert_eq!(parse_prendas(" 800 "), Some(800));
        assert_eq!(parse_prendas("0"), None);
        assert_eq!(parse_prendas("-3"), None);
        assert_eq!(parse_prendas("12.5"), None);
    }

    #[test]
    fn test_preselection_only_for_same_style() {
        let prefs = SessionPrefs {
            codigo_estilo: "PL-100".into(),
            version: CalculationVersion::Truncado,
            cod_ordpros: vec!["OP1".into(), "OP7".into()],
        };
        assert_eq!(prefs.preselection_for("PL-100").len(), 2);
        assert!(prefs.preselection_for("PL-200").is_empty());
        assert!(prefs.preselection_for("").is_empty());
    }

    #[test]
    fn test_prefs_tolerate_missing_fields() {
        let prefs: SessionPrefs = serde_json::from_str(r#"{"codigo_estilo":"PL-1"}"#).unwrap();
        assert_eq!(prefs.version, CalculationVersion::Fluido);
        assert!(prefs.cod_ordpros.is_empty());
    }
}
