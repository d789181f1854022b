use serde::{Deserialize, Serialize};

use super::ledger::{ValueLedger, ValueRange};
use super::totals::WipTotals;

pub const FACTOR_MARGEN: &str = "margen";
pub const FACTOR_MARCA: &str = "marca";
pub const FACTOR_ESFUERZO: &str = "esfuerzo";

/// Keys of the price-panel factor ledger
pub const PRICE_FACTOR_KEYS: [&str; 3] = [FACTOR_MARGEN, FACTOR_MARCA, FACTOR_ESFUERZO];

/// Seeded ledger for the margin / brand / effort factors, range [0.1, 3.0]
pub fn price_factor_ledger() -> ValueLedger {
    let mut ledger = ValueLedger::factors(ValueRange::PRICE_FACTOR);
    ledger.seed(&PRICE_FACTOR_KEYS);
    ledger
}

/// Top-level multipliers applied to the per-garment cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceFactors {
    pub margen: f64,
    pub marca: f64,
    pub esfuerzo: f64,
}

impl Default for PriceFactors {
    fn default() -> Self {
        Self {
            margen: 1.0,
            marca: 1.0,
            esfuerzo: 1.0,
        }
    }
}

impl PriceFactors {
    pub fn from_ledger(ledger: &ValueLedger) -> Self {
        Self {
            margen: ledger.factor(FACTOR_MARGEN),
            marca: ledger.factor(FACTOR_MARCA),
            esfuerzo: ledger.factor(FACTOR_ESFUERZO),
        }
    }

    pub fn combined(&self) -> f64 {
        self.margen * self.marca * self.esfuerzo
    }
}

/// Per-garment totals of every category
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub wip: WipTotals,
    pub hilos: f64,
    pub avios: f64,
    pub telas: f64,
}

impl CategoryTotals {
    pub fn materiales(&self) -> f64 {
        self.hilos + self.avios + self.telas
    }

    pub fn costo_por_prenda(&self) -> f64 {
        self.wip.total() + self.materiales()
    }
}

/// Result shown by the price panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuotationBreakdown {
    pub totals: CategoryTotals,
    pub factors: PriceFactors,
    pub costo_por_prenda: f64,
    pub precio_por_prenda: f64,
    pub prendas: u32,
    pub total_pedido: f64,
}

impl QuotationBreakdown {
    pub fn build(totals: CategoryTotals, factors: PriceFactors, prendas: u32) -> Self {
        let costo_por_prenda = totals.costo_por_prenda();
        let precio_por_prenda = costo_por_prenda * factors.combined();
        Self {
            totals,
            factors,
            costo_por_prenda,
            precio_por_prenda,
            prendas,
            total_pedido: precio_por_prenda * prendas as f64,
        }
    }

    /// Effective markup over cost, 0 when there is no cost yet
    pub fn markup(&self) -> f64 {
        if self.costo_por_prenda == 0.0 {
            return 0.0;
        }
        self.precio_por_prenda / self.costo_por_prenda - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals() -> CategoryTotals {
        CategoryTotals {
            wip: WipTotals {
                textil: 3.0,
                manufactura: 4.0,
            },
            hilos: 0.5,
            avios: 1.0,
            telas: 1.5,
        }
    }

    #[test]
    fn test_breakdown_applies_all_factors() {
        let factors = PriceFactors {
            margen: 1.5,
            marca: 1.2,
            esfuerzo: 1.0,
        };
        let b = QuotationBreakdown::build(totals(), factors, 100);
        assert_eq!(b.costo_por_prenda, 10.0);
        assert!((b.precio_por_prenda - 18.0).abs() < 1e-9);
        assert!((b.total_pedido - 1800.0).abs() < 1e-6);
        assert!((b.markup() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_price_factor_ledger_rejects_values_above_three() {
        let mut ledger = price_factor_ledger();
        ledger.set_text(FACTOR_MARGEN, "3.5");
        ledger.set_text(FACTOR_MARCA, "1.1");
        let factors = PriceFactors::from_ledger(&ledger);
        assert_eq!(factors.margen, 1.0);
        assert_eq!(factors.marca, 1.1);
    }

    #[test]
    fn test_markup_without_cost_is_zero() {
        let b = QuotationBreakdown::build(CategoryTotals::default(), PriceFactors::default(), 10);
        assert_eq!(b.markup(), 0.0);
        assert_eq!(b.total_pedido, 0.0);
    }
}
