use serde::{Deserialize, Serialize};

/// One recorded price of a material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecordDto {
    /// Record date ("YYYY-MM-DD", RFC 3339 or "DD/MM/YYYY")
    pub fecha: String,
    pub precio: f64,
    #[serde(default)]
    pub moneda: Option<String>,
}

/// Monthly average of one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPricePoint {
    /// "YYYY-MM"
    pub month: String,
    pub average: f64,
    pub samples: usize,
}

/// Both series aligned on the union of their months
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistorySeries {
    pub codigo: String,
    pub months: Vec<String>,
    /// Warehouse-recorded price
    pub almacen: Vec<Option<f64>>,
    /// Purchase-order cost
    pub orden_compra: Vec<Option<f64>>,
}

impl PriceHistorySeries {
    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// (min, max) over both series, used to scale the chart
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.almacen
            .iter()
            .chain(self.orden_compra.iter())
            .flatten()
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
