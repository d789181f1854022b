use serde::{Deserialize, Serialize};

use crate::shared::costing::{CostLine, SelectionSet};

/// Orden de producción usada como referencia de costeo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpDto {
    pub cod_ordpro: String,
    #[serde(default)]
    pub cliente: Option<String>,
    #[serde(default)]
    pub fecha_facturacion: Option<String>,
    #[serde(default)]
    pub prendas_requeridas: f64,
    #[serde(default)]
    pub prendas_facturadas: f64,
    /// Costo total por prenda registrado en la OP
    #[serde(default)]
    pub costo_por_prenda: f64,
    #[serde(default)]
    pub esfuerzo_total: Option<f64>,
}

impl CostLine for OpDto {
    fn key(&self) -> String {
        self.cod_ordpro.clone()
    }

    fn base_unit_cost(&self) -> f64 {
        self.costo_por_prenda
    }

    fn quantity_per_garment(&self) -> f64 {
        1.0
    }

    fn search_text(&self) -> String {
        format!(
            "{} {}",
            self.cod_ordpro,
            self.cliente.as_deref().unwrap_or_default()
        )
    }
}

/// Average per-garment cost of the selected reference orders (0 when none)
pub fn average_reference_cost(ops: &[OpDto], selection: &SelectionSet) -> f64 {
    let selected: Vec<f64> = ops
        .iter()
        .filter(|op| selection.contains(&op.cod_ordpro))
        .map(|op| op.costo_por_prenda)
        .collect();
    if selected.is_empty() {
        return 0.0;
    }
    selected.iter().sum::<f64>() / selected.len() as f64
}
