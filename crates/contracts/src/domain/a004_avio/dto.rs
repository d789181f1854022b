use serde::{Deserialize, Serialize};

use crate::shared::costing::CostLine;

/// Avío (accessory/trim) del estilo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvioDto {
    pub cod_avio: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub unidad: String,
    #[serde(default)]
    pub unidades_por_prenda: f64,
    #[serde(default)]
    pub costo_unitario: f64,
    /// Per-garment cost computed by the backend; derived when absent
    #[serde(default)]
    pub costo_por_prenda: Option<f64>,
    #[serde(default)]
    pub frecuencia: u32,
}

impl CostLine for AvioDto {
    fn key(&self) -> String {
        self.cod_avio.clone()
    }

    fn base_unit_cost(&self) -> f64 {
        self.costo_unitario
    }

    fn quantity_per_garment(&self) -> f64 {
        self.unidades_por_prenda
    }

    fn base_cost_per_garment(&self) -> f64 {
        self.costo_por_prenda
            .unwrap_or(self.costo_unitario * self.unidades_por_prenda)
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.cod_avio, self.descripcion)
    }
}
