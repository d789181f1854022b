use serde::{Deserialize, Serialize};

use crate::enums::calculation_version::CalculationVersion;
use crate::shared::costing::CostLine;

/// Desglose de costo por WIP (etapa de proceso)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WipDesgloseDto {
    pub wip_id: String,
    #[serde(default)]
    pub descripcion: String,
    /// Textile group sub-cost per garment
    #[serde(default)]
    pub costo_textil_por_prenda: f64,
    /// Manufacturing group sub-cost per garment
    #[serde(default)]
    pub costo_manufactura_por_prenda: f64,
    #[serde(default)]
    pub total_prendas: f64,
    /// Number of reference OPs in which the stage appears
    #[serde(default)]
    pub frecuencia: u32,
}

impl WipDesgloseDto {
    /// Rows with no cost in either group are neither shown nor selectable
    pub fn has_cost(&self) -> bool {
        self.costo_textil_por_prenda != 0.0 || self.costo_manufactura_por_prenda != 0.0
    }
}

impl CostLine for WipDesgloseDto {
    fn key(&self) -> String {
        self.wip_id.clone()
    }

    /// Both groups together, already expressed per garment
    fn base_unit_cost(&self) -> f64 {
        self.costo_textil_por_prenda + self.costo_manufactura_por_prenda
    }

    fn quantity_per_garment(&self) -> f64 {
        1.0
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.wip_id, self.descripcion)
    }
}

/// Body of POST wip/desglose
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WipDesgloseRequest {
    pub cod_ordpros: Vec<String>,
    pub version_calculo: CalculationVersion,
}
