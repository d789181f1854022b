use serde::{Deserialize, Serialize};

use crate::shared::costing::CostLine;

/// Tela (fabric), costed per kg and converted through kg per garment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelaDto {
    pub cod_tela: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub tipo_tela: Option<String>,
    #[serde(default)]
    pub kg_por_prenda: f64,
    #[serde(default)]
    pub precio_por_kg: f64,
    #[serde(default)]
    pub costo_por_prenda: Option<f64>,
    #[serde(default)]
    pub frecuencia: u32,
}

impl CostLine for TelaDto {
    fn key(&self) -> String {
        self.cod_tela.clone()
    }

    fn base_unit_cost(&self) -> f64 {
        self.precio_por_kg
    }

    fn quantity_per_garment(&self) -> f64 {
        self.kg_por_prenda
    }

    fn base_cost_per_garment(&self) -> f64 {
        self.costo_por_prenda
            .unwrap_or(self.precio_por_kg * self.kg_por_prenda)
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.cod_tela,
            self.descripcion,
            self.tipo_tela.as_deref().unwrap_or_default()
        )
    }
}
