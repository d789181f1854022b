use serde::{Deserialize, Serialize};

use crate::shared::costing::CostLine;

/// Hilo (yarn/thread) consumido por el estilo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiloDto {
    pub cod_hilado: String,
    #[serde(default)]
    pub tipo_hilo: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub kg_por_prenda: f64,
    #[serde(default)]
    pub costo_por_kg: f64,
    #[serde(default)]
    pub frecuencia: u32,
}

impl CostLine for HiloDto {
    /// Composite key: the same yarn code appears once per thread type
    fn key(&self) -> String {
        format!("{}|{}", self.cod_hilado, self.tipo_hilo)
    }

    fn base_unit_cost(&self) -> f64 {
        self.costo_por_kg
    }

    fn quantity_per_garment(&self) -> f64 {
        self.kg_por_prenda
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.cod_hilado, self.tipo_hilo, self.descripcion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_key() {
        let hilo = HiloDto {
            cod_hilado: "H100".into(),
            tipo_hilo: "COSTURA".into(),
            descripcion: String::new(),
            kg_por_prenda: 0.01,
            costo_por_kg: 12.0,
            frecuencia: 2,
        };
        assert_eq!(hilo.key(), "H100|COSTURA");
        assert!((hilo.base_cost_per_garment() - 0.12).abs() < 1e-9);
    }
}
