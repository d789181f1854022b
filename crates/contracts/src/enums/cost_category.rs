use serde::{Deserialize, Serialize};

use crate::shared::costing::mode::CostingMode;

/// Categoría de costo de una cotización
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostCategory {
    Op,
    Wip,
    Hilo,
    Avio,
    Tela,
}

impl CostCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            CostCategory::Op => "OPs de referencia",
            CostCategory::Wip => "WIPs",
            CostCategory::Hilo => "Hilos",
            CostCategory::Avio => "Avíos",
            CostCategory::Tela => "Telas",
        }
    }

    /// Costing modes offered for this category.
    ///
    /// OPs and WIPs are not valued through a mode at all, hilos only use the
    /// factor-based formula.
    pub fn available_modes(&self) -> &'static [CostingMode] {
        match self {
            CostCategory::Op | CostCategory::Wip => &[],
            CostCategory::Hilo => &[CostingMode::Automatic],
            CostCategory::Avio | CostCategory::Tela => &[
                CostingMode::Detailed,
                CostingMode::FixedAmount,
                CostingMode::Automatic,
            ],
        }
    }

    pub fn supports_mode(&self, mode: CostingMode) -> bool {
        self.available_modes().contains(&mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hilos_only_automatic() {
        assert!(CostCategory::Hilo.supports_mode(CostingMode::Automatic));
        assert!(!CostCategory::Hilo.supports_mode(CostingMode::Detailed));
        assert!(!CostCategory::Hilo.supports_mode(CostingMode::FixedAmount));
    }

    #[test]
    fn test_avios_and_telas_support_all_modes() {
        for category in [CostCategory::Avio, CostCategory::Tela] {
            assert_eq!(category.available_modes().len(), 3);
        }
    }
}
