use serde::{Deserialize, Serialize};

use super::ledger::{CommitPolicy, EditableValue, InputOutcome, ValueLedger, ValueRange};

/// Valuation mode of a material category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostingMode {
    /// Per-item cost typed by the user
    Detailed,
    /// One lump sum for the whole category
    FixedAmount,
    /// Base unit cost scaled by the item factor
    #[default]
    Automatic,
}

impl CostingMode {
    pub fn code(&self) -> &'static str {
        match self {
            CostingMode::Detailed => "detallado",
            CostingMode::FixedAmount => "monto_fijo",
            CostingMode::Automatic => "automatico",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CostingMode::Detailed => "Detallado",
            CostingMode::FixedAmount => "Monto fijo",
            CostingMode::Automatic => "Automático",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "detallado" => Some(CostingMode::Detailed),
            "monto_fijo" => Some(CostingMode::FixedAmount),
            "automatico" => Some(CostingMode::Automatic),
            _ => None,
        }
    }
}

/// Mode-dependent state of one material category.
///
/// Detailed entries and the fixed amount live next to each other so that
/// switching modes never loses what was typed in the other one.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialCosting {
    pub mode: CostingMode,
    pub detailed: ValueLedger,
    pub fixed_amount: EditableValue,
}

impl Default for MaterialCosting {
    fn default() -> Self {
        Self {
            mode: CostingMode::Automatic,
            detailed: ValueLedger::optional(ValueRange::DETAILED_COST),
            fixed_amount: EditableValue::default(),
        }
    }
}

impl MaterialCosting {
    pub fn set_mode(&mut self, mode: CostingMode) {
        self.mode = mode;
    }

    pub fn set_fixed_amount_text(&mut self, raw: &str) -> InputOutcome {
        self.fixed_amount
            .set_text(raw, ValueRange::FIXED_AMOUNT, CommitPolicy::Live, true)
    }

    pub fn blur_fixed_amount(&mut self) -> Option<f64> {
        self.fixed_amount.blur(ValueRange::FIXED_AMOUNT, None, true)
    }

    /// Committed lump sum, 0 when nothing was entered
    pub fn fixed_amount(&self) -> f64 {
        self.fixed_amount.value_or(0.0)
    }

    pub fn set_detailed_text(&mut self, key: &str, raw: &str) -> InputOutcome {
        self.detailed.set_text(key, raw)
    }

    /// Forgets detailed entries and the lump sum; the mode stays
    pub fn clear_entries(&mut self) {
        self.detailed.clear_all();
        self.fixed_amount = EditableValue::default();
    }

    /// Entered per-garment cost, falling back to the backend value
    pub fn detailed_cost(&self, key: &str, base_cost_per_garment: f64) -> f64 {
        self.detailed.value(key).unwrap_or(base_cost_per_garment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_switch_preserves_other_state() {
        let mut costing = MaterialCosting::default();
        costing.set_mode(CostingMode::Detailed);
        costing.set_detailed_text("AV-1", "0.8");
        costing.set_mode(CostingMode::FixedAmount);
        costing.set_fixed_amount_text("150");
        costing.set_mode(CostingMode::Automatic);
        costing.set_mode(CostingMode::Detailed);

        assert_eq!(costing.detailed_cost("AV-1", 0.1), 0.8);
        assert_eq!(costing.fixed_amount(), 150.0);
    }

    #[test]
    fn test_detailed_cost_falls_back_to_base() {
        let costing = MaterialCosting::default();
        assert_eq!(costing.detailed_cost("AV-2", 0.45), 0.45);
    }

    #[test]
    fn test_negative_fixed_amount_rejected() {
        let mut costing = MaterialCosting::default();
        costing.set_fixed_amount_text("20");
        assert_eq!(costing.set_fixed_amount_text("-5"), InputOutcome::Rejected);
        assert_eq!(costing.fixed_amount(), 20.0);
        assert_eq!(costing.blur_fixed_amount(), Some(20.0));
        assert_eq!(costing.fixed_amount.display_text, "20");
    }

    #[test]
    fn test_clear_entries_keeps_mode() {
        let mut costing = MaterialCosting::default();
        costing.set_mode(CostingMode::FixedAmount);
        costing.set_fixed_amount_text("90");
        costing.set_detailed_text("TL-1", "2.5");

        costing.clear_entries();
        assert_eq!(costing.mode, CostingMode::FixedAmount);
        assert_eq!(costing.fixed_amount(), 0.0);
        assert_eq!(costing.detailed_cost("TL-1", 1.2), 1.2);
    }

    #[test]
    fn test_mode_codes_round_trip() {
        for mode in [CostingMode::Detailed, CostingMode::FixedAmount, CostingMode::Automatic] {
            assert_eq!(CostingMode::from_code(mode.code()), Some(mode));
        }
    }
}
