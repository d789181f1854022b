/// Style the manual adjustments of a category were entered for.
///
/// Material codes repeat across styles, so keeping a factor or a detailed
/// cost by key alone would carry it into another style's quotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleScope {
    codigo_estilo: Option<String>,
}

impl StyleScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the style of the next load. Returns true when it differs from
    /// the previous one, i.e. the adjustments must be dropped.
    pub fn enter(&mut self, codigo_estilo: &str) -> bool {
        if self.codigo_estilo.as_deref() == Some(codigo_estilo) {
            return false;
        }
        let changed = self.codigo_estilo.is_some();
        self.codigo_estilo = Some(codigo_estilo.to_string());
        changed
    }

    pub fn current(&self) -> Option<&str> {
        self.codigo_estilo.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::costing::ledger::{ValueLedger, ValueRange};
    use crate::shared::costing::mode::MaterialCosting;

    #[test]
    fn test_enter_reports_style_changes_only() {
        let mut scope = StyleScope::new();
        assert!(!scope.enter("PL-100"));
        assert!(!scope.enter("PL-100"));
        assert!(scope.enter("PL-200"));
        assert_eq!(scope.current(), Some("PL-200"));
    }

    #[test]
    fn test_new_style_seeds_shared_codes_to_default() {
        let mut scope = StyleScope::new();
        let mut factors = ValueLedger::factors(ValueRange::ITEM_FACTOR);
        let mut costing = MaterialCosting::default();

        scope.enter("PL-100");
        factors.seed(&["ETQ-01", "BOTON-12"]);
        costing.detailed.seed(&["ETQ-01", "BOTON-12"]);
        factors.set_text("ETQ-01", "2");
        costing.set_detailed_text("ETQ-01", "0.9");

        // otra OP del mismo estilo: los ajustes se conservan
        assert!(!scope.enter("PL-100"));
        factors.seed(&["ETQ-01", "BOTON-12"]);
        assert_eq!(factors.factor("ETQ-01"), 2.0);

        // otro estilo con la misma etiqueta
        if scope.enter("PL-200") {
            factors.clear_all();
            costing.clear_entries();
        }
        factors.seed(&["ETQ-01", "CIERRE-9"]);
        costing.detailed.seed(&["ETQ-01", "CIERRE-9"]);
        assert_eq!(factors.factor("ETQ-01"), 1.0);
        assert_eq!(factors.display_text("ETQ-01"), "1");
        assert_eq!(costing.detailed_cost("ETQ-01", 0.3), 0.3);
    }
}
