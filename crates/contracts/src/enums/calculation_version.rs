use serde::{Deserialize, Serialize};

/// Calculation version (metodología de cálculo) sent with every category query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CalculationVersion {
    /// Full/dynamic dataset
    #[default]
    Fluido,
    /// Simplified dataset
    Truncado,
}

impl CalculationVersion {
    pub fn code(&self) -> &'static str {
        match self {
            CalculationVersion::Fluido => "FLUIDO",
            CalculationVersion::Truncado => "TRUNCADO",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CalculationVersion::Fluido => "Fluido (completo)",
            CalculationVersion::Truncado => "Truncado (simplificado)",
        }
    }

    pub fn all() -> Vec<CalculationVersion> {
        vec![CalculationVersion::Fluido, CalculationVersion::Truncado]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "FLUIDO" => Some(CalculationVersion::Fluido),
            "TRUNCADO" => Some(CalculationVersion::Truncado),
            _ => None,
        }
    }
}

impl std::fmt::Display for CalculationVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_is_case_insensitive() {
        assert_eq!(CalculationVersion::from_code("fluido"), Some(CalculationVersion::Fluido));
        assert_eq!(CalculationVersion::from_code(" TRUNCADO "), Some(CalculationVersion::Truncado));
        assert_eq!(CalculationVersion::from_code("otro"), None);
    }

    #[test]
    fn test_serializes_as_backend_code() {
        let json = serde_json::to_string(&CalculationVersion::Truncado).unwrap();
        assert_eq!(json, "\"TRUNCADO\"");
    }
}
