use serde::{Deserialize, Serialize};

use crate::enums::calculation_version::CalculationVersion;

/// Proxy prefix the UI is compiled against; the backend serves it unless configured otherwise
pub const DEFAULT_PROXY_PREFIX: &str = "/api/proxy";

/// Envelope returned by every data endpoint of the quoting API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiListResponse<T> {
    pub data: Vec<T>,
    /// Number of records reported by the backend (may differ from `data.len()`)
    #[serde(default)]
    pub total: usize,
    /// Last time the backend reporting job ran
    #[serde(default)]
    pub fecha_corrida: Option<String>,
}

impl<T> ApiListResponse<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Default for ApiListResponse<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            fecha_corrida: None,
        }
    }
}

/// Error body returned by the quoting API or by the proxy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// First non-empty human readable field
    pub fn text(&self) -> Option<&str> {
        [&self.message, &self.detail, &self.error]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .map(str::trim)
            .find(|v| !v.is_empty())
    }
}

/// GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub ts: String,
}

/// Query string of the per-style endpoints (`estilos/{codigo}/ops|hilos|avios|telas`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleCategoryQuery {
    pub version_calculo: CalculationVersion,
    /// Comma separated reference OPs; absent means "all OPs of the style"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cod_ordpros: Option<String>,
}

impl StyleCategoryQuery {
    pub fn new<S: AsRef<str>>(version_calculo: CalculationVersion, cod_ordpros: &[S]) -> Self {
        let joined = cod_ordpros
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");
        Self {
            version_calculo,
            cod_ordpros: (!joined.is_empty()).then_some(joined),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_metadata_is_optional() {
        let resp: ApiListResponse<String> = serde_json::from_str(r#"{"data":["a","b"]}"#).unwrap();
        assert_eq!(resp.data.len(), 2);
        assert_eq!(resp.total, 0);
        assert!(resp.fecha_corrida.is_none());
    }

    #[test]
    fn test_error_body_text_prefers_message() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"message":"  ","detail":"estilo no existe"}"#).unwrap();
        assert_eq!(body.text(), Some("estilo no existe"));

        let empty = ApiErrorBody::default();
        assert_eq!(empty.text(), None);
    }

    #[test]
    fn test_style_query_joins_ops() {
        let q = StyleCategoryQuery::new(CalculationVersion::Truncado, &["OP1", "OP2"]);
        assert_eq!(q.cod_ordpros.as_deref(), Some("OP1,OP2"));
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["version_calculo"], "TRUNCADO");

        let none = StyleCategoryQuery::new::<&str>(CalculationVersion::Fluido, &[]);
        assert!(none.cod_ordpros.is_none());
        assert!(serde_json::to_value(&none).unwrap().get("cod_ordpros").is_none());
    }
}
