//! API utilities for frontend-backend communication
//!
//! Все запросы к внутреннему сервису идут через прокси бэкенда
//! (`/api/proxy/...`), тот же origin, что и UI.

use contracts::shared::api::{ApiErrorBody, StyleCategoryQuery, DEFAULT_PROXY_PREFIX};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Public prefix of the backend proxy route.
///
/// Фиксирован при сборке: `[proxy] prefix` бэкенда на UI не влияет,
/// поэтому при другом значении в config.toml запросы UI получат 404.
pub const PROXY_PREFIX: &str = DEFAULT_PROXY_PREFIX;

/// Ошибка обращения к API
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request never reached the server (or the connection dropped)
    Network(String),
    /// Non-2xx answer
    Http { status: u16, message: String },
    /// 2xx answer whose body is not the expected JSON
    Parse(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "Error de red: {}", e),
            ApiError::Http { status, message } => write!(f, "HTTP {}: {}", status, message),
            ApiError::Parse(e) => write!(f, "Respuesta inválida: {}", e),
        }
    }
}

/// Build a proxy URL from a backend path
/// Example: "estilos/ABC/ops" -> "/api/proxy/estilos/ABC/ops"
pub fn proxy_url(path: &str) -> String {
    format!("{}/{}", PROXY_PREFIX, path.trim_start_matches('/'))
}

/// Encodes one path segment (style and material codes may contain spaces).
///
/// `.` is percent-encoded too: the proxy accepts only `[A-Za-z0-9_\-/%]`,
/// so a code like `TELA.01` must travel as `TELA%2E01`.
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment.trim()).replace('.', "%2E")
}

/// URL of a per-style resource: `estilos/{codigo}/{resource}?version_calculo=...`
pub fn style_url(codigo_estilo: &str, resource: &str, query: &StyleCategoryQuery) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Parse(e.to_string()))?;
    Ok(proxy_url(&format!(
        "estilos/{}/{}?{}",
        encode_segment(codigo_estilo),
        resource,
        qs
    )))
}

/// HTTP error with the most useful message the body offers
pub fn http_error(status: u16, status_text: &str, body: &str) -> ApiError {
    let from_body = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.text().map(str::to_string));
    let message = match from_body {
        Some(m) => m,
        None if !body.trim().is_empty() && body.len() <= 200 => body.trim().to_string(),
        None => status_text.to_string(),
    };
    ApiError::Http { status, message }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(http_error(status, &response.status_text(), &body));
    }

    serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
}

/// GET запрос с JSON ответом
pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = Request::get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(response).await
}

/// POST запрос с JSON телом и JSON ответом
pub async fn post_json<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> Result<T, ApiError> {
    let response = Request::post(url)
        .header("Accept", "application/json")
        .json(body)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_url_joins_without_double_slash() {
        assert_eq!(proxy_url("/estilos/ABC/ops"), "/api/proxy/estilos/ABC/ops");
        assert_eq!(proxy_url("wip/desglose"), "/api/proxy/wip/desglose");
    }

    #[test]
    fn test_style_url_carries_version_and_ops() {
        use contracts::enums::calculation_version::CalculationVersion;

        let q = StyleCategoryQuery::new(CalculationVersion::Fluido, &["OP1"]);
        let url = style_url("PL 100", "avios", &q).unwrap();
        assert!(url.starts_with("/api/proxy/estilos/PL%20100/avios?"));
        assert!(url.contains("version_calculo=FLUIDO"));
        assert!(url.contains("cod_ordpros=OP1"));
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment(" POLO 01 "), "POLO%2001");
    }

    #[test]
    fn test_encode_segment_escapes_dots() {
        let encoded = encode_segment("TELA.01");
        assert_eq!(encoded, "TELA%2E01");
        assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '/' | '%')));
    }

    #[test]
    fn test_http_error_prefers_json_message() {
        let err = http_error(422, "Unprocessable Entity", r#"{"detail":"Estilo no existe"}"#);
        assert_eq!(
            err,
            ApiError::Http {
                status: 422,
                message: "Estilo no existe".into()
            }
        );
    }

    #[test]
    fn test_http_error_falls_back_to_status_text() {
        let err = http_error(502, "Bad Gateway", "");
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");

        let plain = http_error(504, "Gateway Timeout", "Gateway Timeout: sin respuesta");
        assert_eq!(plain.to_string(), "HTTP 504: Gateway Timeout: sin respuesta");
    }
}
