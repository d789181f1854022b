use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::{any, get};
use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::proxy::{self, ProxyState};
use crate::shared::config::Config;
use crate::system::middleware::request_logger::request_logger;

/// Конфигурация всех роутов приложения
pub fn configure_routes(proxy_state: Arc<ProxyState>, static_dir: &str) -> Router {
    let prefix = proxy_state.prefix().to_string();

    // Everything under the prefix lands in the proxy handler, which does its
    // own method and path validation. The nested fallback does not match the
    // bare "prefix/", hence the explicit route.
    let proxy_routes = Router::new()
        .fallback(proxy::forward)
        .with_state(proxy_state.clone());

    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            &format!("{}/", prefix),
            any(proxy::forward).with_state(proxy_state),
        )
        .nest(&prefix, proxy_routes)
        .fallback_service(ServeDir::new(static_dir))
}

/// Full application: routes plus logging and CORS layers
pub fn build_app(config: &Config) -> anyhow::Result<Router> {
    let proxy_state = Arc::new(ProxyState::new(&config.proxy)?);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    Ok(configure_routes(proxy_state, &config.server.static_dir)
        .layer(middleware::from_fn(request_logger))
        .layer(cors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::error::GATEWAY_TIMEOUT_BODY;
    use crate::shared::config::{ProxyConfig, ServerConfig};
    use axum::body::Bytes;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode, Uri};
    use axum::response::IntoResponse;
    use axum::Json;
    use serde_json::{json, Value};
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    type Hits = Arc<AtomicUsize>;

    async fn echo(
        State(hits): State<Hits>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> impl IntoResponse {
        hits.fetch_add(1, Ordering::SeqCst);
        let seen: Vec<String> = headers.keys().map(|k| k.as_str().to_string()).collect();
        let mut out = HeaderMap::new();
        out.insert("x-upstream", "tdv".parse().unwrap());
        out.insert(header::SET_COOKIE, "internal_session=1".parse().unwrap());
        (
            StatusCode::OK,
            out,
            Json(json!({
                "method": method.as_str(),
                "path": uri.path(),
                "query": uri.query(),
                "headers": seen,
                "body": String::from_utf8_lossy(&body),
            })),
        )
    }

    async fn slow(State(hits): State<Hits>) -> &'static str {
        hits.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(2)).await;
        "late"
    }

    async fn spawn(app: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    async fn spawn_upstream() -> (SocketAddr, Hits) {
        let hits: Hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/slow", get(slow))
            .fallback(echo)
            .with_state(hits.clone());
        (spawn(app).await, hits)
    }

    fn config_for(base_url: String, timeout_ms: u64, allowed_prefixes: Vec<String>) -> Config {
        Config {
            server: ServerConfig::default(),
            proxy: ProxyConfig {
                prefix: "/api/proxy".to_string(),
                internal_base_url: base_url,
                timeout_ms,
                allowed_prefixes,
            },
        }
    }

    async fn spawn_proxy(config: Config) -> SocketAddr {
        spawn(build_app(&config).unwrap()).await
    }

    /// Sends a request line verbatim (no client-side path normalization)
    async fn raw_get(addr: SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_health_reports_ok_and_timestamp() {
        let (upstream, _) = spawn_upstream().await;
        let addr = spawn_proxy(config_for(format!("http://{upstream}"), 1000, vec![])).await;

        let resp = reqwest::get(format!("http://{addr}/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["ok"], true);
        let ts = body["ts"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[tokio::test]
    async fn test_get_forwards_path_query_and_allowed_headers() {
        let (upstream, hits) = spawn_upstream().await;
        let addr = spawn_proxy(config_for(format!("http://{upstream}/"), 1000, vec![])).await;

        let resp = reqwest::Client::new()
            .get(format!("http://{addr}/api/proxy/estilos/LAC-01/ops?version_calculo=FLUIDO"))
            .header("cookie", "sid=abc")
            .header("authorization", "Bearer t0k")
            .header("x-custom-header", "drop-me")
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("x-upstream").unwrap(), "tdv");
        assert!(resp.headers().get(header::SET_COOKIE).is_none());

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["method"], "GET");
        assert_eq!(body["path"], "/estilos/LAC-01/ops");
        assert_eq!(body["query"], "version_calculo=FLUIDO");
        let seen: Vec<String> = serde_json::from_value(body["headers"].clone()).unwrap();
        assert!(seen.contains(&"cookie".to_string()));
        assert!(seen.contains(&"authorization".to_string()));
        assert!(!seen.contains(&"x-custom-header".to_string()));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_post_body_is_forwarded_verbatim() {
        let (upstream, _) = spawn_upstream().await;
        let addr = spawn_proxy(config_for(format!("http://{upstream}"), 1000, vec![])).await;
        let payload = r#"{"cod_ordpros":["OP1","OP2"],"version_calculo":"TRUNCADO"}"#;

        let resp = reqwest::Client::new()
            .post(format!("http://{addr}/api/proxy/wip/desglose"))
            .header("content-type", "application/json")
            .body(payload)
            .send()
            .await
            .unwrap();

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["method"], "POST");
        assert_eq!(body["body"], payload);
        let seen: Vec<String> = serde_json::from_value(body["headers"].clone()).unwrap();
        assert!(seen.contains(&"content-type".to_string()));
    }

    #[tokio::test]
    async fn test_empty_post_body_is_sent_without_body() {
        let (upstream, _) = spawn_upstream().await;
        let addr = spawn_proxy(config_for(format!("http://{upstream}"), 1000, vec![])).await;

        let resp = reqwest::Client::new()
            .post(format!("http://{addr}/api/proxy/estilos/recalcular"))
            .send()
            .await
            .unwrap();
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["body"], "");
    }

    #[tokio::test]
    async fn test_traversal_is_rejected_without_contacting_upstream() {
        let (upstream, hits) = spawn_upstream().await;
        let addr = spawn_proxy(config_for(format!("http://{upstream}"), 1000, vec![])).await;

        let response = raw_get(addr, "/api/proxy/../etc/passwd").await;
        assert!(response.starts_with("HTTP/1.1 400"), "{response}");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_path_is_rejected() {
        let (upstream, hits) = spawn_upstream().await;
        let addr = spawn_proxy(config_for(format!("http://{upstream}"), 1000, vec![])).await;

        for path in ["/api/proxy", "/api/proxy/"] {
            let resp = reqwest::get(format!("http://{addr}{path}")).await.unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{path}");
        }
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_path_outside_allow_list_is_rejected() {
        let (upstream, hits) = spawn_upstream().await;
        let addr = spawn_proxy(config_for(
            format!("http://{upstream}"),
            1000,
            vec!["estilos/".to_string()],
        ))
        .await;

        let denied = reqwest::get(format!("http://{addr}/api/proxy/usuarios/1")).await.unwrap();
        assert_eq!(denied.status(), StatusCode::BAD_REQUEST);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        let allowed = reqwest::get(format!("http://{addr}/api/proxy/estilos/X/avios")).await.unwrap();
        assert_eq!(allowed.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unsupported_method_is_405() {
        let (upstream, hits) = spawn_upstream().await;
        let addr = spawn_proxy(config_for(format!("http://{upstream}"), 1000, vec![])).await;

        let resp = reqwest::Client::new()
            .request(Method::TRACE, format!("http://{addr}/api/proxy/estilos"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_slow_upstream_answers_504_once() {
        let (upstream, hits) = spawn_upstream().await;
        let addr = spawn_proxy(config_for(format!("http://{upstream}"), 150, vec![])).await;

        let started = std::time::Instant::now();
        let resp = reqwest::get(format!("http://{addr}/api/proxy/slow")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(resp.text().await.unwrap(), GATEWAY_TIMEOUT_BODY);
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_502() {
        // bind then drop to get a port with nothing listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let dead = listener.local_addr().unwrap();
        drop(listener);

        let addr = spawn_proxy(config_for(format!("http://{dead}"), 1000, vec![])).await;
        let resp = reqwest::get(format!("http://{addr}/api/proxy/estilos/X/ops")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "bad_gateway");
        assert!(!body["message"].as_str().unwrap_or_default().is_empty());
    }
}
