use std::time::Instant;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{FixedOffset, Utc};

use crate::shared::format::format_number;

/// Lima, UTC-5 (без перехода на летнее время)
const LIMA_OFFSET_SECS: i32 = -5 * 3600;

fn lima_time() -> String {
    match FixedOffset::east_opt(LIMA_OFFSET_SECS) {
        Some(tz) => Utc::now().with_timezone(&tz).format("%H:%M:%S").to_string(),
        None => Utc::now().format("%H:%M:%S").to_string(),
    }
}

/// Одна строка консольного лога запроса
struct RequestLine {
    time: String,
    elapsed_ms: u128,
    /// None, если тело не удалось прочитать
    size: Option<usize>,
    status: StatusCode,
    method: Method,
    path: String,
}

impl RequestLine {
    fn render(&self) -> String {
        // голубой для 2xx/3xx, жёлтый для 4xx, красный для 5xx
        let color = if self.status.is_server_error() {
            "31"
        } else if self.status.is_client_error() {
            "33"
        } else {
            "36"
        };
        let size = self
            .size
            .map(format_number)
            .unwrap_or_else(|| "error".to_string());
        format!(
            "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
            color,
            self.time,
            self.elapsed_ms,
            size,
            self.status.as_u16(),
            self.method.as_str(),
            self.path
        )
    }
}

fn declared_length(response: &Response) -> Option<usize> {
    response
        .headers()
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Middleware: одна строка на запрос (время Lima, длительность, размер, статус, метод, путь).
///
/// Если ответ не объявил Content-Length, тело буферизуется,
/// чтобы узнать реальный размер.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let (response, size) = match declared_length(&response) {
        Some(len) => (response, Some(len)),
        None => {
            let (parts, body) = response.into_parts();
            match to_bytes(body, usize::MAX).await {
                Ok(bytes) => {
                    let len = bytes.len();
                    (Response::from_parts(parts, Body::from(bytes)), Some(len))
                }
                Err(_) => (Response::from_parts(parts, Body::empty()), None),
            }
        }
    };

    let line = RequestLine {
        time: lima_time(),
        elapsed_ms: start.elapsed().as_millis(),
        size,
        status: response.status(),
        method,
        path,
    };
    println!("{}", line.render());

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(status: StatusCode, size: Option<usize>) -> RequestLine {
        RequestLine {
            time: "10:15:00".to_string(),
            elapsed_ms: 12,
            size,
            status,
            method: Method::GET,
            path: "/api/proxy/estilos/18420/ops".to_string(),
        }
    }

    #[test]
    fn test_render_colors_by_status_class() {
        assert!(line(StatusCode::OK, Some(10)).render().starts_with("\x1b[36m"));
        assert!(line(StatusCode::BAD_REQUEST, Some(10)).render().starts_with("\x1b[33m"));
        assert!(line(StatusCode::GATEWAY_TIMEOUT, Some(10)).render().starts_with("\x1b[31m"));
    }

    #[test]
    fn test_render_formats_size_and_path() {
        let rendered = line(StatusCode::OK, Some(1_234_567)).render();
        assert!(rendered.contains("1,234,567"));
        assert!(rendered.contains("200    GET /api/proxy/estilos/18420/ops"));
        assert!(line(StatusCode::OK, None).render().contains("error"));
    }
}
