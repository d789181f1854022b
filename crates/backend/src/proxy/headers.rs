use axum::http::{header, HeaderMap, HeaderName};

/// Inbound headers propagated to the internal service; everything else is dropped
pub const FORWARDED_REQUEST_HEADERS: [HeaderName; 3] =
    [header::COOKIE, header::AUTHORIZATION, header::CONTENT_TYPE];

/// Response headers never copied back to the client.
/// `set-cookie` is included so internal cookies do not leak.
pub const STRIPPED_RESPONSE_HEADERS: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "transfer-encoding",
    "upgrade",
    "set-cookie",
];

pub fn forwarded_request_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in FORWARDED_REQUEST_HEADERS.iter() {
        for value in inbound.get_all(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

pub fn response_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(upstream.len());
    for (name, value) in upstream.iter() {
        if STRIPPED_RESPONSE_HEADERS.contains(&name.as_str()) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_only_allow_listed_request_headers_pass() {
        let mut inbound = HeaderMap::new();
        inbound.insert(header::COOKIE, HeaderValue::from_static("sid=1"));
        inbound.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer t"));
        inbound.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        inbound.insert(header::HOST, HeaderValue::from_static("cotizador.tdv"));
        inbound.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.1"));

        let out = forwarded_request_headers(&inbound);
        assert_eq!(out.len(), 3);
        assert!(out.get(header::HOST).is_none());
        assert!(out.get("x-forwarded-for").is_none());
        assert_eq!(out.get(header::COOKIE).unwrap(), "sid=1");
    }

    #[test]
    fn test_hop_by_hop_and_set_cookie_are_stripped() {
        let mut upstream = HeaderMap::new();
        upstream.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        upstream.insert(header::SET_COOKIE, HeaderValue::from_static("internal=1"));
        upstream.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        upstream.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        upstream.insert("x-request-id", HeaderValue::from_static("abc"));

        let out = response_headers(&upstream);
        assert_eq!(out.len(), 2);
        assert!(out.get(header::SET_COOKIE).is_none());
        assert_eq!(out.get("x-request-id").unwrap(), "abc");
    }
}
