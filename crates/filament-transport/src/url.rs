//! Endpoint URI to WebSocket URL translation.

use crate::{ConnectOptions, TransportError};

/// Builds the WebSocket URL for an endpoint URI and connect options.
///
/// Accepts `http(s)://` (rewritten to `ws(s)://`), `ws(s)://` (kept), or a
/// bare `host:port`. The configured `path` is appended unless the URI
/// already names one, and any extra query string is appended last.
pub fn build_ws_url(
    uri: &str,
    opts: &ConnectOptions,
) -> Result<String, TransportError> {
    let uri = uri.trim();
    if uri.is_empty() {
        return Err(TransportError::InvalidUrl("empty uri".into()));
    }

    let (scheme, rest) = match uri.split_once("://") {
        Some(("http", rest)) => ("ws", rest),
        Some(("https", rest)) => ("wss", rest),
        Some(("ws", rest)) => ("ws", rest),
        Some(("wss", rest)) => ("wss", rest),
        Some((other, _)) => {
            return Err(TransportError::InvalidUrl(format!(
                "unsupported scheme: {other}"
            )));
        }
        // Bare authority: assume plain WebSocket.
        None => ("ws", uri),
    };

    if rest.is_empty() {
        return Err(TransportError::InvalidUrl("missing host".into()));
    }

    let (authority, existing_path) = match rest.split_once('/') {
        Some((auth, path)) => (auth, Some(path)),
        None => (rest, None),
    };

    if authority.is_empty() {
        return Err(TransportError::InvalidUrl("missing host".into()));
    }

    let path = match existing_path {
        Some(p) if !p.is_empty() => format!("/{p}"),
        _ => {
            let p = opts.path.trim_end_matches('/');
            if p.is_empty() {
                "/".to_string()
            } else if p.starts_with('/') {
                p.to_string()
            } else {
                format!("/{p}")
            }
        }
    };

    let mut url = format!("{scheme}://{authority}{path}");
    if let Some(query) = &opts.query {
        if !query.is_empty() {
            let sep = if path.contains('?') { '&' } else { '?' };
            url.push(sep);
            url.push_str(query);
        }
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ConnectOptions {
        ConnectOptions::default()
    }

    #[test]
    fn test_build_ws_url_http_becomes_ws_with_default_path() {
        let url = build_ws_url("http://localhost:3000", &opts()).unwrap();
        assert_eq!(url, "ws://localhost:3000/socket.io");
    }

    #[test]
    fn test_build_ws_url_https_becomes_wss() {
        let url = build_ws_url("https://example.com", &opts()).unwrap();
        assert_eq!(url, "wss://example.com/socket.io");
    }

    #[test]
    fn test_build_ws_url_ws_scheme_kept() {
        let url = build_ws_url("ws://127.0.0.1:8080", &opts()).unwrap();
        assert_eq!(url, "ws://127.0.0.1:8080/socket.io");
    }

    #[test]
    fn test_build_ws_url_bare_authority_assumes_ws() {
        let url = build_ws_url("127.0.0.1:8080", &opts()).unwrap();
        assert_eq!(url, "ws://127.0.0.1:8080/socket.io");
    }

    #[test]
    fn test_build_ws_url_explicit_path_wins_over_option() {
        let url = build_ws_url("http://host/custom", &opts()).unwrap();
        assert_eq!(url, "ws://host/custom");
    }

    #[test]
    fn test_build_ws_url_custom_path_option() {
        let o = ConnectOptions {
            path: "/relay".into(),
            query: None,
        };
        let url = build_ws_url("http://host", &o).unwrap();
        assert_eq!(url, "ws://host/relay");
    }

    #[test]
    fn test_build_ws_url_appends_query() {
        let o = ConnectOptions {
            path: "/socket.io".into(),
            query: Some("token=abc".into()),
        };
        let url = build_ws_url("http://host", &o).unwrap();
        assert_eq!(url, "ws://host/socket.io?token=abc");
    }

    #[test]
    fn test_build_ws_url_rejects_unknown_scheme() {
        let result = build_ws_url("ftp://host", &opts());
        assert!(matches!(result, Err(TransportError::InvalidUrl(_))));
    }

    #[test]
    fn test_build_ws_url_rejects_empty_uri() {
        assert!(matches!(
            build_ws_url("", &opts()),
            Err(TransportError::InvalidUrl(_))
        ));
        assert!(matches!(
            build_ws_url("http://", &opts()),
            Err(TransportError::InvalidUrl(_))
        ));
    }
}
