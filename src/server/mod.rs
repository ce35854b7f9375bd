//! HTTP server for receiving provenance declarations from IDE extensions
//!
//! Listens on localhost and accepts:
//! - POST /declare - record a classified block of code
//! - GET /stats - current counters and percentages
//! - GET /ping - health check
//!
//! Selection capture stays inside the IDE extension; only the character
//! count and the declared source kind cross this boundary.

use std::io::Read;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tiny_http::{Response, Server};
use tracing::{error, info, warn};

use crate::stats::{SourceKind, StatsManager};

const AUTH_HEADER: &str = "X-SRCTRACK-Token";
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Declaration received from an IDE extension
#[derive(Debug, Clone, Deserialize)]
pub struct DeclareRequest {
    /// Number of characters in the declared block
    pub chars: u64,
    /// Declared source: "manual", "copied" or "ai" (aliases accepted)
    pub source: String,
    /// Originating file, for logging only
    pub file_path: Option<String>,
}

/// Run the HTTP server until the process exits.
///
/// The accept loop owns the stats manager; requests are processed
/// sequentially, so no locking is needed around the counters.
pub fn run_server(mut manager: StatsManager, port: u16, auth_token: Option<String>) -> Result<()> {
    let bind_addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&bind_addr)
        .map_err(|e| anyhow!("Failed to start server on {}: {}", bind_addr, e))?;

    let auth_enabled = auth_token.as_deref().is_some_and(|t| !t.trim().is_empty());
    info!(
        "Listening on http://{} (auth: {})",
        bind_addr,
        if auth_enabled { "enabled" } else { "disabled" }
    );

    for mut request in server.incoming_requests() {
        let method = request.method().to_string();
        let url = request.url().to_string();
        let path = url.split('?').next().unwrap_or(url.as_str());

        if !is_authorized(&request, auth_token.as_deref()) {
            respond_json(request, 401, serde_json::json!({ "error": "unauthorized" }));
            continue;
        }

        match (method.as_str(), path) {
            ("POST", "/declare") => {
                let body = match read_request_body(&mut request) {
                    Ok(body) => body,
                    Err((status, value)) => {
                        respond_json(request, status, value);
                        continue;
                    }
                };
                let (status, value) = handle_declare(&mut manager, &body);
                respond_json(request, status, value);
            }
            ("GET", "/stats") => {
                let (status, value) = handle_stats(&manager);
                respond_json(request, status, value);
            }
            ("GET", "/ping") => {
                respond_json(
                    request,
                    200,
                    serde_json::json!({
                        "status": "ok",
                        "version": env!("CARGO_PKG_VERSION"),
                    }),
                );
            }
            _ => {
                respond_json(request, 404, serde_json::json!({ "error": "not_found" }));
            }
        }
    }

    Ok(())
}

/// Handle POST /declare: parse, record, report the updated totals
fn handle_declare(manager: &mut StatsManager, body: &str) -> (u16, serde_json::Value) {
    let req: DeclareRequest = match serde_json::from_str(body) {
        Ok(req) => req,
        Err(e) => {
            warn!("Invalid declare payload: {}", e);
            return (
                400,
                serde_json::json!({ "error": "invalid_json", "details": e.to_string() }),
            );
        }
    };

    let kind: SourceKind = match req.source.parse() {
        Ok(kind) => kind,
        Err(details) => {
            return (
                400,
                serde_json::json!({ "error": "invalid_source", "details": details }),
            );
        }
    };

    info!(
        "Declared {} chars as {} (file: {})",
        req.chars,
        kind,
        req.file_path.as_deref().unwrap_or("-")
    );
    manager.record(kind, req.chars);

    (
        200,
        serde_json::json!({
            "status": "ok",
            "source": kind.as_str(),
            "chars": req.chars,
            "stats": manager.stats().report(),
        }),
    )
}

/// Handle GET /stats
fn handle_stats(manager: &StatsManager) -> (u16, serde_json::Value) {
    (200, serde_json::json!({ "stats": manager.stats().report() }))
}

fn is_authorized(request: &tiny_http::Request, expected: Option<&str>) -> bool {
    let Some(expected) = expected.filter(|t| !t.trim().is_empty()) else {
        return true;
    };

    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(AUTH_HEADER))
        .map(|h| h.value.as_str() == expected)
        .unwrap_or(false)
}

fn json_content_type() -> tiny_http::Header {
    tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap()
}

fn read_request_body(
    request: &mut tiny_http::Request,
) -> Result<String, (u16, serde_json::Value)> {
    let mut body = String::new();
    let mut reader = request.as_reader().take((MAX_BODY_BYTES + 1) as u64);
    if let Err(e) = reader.read_to_string(&mut body) {
        error!("Failed to read request body: {}", e);
        return Err((400, serde_json::json!({ "error": "bad_request" })));
    }

    if body.len() > MAX_BODY_BYTES {
        return Err((413, serde_json::json!({ "error": "payload_too_large" })));
    }

    Ok(body)
}

fn respond_json(request: tiny_http::Request, status_code: u16, value: serde_json::Value) {
    let body =
        serde_json::to_string(&value).unwrap_or_else(|_| "{\"error\":\"serialize\"}".to_string());
    let response = Response::from_string(body)
        .with_status_code(status_code)
        .with_header(json_content_type());
    let _ = request.respond(response);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_manager(dir: &tempfile::TempDir) -> StatsManager {
        StatsManager::with_path(&dir.path().join("stats.json"))
    }

    #[test]
    fn test_declare_records_and_reports_totals() {
        let dir = tempdir().unwrap();
        let mut manager = test_manager(&dir);

        let (status, value) = handle_declare(
            &mut manager,
            r#"{"chars": 50, "source": "ai", "file_path": "src/main.rs"}"#,
        );

        assert_eq!(status, 200);
        assert_eq!(value["status"], "ok");
        assert_eq!(value["source"], "ai");
        assert_eq!(value["stats"]["ai_chars"], 50);
        assert_eq!(manager.stats().ai_chars, 50);
    }

    #[test]
    fn test_declare_accepts_source_aliases() {
        let dir = tempdir().unwrap();
        let mut manager = test_manager(&dir);

        let (status, value) =
            handle_declare(&mut manager, r#"{"chars": 10, "source": "self-written"}"#);

        assert_eq!(status, 200);
        assert_eq!(value["source"], "manual");
        assert_eq!(manager.stats().manual_chars, 10);
    }

    #[test]
    fn test_declare_rejects_unknown_source_without_mutation() {
        let dir = tempdir().unwrap();
        let mut manager = test_manager(&dir);

        let (status, value) =
            handle_declare(&mut manager, r#"{"chars": 10, "source": "telepathy"}"#);

        assert_eq!(status, 400);
        assert_eq!(value["error"], "invalid_source");
        assert_eq!(manager.stats().total_chars(), 0);
    }

    #[test]
    fn test_declare_rejects_malformed_json_without_mutation() {
        let dir = tempdir().unwrap();
        let mut manager = test_manager(&dir);

        let (status, value) = handle_declare(&mut manager, "chars=10");

        assert_eq!(status, 400);
        assert_eq!(value["error"], "invalid_json");
        assert_eq!(manager.stats().total_chars(), 0);
    }

    #[test]
    fn test_stats_reports_percentages() {
        let dir = tempdir().unwrap();
        let mut manager = test_manager(&dir);
        manager.record(SourceKind::Manual, 120);
        manager.record(SourceKind::Copied, 30);
        manager.record(SourceKind::Ai, 50);

        let (status, value) = handle_stats(&manager);

        assert_eq!(status, 200);
        assert_eq!(value["stats"]["total_chars"], 200);
        assert_eq!(value["stats"]["manual_percent"], 60.0);
        assert_eq!(value["stats"]["copied_percent"], 15.0);
        assert_eq!(value["stats"]["ai_percent"], 25.0);
    }
}
