//! Stdio MCP server: request loop, method dispatch, resource reads.

use crate::config::ServerConfig;
use crate::protocol::{ErrorCode, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use anyhow::Context;
use chrono::Datelike;
use daymark_core::calendar::DayIndex;
use daymark_core::classify::classify;
use daymark_core::data::{FeedStore, HolidayCache, HttpFeedProvider};
use daymark_core::validate::validate;
use serde_json::{json, Value};
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "daymark";

/// The three read-only resources, as (template, name, description).
const RESOURCES: [(&str, &str, &str); 3] = [
    (
        "date://is_holiday/{date}",
        "is_holiday",
        "Whether the date is listed in the holiday feed (empty date means today)",
    ),
    (
        "date://is_workday/{date}",
        "is_workday",
        "Whether the date is a working day (empty date means today)",
    ),
    (
        "date://get_holiday_info/{date}",
        "get_holiday_info",
        "Full classification: holiday, workday, weekday (empty date means today)",
    ),
];

/// Which resource a `date://` URI addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResourceKind {
    IsHoliday,
    IsWorkday,
    HolidayInfo,
}

/// Parse `date://{resource}/{date}`; the date segment may be absent or empty.
fn parse_uri(uri: &str) -> Option<(ResourceKind, Option<&str>)> {
    let rest = uri.strip_prefix("date://")?;
    let (resource, date) = match rest.split_once('/') {
        Some((resource, date)) => (resource, date),
        None => (rest, ""),
    };
    let kind = match resource {
        "is_holiday" => ResourceKind::IsHoliday,
        "is_workday" => ResourceKind::IsWorkday,
        "get_holiday_info" => ResourceKind::HolidayInfo,
        _ => return None,
    };
    let date = if date.is_empty() { None } else { Some(date) };
    Some((kind, date))
}

pub struct McpServer {
    cache: HolidayCache,
}

impl McpServer {
    pub fn new(cache: HolidayCache) -> Self {
        Self { cache }
    }

    /// Wire up the store and HTTP provider from a config.
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let store = FeedStore::open(&config.data_dir)
            .with_context(|| format!("opening data dir {}", config.data_dir.display()))?;
        let provider = Arc::new(HttpFeedProvider::with_timeout(
            config.feed_url.clone(),
            Duration::from_secs(config.timeout_secs),
        ));
        Ok(Self::new(HolidayCache::new(store, provider)))
    }

    /// Serve requests from stdin until EOF. Responses go to stdout,
    /// diagnostics to stderr.
    pub fn run(&self) -> anyhow::Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();

        for line in stdin.lock().lines() {
            let line = line.context("reading request line")?;
            if line.trim().is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(&line) {
                Ok(request) => self.handle(request),
                Err(e) => Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(ErrorCode::ParseError, format!("invalid JSON-RPC: {e}")),
                )),
            };

            if let Some(response) = response {
                let mut out = stdout.lock();
                writeln!(out, "{}", serde_json::to_string(&response)?)?;
                out.flush()?;
            }
        }

        Ok(())
    }

    /// Dispatch one request. Notifications produce no response.
    pub fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        let result = match request.method.as_str() {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "resources": {} },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION"),
                },
            })),
            "ping" => Ok(json!({})),
            "resources/list" => Ok(self.list_resources()),
            "resources/templates/list" => Ok(self.list_templates()),
            "resources/read" => self.read_resource_request(request.params.as_ref()),
            other => Err(JsonRpcError::new(
                ErrorCode::MethodNotFound,
                format!("unknown method '{other}'"),
            )),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    /// Concrete listings are the today-form of each resource.
    fn list_resources(&self) -> Value {
        let resources: Vec<Value> = RESOURCES
            .iter()
            .map(|(template, name, description)| {
                json!({
                    "uri": template.replace("{date}", ""),
                    "name": *name,
                    "description": *description,
                    "mimeType": "application/json",
                })
            })
            .collect();
        json!({ "resources": resources })
    }

    fn list_templates(&self) -> Value {
        let templates: Vec<Value> = RESOURCES
            .iter()
            .map(|(template, name, description)| {
                json!({
                    "uriTemplate": *template,
                    "name": *name,
                    "description": *description,
                    "mimeType": "application/json",
                })
            })
            .collect();
        json!({ "resourceTemplates": templates })
    }

    fn read_resource_request(&self, params: Option<&Value>) -> Result<Value, JsonRpcError> {
        let uri = params
            .and_then(|p| p.get("uri"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                JsonRpcError::new(ErrorCode::InvalidParams, "missing 'uri' parameter")
            })?;

        let text = self.answer(uri)?;
        Ok(json!({
            "contents": [{
                "uri": uri,
                "mimeType": "application/json",
                "text": text,
            }]
        }))
    }

    /// Resolve one resource URI to its JSON body.
    fn answer(&self, uri: &str) -> Result<String, JsonRpcError> {
        let (kind, date_param) = parse_uri(uri).ok_or_else(|| {
            JsonRpcError::new(ErrorCode::InvalidParams, format!("unknown resource '{uri}'"))
        })?;

        // Validation failures surface before any cache work.
        let date = validate(date_param)
            .map_err(|e| JsonRpcError::new(ErrorCode::InvalidParams, e.to_string()))?;

        let current_year = chrono::Local::now().year();
        let dataset = self
            .cache
            .get(current_year)
            .map_err(|e| JsonRpcError::new(ErrorCode::InternalError, e.to_string()))?;

        let index = DayIndex::from_dataset(&dataset);
        let info = classify(date, &index);

        let text = match kind {
            ResourceKind::IsHoliday => info.is_holiday.to_string(),
            ResourceKind::IsWorkday => info.is_workday.to_string(),
            ResourceKind::HolidayInfo => serde_json::to_string(&info)
                .map_err(|e| JsonRpcError::new(ErrorCode::InternalError, e.to_string()))?,
        };
        Ok(text)
    }
}
