use std::collections::BTreeMap;
use std::path::Path;

use eyre::WrapErr;
use serde_json::Value;
use trellis_api::http::StaticExecutor;

/// Reads a `{ "<url>": <json body> }` file into an offline executor.
pub async fn load_fixtures(path: &Path) -> eyre::Result<StaticExecutor> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("failed to read fixtures from {}", path.display()))?;
    parse_fixtures(&raw)
}

pub fn parse_fixtures(raw: &str) -> eyre::Result<StaticExecutor> {
    let bodies: BTreeMap<String, Value> =
        serde_json::from_str(raw).wrap_err("fixtures must map URLs to JSON bodies")?;
    tracing::info!(count = bodies.len(), "serving fixture responses");
    Ok(bodies
        .into_iter()
        .fold(StaticExecutor::new(), |executor, (url, body)| {
            executor.with_json(url, body)
        }))
}
