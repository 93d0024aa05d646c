use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

use crate::Result;
use crate::error::Error;

/// Install the global tracing subscriber.
///
/// The filter is picked from `explicit_filter`, then `RUST_LOG`, then `info`;
/// the first candidate that parses wins.
///
/// # Errors
///
/// Fails when no filter candidate parses, when JSON output is requested on a
/// build without the `json-logs` feature, or when a global subscriber is
/// already installed.
pub fn init_tracing(explicit_filter: Option<&str>, use_json: bool) -> Result<()> {
    let filter = pick_filter(explicit_filter)?;

    #[cfg(feature = "json-logs")]
    if use_json {
        let subscriber = Registry::default().with(filter).with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .flatten_event(true),
        );
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|err| Error::Telemetry(err.to_string()))?;
        return Ok(());
    }

    #[cfg(not(feature = "json-logs"))]
    if use_json {
        return Err(Error::Telemetry(
            "binary was built without the `json-logs` feature".to_string(),
        ));
    }

    // stdout carries the demo's own output, keep logs on stderr
    let subscriber = Registry::default().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| Error::Telemetry(err.to_string()))
}

fn pick_filter(explicit_filter: Option<&str>) -> Result<EnvFilter> {
    let mut filter_candidates = Vec::new();
    if let Some(f) = explicit_filter {
        filter_candidates.push(f.to_string());
    }
    if let Ok(env) = std::env::var("RUST_LOG") {
        filter_candidates.push(env);
    }
    filter_candidates.push("info".to_string());

    filter_candidates
        .into_iter()
        .find_map(|candidate| EnvFilter::try_new(candidate).ok())
        .ok_or_else(|| Error::Telemetry("invalid log filter".to_string()))
}

#[cfg(test)]
mod tests {
    use super::pick_filter;

    #[test]
    fn explicit_filter_takes_precedence() {
        let filter = match pick_filter(Some("storefront_toast=debug")) {
            Ok(filter) => filter,
            Err(err) => panic!("filter should parse: {err}"),
        };
        assert!(filter.to_string().contains("storefront_toast=debug"));
    }

    #[test]
    fn garbage_filter_falls_back() {
        assert!(pick_filter(Some("[[[not a filter")).is_ok());
    }
}
