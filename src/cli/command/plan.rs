//! Shows which files an ingest would fetch, without fetching them.

use crate::{config::IngestConfig, source::generate_sources};

pub fn plan(config: &IngestConfig) -> Vec<String> {
    let months = config.window.month_starts();
    let sources = generate_sources(&config.base_url, &months, &config.taxi_types);

    let mut lines = vec![format!(
        "Window {} to {} (exclusive): {} month(s), {} file(s)",
        config.window.start,
        config.window.end,
        months.len(),
        sources.len()
    )];
    lines.extend(
        sources
            .iter()
            .map(|s| format!("{} {:<8} {}", s.month.format("%Y-%m"), s.taxi_type, s.url)),
    );

    lines
}

// -- Tests -------------------------------------------------------------------
