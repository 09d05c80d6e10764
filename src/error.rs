//! Errors raised while fetching, parsing and saving Cave-Link series.

use thiserror::Error;

pub type Result<T, E = CaveLinkError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum CaveLinkError {
    #[error("group {group} is not in the metric catalog")]
    UnknownGroup { group: u32 },

    #[error("metric {metric} of group {group} is not in the metric catalog")]
    UnknownMetric { group: u32, metric: u32 },

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("`{label}` line {line}: {message}")]
    Parse {
        label: String,
        line: usize,
        message: String,
    },

    #[error("invalid catalog {origin}: {message}")]
    Catalog { origin: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
