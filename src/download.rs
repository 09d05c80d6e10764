//! Downloads series from the Cave-Link data endpoint.

use futures::future::try_join_all;
use tracing::{debug, info};

use crate::{
    catalog::MetricCatalog,
    error::{CaveLinkError, Result},
    reading::{self, TimeSeries},
    table::CombinedTable,
};

pub const DEFAULT_BASE_URL: &str = "https://www.cavelink.com/cl/da.php";

/// What to download: every metric of `group` at `station`, `length` rows each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub station: u32,
    pub group: u32,
    pub length: u32,
}

pub struct CaveLinkClient {
    http: reqwest::Client,
    base_url: String,
    catalog: MetricCatalog,
}

impl CaveLinkClient {
    pub fn new(base_url: impl Into<String>, catalog: MetricCatalog) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            catalog,
        }
    }

    pub fn catalog(&self) -> &MetricCatalog {
        &self.catalog
    }

    /// Fetches the raw body for one metric. The body of a successful
    /// response is returned unchecked.
    pub async fn fetch(&self, station: u32, group: u32, metric: u32, length: u32) -> Result<String> {
        info!(
            station,
            group,
            metric,
            length,
            "Downloading data for station {}, group {}, value {}, length {}",
            station,
            group,
            metric,
            length
        );

        let network_error = |source: reqwest::Error| CaveLinkError::Network {
            url: self.base_url.clone(),
            source,
        };

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("s", station), ("g", group), ("w", metric), ("l", length)])
            .send()
            .await
            .map_err(network_error)?
            .error_for_status()
            .map_err(network_error)?;

        let body = response.text().await.map_err(network_error)?;
        debug!(metric, bytes = body.len(), "Response received");

        Ok(body)
    }

    /// Fetches and parses one metric, labelled from the catalog.
    pub async fn fetch_series(&self, request: Request, metric: u32) -> Result<TimeSeries> {
        let label = self.catalog.label_for(request.group, metric)?;
        let body = self
            .fetch(request.station, request.group, metric, request.length)
            .await?;

        reading::parse(&body, label)
    }

    /// Fetches every metric of the group one after the other and joins them.
    pub async fn fetch_group(&self, request: Request) -> Result<CombinedTable> {
        let metrics = self.catalog.metrics(request.group)?;
        let mut series = Vec::with_capacity(metrics.len());

        for metric in metrics {
            series.push(self.fetch_series(request, metric.id).await?);
        }

        Ok(join(series))
    }

    /// Like [`fetch_group`](Self::fetch_group) with all requests in flight at
    /// once. Columns still follow catalog order.
    pub async fn fetch_group_concurrent(&self, request: Request) -> Result<CombinedTable> {
        let metrics = self.catalog.metrics(request.group)?;
        let series = try_join_all(
            metrics
                .iter()
                .map(|metric| self.fetch_series(request, metric.id)),
        )
        .await?;

        Ok(join(series))
    }
}

fn join(series: Vec<TimeSeries>) -> CombinedTable {
    let table = CombinedTable::outer_join(series);
    info!(
        columns = table.columns().len(),
        rows = table.len(),
        "Series aligned"
    );

    table
}

// -- Tests -------------------------------------------------------------------
