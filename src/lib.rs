//! Client for the Cave-Link cave monitoring service.
//!
//! Downloads every metric of a station's group, aligns the series on their
//! timestamps and saves the result as CSV.

pub mod catalog;
pub mod download;
pub mod error;
pub mod export;
pub mod reading;
pub mod table;

pub use catalog::MetricCatalog;
pub use download::{CaveLinkClient, Request, DEFAULT_BASE_URL};
pub use error::{CaveLinkError, Result};
pub use reading::TimeSeries;
pub use table::CombinedTable;
