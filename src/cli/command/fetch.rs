use anyhow::{Context, Result};
use cavelink::{export, CaveLinkClient, MetricCatalog, Request};

use crate::cli::{create_spinner, Cli};

/// Downloads the requested group and saves it. Returns the output path.
pub async fn fetch(cli: &Cli) -> Result<String> {
    let catalog = match &cli.catalog {
        Some(path) => MetricCatalog::load(path)?,
        None => MetricCatalog::motiers()?,
    };
    let client = CaveLinkClient::new(cli.base_url.as_str(), catalog);
    let request = Request {
        station: cli.station,
        group: cli.group,
        length: cli.length,
    };

    let bar = create_spinner(format!(
        "Downloading group {} of station {}...",
        request.group, request.station
    ));
    let table = if cli.parallel {
        client.fetch_group_concurrent(request).await
    } else {
        client.fetch_group(request).await
    };
    let table = match table {
        Ok(table) => table,
        Err(e) => {
            bar.abandon_with_message("Download failed");
            return Err(e.into());
        }
    };
    bar.finish_with_message(format!(
        "{} rows of {} metrics downloaded",
        table.len(),
        table.columns().len()
    ));

    let output = cli.output_path();
    export::save_table(&table, &output)
        .with_context(|| format!("Failed to write `{}`", output.display()))?;

    Ok(output.to_string_lossy().to_string())
}

// -- Tests -------------------------------------------------------------------
