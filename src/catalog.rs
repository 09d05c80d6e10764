//! Lookup table of the groups and metrics a station reports.
//!
//! The catalog is read from TOML. The Môtiers table (station 106) is embedded
//! at compile time; another table can be loaded from disk with the same
//! layout.

use std::{collections::HashSet, fs, path::Path};

use serde::Deserialize;

use crate::error::{CaveLinkError, Result};

const MOTIERS: &str = include_str!("../catalog/motiers.toml");

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricCatalog {
    #[serde(rename = "group", default)]
    groups: Vec<Group>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Group {
    pub id: u32,
    #[serde(rename = "metric", default)]
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metric {
    pub id: u32,
    pub label: String,
}

impl MetricCatalog {
    /// The embedded catalog for station 106.
    pub fn motiers() -> Result<Self> {
        Self::from_toml(MOTIERS, "motiers.toml")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let origin = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| CaveLinkError::Catalog {
            origin: origin.clone(),
            message: e.to_string(),
        })?;

        Self::from_toml(&text, &origin)
    }

    pub fn from_toml(text: &str, origin: &str) -> Result<Self> {
        let catalog: MetricCatalog = toml::from_str(text).map_err(|e| CaveLinkError::Catalog {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;
        catalog.validate(origin)?;

        Ok(catalog)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Metrics of a group in definition order.
    pub fn metrics(&self, group: u32) -> Result<&[Metric]> {
        self.groups
            .iter()
            .find(|g| g.id == group)
            .map(|g| g.metrics.as_slice())
            .ok_or(CaveLinkError::UnknownGroup { group })
    }

    pub fn label_for(&self, group: u32, metric: u32) -> Result<&str> {
        self.metrics(group)
            .ok()
            .and_then(|metrics| metrics.iter().find(|m| m.id == metric))
            .map(|m| m.label.as_str())
            .ok_or(CaveLinkError::UnknownMetric { group, metric })
    }

    fn validate(&self, origin: &str) -> Result<()> {
        let invalid = |message: String| CaveLinkError::Catalog {
            origin: origin.to_string(),
            message,
        };

        let mut group_ids = HashSet::new();
        for group in &self.groups {
            if !group_ids.insert(group.id) {
                return Err(invalid(format!("group {} is defined twice", group.id)));
            }

            if group.metrics.is_empty() {
                return Err(invalid(format!("group {} has no metrics", group.id)));
            }

            let mut metric_ids = HashSet::new();
            for metric in &group.metrics {
                if !metric_ids.insert(metric.id) {
                    return Err(invalid(format!(
                        "metric {} of group {} is defined twice",
                        metric.id, group.id
                    )));
                }
                if metric.label.trim().is_empty() {
                    return Err(invalid(format!(
                        "metric {} of group {} has an empty label",
                        metric.id, group.id
                    )));
                }
            }
        }

        Ok(())
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn should_resolve_every_embedded_label() {
        let catalog = MetricCatalog::motiers().unwrap();

        assert_eq!(catalog.groups().len(), 2);
        for group in catalog.groups() {
            for metric in &group.metrics {
                let label = catalog.label_for(group.id, metric.id).unwrap();
                assert!(!label.is_empty());
            }
        }
    }

    #[test]
    fn should_keep_definition_order() {
        let catalog = MetricCatalog::motiers().unwrap();
        let ids: Vec<u32> = catalog.metrics(1).unwrap().iter().map(|m| m.id).collect();

        assert_eq!(ids, vec![0, 1, 2, 3, 101]);
        assert_eq!(catalog.label_for(1, 101).unwrap(), "Wasserstand [m]");
        assert_eq!(catalog.label_for(0, 0).unwrap(), "Batterie Motiers [V]");
    }

    #[test]
    fn should_fail_on_unknown_metric() {
        let catalog = MetricCatalog::motiers().unwrap();

        assert!(matches!(
            catalog.label_for(1, 4),
            Err(CaveLinkError::UnknownMetric { group: 1, metric: 4 })
        ));
        assert!(matches!(
            catalog.label_for(7, 0),
            Err(CaveLinkError::UnknownMetric { group: 7, metric: 0 })
        ));
        assert!(matches!(
            catalog.metrics(7),
            Err(CaveLinkError::UnknownGroup { group: 7 })
        ));
    }

    #[test]
    fn should_reject_duplicate_metric() {
        let text = r#"
            [[group]]
            id = 3
            [[group.metric]]
            id = 1
            label = "a"
            [[group.metric]]
            id = 1
            label = "b"
        "#;

        let err = MetricCatalog::from_toml(text, "inline").unwrap_err();
        assert!(matches!(err, CaveLinkError::Catalog { .. }));
    }

    #[test]
    fn should_reject_empty_label() {
        let text = r#"
            [[group]]
            id = 3
            [[group.metric]]
            id = 1
            label = "  "
        "#;

        assert!(MetricCatalog::from_toml(text, "inline").is_err());
    }

    #[test]
    fn should_reject_misspelled_table() {
        let text = r#"
            [[group]]
            id = 3
            [[group.metrics]]
            id = 1
            label = "a"
        "#;

        let err = MetricCatalog::from_toml(text, "inline").unwrap_err();
        assert!(matches!(err, CaveLinkError::Catalog { .. }));
    }

    #[test]
    fn should_reject_unknown_metric_key() {
        let text = r#"
            [[group]]
            id = 3
            [[group.metric]]
            id = 1
            lable = "a"
        "#;

        assert!(MetricCatalog::from_toml(text, "inline").is_err());
    }

    #[test]
    fn should_reject_empty_group() {
        let text = r#"
            [[group]]
            id = 3
        "#;

        let err = MetricCatalog::from_toml(text, "inline").unwrap_err();
        assert!(matches!(err, CaveLinkError::Catalog { .. }));
    }

    #[test]
    fn should_load_catalog_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[group]]\nid = 2\n[[group.metric]]\nid = 5\nlabel = \"Leitfähigkeit [uS]\""
        )
        .unwrap();

        let catalog = MetricCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.label_for(2, 5).unwrap(), "Leitfähigkeit [uS]");
    }

    #[test]
    fn should_report_missing_catalog_file() {
        let err = MetricCatalog::load(Path::new("/nonexistent/catalog.toml")).unwrap_err();
        assert!(matches!(err, CaveLinkError::Catalog { .. }));
    }
}
