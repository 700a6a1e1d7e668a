//! Headless operations behind the `check` and `providers` commands.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use crate::error::Result;
use crate::providers::{
    validate, DestinationDescriptor, FieldErrors, ProviderCatalog, ProviderEntry,
    ProviderFormValues,
};
use crate::remote::{spawn_check, RemoteValidator, RemoteVerdict};
use crate::types::ProviderId;
use crate::wizard::ErrorSource;

/// Outcome of validating one set of form values end to end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckReport {
    Accepted(DestinationDescriptor),
    Rejected {
        source: ErrorSource,
        errors: FieldErrors,
    },
}

/// Load raw form values from a JSON file. Missing keys take the wizard defaults.
pub fn load_values<P: AsRef<Path>>(path: P) -> anyhow::Result<ProviderFormValues> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read form values from {:?}", path.as_ref()))?;
    let values: ProviderFormValues =
        serde_json::from_str(&content).context("Failed to parse form values JSON")?;
    Ok(values)
}

/// Run schema validation against `catalog`, then the remote check, blocking
/// up to `timeout`.
pub fn check_values(
    values: &ProviderFormValues,
    catalog: &ProviderCatalog,
    validator: Arc<dyn RemoteValidator>,
    timeout: Duration,
) -> Result<CheckReport> {
    let form = match validate(values, catalog) {
        Ok(form) => form,
        Err(errors) => {
            info!(fields = errors.len(), "values rejected by schema");
            return Ok(CheckReport::Rejected {
                source: ErrorSource::Client,
                errors,
            });
        }
    };

    match spawn_check(validator, form.clone(), timeout).wait()? {
        RemoteVerdict::Accepted => Ok(CheckReport::Accepted(catalog.destination(&form))),
        RemoteVerdict::Rejected(errors) => {
            info!(fields = errors.len(), "values rejected by remote validation");
            Ok(CheckReport::Rejected {
                source: ErrorSource::Server,
                errors,
            })
        }
    }
}

/// Catalog entries as pretty JSON, optionally restricted to one provider
pub fn catalog_json(catalog: &ProviderCatalog, only: Option<ProviderId>) -> Result<String> {
    let entries: Vec<&ProviderEntry> = catalog
        .providers()
        .iter()
        .filter(|p| only.is_none_or(|wanted| wanted == **p))
        .filter_map(|p| catalog.entry(*p))
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MockBackend;
    use crate::types::FieldName;

    fn values(provider: &str, bucket: &str) -> ProviderFormValues {
        ProviderFormValues {
            provider: provider.to_string(),
            bucket: bucket.to_string(),
            key: "k".to_string(),
            secret: "s".to_string(),
            ..ProviderFormValues::default()
        }
    }

    fn check(v: &ProviderFormValues) -> CheckReport {
        let catalog = ProviderCatalog::standard().unwrap();
        check_values(
            v,
            &catalog,
            Arc::new(MockBackend::instant()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_client_rejection_reported_as_client() {
        match check(&values("gcp", "data")) {
            CheckReport::Rejected { source, errors } => {
                assert_eq!(source, ErrorSource::Client);
                assert!(errors.contains_key(&FieldName::Bucket));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_server_rejection_reported_as_server() {
        match check(&values("gcp", "bob")) {
            CheckReport::Rejected { source, .. } => assert_eq!(source, ErrorSource::Server),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_json_filter() {
        let catalog = ProviderCatalog::standard().unwrap();
        let json = catalog_json(&catalog, Some(ProviderId::Gcp)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
        assert_eq!(parsed[0]["id"], "gcp");
    }
}
