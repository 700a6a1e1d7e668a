//! Provider-aware form schema
//!
//! Raw input arrives as [`ProviderFormValues`]; [`validate`] turns it into a
//! [`ValidatedForm`], a tagged union whose variant is chosen by the provider
//! field, or returns one message per offending field.
//!
//! The "no letter a" bucket rule is demo policy carried over for
//! compatibility, not a real bucket naming constraint.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::catalog::ProviderCatalog;
use super::regions::DEFAULT_AWS_REGION;
use crate::types::{FieldName, ProviderId};

pub const MSG_PROVIDER_INVALID: &str = "Provider must be one of: aws, gcp";
pub const MSG_BUCKET_REQUIRED: &str = "Bucket is required";
pub const MSG_BUCKET_LETTER_A: &str = "Bucket cannot contain letter \"a\" (demo)";
pub const MSG_KEY_REQUIRED: &str = "Access Key ID is required";
pub const MSG_SECRET_REQUIRED: &str = "Secret Access Key is required";
pub const MSG_REGION_REQUIRED: &str = "Region is required";

/// Field → message, at most one message per field
pub type FieldErrors = BTreeMap<FieldName, String>;

/// Raw, unvalidated form input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderFormValues {
    pub provider: String,
    pub bucket: String,
    pub path: String,
    pub region: String,
    pub key: String,
    pub secret: String,
}

impl Default for ProviderFormValues {
    fn default() -> Self {
        Self {
            provider: ProviderId::Aws.to_string(),
            bucket: String::new(),
            path: String::new(),
            region: DEFAULT_AWS_REGION.to_string(),
            key: String::new(),
            secret: String::new(),
        }
    }
}

impl ProviderFormValues {
    /// Parsed provider, `None` unless the raw value is exactly a known id
    pub fn provider_id(&self) -> Option<ProviderId> {
        ProviderId::from_str(&self.provider).ok()
    }

    pub fn get(&self, name: FieldName) -> &str {
        match name {
            FieldName::Provider => &self.provider,
            FieldName::Bucket => &self.bucket,
            FieldName::Path => &self.path,
            FieldName::Region => &self.region,
            FieldName::Key => &self.key,
            FieldName::Secret => &self.secret,
        }
    }

    pub fn set(&mut self, name: FieldName, value: impl Into<String>) {
        let slot = match name {
            FieldName::Provider => &mut self.provider,
            FieldName::Bucket => &mut self.bucket,
            FieldName::Path => &mut self.path,
            FieldName::Region => &mut self.region,
            FieldName::Key => &mut self.key,
            FieldName::Secret => &mut self.secret,
        };
        *slot = value.into();
    }
}

/// Input that fully conforms to its provider's schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedForm {
    Aws {
        bucket: String,
        path: String,
        /// Always one of the fixed AWS region codes
        region: String,
        key: String,
        secret: String,
    },
    Gcp {
        bucket: String,
        path: String,
        region: Option<String>,
        key: String,
        secret: String,
    },
}

impl ValidatedForm {
    pub fn provider(&self) -> ProviderId {
        match self {
            Self::Aws { .. } => ProviderId::Aws,
            Self::Gcp { .. } => ProviderId::Gcp,
        }
    }

    pub fn bucket(&self) -> &str {
        match self {
            Self::Aws { bucket, .. } | Self::Gcp { bucket, .. } => bucket,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Aws { path, .. } | Self::Gcp { path, .. } => path,
        }
    }

    /// Region used in the destination URL; only AWS contributes one
    pub fn url_region(&self) -> &str {
        match self {
            Self::Aws { region, .. } => region,
            Self::Gcp { .. } => "",
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Aws { key, .. } | Self::Gcp { key, .. } => key,
        }
    }

    pub fn secret(&self) -> &str {
        match self {
            Self::Aws { secret, .. } | Self::Gcp { secret, .. } => secret,
        }
    }
}

fn check_bucket(bucket: &str) -> Option<&'static str> {
    if bucket.is_empty() {
        Some(MSG_BUCKET_REQUIRED)
    } else if bucket.chars().any(|c| c == 'a' || c == 'A') {
        Some(MSG_BUCKET_LETTER_A)
    } else {
        None
    }
}

/// Validate raw input against the schema selected by its provider field.
///
/// The provider must be registered in `catalog`, and a region-bearing
/// provider's region must be one the catalog lists for it. Total: either
/// every rule passes, or the error map has exactly one message for each
/// offending field.
pub fn validate(
    values: &ProviderFormValues,
    catalog: &ProviderCatalog,
) -> Result<ValidatedForm, FieldErrors> {
    let mut errors = FieldErrors::new();
    let provider = values
        .provider_id()
        .filter(|p| catalog.entry(*p).is_some());

    if provider.is_none() {
        errors.insert(FieldName::Provider, MSG_PROVIDER_INVALID.to_string());
    }
    if let Some(msg) = check_bucket(&values.bucket) {
        errors.insert(FieldName::Bucket, msg.to_string());
    }
    if values.key.is_empty() {
        errors.insert(FieldName::Key, MSG_KEY_REQUIRED.to_string());
    }
    if values.secret.is_empty() {
        errors.insert(FieldName::Secret, MSG_SECRET_REQUIRED.to_string());
    }
    if provider.is_some_and(|p| p.requires_region() && !catalog.has_region(p, &values.region)) {
        errors.insert(FieldName::Region, MSG_REGION_REQUIRED.to_string());
    }

    let provider = match provider {
        Some(p) if errors.is_empty() => p,
        _ => return Err(errors),
    };

    let form = match provider {
        ProviderId::Aws => ValidatedForm::Aws {
            bucket: values.bucket.clone(),
            path: values.path.clone(),
            region: values.region.clone(),
            key: values.key.clone(),
            secret: values.secret.clone(),
        },
        ProviderId::Gcp => ValidatedForm::Gcp {
            bucket: values.bucket.clone(),
            path: values.path.clone(),
            region: Some(values.region.clone()).filter(|r| !r.is_empty()),
            key: values.key.clone(),
            secret: values.secret.clone(),
        },
    };
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::catalog::{standard_definitions, SelectOption};

    fn catalog() -> ProviderCatalog {
        ProviderCatalog::standard().unwrap()
    }

    fn aws_values() -> ProviderFormValues {
        ProviderFormValues {
            provider: "aws".to_string(),
            bucket: "mystore".to_string(),
            path: "videos/out.mp4".to_string(),
            region: "us-west-2".to_string(),
            key: "AKIA...".to_string(),
            secret: "xxxx".to_string(),
        }
    }

    #[test]
    fn test_valid_aws_form() {
        let form = validate(&aws_values(), &catalog()).unwrap();
        assert_eq!(form.provider(), ProviderId::Aws);
        assert_eq!(form.url_region(), "us-west-2");
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let values = ProviderFormValues {
            region: String::new(),
            ..ProviderFormValues::default()
        };
        let errors = validate(&values, &catalog()).unwrap_err();
        assert_eq!(errors.get(&FieldName::Bucket).unwrap(), MSG_BUCKET_REQUIRED);
        assert_eq!(errors.get(&FieldName::Key).unwrap(), MSG_KEY_REQUIRED);
        assert_eq!(errors.get(&FieldName::Secret).unwrap(), MSG_SECRET_REQUIRED);
        assert_eq!(errors.get(&FieldName::Region).unwrap(), MSG_REGION_REQUIRED);
        assert!(!errors.contains_key(&FieldName::Path));
    }

    #[test]
    fn test_bucket_letter_a_rejected_any_case() {
        for bucket in ["data", "DATA", "xAx"] {
            let values = ProviderFormValues {
                bucket: bucket.to_string(),
                ..aws_values()
            };
            let errors = validate(&values, &catalog()).unwrap_err();
            assert_eq!(errors.get(&FieldName::Bucket).unwrap(), MSG_BUCKET_LETTER_A);
        }
    }

    #[test]
    fn test_unknown_aws_region_rejected() {
        let values = ProviderFormValues {
            region: "moon-1".to_string(),
            ..aws_values()
        };
        let errors = validate(&values, &catalog()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(&FieldName::Region));
    }

    #[test]
    fn test_gcp_region_is_free_form() {
        let mut values = ProviderFormValues {
            provider: "gcp".to_string(),
            region: String::new(),
            ..aws_values()
        };
        let form = validate(&values, &catalog()).unwrap();
        assert_eq!(
            form,
            ValidatedForm::Gcp {
                bucket: "mystore".to_string(),
                path: "videos/out.mp4".to_string(),
                region: None,
                key: "AKIA...".to_string(),
                secret: "xxxx".to_string(),
            }
        );

        values.region = "anything goes".to_string();
        assert!(validate(&values, &catalog()).is_ok());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let values = ProviderFormValues {
            provider: "azure".to_string(),
            ..aws_values()
        };
        let errors = validate(&values, &catalog()).unwrap_err();
        assert_eq!(errors.get(&FieldName::Provider).unwrap(), MSG_PROVIDER_INVALID);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_get_and_set_by_name() {
        let mut values = ProviderFormValues::default();
        values.set(FieldName::Key, "k1");
        assert_eq!(values.get(FieldName::Key), "k1");
        assert_eq!(values.get(FieldName::Region), DEFAULT_AWS_REGION);
    }

    #[test]
    fn test_values_deserialize_with_missing_fields() {
        let values: ProviderFormValues =
            serde_json::from_str(r#"{"provider":"gcp","bucket":"logs"}"#).unwrap();
        assert_eq!(values.provider_id(), Some(ProviderId::Gcp));
        assert_eq!(values.bucket, "logs");
        assert!(values.key.is_empty());
    }

    #[test]
    fn test_provider_id_must_match_exactly() {
        for raw in [" aws ", "AWS", "gcp\n"] {
            let values = ProviderFormValues {
                provider: raw.to_string(),
                ..aws_values()
            };
            assert_eq!(values.provider_id(), None);
            let errors = validate(&values, &catalog()).unwrap_err();
            assert_eq!(errors.get(&FieldName::Provider).unwrap(), MSG_PROVIDER_INVALID);
        }
    }

    #[test]
    fn test_region_checked_against_catalog_list() {
        let mut defs = standard_definitions();
        defs[0].regions = Some(vec![SelectOption::new("eu-west-1", "Europe (Ireland)")]);
        let narrow = ProviderCatalog::from_definitions(defs).unwrap();

        let errors = validate(&aws_values(), &narrow).unwrap_err();
        assert_eq!(errors.get(&FieldName::Region).unwrap(), MSG_REGION_REQUIRED);

        let values = ProviderFormValues {
            region: "eu-west-1".to_string(),
            ..aws_values()
        };
        assert!(validate(&values, &narrow).is_ok());
    }

    #[test]
    fn test_provider_missing_from_catalog_rejected() {
        let defs = standard_definitions()
            .into_iter()
            .filter(|d| d.id == ProviderId::Aws)
            .collect();
        let aws_only = ProviderCatalog::from_definitions(defs).unwrap();
        let values = ProviderFormValues {
            provider: "gcp".to_string(),
            ..aws_values()
        };
        let errors = validate(&values, &aws_only).unwrap_err();
        assert_eq!(errors.get(&FieldName::Provider).unwrap(), MSG_PROVIDER_INVALID);
    }
}
