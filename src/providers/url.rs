//! Destination locator and descriptor construction.
//!
//! This is a cosmetic transform, not a URI builder: placeholders are replaced
//! literally and nothing is percent-encoded.

use serde::Serialize;

use super::schema::ValidatedForm;
use crate::error::Result;

/// Trim surrounding whitespace and strip any leading `/` characters.
pub fn normalize_path(raw: &str) -> &str {
    raw.trim().trim_start_matches('/')
}

/// Build the destination locator for a validated form from its provider's
/// URL template.
///
/// `[bucket]` is substituted with the trimmed bucket, `[region]` with the
/// AWS region (empty for other providers), then `/<path>` is appended when
/// the normalized path is non-empty.
pub fn build_destination_url(form: &ValidatedForm, template: &str) -> String {
    let path = normalize_path(form.path());
    let base = template
        .replacen("[bucket]", form.bucket().trim(), 1)
        .replacen("[region]", form.url_region(), 1);

    if path.is_empty() {
        base
    } else {
        format!("{}/{}", base, path)
    }
}

/// Locator plus credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    pub url: String,
    pub key: String,
    pub secret: String,
}

/// Output artifact shown after a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationDescriptor {
    pub destination: Destination,
}

impl DestinationDescriptor {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Two-space indented JSON, as displayed under the form
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Wrap the destination URL with the raw key and secret.
pub fn build_destination_json(form: &ValidatedForm, template: &str) -> DestinationDescriptor {
    DestinationDescriptor {
        destination: Destination {
            url: build_destination_url(form, template),
            key: form.key().to_string(),
            secret: form.secret().to_string(),
        },
    }
}
