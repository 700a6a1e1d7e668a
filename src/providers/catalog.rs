//! Provider catalog
//!
//! Static registry of the supported storage providers: display label, icon
//! glyph, URL template, region list and the ordered field descriptors the
//! form renderer consumes. The catalog is built once at startup and is
//! read-only afterwards.
//!
//! # Invariants
//!
//! - Every provider's field list starts with the injected provider selector.
//! - No definition may declare a `provider` field itself; construction fails
//!   with [`WizardError::Config`] instead of deferring the defect to runtime.
//! - Region lists are non-empty and free of duplicate values.
//! - A provider that requires a region declares a region list, and its
//!   region select offers exactly that list.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::debug;

use super::regions::AWS_REGIONS;
use super::schema::ValidatedForm;
use super::url::{build_destination_json, DestinationDescriptor};
use crate::error::{Result, WizardError};
use crate::types::{ColSpan, FieldKind, FieldName, ProviderId};

/// One choice of a select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Static description of one form input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldConfig {
    pub name: FieldName,
    pub label: String,
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    pub col_span: ColSpan,
}

impl FieldConfig {
    /// Create a plain text field spanning one column
    pub fn text(name: FieldName, label: &str) -> Self {
        Self {
            name,
            label: label.to_string(),
            kind: FieldKind::Text,
            placeholder: None,
            options: Vec::new(),
            col_span: ColSpan::One,
        }
    }

    /// Create a masked text field spanning one column
    pub fn secret(name: FieldName, label: &str) -> Self {
        Self {
            kind: FieldKind::Secret,
            ..Self::text(name, label)
        }
    }

    /// Create a select field over `options`
    pub fn select(name: FieldName, label: &str, options: Vec<SelectOption>) -> Self {
        Self {
            kind: FieldKind::Select,
            options,
            ..Self::text(name, label)
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn with_span(mut self, span: ColSpan) -> Self {
        self.col_span = span;
        self
    }
}

/// Hand-authored provider definition, before the provider selector is injected
#[derive(Debug, Clone)]
pub struct ProviderDefinition {
    pub id: ProviderId,
    pub icon: &'static str,
    pub url_template: &'static str,
    /// Fixed region list, `None` when the provider takes no region choice
    pub regions: Option<Vec<SelectOption>>,
    pub fields: Vec<FieldConfig>,
}

/// Catalog entry with the complete, render-ready field list
#[derive(Debug, Clone, Serialize)]
pub struct ProviderEntry {
    pub id: ProviderId,
    pub label: &'static str,
    pub icon: &'static str,
    pub url_template: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<SelectOption>,
    pub fields: Vec<FieldConfig>,
}

/// Read-only provider registry
#[derive(Debug, Clone)]
pub struct ProviderCatalog {
    order: Vec<ProviderId>,
    entries: HashMap<ProviderId, ProviderEntry>,
}

/// Options of the provider selector, one per known provider
pub fn provider_options() -> Vec<SelectOption> {
    ProviderId::iter()
        .map(|p| SelectOption::new(&p.to_string(), p.label()))
        .collect()
}

fn provider_field() -> FieldConfig {
    FieldConfig::select(FieldName::Provider, "Choose Provider", provider_options())
        .with_span(ColSpan::Two)
}

/// Prepend the provider selector to a hand-authored field list and fill
/// the region select from the provider's region list.
fn with_provider(
    id: ProviderId,
    fields: Vec<FieldConfig>,
    regions: &[SelectOption],
) -> Result<Vec<FieldConfig>> {
    if fields.iter().any(|f| f.name == FieldName::Provider) {
        return Err(WizardError::config(format!(
            "{}: do not include the \"provider\" field manually; it is injected by the catalog",
            id
        )));
    }
    let mut all = Vec::with_capacity(fields.len() + 1);
    all.push(provider_field());
    for mut field in fields {
        if field.name == FieldName::Region {
            if regions.is_empty() {
                return Err(WizardError::config(format!(
                    "{}: region field declared without a region list",
                    id
                )));
            }
            field.options = regions.to_vec();
        }
        all.push(field);
    }
    Ok(all)
}

fn check_regions(id: ProviderId, regions: &[SelectOption]) -> Result<()> {
    if regions.is_empty() {
        return Err(WizardError::config(format!("{}: region list is empty", id)));
    }
    let mut seen = HashSet::new();
    for region in regions {
        if !seen.insert(region.value.as_str()) {
            return Err(WizardError::config(format!(
                "{}: duplicate region \"{}\"",
                id, region.value
            )));
        }
    }
    Ok(())
}

impl ProviderCatalog {
    /// Build a catalog from hand-authored definitions.
    ///
    /// Fails on a manually declared provider field, a duplicated provider,
    /// or an empty / non-unique region list.
    pub fn from_definitions(definitions: Vec<ProviderDefinition>) -> Result<Self> {
        let mut order = Vec::with_capacity(definitions.len());
        let mut entries = HashMap::with_capacity(definitions.len());

        for def in definitions {
            if entries.contains_key(&def.id) {
                return Err(WizardError::config(format!(
                    "{}: provider defined more than once",
                    def.id
                )));
            }
            let regions = match def.regions {
                Some(regions) => {
                    check_regions(def.id, &regions)?;
                    regions
                }
                None if def.id.requires_region() => {
                    return Err(WizardError::config(format!(
                        "{}: provider requires a region list",
                        def.id
                    )));
                }
                None => Vec::new(),
            };
            let fields = with_provider(def.id, def.fields, &regions)?;
            debug!(provider = %def.id, fields = fields.len(), "registered provider");

            order.push(def.id);
            entries.insert(
                def.id,
                ProviderEntry {
                    id: def.id,
                    label: def.id.label(),
                    icon: def.icon,
                    url_template: def.url_template,
                    regions,
                    fields,
                },
            );
        }

        Ok(Self { order, entries })
    }

    /// Build the built-in AWS / Google Cloud catalog.
    pub fn standard() -> Result<Self> {
        Self::from_definitions(standard_definitions())
    }

    /// Providers in declaration order
    pub fn providers(&self) -> &[ProviderId] {
        &self.order
    }

    pub fn entry(&self, provider: ProviderId) -> Option<&ProviderEntry> {
        self.entries.get(&provider)
    }

    /// Ordered field descriptors, provider selector first.
    pub fn fields(&self, provider: ProviderId) -> &[FieldConfig] {
        self.entry(provider)
            .map(|e| e.fields.as_slice())
            .unwrap_or(&[])
    }

    /// Descriptor of a single field, if the provider shows it
    pub fn field(&self, provider: ProviderId, name: FieldName) -> Option<&FieldConfig> {
        self.fields(provider).iter().find(|f| f.name == name)
    }

    /// Destination URL template with literal `[bucket]` and `[region]` placeholders.
    pub fn url_template(&self, provider: ProviderId) -> &'static str {
        self.entry(provider).map(|e| e.url_template).unwrap_or("")
    }

    pub fn label(&self, provider: ProviderId) -> &'static str {
        provider.label()
    }

    pub fn icon(&self, provider: ProviderId) -> &'static str {
        self.entry(provider).map(|e| e.icon).unwrap_or("")
    }

    /// Fixed region options; empty for providers without a region list
    pub fn regions(&self, provider: ProviderId) -> &[SelectOption] {
        self.entry(provider)
            .map(|e| e.regions.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `value` is one of the provider's listed regions
    pub fn has_region(&self, provider: ProviderId, value: &str) -> bool {
        self.regions(provider).iter().any(|r| r.value == value)
    }

    /// Destination descriptor for a validated form, built from this
    /// catalog's URL template.
    pub fn destination(&self, form: &ValidatedForm) -> DestinationDescriptor {
        build_destination_json(form, self.url_template(form.provider()))
    }
}

fn aws_region_options() -> Vec<SelectOption> {
    AWS_REGIONS
        .iter()
        .map(|(value, label)| SelectOption::new(value, label))
        .collect()
}

/// Built-in provider definitions
pub fn standard_definitions() -> Vec<ProviderDefinition> {
    vec![
        ProviderDefinition {
            id: ProviderId::Aws,
            icon: "◆",
            url_template: "s3://s3.[region].amazonaws.com/[bucket]",
            regions: Some(aws_region_options()),
            fields: vec![
                FieldConfig::text(FieldName::Bucket, "Bucket Name"),
                FieldConfig::select(FieldName::Region, "Region Name", Vec::new()),
                FieldConfig::text(FieldName::Path, "Path")
                    .with_placeholder("folder/output.mp4")
                    .with_span(ColSpan::Two),
                FieldConfig::text(FieldName::Key, "Access Key ID"),
                FieldConfig::secret(FieldName::Secret, "Secret Access Key"),
            ],
        },
        ProviderDefinition {
            id: ProviderId::Gcp,
            icon: "●",
            url_template: "s3://storage.googleapis.com/[bucket]",
            regions: None,
            fields: vec![
                FieldConfig::text(FieldName::Bucket, "Bucket Name").with_span(ColSpan::Two),
                FieldConfig::text(FieldName::Path, "Path")
                    .with_placeholder("folder/output.mp4")
                    .with_span(ColSpan::Two),
                FieldConfig::text(FieldName::Key, "Access Key ID"),
                FieldConfig::secret(FieldName::Secret, "Secret Access Key"),
            ],
        },
    ]
}
