//! Type-safe identifiers for providers and form fields
//!
//! Stringly-typed provider ids and field names are replaced by enums that
//! provide compile-time validation and exhaustive matching. The strum
//! serializations are the wire names used in form values and JSON output.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Supported cloud storage backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProviderId {
    #[default]
    Aws,
    Gcp,
}

impl ProviderId {
    /// Human-readable provider name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Aws => "AWS",
            Self::Gcp => "Google Cloud",
        }
    }

    /// Whether the provider requires a region from a fixed list.
    pub fn requires_region(&self) -> bool {
        matches!(self, Self::Aws)
    }
}

/// Name of a form field.
///
/// Declaration order is the canonical display order of error listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldName {
    Provider,
    Bucket,
    Path,
    Region,
    Key,
    Secret,
}

/// How a field is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    /// Text whose value is masked while rendered
    Secret,
    /// One of a fixed list of options
    Select,
}

/// Layout width of a field in the two-column form grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ColSpan {
    #[default]
    One,
    Two,
}

impl From<ColSpan> for u8 {
    fn from(span: ColSpan) -> Self {
        match span {
            ColSpan::One => 1,
            ColSpan::Two => 2,
        }
    }
}

impl TryFrom<u8> for ColSpan {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(format!("column span must be 1 or 2, got {}", other)),
        }
    }
}
