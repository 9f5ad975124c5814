//! Normalization of raw assessment-roll documents (`RLUEx` schema) into
//! display-ready property projections.

pub mod accessor;
pub mod address;
pub mod codes;
pub mod details;
pub mod fields;
pub mod format;
pub mod handoff;
pub mod owners;
pub mod projector;

pub use address::{compose, format_street_name, ComposedAddress, MailingAddress};
pub use codes::{translate, CodeTable, UnknownCodeTable};
pub use details::{BuildingDetail, DwellingDetail, LandDetail, ValueBreakdown};
pub use fields::{FieldGroup, FieldKind, FieldSpec, PROPERTY_FIELDS};
pub use handoff::{write_csv, PropertyHandoff};
pub use owners::{Owner, OwnerRoster};
pub use projector::{NormalizedProperty, PropertyProjector};

use serde_json::Value;

/// Structural problem found while projecting a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectionError {
    #[error("roll document must be a JSON object, found {found}")]
    NotADocument { found: &'static str },
    #[error("malformed {path}: expected {expected}, found {found}")]
    MalformedShape {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Projects `record` for the selected `municipality`.
///
/// Never fails; see [`PropertyProjector::project`].
pub fn project(record: &Value, municipality: &str) -> NormalizedProperty {
    PropertyProjector::new(municipality).project(record)
}
