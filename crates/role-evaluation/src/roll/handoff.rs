use super::projector::NormalizedProperty;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Minimal subset of a projection passed to downstream workflows.
///
/// Built purely by field selection; nothing is recomputed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyHandoff {
    pub id: String,
    pub full_address: String,
    pub owner_name: String,
    pub assessed_value: String,
    pub postal_code: String,
    pub matricule: String,
}

impl From<&NormalizedProperty> for PropertyHandoff {
    fn from(property: &NormalizedProperty) -> Self {
        Self {
            id: property.id.clone(),
            full_address: property.full_address.clone(),
            owner_name: property.field("rl0201Ax").to_string(),
            assessed_value: property.field("rl0404A").to_string(),
            postal_code: property.field("postalCode").to_string(),
            matricule: property.field("rl0106A").to_string(),
        }
    }
}

impl PropertyHandoff {
    /// String-encoded form for cross-boundary hand-off.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(encoded: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(encoded)
    }
}

/// Writes hand-offs as CSV with a camelCase header row.
pub fn write_csv<W: Write>(writer: W, handoffs: &[PropertyHandoff]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for handoff in handoffs {
        writer.serialize(handoff)?;
    }
    writer.flush()?;
    Ok(())
}
