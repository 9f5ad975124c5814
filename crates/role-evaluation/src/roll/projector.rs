use super::accessor::{get_or_empty, kind_of, resolve, FieldPath};
use super::address::{self, join_non_empty};
use super::details::{self, BuildingDetail, DwellingDetail, LandDetail, ValueBreakdown};
use super::fields::{FieldGroup, PROPERTY_FIELDS};
use super::format::sanitize_display;
use super::owners::{self, Owner};
use super::ProjectionError;
use crate::config::ProjectionConfig;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

static MISSING: Value = Value::Null;

const OWNER_FIELD: FieldPath<'static> = FieldPath::new(&["RLUEx", "RL0201", "RL0201x"]);
const LOT_NUMBER_KEYS: [&str; 4] = ["rl0104A", "rl0104B", "rl0104C", "rl0104D"];

/// Flat, display-ready projection of one roll document.
///
/// Every scalar is either a formatted value or the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProperty {
    pub id: String,
    #[serde(flatten)]
    fields: BTreeMap<&'static str, String>,
    pub full_address: String,
    pub address_line1: String,
    pub address_line2: String,
    pub lot_number: String,
    pub owners: Vec<Owner>,
    pub has_multiple_owners: bool,
    pub has_two_owners: bool,
    pub condition_inscription: String,
    pub condition_inscription_label: String,
    pub has_special_condition: bool,
    pub rl0504_details: Vec<ValueBreakdown>,
    pub rlzu1007_details: Vec<DwellingDetail>,
    pub rlzu1008_details: Vec<LandDetail>,
    pub rlzu2001_details: Vec<BuildingDetail>,
}

impl NormalizedProperty {
    /// A projection with every catalogued field present and blank.
    pub fn empty() -> Self {
        Self {
            id: String::new(),
            fields: PROPERTY_FIELDS
                .iter()
                .map(|spec| (spec.key, String::new()))
                .collect(),
            full_address: String::new(),
            address_line1: String::new(),
            address_line2: String::new(),
            lot_number: String::new(),
            owners: Vec::new(),
            has_multiple_owners: false,
            has_two_owners: false,
            condition_inscription: String::new(),
            condition_inscription_label: String::new(),
            has_special_condition: false,
            rl0504_details: Vec::new(),
            rlzu1007_details: Vec::new(),
            rlzu1008_details: Vec::new(),
            rlzu2001_details: Vec::new(),
        }
    }

    /// Scalar display field by its serialized name; unknown keys read as "".
    pub fn field(&self, key: &str) -> &str {
        match key {
            "id" => &self.id,
            "fullAddress" => &self.full_address,
            "addressLine1" => &self.address_line1,
            "addressLine2" => &self.address_line2,
            "lotNumber" => &self.lot_number,
            "conditionInscription" => &self.condition_inscription,
            "conditionInscriptionLabel" => &self.condition_inscription_label,
            _ => self.fields.get(key).map(String::as_str).unwrap_or(""),
        }
    }

    /// Every scalar display field with its serialized name.
    pub fn scalar_fields(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        let derived = [
            ("id", self.id.as_str()),
            ("fullAddress", self.full_address.as_str()),
            ("addressLine1", self.address_line1.as_str()),
            ("addressLine2", self.address_line2.as_str()),
            ("lotNumber", self.lot_number.as_str()),
            ("conditionInscription", self.condition_inscription.as_str()),
            ("conditionInscriptionLabel", self.condition_inscription_label.as_str()),
        ];
        derived
            .into_iter()
            .chain(self.fields.iter().map(|(key, value)| (*key, value.as_str())))
    }

    fn sanitize(&mut self) {
        for value in self.fields.values_mut() {
            *value = sanitize_display(value);
        }
        for value in [
            &mut self.id,
            &mut self.full_address,
            &mut self.address_line1,
            &mut self.address_line2,
            &mut self.lot_number,
            &mut self.condition_inscription,
            &mut self.condition_inscription_label,
        ] {
            *value = sanitize_display(value);
        }
        for owner in &mut self.owners {
            owner.sanitize();
        }
    }
}

impl Default for NormalizedProperty {
    fn default() -> Self {
        Self::empty()
    }
}

/// Turns raw roll documents into [`NormalizedProperty`] values for one
/// selected municipality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyProjector {
    municipality: String,
}

impl PropertyProjector {
    pub fn new(municipality: impl Into<String>) -> Self {
        Self {
            municipality: municipality.into().trim().to_string(),
        }
    }

    pub fn from_config(config: &ProjectionConfig) -> Self {
        Self::new(config.default_municipality.clone())
    }

    pub fn municipality(&self) -> &str {
        &self.municipality
    }

    /// Projects `record`, returning a blank projection if the document
    /// cannot be read at all. Never panics on malformed data.
    pub fn project(&self, record: &Value) -> NormalizedProperty {
        match self.try_project(record) {
            Ok(property) => property,
            Err(err) => {
                error!(error = %err, "roll projection failed; returning empty property");
                NormalizedProperty::empty()
            }
        }
    }

    /// Projects `record`. Only a document root of the wrong kind is an
    /// error; malformed sections are logged and left blank.
    pub fn try_project(&self, record: &Value) -> Result<NormalizedProperty, ProjectionError> {
        if !(record.is_object() || record.is_null()) {
            return Err(ProjectionError::NotADocument {
                found: kind_of(record),
            });
        }

        let mut property = NormalizedProperty::empty();
        property.id = document_id(record);

        for group in FieldGroup::ordered() {
            match group_root(record, group) {
                Ok(root) => extract_group(root, group, &mut property.fields),
                Err(err) => warn!(
                    group = group.label(),
                    error = %err,
                    "skipping malformed field group"
                ),
            }
        }

        let composed = address::compose(
            property.field("rl0101Ax"),
            property.field("rl0101Ex"),
            property.field("rl0101Gx"),
            &self.municipality,
            property.field("postalCode"),
        );
        property.full_address = composed.full_address;
        property.address_line1 = composed.address_line1;
        property.address_line2 = composed.address_line2;

        let lot_parts = LOT_NUMBER_KEYS.map(|key| property.field(key));
        property.lot_number = join_non_empty(&lot_parts, "-");

        let roster = owners::normalize(resolve(record, OWNER_FIELD), property.field("rl0201U"));
        property.owners = roster.owners;
        property.has_multiple_owners = roster.has_multiple_owners;
        property.has_two_owners = roster.has_two_owners;
        property.condition_inscription = roster.condition_code;
        property.condition_inscription_label = roster.condition_label;
        property.has_special_condition = roster.has_special_condition;

        if let Ok(unit) = group_root(record, FieldGroup::Identification) {
            property.rl0504_details = details::value_breakdown(unit);
        }
        if let Ok(annex) = group_root(record, FieldGroup::UnitAnnex) {
            property.rlzu1007_details = details::dwellings(annex);
            property.rlzu1008_details = details::land_parcels(annex);
            property.rlzu2001_details = details::buildings(annex);
        }

        property.sanitize();

        debug!(
            matricule = property.field("rl0106A"),
            owners = property.owners.len(),
            "projected roll document"
        );
        Ok(property)
    }
}

fn group_root(record: &Value, group: FieldGroup) -> Result<&Value, ProjectionError> {
    let path = group.root();
    let Some(section) = resolve(record, path) else {
        return Ok(&MISSING);
    };

    match section {
        Value::Object(_) => Ok(section),
        Value::Array(items) if group.takes_first_entry() => {
            Ok(items.iter().find(|item| item.is_object()).unwrap_or(&MISSING))
        }
        other => Err(ProjectionError::MalformedShape {
            path: path.to_string(),
            expected: if group.takes_first_entry() {
                "object or array"
            } else {
                "object"
            },
            found: kind_of(other),
        }),
    }
}

fn extract_group(root: &Value, group: FieldGroup, fields: &mut BTreeMap<&'static str, String>) {
    for spec in PROPERTY_FIELDS.iter().filter(|spec| spec.group == group) {
        let raw = get_or_empty(root, spec.path);
        fields.insert(spec.key, spec.kind.render(&raw));
    }
}

/// `_id` as extended JSON (`{"$oid": ...}`) or a plain string.
fn document_id(record: &Value) -> String {
    match resolve(record, FieldPath::new(&["_id"])) {
        Some(Value::String(id)) => id.clone(),
        Some(id @ Value::Object(_)) => get_or_empty(id, FieldPath::new(&["$oid"])),
        _ => String::new(),
    }
}
