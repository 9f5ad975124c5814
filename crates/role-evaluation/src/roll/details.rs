use super::accessor::{scalar_text, FieldPath, Repeated};
use super::codes::CodeTable;
use super::format;
use serde::Serialize;
use serde_json::{Map, Value};

/// One row of the `RL0504x` value breakdown by tariff and use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueBreakdown {
    pub tariff_code: String,
    pub tariff_number: String,
    pub use_code: String,
    pub value: String,
    pub type_code: String,
    pub type_label: String,
    pub percentage: String,
}

/// `RLZU1007x` dwelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DwellingDetail {
    pub number: String,
    pub area: String,
}

/// `RLZU1008x` land parcel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandDetail {
    pub number: String,
    pub frontage: String,
    pub area: String,
    pub shape_code: String,
}

/// `RLZU2001x` building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingDetail {
    pub number: String,
    pub replacement_cost: String,
    pub class: String,
    pub construction_type: String,
}

fn text(entry: &Map<String, Value>, key: &str) -> String {
    entry
        .get(key)
        .and_then(scalar_text)
        .map(|value| format::sanitize_display(&value))
        .unwrap_or_default()
}

pub(crate) fn value_breakdown(section: &Value) -> Vec<ValueBreakdown> {
    Repeated::at(section, FieldPath::new(&["RL0504", "RL0504x"]))
        .objects()
        .into_iter()
        .map(|entry| {
            let type_code = text(entry, "RL0504Ex");
            ValueBreakdown {
                tariff_code: text(entry, "RL0504Ax"),
                tariff_number: text(entry, "RL0504Bx"),
                use_code: text(entry, "RL0504Cx"),
                value: format::currency(&text(entry, "RL0504Dx")),
                type_label: CodeTable::ExemptionType.translate(&type_code),
                type_code,
                percentage: text(entry, "RL0504Fx"),
            }
        })
        .collect()
}

pub(crate) fn dwellings(annex: &Value) -> Vec<DwellingDetail> {
    Repeated::at(annex, FieldPath::new(&["RLZU1007", "RLZU1007x"]))
        .objects()
        .into_iter()
        .map(|entry| DwellingDetail {
            number: text(entry, "RLZU1007Ax"),
            area: format::area(&text(entry, "RLZU1007Bx")),
        })
        .collect()
}

pub(crate) fn land_parcels(annex: &Value) -> Vec<LandDetail> {
    Repeated::at(annex, FieldPath::new(&["RLZU1008", "RLZU1008x"]))
        .objects()
        .into_iter()
        .map(|entry| LandDetail {
            number: text(entry, "RLZU1008Ax"),
            frontage: format::frontage(&text(entry, "RLZU1008Bx")),
            area: format::area(&text(entry, "RLZU1008Cx")),
            shape_code: text(entry, "RLZU1008Dx"),
        })
        .collect()
}

pub(crate) fn buildings(annex: &Value) -> Vec<BuildingDetail> {
    Repeated::at(annex, FieldPath::new(&["RLZU2001", "RLZU2001x"]))
        .objects()
        .into_iter()
        .map(|entry| BuildingDetail {
            number: text(entry, "RLZU2001Ax"),
            replacement_cost: format::currency(&text(entry, "RLZU2001Bx")),
            class: text(entry, "RLZU2001Ex"),
            construction_type: text(entry, "RLZU2001Fx"),
        })
        .collect()
}
