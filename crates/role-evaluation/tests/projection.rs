use role_evaluation::config::ProjectionConfig;
use role_evaluation::roll::{format, project, PropertyHandoff, PropertyProjector};
use serde_json::Value;

const KIRKLAND_HYMUS: &str = include_str!("fixtures/kirkland_hymus.json");

fn fixture() -> Value {
    serde_json::from_str(KIRKLAND_HYMUS).expect("fixture is valid JSON")
}

fn assert_no_nulls_or_placeholders(value: &Value, path: &str) {
    match value {
        Value::Null => panic!("null at {path}"),
        Value::String(text) => assert!(
            !text.trim().eq_ignore_ascii_case("non disponible"),
            "placeholder at {path}"
        ),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                assert_no_nulls_or_placeholders(item, &format!("{path}[{index}]"));
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                assert_no_nulls_or_placeholders(item, &format!("{path}.{key}"));
            }
        }
        Value::Bool(_) | Value::Number(_) => {}
    }
}

#[test]
fn projects_the_kirkland_sample_document() {
    let property = project(&fixture(), "Kirkland");

    assert_eq!(property.field("rl0404A"), format::number("5429500"));
    assert_eq!(property.full_address, "17200 Boulevard HYMUS, Kirkland QC H9J 3Y8");
    assert_eq!(property.address_line1, "17200 Boulevard HYMUS");
    assert_eq!(property.address_line2, "Kirkland QC H9J 3Y8");
    assert_eq!(property.lot_number, "7634-73-2340-4");
    assert_eq!(property.id, "68151322f53a4bc552e85ed0");
    assert_eq!(property.field("rl0106A"), "10-F03220000");
    assert_eq!(property.field("rl0107A"), "0222");
}

#[test]
fn sample_document_has_one_corporate_owner() {
    let property = project(&fixture(), "Kirkland");

    assert_eq!(property.owners.len(), 1);
    assert!(!property.has_multiple_owners);

    let owner = &property.owners[0];
    assert_eq!(owner.status_label, "Personne morale");
    assert_eq!(owner.full_name, "VILLE DE KIRKLAND");
    assert_eq!(owner.registration_date_formatted, "12/05/2001");
    assert_eq!(owner.formatted_address, "17200 Boulevard HYMUS, KIRKLAND QC H9J 3Y8");

    assert_eq!(property.condition_inscription, "1");
    assert_eq!(property.condition_inscription_label, "Propriétaire");
    assert!(!property.has_special_condition);
}

#[test]
fn sample_document_formats_measures_values_and_dates() {
    let property = project(&fixture(), "Kirkland");

    assert_eq!(property.field("frontage"), "77,58\u{a0}m");
    assert_eq!(property.field("landArea"), "5\u{a0}055,8\u{a0}m²");
    assert_eq!(property.field("agriculturalZoningLabel"), "Hors zone agricole");
    assert_eq!(property.field("rl0401A"), "01/07/2021");
    assert_eq!(property.field("landValue"), "1\u{a0}516\u{a0}700,00\u{a0}$");
    assert_eq!(property.field("buildingValue"), "3\u{a0}912\u{a0}800,00\u{a0}$");
    assert_eq!(property.field("previousValue"), "4\u{a0}615\u{a0}800,00\u{a0}$");
    assert_eq!(property.field("vacantLandValue"), "");
    assert_eq!(property.field("rl0604A"), "14/09/2023");
    assert_eq!(property.field("rl0601A"), "Côté");
    assert_eq!(property.field("rlzg0002"), "10/09/2022");
    assert_eq!(property.field("rlm02A"), "2023");
}

#[test]
fn sample_document_carries_annex_details() {
    let property = project(&fixture(), "Kirkland");

    assert_eq!(property.field("primaryUseLabel"), "Résidentiel");
    assert_eq!(property.field("rlzu3101"), "14/09/2022");
    assert_eq!(property.field("municipalLandValue"), "3\u{a0}402\u{a0}400,00\u{a0}$");
    assert_eq!(property.field("unitRollValue"), "5\u{a0}085\u{a0}386,00\u{a0}$");

    assert_eq!(property.rl0504_details.len(), 1);
    assert_eq!(property.rl0504_details[0].type_label, "Terrain");
    assert_eq!(property.rlzu1007_details[0].area, "4\u{a0}640\u{a0}m²");
    assert_eq!(property.rlzu1008_details[0].shape_code, "R");
    assert_eq!(property.rlzu2001_details[0].replacement_cost, "4\u{a0}083\u{a0}638,00\u{a0}$");
}

#[test]
fn serialized_projection_is_free_of_nulls_and_placeholders() {
    let property = project(&fixture(), "Kirkland");
    let value = serde_json::to_value(&property).expect("projection serializes");
    assert_no_nulls_or_placeholders(&value, "$");
    assert_eq!(value["rl0404A"], Value::String(format::number("5429500")));
}

#[test]
fn handoff_is_a_field_selection_of_the_projection() {
    let projector = PropertyProjector::from_config(&ProjectionConfig::default());
    let property = projector.project(&fixture());
    let handoff = PropertyHandoff::from(&property);

    assert_eq!(handoff.id, property.id);
    assert_eq!(handoff.full_address, property.full_address);
    assert_eq!(handoff.owner_name, "VILLE DE KIRKLAND");
    assert_eq!(handoff.assessed_value, property.field("rl0404A"));
    assert_eq!(handoff.postal_code, "H9J 3Y8");
    assert_eq!(handoff.matricule, "10-F03220000");

    let encoded = handoff.to_json().expect("encodes");
    let decoded = PropertyHandoff::from_json(&encoded).expect("decodes");
    assert_eq!(decoded, handoff);
}

#[test]
fn projection_is_deterministic() {
    let record = fixture();
    assert_eq!(project(&record, "Kirkland"), project(&record, "Kirkland"));
}
