use super::accessor::{get_or_empty, kind_of, FieldPath};
use super::address::{join_non_empty, MailingAddress};
use super::codes::CodeTable;
use super::format;
use super::ProjectionError;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Owner status code of a natural person; everyone else is shown by legal
/// name only.
pub const NATURAL_PERSON_STATUS: &str = "1";

/// Registration-condition code carrying no particular condition.
pub const ORDINARY_REGISTRATION_CONDITION: &str = "1";

/// One registered owner of an assessment unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub full_name: String,
    pub status_code: String,
    pub status_label: String,
    pub registration_date: String,
    pub registration_date_formatted: String,
    pub address: MailingAddress,
    pub formatted_address: String,
}

impl Owner {
    pub fn is_natural_person(&self) -> bool {
        self.status_code == NATURAL_PERSON_STATUS
    }

    pub(crate) fn sanitize(&mut self) {
        for field in [
            &mut self.id,
            &mut self.last_name,
            &mut self.first_name,
            &mut self.full_name,
            &mut self.status_code,
            &mut self.status_label,
            &mut self.registration_date,
            &mut self.registration_date_formatted,
            &mut self.formatted_address,
        ] {
            *field = format::sanitize_display(field);
        }

        let address = &mut self.address;
        for field in [
            &mut address.unstructured,
            &mut address.civic_number,
            &mut address.civic_fraction,
            &mut address.street_type_code,
            &mut address.link_code,
            &mut address.street_name,
            &mut address.cardinal_point,
            &mut address.apartment,
            &mut address.apartment_fraction,
            &mut address.municipality,
            &mut address.postal_code,
            &mut address.province,
            &mut address.country,
            &mut address.po_box,
            &mut address.postal_station,
            &mut address.complement,
        ] {
            *field = format::sanitize_display(field);
        }
    }
}

/// Result of normalizing the `RL0201x` owner field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRoster {
    pub owners: Vec<Owner>,
    pub has_multiple_owners: bool,
    pub has_two_owners: bool,
    pub condition_code: String,
    pub condition_label: String,
    pub has_special_condition: bool,
}

impl OwnerRoster {
    fn from_owners(owners: Vec<Owner>, condition_code: &str) -> Self {
        let condition_code = format::sanitize_display(condition_code);
        let count = owners.len();
        Self {
            owners,
            has_multiple_owners: count > 1,
            has_two_owners: count == 2,
            condition_label: CodeTable::RegistrationCondition.translate(&condition_code),
            has_special_condition: !condition_code.is_empty()
                && condition_code != ORDINARY_REGISTRATION_CONDITION,
            condition_code,
        }
    }

}

/// Normalizes the owner field, which the roll emits as nothing, one object or
/// a list of objects, into an ordered roster.
///
/// Never fails: null list members are skipped, malformed members are dropped
/// with a warning, and a field of the wrong kind altogether yields an empty
/// roster.
pub fn normalize(
    raw_owner_field: Option<&Value>,
    registration_condition_code: &str,
) -> OwnerRoster {
    match try_normalize(raw_owner_field) {
        Ok(owners) => OwnerRoster::from_owners(owners, registration_condition_code),
        Err(err) => {
            warn!(error = %err, "discarding malformed owner field");
            OwnerRoster::from_owners(Vec::new(), registration_condition_code)
        }
    }
}

fn try_normalize(raw_owner_field: Option<&Value>) -> Result<Vec<Owner>, ProjectionError> {
    let entries: &[Value] = match raw_owner_field {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(single @ Value::Object(_)) => std::slice::from_ref(single),
        Some(other) => {
            return Err(ProjectionError::MalformedShape {
                path: "RLUEx.RL0201.RL0201x".to_string(),
                expected: "object or array",
                found: kind_of(other),
            })
        }
    };

    let mut owners = Vec::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        match normalize_entry(position, entry) {
            Ok(Some(owner)) => owners.push(owner),
            Ok(None) => {}
            Err(err) => warn!(position, error = %err, "dropping malformed owner entry"),
        }
    }
    Ok(owners)
}

fn normalize_entry(position: usize, entry: &Value) -> Result<Option<Owner>, ProjectionError> {
    match entry {
        Value::Null => Ok(None),
        Value::Object(_) => Ok(Some(build_owner(position, entry))),
        other => Err(ProjectionError::MalformedShape {
            path: format!("RLUEx.RL0201.RL0201x[{position}]"),
            expected: "object",
            found: kind_of(other),
        }),
    }
}

fn build_owner(position: usize, entry: &Value) -> Owner {
    let field = |key: &str| format::sanitize_display(&get_or_empty(entry, FieldPath::new(&[key])));

    let last_name = field("RL0201Ax");
    let first_name = field("RL0201Bx");
    let status_code = field("RL0201Hx");
    let registration_date = field("RL0201Gx");

    let address = MailingAddress {
        unstructured: field("RL0201Cx"),
        civic_number: field("RL0201Ix"),
        civic_fraction: field("RL0201Jx"),
        street_type_code: field("RL0201Kx"),
        link_code: field("RL0201Lx"),
        street_name: field("RL0201Mx"),
        cardinal_point: field("RL0201Nx"),
        apartment: field("RL0201Ox"),
        apartment_fraction: field("RL0201Px"),
        municipality: field("RL0201Dx"),
        postal_code: field("RL0201Ex"),
        province: field("RL0201Qx"),
        country: field("RL0201Rx"),
        po_box: field("RL0201Sx"),
        postal_station: field("RL0201Tx"),
        complement: field("RL0201Fx"),
    };
    let formatted_address = address.compose().full_address;

    Owner {
        id: format!("owner_{}", position + 1),
        full_name: compose_full_name(&status_code, &first_name, &last_name),
        status_label: CodeTable::OwnerStatus.translate(&status_code),
        registration_date_formatted: format::date(&registration_date),
        last_name,
        first_name,
        status_code,
        registration_date,
        address,
        formatted_address,
    }
}

/// `"{first} {last}"` for natural persons with both parts known, otherwise
/// the legal name alone.
pub fn compose_full_name(status_code: &str, first_name: &str, last_name: &str) -> String {
    let first_name = first_name.trim();
    let last_name = last_name.trim();
    if status_code.trim() == NATURAL_PERSON_STATUS
        && !first_name.is_empty()
        && !last_name.is_empty()
    {
        return join_non_empty(&[first_name, last_name], " ");
    }
    last_name.to_string()
}
