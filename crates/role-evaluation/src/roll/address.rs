use super::codes::{capitalize, CodeTable};
use serde::Serialize;

pub const PROVINCE_ABBREVIATION: &str = "QC";

/// Canada Post style two-line address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedAddress {
    pub full_address: String,
    pub address_line1: String,
    pub address_line2: String,
}

impl ComposedAddress {
    fn from_lines(line1: String, line2: String) -> Self {
        let full_address = join_non_empty(&[line1.as_str(), line2.as_str()], ", ");
        Self {
            full_address,
            address_line1: line1,
            address_line2: line2,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.full_address.is_empty()
    }
}

/// Builds the property address from the `RL0101x` fragments.
///
/// `municipality` is the caller's selected municipality. A municipality on
/// its own is not an address: without a street line or postal code every
/// output is blank.
pub fn compose(
    civic_number: &str,
    street_type_code: &str,
    street_name: &str,
    municipality: &str,
    postal_code: &str,
) -> ComposedAddress {
    let street_type = CodeTable::StreetType.translate(street_type_code);
    let line1 = join_non_empty(&[civic_number, street_type.as_str(), street_name], " ");
    let postal_code = postal_code.trim();

    if line1.is_empty() && postal_code.is_empty() {
        return ComposedAddress::default();
    }

    let line2 = join_non_empty(&[municipality, PROVINCE_ABBREVIATION, postal_code], " ");
    ComposedAddress::from_lines(line1, line2)
}

/// Structured mailing-address fragments of an owner (`RL0201C..T`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailingAddress {
    pub unstructured: String,
    pub civic_number: String,
    pub civic_fraction: String,
    pub street_type_code: String,
    pub link_code: String,
    pub street_name: String,
    pub cardinal_point: String,
    pub apartment: String,
    pub apartment_fraction: String,
    pub municipality: String,
    pub postal_code: String,
    pub province: String,
    pub country: String,
    pub po_box: String,
    pub postal_station: String,
    pub complement: String,
}

impl MailingAddress {
    /// Best-effort rendering from whatever fragments exist.
    ///
    /// The structured street line wins over the unstructured `RL0201Cx`
    /// line, which in turn wins over a PO box. The province defaults to
    /// Quebec once a municipality or postal code is known.
    pub fn compose(&self) -> ComposedAddress {
        let line1 = self.street_line();

        let province = if self.province.trim().is_empty() {
            PROVINCE_ABBREVIATION
        } else {
            self.province.trim()
        };
        let line2 = if self.municipality.trim().is_empty() && self.postal_code.trim().is_empty()
        {
            String::new()
        } else {
            join_non_empty(&[self.municipality.as_str(), province, self.postal_code.as_str()], " ")
        };

        let mut address = ComposedAddress::from_lines(line1, line2);
        let country = self.country.trim();
        if !country.is_empty() && !country.eq_ignore_ascii_case("canada") {
            address.full_address = join_non_empty(&[address.full_address.as_str(), country], ", ");
        }
        address
    }

    fn street_line(&self) -> String {
        let civic = join_non_empty(
            &[self.civic_number.as_str(), self.civic_fraction.as_str()],
            " ",
        );
        let unit = join_non_empty(
            &[self.apartment.as_str(), self.apartment_fraction.as_str()],
            " ",
        );
        let civic = match (unit.is_empty(), civic.is_empty()) {
            (false, false) => format!("{unit}-{civic}"),
            (false, true) => format!("app. {unit}"),
            _ => civic,
        };

        let street_type = CodeTable::StreetType.translate(&self.street_type_code);
        let structured = join_non_empty(
            &[
                civic.as_str(),
                street_type.as_str(),
                self.link_code.as_str(),
                self.street_name.as_str(),
                self.cardinal_point.as_str(),
            ],
            " ",
        );
        if !structured.is_empty() && !self.street_name.trim().is_empty() {
            return structured;
        }

        let unstructured = self.unstructured.trim();
        if !unstructured.is_empty() {
            return unstructured.to_string();
        }

        if !self.po_box.trim().is_empty() {
            let station = self.postal_station.trim();
            let po_box = format!("C.P. {}", self.po_box.trim());
            if station.is_empty() {
                return po_box;
            }
            return format!("{po_box}, succ. {station}");
        }

        structured
    }
}

/// Turns an autocomplete label such as `HYMUS (boulevard)` into
/// `Boulevard HYMUS`. Labels without a parenthesised type are kept.
pub fn format_street_name(label: &str) -> String {
    let trimmed = label.trim();
    let Some((name, rest)) = trimmed.split_once('(') else {
        return trimmed.to_string();
    };
    let Some((street_type, _)) = rest.split_once(')') else {
        return trimmed.to_string();
    };

    let street_type = capitalize(&CodeTable::StreetType.translate(street_type));
    join_non_empty(&[street_type.as_str(), name], " ")
}

pub(crate) fn join_non_empty(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_builds_canada_post_lines() {
        let address = compose("17200", "BO", "HYMUS", "Kirkland", "H9J 3Y8");
        assert_eq!(address.full_address, "17200 Boulevard HYMUS, Kirkland QC H9J 3Y8");
        assert_eq!(address.address_line1, "17200 Boulevard HYMUS");
        assert_eq!(address.address_line2, "Kirkland QC H9J 3Y8");
    }

    #[test]
    fn compose_with_nothing_is_blank() {
        assert_eq!(compose("", "", "", "", ""), ComposedAddress::default());
        assert_eq!(compose("", "", "", "Kirkland", ""), ComposedAddress::default());
    }

    #[test]
    fn compose_skips_missing_fragments_without_stray_spaces() {
        let address = compose("17200", "", "HYMUS", "", "H9J 3Y8");
        assert_eq!(address.full_address, "17200 HYMUS, QC H9J 3Y8");

        let address = compose("", "", "", "Kirkland", "H9J 3Y8");
        assert_eq!(address.address_line1, "");
        assert_eq!(address.full_address, "Kirkland QC H9J 3Y8");
    }

    #[test]
    fn mailing_address_prefers_structured_fields() {
        let mailing = MailingAddress {
            unstructured: "17200 BOUL HYMUS".to_string(),
            civic_number: "17200".to_string(),
            street_type_code: "BO".to_string(),
            street_name: "HYMUS".to_string(),
            municipality: "KIRKLAND".to_string(),
            postal_code: "H9J 3Y8".to_string(),
            ..MailingAddress::default()
        };
        let address = mailing.compose();
        assert_eq!(address.full_address, "17200 Boulevard HYMUS, KIRKLAND QC H9J 3Y8");
    }

    #[test]
    fn mailing_address_falls_back_to_unstructured_line() {
        let mailing = MailingAddress {
            unstructured: "17200 BOUL HYMUS".to_string(),
            municipality: "KIRKLAND".to_string(),
            ..MailingAddress::default()
        };
        assert_eq!(mailing.compose().full_address, "17200 BOUL HYMUS, KIRKLAND QC");
    }

    #[test]
    fn mailing_address_renders_units_po_boxes_and_foreign_countries() {
        let unit = MailingAddress {
            civic_number: "55".to_string(),
            apartment: "4".to_string(),
            street_type_code: "RU".to_string(),
            street_name: "PRINCIPALE".to_string(),
            ..MailingAddress::default()
        };
        assert_eq!(unit.compose().full_address, "4-55 Rue PRINCIPALE");

        let po_box = MailingAddress {
            po_box: "120".to_string(),
            postal_station: "A".to_string(),
            municipality: "OTTAWA".to_string(),
            province: "ON".to_string(),
            country: "Canada".to_string(),
            ..MailingAddress::default()
        };
        assert_eq!(po_box.compose().full_address, "C.P. 120, succ. A, OTTAWA ON");

        let abroad = MailingAddress {
            unstructured: "12 RUE DE RIVOLI".to_string(),
            municipality: "PARIS".to_string(),
            province: "IDF".to_string(),
            country: "France".to_string(),
            ..MailingAddress::default()
        };
        assert_eq!(abroad.compose().full_address, "12 RUE DE RIVOLI, PARIS IDF, France");
    }

    #[test]
    fn mailing_address_with_no_fragments_is_blank() {
        assert!(MailingAddress::default().compose().is_empty());
    }

    #[test]
    fn street_name_label_moves_type_first() {
        assert_eq!(format_street_name("HYMUS (boulevard)"), "Boulevard HYMUS");
        assert_eq!(format_street_name("HYMUS (BO)"), "Boulevard HYMUS");
        assert_eq!(format_street_name("HYMUS"), "HYMUS");
        assert_eq!(format_street_name("HYMUS (boulevard"), "HYMUS (boulevard");
    }
}
