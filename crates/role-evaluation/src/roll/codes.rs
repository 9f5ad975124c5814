use std::collections::HashMap;
use std::str::FromStr;
use std::sync::OnceLock;

/// Lookup domains of the assessment-roll schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeTable {
    StreetType,
    OwnerStatus,
    ExemptionType,
    PrimaryUse,
    RegistrationCondition,
    ConstructionType,
    PhysicalLink,
    AgriculturalZoning,
}

/// What a lookup yields when the code is not in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// The code itself, first letter upper-cased.
    Capitalized,
    /// `Code {code}`.
    CodePrefixed,
    /// Optional tables render unknown codes as blank.
    Empty,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown code table '{0}'")]
pub struct UnknownCodeTable(pub String);

impl CodeTable {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::StreetType,
            Self::OwnerStatus,
            Self::ExemptionType,
            Self::PrimaryUse,
            Self::RegistrationCondition,
            Self::ConstructionType,
            Self::PhysicalLink,
            Self::AgriculturalZoning,
        ]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::StreetType => "street-type",
            Self::OwnerStatus => "owner-status",
            Self::ExemptionType => "exemption-type",
            Self::PrimaryUse => "primary-use",
            Self::RegistrationCondition => "registration-condition",
            Self::ConstructionType => "construction-type",
            Self::PhysicalLink => "physical-link",
            Self::AgriculturalZoning => "agricultural-zoning",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::StreetType => "Type de voie publique",
            Self::OwnerStatus => "Statut du propriétaire",
            Self::ExemptionType => "Type de valeur imposable ou exemptée",
            Self::PrimaryUse => "Usage principal",
            Self::RegistrationCondition => "Conditions particulières d'inscription",
            Self::ConstructionType => "Genre de construction",
            Self::PhysicalLink => "Lien physique",
            Self::AgriculturalZoning => "Zonage agricole",
        }
    }

    pub const fn fallback(self) -> Fallback {
        match self {
            Self::StreetType => Fallback::Capitalized,
            Self::OwnerStatus
            | Self::ExemptionType
            | Self::PrimaryUse
            | Self::RegistrationCondition => Fallback::CodePrefixed,
            Self::ConstructionType | Self::PhysicalLink | Self::AgriculturalZoning => {
                Fallback::Empty
            }
        }
    }

    const fn case_insensitive(self) -> bool {
        matches!(self, Self::StreetType)
    }

    /// Raw `(code, label)` pairs in table order.
    pub const fn entries(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::StreetType => STREET_TYPES,
            Self::OwnerStatus => OWNER_STATUSES,
            Self::ExemptionType => EXEMPTION_TYPES,
            Self::PrimaryUse => PRIMARY_USES,
            Self::RegistrationCondition => REGISTRATION_CONDITIONS,
            Self::ConstructionType => CONSTRUCTION_TYPES,
            Self::PhysicalLink => PHYSICAL_LINKS,
            Self::AgriculturalZoning => AGRICULTURAL_ZONING,
        }
    }

    /// Label for `code`, or `None` when the table has no such entry.
    pub fn lookup(self, code: &str) -> Option<&'static str> {
        let key = self.normalize_code(code)?;
        code_index().get(&(self, key)).copied()
    }

    /// Label for `code`, falling back per [`CodeTable::fallback`]. An empty
    /// code always yields an empty label.
    pub fn translate(self, code: &str) -> String {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return String::new();
        }

        if let Some(label) = self.lookup(trimmed) {
            return label.to_string();
        }

        match self.fallback() {
            Fallback::Capitalized => capitalize(trimmed),
            Fallback::CodePrefixed => format!("Code {trimmed}"),
            Fallback::Empty => String::new(),
        }
    }

    fn normalize_code(self, code: &str) -> Option<String> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return None;
        }

        if self.case_insensitive() {
            Some(trimmed.to_uppercase())
        } else {
            Some(trimmed.to_string())
        }
    }
}

impl FromStr for CodeTable {
    type Err = UnknownCodeTable;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase().replace('_', "-");
        Self::ordered()
            .into_iter()
            .find(|table| table.name() == wanted)
            .ok_or_else(|| UnknownCodeTable(value.to_string()))
    }
}

/// Shorthand for [`CodeTable::translate`].
pub fn translate(table: CodeTable, code: &str) -> String {
    table.translate(code)
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

static CODE_INDEX: OnceLock<HashMap<(CodeTable, String), &'static str>> = OnceLock::new();

fn code_index() -> &'static HashMap<(CodeTable, String), &'static str> {
    CODE_INDEX.get_or_init(|| {
        let mut map = HashMap::new();
        for table in CodeTable::ordered() {
            for (code, label) in table.entries() {
                if let Some(key) = table.normalize_code(code) {
                    map.insert((table, key), *label);
                }
            }
        }
        map
    })
}

const STREET_TYPES: &[(&str, &str)] = &[
    ("AL", "Allée"),
    ("AR", "Ancienne route"),
    ("AV", "Avenue"),
    ("BD", "Boulevard"),
    ("BO", "Boulevard"),
    ("CH", "Chemin"),
    ("CR", "Carré"),
    ("CT", "Cour"),
    ("IMP", "Impasse"),
    ("PAS", "Passage"),
    ("PL", "Place"),
    ("PROM", "Promenade"),
    ("RG", "Rang"),
    ("RTE", "Route"),
    ("RU", "Rue"),
    ("SQ", "Square"),
    ("TR", "Terrasse"),
];

const OWNER_STATUSES: &[(&str, &str)] = &[
    ("1", "Personne physique"),
    ("2", "Personne morale"),
    ("3", "Gouvernement"),
];

const EXEMPTION_TYPES: &[(&str, &str)] = &[
    ("T", "Terrain"),
    ("B", "Bâtiment"),
    ("I", "Immeuble"),
];

const PRIMARY_USES: &[(&str, &str)] = &[
    ("R", "Résidentiel"),
    ("C", "Commercial"),
    ("I", "Industriel"),
    ("A", "Agricole"),
];

const REGISTRATION_CONDITIONS: &[(&str, &str)] = &[
    ("1", "Propriétaire"),
    ("2", "Emphytéote"),
    ("3", "Usufruitier"),
    ("4", "Grevé de substitution"),
    ("5", "Possesseur de terres publiques"),
];

const CONSTRUCTION_TYPES: &[(&str, &str)] = &[
    ("1", "Plain-pied"),
    ("2", "À étages entiers"),
    ("3", "À étages mansardés"),
    ("4", "À demi-étages"),
    ("5", "À niveaux décalés"),
    ("6", "Unimodulaire"),
];

const PHYSICAL_LINKS: &[(&str, &str)] = &[
    ("1", "Détaché"),
    ("2", "Jumelé"),
    ("3", "En rangée"),
    ("4", "Intégré"),
    ("5", "En rangée, bout de rangée"),
];

const AGRICULTURAL_ZONING: &[(&str, &str)] = &[
    ("0", "Hors zone agricole"),
    ("1", "Entièrement en zone agricole"),
    ("2", "Partiellement en zone agricole"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn street_types_match_case_insensitively() {
        assert_eq!(CodeTable::StreetType.translate("BO"), "Boulevard");
        assert_eq!(CodeTable::StreetType.translate("bo"), "Boulevard");
        assert_eq!(CodeTable::StreetType.translate(" rte "), "Route");
    }

    #[test]
    fn unknown_street_type_is_capitalized_verbatim() {
        assert_eq!(CodeTable::StreetType.translate("MONTEE"), "Montee");
    }

    #[test]
    fn owner_status_is_matched_exactly() {
        assert_eq!(CodeTable::OwnerStatus.translate("1"), "Personne physique");
        assert_eq!(CodeTable::OwnerStatus.translate("2"), "Personne morale");
        assert_eq!(CodeTable::OwnerStatus.translate("9"), "Code 9");
    }

    #[test]
    fn exemption_codes_are_case_sensitive() {
        assert_eq!(CodeTable::ExemptionType.translate("T"), "Terrain");
        assert_eq!(CodeTable::ExemptionType.translate("t"), "Code t");
    }

    #[test]
    fn optional_tables_blank_unknown_codes() {
        assert_eq!(CodeTable::ConstructionType.translate("2"), "À étages entiers");
        assert_eq!(CodeTable::ConstructionType.translate("42"), "");
        assert_eq!(CodeTable::AgriculturalZoning.translate("X"), "");
    }

    #[test]
    fn empty_code_translates_to_empty_label() {
        for table in CodeTable::ordered() {
            assert_eq!(table.translate("   "), "", "table {}", table.name());
        }
    }

    #[test]
    fn tables_parse_from_their_names() {
        for table in CodeTable::ordered() {
            assert_eq!(table.name().parse::<CodeTable>().expect("known table"), table);
        }
        assert_eq!(
            "OWNER_STATUS".parse::<CodeTable>().expect("underscore alias"),
            CodeTable::OwnerStatus
        );
        assert!("zoning-by-law".parse::<CodeTable>().is_err());
    }

    #[test]
    fn capitalize_handles_accents() {
        assert_eq!(capitalize("éCOLE"), "École");
        assert_eq!(capitalize(""), "");
    }
}
