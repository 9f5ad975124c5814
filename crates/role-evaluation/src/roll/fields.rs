//! Catalogue of the flat display fields projected from a roll document.
//!
//! Keys keep the external schema spelling (`rl0404A`, `rlzu3101`, ...) so
//! downstream consumers can bind them verbatim. Derived display variants
//! (`landValue`, `frontage`, `*Label`) read the same source paths through a
//! different [`FieldKind`].

use super::accessor::FieldPath;
use super::codes::CodeTable;
use super::format;

/// Independently extracted section of a roll document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    Document,
    Evaluator,
    GlobalAnnex,
    Identification,
    PrimaryOwner,
    Registration,
    Characteristics,
    Valuation,
    Fiscal,
    UnitAnnex,
}

impl FieldGroup {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::Document,
            Self::Evaluator,
            Self::GlobalAnnex,
            Self::Identification,
            Self::PrimaryOwner,
            Self::Registration,
            Self::Characteristics,
            Self::Valuation,
            Self::Fiscal,
            Self::UnitAnnex,
        ]
    }

    /// Location of the section inside the document.
    pub const fn root(self) -> FieldPath<'static> {
        match self {
            Self::Document | Self::Evaluator => FieldPath::ROOT,
            Self::GlobalAnnex => FieldPath::new(&["RENSEIGNEMENTS_ANNEXABLES_GLOBAL"]),
            Self::Identification | Self::Characteristics | Self::Valuation | Self::Fiscal => {
                FieldPath::new(&["RLUEx"])
            }
            Self::PrimaryOwner => FieldPath::new(&["RLUEx", "RL0201", "RL0201x"]),
            Self::Registration => FieldPath::new(&["RLUEx", "RL0201"]),
            Self::UnitAnnex => FieldPath::new(&["RLUEx", "RENSEIGNEMENTS_ANNEXABLES_UNITE"]),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::Evaluator => "Signature de l'évaluateur",
            Self::GlobalAnnex => "Renseignements annexables globaux",
            Self::Identification => "Identification de l'unité d'évaluation",
            Self::PrimaryOwner => "Identification du propriétaire",
            Self::Registration => "Conditions d'inscription",
            Self::Characteristics => "Caractéristiques de l'unité d'évaluation",
            Self::Valuation => "Valeurs au rôle",
            Self::Fiscal => "Répartition fiscale",
            Self::UnitAnnex => "Renseignements annexables de l'unité",
        }
    }

    /// Whether the section may arrive as a list whose first entry is used.
    pub(crate) const fn takes_first_entry(self) -> bool {
        matches!(self, Self::PrimaryOwner)
    }
}

/// Rendering applied to a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Currency,
    Area,
    Frontage,
    Code(CodeTable),
}

impl FieldKind {
    pub fn render(self, raw: &str) -> String {
        match self {
            Self::Text => format::sanitize_display(raw),
            Self::Number => format::number(raw),
            Self::Date => format::date(raw),
            Self::Currency => format::currency(raw),
            Self::Area => format::area(raw),
            Self::Frontage => format::frontage(raw),
            Self::Code(table) => table.translate(&format::sanitize_display(raw)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub group: FieldGroup,
    /// Path relative to the group root.
    pub path: FieldPath<'static>,
    pub kind: FieldKind,
}

const fn field(
    key: &'static str,
    group: FieldGroup,
    path: &'static [&'static str],
    kind: FieldKind,
) -> FieldSpec {
    FieldSpec {
        key,
        group,
        path: FieldPath::new(path),
        kind,
    }
}

use FieldGroup::{
    Characteristics, Document, Evaluator, Fiscal, GlobalAnnex, Identification, PrimaryOwner,
    Registration, UnitAnnex, Valuation,
};
use FieldKind::{Area, Code, Currency, Date, Frontage, Number, Text};

pub const PROPERTY_FIELDS: &[FieldSpec] = &[
    // Document metadata
    field("version", Document, &["VERSION"], Text),
    field("rlm01A", Document, &["RLM01A"], Text),
    field("rlm02A", Document, &["RLM02A"], Text),
    // Evaluator signature (RL06)
    field("rl0601A", Evaluator, &["RL0601A"], Text),
    field("rl0601B", Evaluator, &["RL0601B"], Text),
    field("rl0602A", Evaluator, &["RL0602A"], Text),
    field("rl0603A", Evaluator, &["RL0603A"], Text),
    field("rl0604A", Evaluator, &["RL0604A"], Date),
    field("rl0605A", Evaluator, &["RL0605A"], Text),
    // Global annex
    field("rlzg0001", GlobalAnnex, &["RLZG0001"], Text),
    field("rlzg0002", GlobalAnnex, &["RLZG0002"], Date),
    // Identification (RL01)
    field("rl0101Ax", Identification, &["RL0101", "RL0101x", "RL0101Ax"], Text),
    field("rl0101Bx", Identification, &["RL0101", "RL0101x", "RL0101Bx"], Text),
    field("rl0101Cx", Identification, &["RL0101", "RL0101x", "RL0101Cx"], Text),
    field("rl0101Dx", Identification, &["RL0101", "RL0101x", "RL0101Dx"], Text),
    field("rl0101Ex", Identification, &["RL0101", "RL0101x", "RL0101Ex"], Text),
    field("rl0101Fx", Identification, &["RL0101", "RL0101x", "RL0101Fx"], Text),
    field("rl0101Gx", Identification, &["RL0101", "RL0101x", "RL0101Gx"], Text),
    field("rl0101Hx", Identification, &["RL0101", "RL0101x", "RL0101Hx"], Text),
    field("rl0101Ix", Identification, &["RL0101", "RL0101x", "RL0101Ix"], Text),
    field("rl0101Jx", Identification, &["RL0101", "RL0101x", "RL0101Jx"], Text),
    field("postalCode", Identification, &["RL0101", "RL0101x", "POSTALCODE"], Text),
    field(
        "streetTypeLabel",
        Identification,
        &["RL0101", "RL0101x", "RL0101Ex"],
        Code(CodeTable::StreetType),
    ),
    field("rl0103Ax", Identification, &["RL0103", "RL0103x", "RL0103Ax"], Text),
    field("rl0104A", Identification, &["RL0104", "RL0104A"], Text),
    field("rl0104B", Identification, &["RL0104", "RL0104B"], Text),
    field("rl0104C", Identification, &["RL0104", "RL0104C"], Text),
    field("rl0104D", Identification, &["RL0104", "RL0104D"], Text),
    field("rl0104E", Identification, &["RL0104", "RL0104E"], Text),
    field("rl0104F", Identification, &["RL0104", "RL0104F"], Text),
    field("rl0104G", Identification, &["RL0104", "RL0104G"], Text),
    field("rl0104H", Identification, &["RL0104", "RL0104H"], Text),
    field("rl0105A", Identification, &["RL0105A"], Text),
    field("rl0106A", Identification, &["RL0106A"], Text),
    field("rl0107A", Identification, &["RL0107A"], Text),
    // Primary owner (RL0201x, first entry)
    field("rl0201Ax", PrimaryOwner, &["RL0201Ax"], Text),
    field("rl0201Bx", PrimaryOwner, &["RL0201Bx"], Text),
    field("rl0201Cx", PrimaryOwner, &["RL0201Cx"], Text),
    field("rl0201Dx", PrimaryOwner, &["RL0201Dx"], Text),
    field("rl0201Ex", PrimaryOwner, &["RL0201Ex"], Text),
    field("rl0201Fx", PrimaryOwner, &["RL0201Fx"], Text),
    field("rl0201Gx", PrimaryOwner, &["RL0201Gx"], Date),
    field("rl0201Hx", PrimaryOwner, &["RL0201Hx"], Text),
    field("rl0201Ix", PrimaryOwner, &["RL0201Ix"], Text),
    field("rl0201Jx", PrimaryOwner, &["RL0201Jx"], Text),
    field("rl0201Kx", PrimaryOwner, &["RL0201Kx"], Text),
    field("rl0201Lx", PrimaryOwner, &["RL0201Lx"], Text),
    field("rl0201Mx", PrimaryOwner, &["RL0201Mx"], Text),
    field("rl0201Nx", PrimaryOwner, &["RL0201Nx"], Text),
    field("rl0201Ox", PrimaryOwner, &["RL0201Ox"], Text),
    field("rl0201Px", PrimaryOwner, &["RL0201Px"], Text),
    field("rl0201Qx", PrimaryOwner, &["RL0201Qx"], Text),
    field("rl0201Rx", PrimaryOwner, &["RL0201Rx"], Text),
    field("rl0201Sx", PrimaryOwner, &["RL0201Sx"], Text),
    field("rl0201Tx", PrimaryOwner, &["RL0201Tx"], Text),
    field("ownerStatusLabel", PrimaryOwner, &["RL0201Hx"], Code(CodeTable::OwnerStatus)),
    // Registration condition
    field("rl0201U", Registration, &["RL0201U"], Text),
    // Characteristics (RL03)
    field("rl0301A", Characteristics, &["RL0301A"], Number),
    field("rl0302A", Characteristics, &["RL0302A"], Number),
    field("rl0303A", Characteristics, &["RL0303A"], Text),
    field("rl0304A", Characteristics, &["RL0304A"], Number),
    field("rl0305A", Characteristics, &["RL0305A"], Number),
    field("rl0306A", Characteristics, &["RL0306A"], Number),
    field("rl0307A", Characteristics, &["RL0307A"], Text),
    field("rl0307B", Characteristics, &["RL0307B"], Text),
    field("rl0308A", Characteristics, &["RL0308A"], Number),
    field("rl0309A", Characteristics, &["RL0309A"], Text),
    field("rl0310A", Characteristics, &["RL0310A"], Text),
    field("rl0311A", Characteristics, &["RL0311A"], Number),
    field("rl0312A", Characteristics, &["RL0312A"], Number),
    field("rl0313A", Characteristics, &["RL0313A"], Text),
    field("rl0314A", Characteristics, &["RL0314A"], Number),
    field("rl0315A", Characteristics, &["RL0315A"], Number),
    field("rl0316A", Characteristics, &["RL0316A"], Number),
    field("rl0317A", Characteristics, &["RL0317A"], Number),
    field("rl0318A", Characteristics, &["RL0318A"], Text),
    field("rl0319A", Characteristics, &["RL0319A"], Text),
    field("rl0320A", Characteristics, &["RL0320A"], Number),
    field("frontage", Characteristics, &["RL0301A"], Frontage),
    field("landArea", Characteristics, &["RL0302A"], Area),
    field("floorArea", Characteristics, &["RL0308A"], Area),
    field("buildingArea", Characteristics, &["RL0317A"], Area),
    field(
        "agriculturalZoningLabel",
        Characteristics,
        &["RL0303A"],
        Code(CodeTable::AgriculturalZoning),
    ),
    field("physicalLinkLabel", Characteristics, &["RL0309A"], Code(CodeTable::PhysicalLink)),
    field(
        "constructionTypeLabel",
        Characteristics,
        &["RL0310A"],
        Code(CodeTable::ConstructionType),
    ),
    // Valuation (RL04)
    field("rl0401A", Valuation, &["RL0401A"], Date),
    field("rl0402A", Valuation, &["RL0402A"], Number),
    field("rl0403A", Valuation, &["RL0403A"], Number),
    field("rl0404A", Valuation, &["RL0404A"], Number),
    field("rl0405A", Valuation, &["RL0405A"], Number),
    field("landValue", Valuation, &["RL0402A"], Currency),
    field("buildingValue", Valuation, &["RL0403A"], Currency),
    field("totalValue", Valuation, &["RL0404A"], Currency),
    field("previousValue", Valuation, &["RL0405A"], Currency),
    // Fiscal distribution (RL05)
    field("rl0501A", Fiscal, &["RL0501A"], Number),
    field("rl0502A", Fiscal, &["RL0502A"], Text),
    field("rl0503A", Fiscal, &["RL0503A"], Text),
    field("rl0508A", Fiscal, &["RL0508A"], Text),
    field("vacantLandValue", Fiscal, &["RL0501A"], Currency),
    // Unit annex (RLZU)
    field("rlzu3005A", UnitAnnex, &["RLZU3005A"], Text),
    field("rlzu3005B", UnitAnnex, &["RLZU3005B"], Text),
    field("rlzu3005C", UnitAnnex, &["RLZU3005C"], Text),
    field("rlzu3006B", UnitAnnex, &["RLZU3006B"], Text),
    field("rlzu3007x", UnitAnnex, &["RLZU3007x"], Text),
    field("rlzu3101", UnitAnnex, &["RLZU3101"], Date),
    field("rlzu3102", UnitAnnex, &["RLZU3102"], Date),
    field("rlzu3103", UnitAnnex, &["RLZU3103"], Date),
    field("rlzu3104", UnitAnnex, &["RLZU3104"], Number),
    field("rlzu4001", UnitAnnex, &["RLZU4001"], Number),
    field("rlzu4002", UnitAnnex, &["RLZU4002"], Number),
    field("primaryUseLabel", UnitAnnex, &["RLZU3005A"], Code(CodeTable::PrimaryUse)),
    field("unitRollValue", UnitAnnex, &["RLZU3104"], Currency),
    field("municipalLandValue", UnitAnnex, &["RLZU4001"], Currency),
    field("municipalBuildingValue", UnitAnnex, &["RLZU4002"], Currency),
];

/// Catalogue entry stored under `key`.
pub fn spec_for(key: &str) -> Option<&'static FieldSpec> {
    PROPERTY_FIELDS.iter().find(|spec| spec.key == key)
}
