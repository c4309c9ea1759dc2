use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed taxonomy of applicant organisations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sector {
    Education,
    #[serde(rename = "NGO/CSO")]
    NgoCso,
    Government,
    Multilateral,
    Private,
    #[serde(rename = "Farmer Org")]
    FarmerOrg,
    Consultancy,
    Finance,
    #[serde(rename = "Other/Unclassified")]
    Other,
}

impl Sector {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Education,
            Self::NgoCso,
            Self::Government,
            Self::Multilateral,
            Self::Private,
            Self::FarmerOrg,
            Self::Consultancy,
            Self::Finance,
            Self::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Education => "Education",
            Self::NgoCso => "NGO/CSO",
            Self::Government => "Government",
            Self::Multilateral => "Multilateral",
            Self::Private => "Private",
            Self::FarmerOrg => "Farmer Org",
            Self::Consultancy => "Consultancy",
            Self::Finance => "Finance",
            Self::Other => "Other/Unclassified",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Tested top to bottom; the first rule with any substring hit wins. "Finance
// Ministry" is Government, "Farmers Bank Ltd" is Private.
const SECTOR_RULES: &[(Sector, &[&str])] = &[
    (Sector::Education, &["universit", "school", "educat"]),
    (
        Sector::NgoCso,
        &[
            "ngo",
            "foundation",
            "association",
            "civil",
            "non profit",
            "non-profit",
        ],
    ),
    (
        Sector::Government,
        &["ministry", "gov", "municipal", "department of", "bureau"],
    ),
    (
        Sector::Multilateral,
        &[
            "united nations",
            "world bank",
            "fao",
            "ifad",
            "ifpri",
            "undp",
            "unesco",
        ],
    ),
    (
        Sector::Private,
        &["ltd", "company", "bv", "inc", "plc", "gmbh", "sarl"],
    ),
    (Sector::FarmerOrg, &["farmer", "coop", "co-op", "cooperative"]),
    (Sector::Consultancy, &["consult"]),
    (Sector::Finance, &["bank", "finance", "microfinance"]),
];

/// Map free-text organisation names onto the sector taxonomy.
pub fn classify_sector(org_text: Option<&str>) -> Sector {
    let text = match org_text {
        Some(value) if !value.trim().is_empty() => value.to_lowercase(),
        _ => return Sector::Other,
    };

    SECTOR_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(sector, _)| *sector)
        .unwrap_or(Sector::Other)
}
