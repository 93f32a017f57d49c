use std::collections::HashMap;

// Every nation that has reached a final, keyed by its normalized name.
// Czechoslovakia has no current ISO-3 region and is left out on purpose.
const BUILTIN_CODES: &[(&str, &str)] = &[
    ("Argentina", "ARG"),
    ("Brazil", "BRA"),
    ("Croatia", "HRV"),
    ("England", "GBR"),
    ("France", "FRA"),
    ("Germany", "DEU"),
    ("Hungary", "HUN"),
    ("Italy", "ITA"),
    ("Netherlands", "NLD"),
    ("Spain", "ESP"),
    ("Sweden", "SWE"),
    ("Uruguay", "URY"),
];

/// Closed country-name to ISO-3 lookup used to key map regions.
#[derive(Debug, Clone, Default)]
pub struct Iso3Map {
    codes: HashMap<String, String>,
}

impl Iso3Map {
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_CODES)
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            codes: pairs
                .iter()
                .map(|(name, code)| (name.to_string(), code.to_string()))
                .collect(),
        }
    }

    pub fn code_for(&self, country: &str) -> Option<&str> {
        self.codes.get(country).map(String::as_str)
    }
}
