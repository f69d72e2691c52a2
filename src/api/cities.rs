//! # City Alias Resolver
//!
//! Maps the city names users type (including common misspellings) to the
//! locality keys understood by the hospital directory.

use std::{collections::HashMap, sync::LazyLock};

/// A city the directory has data for
#[derive(Debug)]
pub struct SupportedCity {
    /// Name shown to users
    pub name: &'static str,
    /// Directory locality key, `<city>-<state>`
    pub locality_key: &'static str,
    /// Lowercase spellings users may send
    pub aliases: &'static [&'static str],
}

pub static SUPPORTED_CITIES: [SupportedCity; 2] = [
    SupportedCity {
        name: "Bengaluru",
        locality_key: "bengaluru-karnataka",
        aliases: &[
            "bengaluru",
            "bangalore",
            "banglore",
            "bangaluru",
            "bengalooru",
            "blr",
        ],
    },
    SupportedCity {
        name: "Pune",
        locality_key: "pune-maharashtra",
        aliases: &["pune", "poona", "puna"],
    },
];

static CITY_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    SUPPORTED_CITIES
        .iter()
        .flat_map(|city| city.aliases.iter().map(|alias| (*alias, city.locality_key)))
        .collect()
});

/// Resolves a user typed city name to its locality key.
///
/// Returns `None` for unknown cities, callers must not query the
/// directory in that case.
pub fn resolve_locality(city: &str) -> Option<&'static str> {
    CITY_ALIASES
        .get(city.trim().to_lowercase().as_str())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_aliases_resolve() {
        let cases = [
            ("bangalore", "bengaluru-karnataka"),
            ("bengaluru", "bengaluru-karnataka"),
            ("banglore", "bengaluru-karnataka"),
            ("pune", "pune-maharashtra"),
            ("poona", "pune-maharashtra"),
        ];

        for (alias, key) in cases {
            assert_eq!(resolve_locality(alias), Some(key), "alias {alias}");
        }
    }

    #[test]
    fn test_every_declared_alias_resolves_to_its_city() {
        for city in &SUPPORTED_CITIES {
            for alias in city.aliases {
                assert_eq!(resolve_locality(alias), Some(city.locality_key));
            }
        }
    }

    #[test]
    fn test_resolution_ignores_case_and_padding() {
        assert_eq!(resolve_locality("  Bangalore "), Some("bengaluru-karnataka"));
    }

    #[test]
    fn test_unknown_city_is_a_miss() {
        assert_eq!(resolve_locality("mumbai"), None);
        assert_eq!(resolve_locality(""), None);
    }
}
