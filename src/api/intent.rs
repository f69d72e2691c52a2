//! # Intent classification
//!
//! Turns the text of an inbound chat message into exactly one [`Intent`].
//! Rules are checked in order and the first match wins:
//!
//! 1. starts with `search` (optionally `search for`) -> [`Intent::Search`]
//! 2. starts with `get directions to` -> [`Intent::Directions`]
//! 3. is `hi` or starts with `help` -> [`Intent::Help`]
//! 4. is `cities` -> [`Intent::Cities`]
//! 5. anything else -> [`Intent::Unrecognized`]

const SEARCH_COMMAND: &str = "search";
const SEARCH_FILLER: &str = "for";
const DIRECTIONS_COMMAND: &str = "get directions to";
const CITY_SEPARATOR: &str = "in";

/// Purpose of a single inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// `city` is `None` when the message has no ` in <city>` part
    Search { query: String, city: Option<String> },
    /// `hospital_id` is `None` when the id is not a number
    Directions { hospital_id: Option<u64> },
    Help,
    Cities,
    Unrecognized,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Search { .. } => "search",
            Intent::Directions { .. } => "directions",
            Intent::Help => "help",
            Intent::Cities => "cities",
            Intent::Unrecognized => "unrecognized",
        }
    }
}

/// Classifies raw message text, case and surrounding whitespace are ignored.
pub fn classify(text: &str) -> Intent {
    let text = text.trim().to_lowercase();

    if let Some(rest) = text.strip_prefix(SEARCH_COMMAND) {
        return parse_search(rest);
    }

    if let Some(rest) = text.strip_prefix(DIRECTIONS_COMMAND) {
        return Intent::Directions {
            hospital_id: rest.trim().parse::<u64>().ok(),
        };
    }

    if text == "hi" || text.starts_with("help") {
        return Intent::Help;
    }

    if text == "cities" {
        return Intent::Cities;
    }

    Intent::Unrecognized
}

/// Splits `<query> in <city>` on the last standalone `in`.
///
/// Earlier occurrences of `in` stay part of the query, so
/// `hospitals in jayanagar in bangalore` searches `hospitals in jayanagar`.
fn parse_search(rest: &str) -> Intent {
    let rest = rest.trim();
    let rest = match rest.strip_prefix(SEARCH_FILLER) {
        Some(after) if after.is_empty() || after.starts_with(char::is_whitespace) => after.trim(),
        _ => rest,
    };

    let words = rest.split_whitespace().collect::<Vec<_>>();
    let separator = words.iter().rposition(|word| *word == CITY_SEPARATOR);

    match separator {
        Some(pos) if pos + 1 < words.len() => Intent::Search {
            query: words[..pos].join(" "),
            city: Some(words[pos + 1..].join(" ")),
        },
        _ => Intent::Search {
            query: words.join(" "),
            city: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(query: &str, city: Option<&str>) -> Intent {
        Intent::Search {
            query: query.to_string(),
            city: city.map(str::to_string),
        }
    }

    #[test]
    fn test_search_for_with_city() {
        assert_eq!(
            classify("search for sakra in bangalore"),
            search("sakra", Some("bangalore"))
        );
    }

    #[test]
    fn test_search_without_filler_word() {
        assert_eq!(
            classify("  Search Manipal IN Pune "),
            search("manipal", Some("pune"))
        );
    }

    #[test]
    fn test_search_splits_on_last_in() {
        assert_eq!(
            classify("search for hospitals in jayanagar in bangalore"),
            search("hospitals in jayanagar", Some("bangalore"))
        );
    }

    #[test]
    fn test_search_in_inside_words_is_not_a_separator() {
        assert_eq!(
            classify("search for indira gandhi institute in bengaluru"),
            search("indira gandhi institute", Some("bengaluru"))
        );
        assert_eq!(classify("search for columbia asia indiranagar"), search("columbia asia indiranagar", None));
    }

    #[test]
    fn test_search_city_can_have_several_words() {
        assert_eq!(
            classify("search sakra in new delhi"),
            search("sakra", Some("new delhi"))
        );
    }

    #[test]
    fn test_search_without_city() {
        assert_eq!(classify("search for sakra"), search("sakra", None));
        assert_eq!(classify("search sakra in"), search("sakra in", None));
        assert_eq!(classify("search"), search("", None));
    }

    #[test]
    fn test_search_with_empty_query() {
        assert_eq!(classify("search for in pune"), search("", Some("pune")));
    }

    #[test]
    fn test_search_for_prefix_needs_word_boundary() {
        assert_eq!(
            classify("search fortis in bangalore"),
            search("fortis", Some("bangalore"))
        );
    }

    #[test]
    fn test_directions() {
        assert_eq!(
            classify("get directions to 87"),
            Intent::Directions {
                hospital_id: Some(87)
            }
        );
        assert_eq!(
            classify("Get Directions To   12 "),
            Intent::Directions {
                hospital_id: Some(12)
            }
        );
    }

    #[test]
    fn test_directions_with_invalid_id() {
        for text in ["get directions to sakra", "get directions to", "get directions to -4"] {
            assert_eq!(classify(text), Intent::Directions { hospital_id: None });
        }
    }

    #[test]
    fn test_help_and_greeting() {
        assert_eq!(classify("hi"), Intent::Help);
        assert_eq!(classify("HELP"), Intent::Help);
        assert_eq!(classify("help me please"), Intent::Help);
        assert_eq!(classify("hi there"), Intent::Unrecognized);
    }

    #[test]
    fn test_cities() {
        assert_eq!(classify("Cities"), Intent::Cities);
        assert_eq!(classify("cities please"), Intent::Unrecognized);
    }

    #[test]
    fn test_rule_order_search_wins_over_help() {
        assert_eq!(
            classify("search help in pune"),
            search("help", Some("pune"))
        );
        assert_eq!(
            classify("search cities in pune"),
            search("cities", Some("pune"))
        );
    }

    #[test]
    fn test_fallback() {
        for text in ["", "   ", "hello", "where is the nearest hospital", "directions to 87"] {
            assert_eq!(classify(text), Intent::Unrecognized, "text {text:?}");
        }
    }
}
