//! Fixed texts the bot replies with.

use super::cities::SUPPORTED_CITIES;
use std::sync::LazyLock;

pub const HELP: &str = "
You can use the following commands:
1. *help* - Get this menu and all the commands you can use
2. *cities* - Get the list of cities you can search in
3. *search* _<hospital-name>_ *in* _<location>_ - Search for a hospital in a particular location. For example, \"search for sakra in bangalore\" searches for hospitals with the name sakra in bangalore
4. *get directions to* _<hospital-id>_ - Get directions to a hospital with a particular ID. You can get the hospital ID from the search results. The number preceding the Hospital name is the Hospital ID. For example if the search result has _(87) Sakra Hospital_, send _get directions to 87_ to get directions to Sakra Hospital.
";

pub const NO_MATCHES: &str = "Sorry, there were no hospitals that matched your search 🙁";

pub const MISSING_CITY: &str = "Please tell me where to search, for example _search for sakra in bangalore_. Send *cities* to see the cities you can search in.";

pub const UPSTREAM_ERROR: &str =
    "Sorry, something went wrong while looking that up. Please try again in a little while.";

pub const INVALID_HOSPITAL_ID: &str = "That doesn't look like a valid hospital ID. The ID is the number shown before the hospital name in the search results, for example _get directions to 87_.";

pub const UNKNOWN_HOSPITAL: &str =
    "I couldn't find a hospital with that ID. Please check the ID in your search results and try again.";

pub const UNRECOGNIZED: &str =
    "Sorry, I didn't understand that. Send *help* to see the commands you can use.";

/// List of cities the directory can be searched in
pub static CITIES: LazyLock<String> = LazyLock::new(|| {
    let mut message = String::from("You can search for hospitals in these cities:\n");
    for city in &SUPPORTED_CITIES {
        message.push_str(&format!("- *{}*\n", city.name));
    }
    message
});

pub fn unknown_city(city: &str) -> String {
    format!("Sorry, I don't have hospital data for _{city}_ yet. Send *cities* to see the cities you can search in.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cities_lists_every_supported_city() {
        assert!(CITIES.contains("*Bengaluru*"));
        assert!(CITIES.contains("*Pune*"));
    }

    #[test]
    fn test_unknown_city_mentions_input() {
        assert!(unknown_city("mumbai").contains("_mumbai_"));
    }
}
