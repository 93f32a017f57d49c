use tracing::{debug, warn};

use crate::aggregate::WinCount;
use crate::finals::FinalsRecord;

pub const COUNTRY_PLACEHOLDER: &str = "Select a country from the dropdown to see its number of wins";
pub const YEAR_PLACEHOLDER: &str = "Select a year to see the winner and runner-up";
pub const YEAR_NOT_FOUND: &str = "No data available for the selected year";

/// Answer for the country dropdown. `eligible` is the map-eligible aggregate
/// the dropdown was populated from, so a miss is an invariant violation.
/// Surrounding whitespace in the selection is ignored.
pub fn country_message(eligible: &[WinCount], selection: Option<&str>) -> String {
    let Some(country) = selection.map(str::trim).filter(|s| !s.is_empty()) else {
        return COUNTRY_PLACEHOLDER.to_string();
    };
    match eligible.iter().find(|w| w.country == country) {
        Some(row) => {
            debug!(country, wins = row.wins, "country lookup");
            format!("{} has won the World Cup {} time(s)", row.country, row.wins)
        }
        None => {
            warn!(country, "selected country missing from map-eligible win counts");
            COUNTRY_PLACEHOLDER.to_string()
        }
    }
}

pub fn year_message(finals: &[FinalsRecord], selection: Option<i32>) -> String {
    let Some(year) = selection else {
        return YEAR_PLACEHOLDER.to_string();
    };
    match finals.iter().find(|r| r.year == year) {
        Some(r) => format!(
            "In {}, {} won the World Cup against {}",
            r.year, r.winner, r.runner_up
        ),
        None => {
            debug!(year, "no final recorded for year");
            YEAR_NOT_FOUND.to_string()
        }
    }
}
