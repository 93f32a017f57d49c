use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::finals::FinalsRecord;
use crate::iso3::Iso3Map;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinCount {
    pub country: String,
    pub wins: u32,
    pub iso3: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunnerUpCount {
    pub country: String,
    pub finals_lost: u32,
}

/// One row per distinct winner, sorted by country name.
pub fn count_wins(records: &[FinalsRecord], iso3: &Iso3Map) -> Vec<WinCount> {
    let mut tally: BTreeMap<&str, u32> = BTreeMap::new();
    for record in records {
        *tally.entry(record.winner.as_str()).or_insert(0) += 1;
    }
    tally
        .into_iter()
        .map(|(country, wins)| WinCount {
            country: country.to_string(),
            wins,
            iso3: iso3.code_for(country).map(str::to_string),
        })
        .collect()
}

/// Rows that can be drawn on the map; unmapped countries are dropped.
pub fn map_eligible(wins: &[WinCount]) -> Vec<WinCount> {
    wins.iter().filter(|w| w.iso3.is_some()).cloned().collect()
}

pub fn country_options(wins: &[WinCount]) -> Vec<String> {
    wins.iter()
        .filter(|w| w.iso3.is_some())
        .map(|w| w.country.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn year_options(records: &[FinalsRecord]) -> Vec<i32> {
    records
        .iter()
        .map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn runner_up_counts(records: &[FinalsRecord]) -> Vec<RunnerUpCount> {
    let mut tally: BTreeMap<&str, u32> = BTreeMap::new();
    for record in records.iter().filter(|r| !r.runner_up.is_empty()) {
        *tally.entry(record.runner_up.as_str()).or_insert(0) += 1;
    }
    tally
        .into_iter()
        .map(|(country, finals_lost)| RunnerUpCount {
            country: country.to_string(),
            finals_lost,
        })
        .collect()
}
