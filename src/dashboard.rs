use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::aggregate::{
    RunnerUpCount, WinCount, count_wins, country_options, map_eligible, runner_up_counts,
    year_options,
};
use crate::figure::{ChoroplethFigure, choropleth};
use crate::finals::{CountryNameMap, FinalsRecord, normalize_finals};
use crate::finals_fetch::fetch_finals_page;
use crate::iso3::Iso3Map;
use crate::page;
use crate::table_extract::{FINALS_TABLE_INDEX, extract_tables, select_table};

/// Everything the server reads. Built once before the listener binds and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub finals: Vec<FinalsRecord>,
    pub wins: Vec<WinCount>,
    pub eligible: Vec<WinCount>,
    pub runner_ups: Vec<RunnerUpCount>,
    pub country_options: Vec<String>,
    pub year_options: Vec<i32>,
    pub figure: ChoroplethFigure,
    pub loaded_at: DateTime<Utc>,
    pub page: String,
}

impl Dashboard {
    /// Runs the full startup pipeline against the live page.
    pub fn load() -> Result<Self> {
        let html = fetch_finals_page().context("fetch finals page")?;
        Self::from_html(&html, &CountryNameMap::builtin(), &Iso3Map::builtin())
    }

    pub fn from_html(html: &str, names: &CountryNameMap, iso3: &Iso3Map) -> Result<Self> {
        let tables = extract_tables(html);
        info!(tables = tables.len(), "parsed html tables");
        let table = select_table(tables, FINALS_TABLE_INDEX)?;
        let finals = normalize_finals(&table, names).context("normalize finals table")?;
        info!(finals = finals.len(), "normalized finals");
        Self::from_records(finals, iso3, Utc::now())
    }

    pub fn from_records(
        finals: Vec<FinalsRecord>,
        iso3: &Iso3Map,
        loaded_at: DateTime<Utc>,
    ) -> Result<Self> {
        let wins = count_wins(&finals, iso3);
        let eligible = map_eligible(&wins);
        info!(
            winners = wins.len(),
            mapped = eligible.len(),
            "aggregated win counts"
        );
        let mut dashboard = Self {
            runner_ups: runner_up_counts(&finals),
            country_options: country_options(&wins),
            year_options: year_options(&finals),
            figure: choropleth(&eligible),
            finals,
            wins,
            eligible,
            loaded_at,
            page: String::new(),
        };
        dashboard.page = page::render(&dashboard).context("render dashboard page")?;
        Ok(dashboard)
    }
}
