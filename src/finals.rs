use std::collections::HashMap;

use anyhow::{Result, anyhow};
use serde::Serialize;
use tracing::debug;

use crate::table_extract::HtmlTable;

pub const YEAR_COLUMN: &str = "Year";
pub const WINNERS_COLUMN: &str = "Winners";
pub const RUNNERS_UP_COLUMN: &str = "Runners-up";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalsRecord {
    pub year: i32,
    pub winner: String,
    pub runner_up: String,
}

/// Legacy country labels mapped to their current names.
#[derive(Debug, Clone, Default)]
pub struct CountryNameMap {
    renames: HashMap<String, String>,
}

impl CountryNameMap {
    pub fn builtin() -> Self {
        Self::from_pairs(&[("West Germany", "Germany")])
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            renames: pairs
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }

    /// Exact-match substitution; anything not in the map passes through.
    pub fn apply(&self, name: &str) -> String {
        self.renames
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }
}

/// Projects Year/Winners/Runners-up out of the extracted table and renames
/// legacy labels. Rows without an integer year, and finals not yet played
/// (no winner, or one placeholder cell spanning both teams), are skipped.
pub fn normalize_finals(table: &HtmlTable, names: &CountryNameMap) -> Result<Vec<FinalsRecord>> {
    let column = |name: &str| {
        table.column_index(name).ok_or_else(|| {
            anyhow!(
                "page structure changed: finals table has no {name:?} column (headers: {:?})",
                table.headers
            )
        })
    };
    let year_idx = column(YEAR_COLUMN)?;
    let winners_idx = column(WINNERS_COLUMN)?;
    let runners_up_idx = column(RUNNERS_UP_COLUMN)?;

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let cell = move |idx: usize| row.get(idx).map(String::as_str).unwrap_or_default();
        let Ok(year) = cell(year_idx).parse::<i32>() else {
            debug!(row = ?row, "skipping finals row without a year");
            continue;
        };
        let (winner, runner_up) = (cell(winners_idx), cell(runners_up_idx));
        if winner.is_empty() || winner == runner_up {
            debug!(year, "skipping finals row without a result");
            continue;
        }
        records.push(FinalsRecord {
            year,
            winner: names.apply(winner),
            runner_up: names.apply(runner_up),
        });
    }

    if records.is_empty() {
        return Err(anyhow!(
            "page structure changed: finals table has no rows with a year"
        ));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::{CountryNameMap, normalize_finals};
    use crate::table_extract::HtmlTable;

    fn table(headers: &[&str], rows: &[&[&str]]) -> HtmlTable {
        HtmlTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn renames_west_germany_in_both_columns() {
        let t = table(
            &["Year", "Winners", "Score", "Runners-up"],
            &[
                &["1954", "West Germany", "3–2", "Hungary"],
                &["1966", "England", "4–2", "West Germany"],
            ],
        );
        let records = normalize_finals(&t, &CountryNameMap::builtin()).unwrap();
        assert_eq!(records[0].winner, "Germany");
        assert_eq!(records[0].runner_up, "Hungary");
        assert_eq!(records[1].runner_up, "Germany");
    }

    #[test]
    fn rename_is_exact_match_only() {
        let names = CountryNameMap::builtin();
        assert_eq!(names.apply("West Germany"), "Germany");
        assert_eq!(names.apply("West Germany (FRG)"), "West Germany (FRG)");
        assert_eq!(names.apply("east germany"), "east germany");
    }

    #[test]
    fn rows_without_a_year_or_winner_are_skipped() {
        let t = table(
            &["Year", "Winners", "Runners-up"],
            &[
                &["1930", "Uruguay", "Argentina"],
                &["2026", "", ""],
                &["2030", "Match 104", "Match 104"],
                &["TBD", "", ""],
            ],
        );
        let records = normalize_finals(&t, &CountryNameMap::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].year, 1930);
    }

    #[test]
    fn missing_column_names_the_column() {
        let t = table(&["Year", "Champion", "Runners-up"], &[&["1930", "Uruguay", "Argentina"]]);
        let err = normalize_finals(&t, &CountryNameMap::builtin())
            .unwrap_err()
            .to_string();
        assert!(err.contains("Winners"));
    }
}
