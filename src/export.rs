use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::dashboard::Dashboard;

pub const WORKBOOK_FILENAME: &str = "world_cup_finals.xlsx";

pub struct ExportReport {
    pub finals: usize,
    pub winners: usize,
    pub runners_up: usize,
}

/// Builds the finals workbook in memory; nothing is written to disk.
pub fn finals_workbook(dashboard: &Dashboard) -> Result<(Vec<u8>, ExportReport)> {
    let mut finals_rows = vec![vec![
        "Year".to_string(),
        "Winners".to_string(),
        "Runners-up".to_string(),
    ]];
    finals_rows.extend(dashboard.finals.iter().map(|r| {
        vec![r.year.to_string(), r.winner.clone(), r.runner_up.clone()]
    }));

    let mut wins_rows = vec![vec![
        "Country".to_string(),
        "Wins".to_string(),
        "ISO-3".to_string(),
    ]];
    wins_rows.extend(dashboard.wins.iter().map(|w| {
        vec![
            w.country.clone(),
            w.wins.to_string(),
            w.iso3.clone().unwrap_or_default(),
        ]
    }));

    let mut runner_up_rows = vec![vec!["Country".to_string(), "Finals lost".to_string()]];
    runner_up_rows.extend(
        dashboard
            .runner_ups
            .iter()
            .map(|r| vec![r.country.clone(), r.finals_lost.to_string()]),
    );

    let mut workbook = Workbook::new();
    for (name, rows) in [
        ("Finals", &finals_rows),
        ("Wins", &wins_rows),
        ("Runners-up", &runner_up_rows),
    ] {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(name)
            .with_context(|| format!("name sheet {name}"))?;
        write_rows(sheet, rows)?;
    }
    let bytes = workbook
        .save_to_buffer()
        .context("failed serializing workbook")?;

    Ok((
        bytes,
        ExportReport {
            finals: finals_rows.len() - 1,
            winners: wins_rows.len() - 1,
            runners_up: runner_up_rows.len() - 1,
        },
    ))
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
