use chrono::Utc;

use wc_finals_dashboard::dashboard::Dashboard;
use wc_finals_dashboard::finals::{CountryNameMap, normalize_finals};
use wc_finals_dashboard::iso3::Iso3Map;
use wc_finals_dashboard::lookup::{COUNTRY_PLACEHOLDER, country_message, year_message};
use wc_finals_dashboard::table_extract::HtmlTable;

fn two_final_table() -> HtmlTable {
    HtmlTable {
        headers: vec![
            "Year".to_string(),
            "Winners".to_string(),
            "Runners-up".to_string(),
        ],
        rows: vec![
            vec![
                "1930".to_string(),
                "Uruguay".to_string(),
                "Argentina".to_string(),
            ],
            vec![
                "1950".to_string(),
                "West Germany".to_string(),
                "Hungary".to_string(),
            ],
        ],
    }
}

fn uruguay_only_dashboard() -> Dashboard {
    let finals = normalize_finals(&two_final_table(), &CountryNameMap::builtin())
        .expect("table should normalize");
    Dashboard::from_records(finals, &Iso3Map::from_pairs(&[("Uruguay", "URY")]), Utc::now())
        .expect("dashboard should build")
}

#[test]
fn label_survives_only_when_no_rename_targets_it() {
    let untouched = normalize_finals(&two_final_table(), &CountryNameMap::default()).unwrap();
    assert_eq!(untouched[1].winner, "West Germany");

    let renamed = normalize_finals(&two_final_table(), &CountryNameMap::builtin()).unwrap();
    assert_eq!(renamed[1].winner, "Germany");
}

#[test]
fn unmapped_winner_counts_but_is_not_selectable() {
    let dashboard = uruguay_only_dashboard();
    assert_eq!(dashboard.wins.len(), 2);

    let germany = dashboard.wins.iter().find(|w| w.country == "Germany").unwrap();
    assert_eq!(germany.wins, 1);
    assert_eq!(germany.iso3, None);

    let uruguay = dashboard.wins.iter().find(|w| w.country == "Uruguay").unwrap();
    assert_eq!(uruguay.wins, 1);
    assert_eq!(uruguay.iso3.as_deref(), Some("URY"));

    assert_eq!(dashboard.eligible.len(), 1);
    assert_eq!(dashboard.eligible[0].country, "Uruguay");
    assert_eq!(dashboard.country_options, vec!["Uruguay"]);
    assert_eq!(dashboard.figure.data[0].locations, vec!["URY"]);
}

#[test]
fn country_lookup_sentence() {
    let dashboard = uruguay_only_dashboard();
    assert_eq!(
        country_message(&dashboard.eligible, Some("Uruguay")),
        "Uruguay has won the World Cup 1 time(s)"
    );
    assert_eq!(
        country_message(&dashboard.eligible, None),
        "Select a country from the dropdown to see its number of wins"
    );
}

#[test]
fn unmapped_winner_is_not_answered() {
    let dashboard = uruguay_only_dashboard();
    assert!(dashboard.wins.iter().any(|w| w.country == "Germany"));
    assert_eq!(
        country_message(&dashboard.eligible, Some("Germany")),
        COUNTRY_PLACEHOLDER
    );
}

#[test]
fn country_lookup_is_idempotent() {
    let dashboard = uruguay_only_dashboard();
    let first = country_message(&dashboard.eligible, Some("Uruguay"));
    let _ = year_message(&dashboard.finals, Some(1950));
    let second = country_message(&dashboard.eligible, Some("Uruguay"));
    assert_eq!(first, second);
}

#[test]
fn year_lookup_sentences() {
    let dashboard = uruguay_only_dashboard();
    assert_eq!(
        year_message(&dashboard.finals, Some(1930)),
        "In 1930, Uruguay won the World Cup against Argentina"
    );
    assert_eq!(
        year_message(&dashboard.finals, Some(1999)),
        "No data available for the selected year"
    );
    assert_eq!(
        year_message(&dashboard.finals, None),
        "Select a year to see the winner and runner-up"
    );
}
