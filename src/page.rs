use anyhow::{Context, Result};

use crate::dashboard::Dashboard;
use crate::lookup::{COUNTRY_PLACEHOLDER, YEAR_PLACEHOLDER};

pub const PAGE_TITLE: &str = "FIFA World Cup Winners";
pub const SELECTABLE_NOTE: &str = "Only countries with at least one World Cup win are selectable";
const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Renders the static dashboard page. The dropdowns talk to
/// `/api/country` and `/api/year`; the map is drawn from the embedded figure.
pub fn render(dashboard: &Dashboard) -> Result<String> {
    let figure_json =
        serde_json::to_string(&dashboard.figure).context("serialize choropleth figure")?;

    let mut out = String::with_capacity(16 * 1024);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", esc(PAGE_TITLE)));
    out.push_str(&format!("<script src=\"{PLOTLY_CDN}\"></script>\n"));
    out.push_str("<style>");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n");

    out.push_str(&format!("<h1>{}</h1>\n", esc(PAGE_TITLE)));
    out.push_str("<div id=\"map\" class=\"map\"></div>\n");
    out.push_str(&format!("<p class=\"note\">{}</p>\n", esc(SELECTABLE_NOTE)));

    out.push_str("<section class=\"lookup\">\n");
    out.push_str("<label for=\"country-select\">Country</label>\n");
    out.push_str("<select id=\"country-select\" name=\"country\">\n");
    out.push_str("<option value=\"\" selected>Select a country</option>\n");
    for country in &dashboard.country_options {
        let c = esc(country);
        out.push_str(&format!("<option value=\"{c}\">{c}</option>\n"));
    }
    out.push_str("</select>\n");
    out.push_str(&format!(
        "<div id=\"country-output\" class=\"output\">{}</div>\n",
        esc(COUNTRY_PLACEHOLDER)
    ));
    out.push_str("</section>\n");

    out.push_str("<section class=\"lookup\">\n");
    out.push_str("<label for=\"year-select\">Year</label>\n");
    out.push_str("<select id=\"year-select\" name=\"year\">\n");
    out.push_str("<option value=\"\" selected>Select a year</option>\n");
    for year in &dashboard.year_options {
        out.push_str(&format!("<option value=\"{year}\">{year}</option>\n"));
    }
    out.push_str("</select>\n");
    out.push_str(&format!(
        "<div id=\"year-output\" class=\"output\">{}</div>\n",
        esc(YEAR_PLACEHOLDER)
    ));
    out.push_str("</section>\n");

    out.push_str(&format!(
        "<footer>Data loaded {}</footer>\n",
        esc(&dashboard.loaded_at.format("%Y-%m-%d %H:%M UTC").to_string())
    ));

    out.push_str("<script>\n");
    out.push_str(&format!(
        "const FIGURE = {};\n",
        script_safe(&figure_json)
    ));
    out.push_str(SCRIPT);
    out.push_str("</script>\n</body>\n</html>\n");
    Ok(out)
}

fn esc<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// JSON embedded in a <script> block must not close the block early.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 960px; color: #222; }
h1 { text-align: center; }
.map { width: 100%; height: 480px; }
.note { font-style: italic; color: #555; }
.lookup { margin: 1.5rem 0; }
.lookup select { min-width: 16rem; margin-left: 0.5rem; }
.output { margin-top: 0.5rem; font-weight: 600; }
footer { margin-top: 2rem; font-size: 0.8rem; color: #777; }
"#;

const SCRIPT: &str = r#"
if (window.Plotly && FIGURE) {
  Plotly.newPlot("map", FIGURE.data, FIGURE.layout, { responsive: true });
}

function bindLookup(selectId, outputId, endpoint, param) {
  const select = document.getElementById(selectId);
  const output = document.getElementById(outputId);
  select.addEventListener("change", async () => {
    const url = endpoint + "?" + new URLSearchParams({ [param]: select.value });
    try {
      const resp = await fetch(url);
      const body = await resp.json();
      output.textContent = body.text;
    } catch (err) {
      console.error(err);
    }
  });
}

bindLookup("country-select", "country-output", "/api/country", "country");
bindLookup("year-select", "year-output", "/api/year", "year");
"#;

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{esc, render, script_safe};
    use crate::dashboard::Dashboard;
    use crate::finals::FinalsRecord;
    use crate::iso3::Iso3Map;

    #[test]
    fn figure_is_embedded_in_the_page() {
        let finals = vec![FinalsRecord {
            year: 1978,
            winner: "Argentina".to_string(),
            runner_up: "Netherlands".to_string(),
        }];
        let dashboard = Dashboard::from_records(finals, &Iso3Map::builtin(), Utc::now()).unwrap();
        let page = render(&dashboard).unwrap();
        assert!(page.contains("const FIGURE = {\"data\":[{\"type\":\"choropleth\""));
        assert!(page.contains("\"locations\":[\"ARG\"]"));
        assert!(!page.contains("const FIGURE = null"));
        assert_eq!(page, dashboard.page);
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(esc("Côte d'Ivoire <b>"), "Côte d&#39;Ivoire &lt;b&gt;");
        assert_eq!(script_safe(r#"{"a":"</script>"}"#), r#"{"a":"<\/script>"}"#);
    }
}
