use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// Position of the finals table among all tables on the source page.
pub const FINALS_TABLE_INDEX: usize = 3;

/// Upper bound for `colspan`/`rowspan` taken from the page.
pub const MAX_SPAN: usize = 1000;

// Compile-time constant selectors; parse cannot fail.
static TABLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("valid table selector"));
static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("valid row selector"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl HtmlTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Every `<table>` in document order, flattened to text.
pub fn extract_tables(html: &str) -> Vec<HtmlTable> {
    let document = Html::parse_document(html);
    document.select(&TABLE_SELECTOR).map(flatten_table).collect()
}

pub fn select_table(mut tables: Vec<HtmlTable>, index: usize) -> Result<HtmlTable> {
    let found = tables.len();
    if index >= found {
        return Err(anyhow!(
            "page structure changed: expected a table at index {index}, found {found} tables"
        ));
    }
    Ok(tables.swap_remove(index))
}

fn flatten_table(table: ElementRef<'_>) -> HtmlTable {
    let rows = table
        .select(&ROW_SELECTOR)
        .filter(|row| owning_table(*row) == Some(table))
        .collect::<Vec<_>>();

    let mut pending: Vec<Option<(String, usize)>> = Vec::new();
    let mut grid = Vec::with_capacity(rows.len());
    for row in rows {
        let cells = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|cell| matches!(cell.value().name(), "td" | "th"))
            .map(|cell| {
                (
                    clean_cell_text(&cell.text().collect::<String>()),
                    span_attr(cell, "colspan"),
                    span_attr(cell, "rowspan"),
                )
            })
            .collect::<Vec<_>>();
        grid.push(expand_row(cells, &mut pending));
    }

    let mut grid = grid.into_iter().filter(|row| row.iter().any(|c| !c.is_empty()));
    let headers = grid.next().unwrap_or_default();
    HtmlTable {
        headers,
        rows: grid.collect(),
    }
}

fn owning_table(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")
}

fn span_attr(cell: ElementRef<'_>, name: &str) -> usize {
    cell.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, MAX_SPAN)
}

/// Lays out one row's cells, filling columns still covered by a rowspan
/// from an earlier row.
fn expand_row(
    cells: Vec<(String, usize, usize)>,
    pending: &mut Vec<Option<(String, usize)>>,
) -> Vec<String> {
    let mut out = Vec::new();
    let mut cells = cells.into_iter();
    let mut col = 0usize;
    loop {
        while let Some(text) = take_pending(pending, col) {
            out.push(text);
            col += 1;
        }
        let Some((text, colspan, rowspan)) = cells.next() else {
            break;
        };
        for _ in 0..colspan {
            if pending.len() <= col {
                pending.resize(col + 1, None);
            }
            if rowspan > 1 {
                pending[col] = Some((text.clone(), rowspan - 1));
            }
            out.push(text.clone());
            col += 1;
        }
    }
    // Trailing columns still spanned from above.
    while col < pending.len() {
        out.push(take_pending(pending, col).unwrap_or_default());
        col += 1;
    }
    while out.last().is_some_and(|c| c.is_empty()) {
        out.pop();
    }
    out
}

fn take_pending(pending: &mut [Option<(String, usize)>], col: usize) -> Option<String> {
    let slot = pending.get_mut(col)?;
    let (text, remaining) = slot.as_mut()?;
    let text = text.clone();
    *remaining -= 1;
    if *remaining == 0 {
        *slot = None;
    }
    Some(text)
}

/// Collapses whitespace and drops footnote markers like `[3]` or `[n 1]`.
pub fn clean_cell_text(raw: &str) -> String {
    let mut stripped = String::with_capacity(raw.len());
    let mut chars = raw.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if ch == '[' {
            if let Some(close) = raw[idx..].find(']') {
                let end = idx + close;
                while chars.peek().is_some_and(|(i, _)| *i <= end) {
                    chars.next();
                }
                continue;
            }
        }
        stripped.push(ch);
    }
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
