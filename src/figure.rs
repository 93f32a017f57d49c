use serde::Serialize;

use crate::aggregate::WinCount;

pub const COLOR_SCALE: &str = "Viridis";
const MAP_TITLE: &str = "FIFA World Cup wins by country";

/// Plotly figure document, drawn client-side by Plotly.js.
#[derive(Debug, Clone, Serialize)]
pub struct ChoroplethFigure {
    pub data: Vec<ChoroplethTrace>,
    pub layout: FigureLayout,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChoroplethTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub locationmode: &'static str,
    pub locations: Vec<String>,
    pub z: Vec<u32>,
    pub text: Vec<String>,
    pub colorscale: &'static str,
    pub colorbar: ColorBar,
    pub hovertemplate: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorBar {
    pub title: Title,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FigureLayout {
    pub title: Title,
    pub geo: GeoLayout,
    pub margin: Margin,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeoLayout {
    pub projection: Projection,
    pub showframe: bool,
    pub showcoastlines: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

/// Builds the map from the map-eligible aggregate. Rows without an ISO-3
/// code are skipped here as well.
pub fn choropleth(eligible: &[WinCount]) -> ChoroplethFigure {
    let mut locations = Vec::with_capacity(eligible.len());
    let mut z = Vec::with_capacity(eligible.len());
    let mut text = Vec::with_capacity(eligible.len());
    for row in eligible {
        let Some(code) = row.iso3.as_ref() else {
            continue;
        };
        locations.push(code.clone());
        z.push(row.wins);
        text.push(row.country.clone());
    }

    ChoroplethFigure {
        data: vec![ChoroplethTrace {
            kind: "choropleth",
            locationmode: "ISO-3",
            locations,
            z,
            text,
            colorscale: COLOR_SCALE,
            colorbar: ColorBar {
                title: Title {
                    text: "Wins".to_string(),
                },
            },
            hovertemplate: "%{text}<br>Wins: %{z}<extra></extra>",
        }],
        layout: FigureLayout {
            title: Title {
                text: MAP_TITLE.to_string(),
            },
            geo: GeoLayout {
                projection: Projection {
                    kind: "natural earth",
                },
                showframe: false,
                showcoastlines: true,
            },
            margin: Margin {
                l: 0,
                r: 0,
                t: 40,
                b: 0,
            },
        },
    }
}
