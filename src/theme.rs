//! Visual themes for the dashboard.
//!
//! Every theme renders the same layout. A theme only changes the page colours
//! and the palette used for the charts.

use clap::ValueEnum;
use maud::PreEscaped;
use serde::{Deserialize, Serialize};

use crate::html::HeadElement;

/// The colour scheme applied to the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Neutral greys and blues that follow the system light/dark preference.
    #[default]
    Classic,
    /// A blue page with a violet title, green headings and bright charts.
    Vivid,
    /// A dark navy page with muted charts.
    Midnight,
}

const CLASSIC_PALETTE: [&str; 6] = [
    "#2563EB", "#60A5FA", "#93C5FD", "#1E40AF", "#F59E0B", "#EF4444",
];
const VIVID_PALETTE: [&str; 6] = [
    "#00B4D8", "#48CAE4", "#90E0EF", "#00A591", "#1B6535", "#8A2BE2",
];
const MIDNIGHT_PALETTE: [&str; 6] = [
    "#5EEAD4", "#818CF8", "#F472B6", "#FBBF24", "#34D399", "#A78BFA",
];

impl Theme {
    /// The colours used for chart series, in order.
    pub fn chart_palette(self) -> &'static [&'static str] {
        match self {
            Theme::Classic => &CLASSIC_PALETTE,
            Theme::Vivid => &VIVID_PALETTE,
            Theme::Midnight => &MIDNIGHT_PALETTE,
        }
    }

    /// The colour for series that only need one colour, e.g. a bar chart.
    pub fn primary_colour(self) -> &'static str {
        self.chart_palette()[0]
    }

    /// The colour for a second single-colour series.
    pub fn secondary_colour(self) -> &'static str {
        self.chart_palette()[1]
    }

    /// Page-level CSS for the theme, `None` for the classic theme.
    pub fn stylesheet(self) -> Option<HeadElement> {
        let css = match self {
            Theme::Classic => return None,
            Theme::Vivid => {
                r#"
                body { background-color: #0077B6; }
                #dashboard-content { background-color: #FFFFFF; color: #111827; border-radius: 10px; }
                h1 { color: #8A2BE2; }
                h2, h3, h4, h5, h6 { color: #00A591; }
                "#
            }
            Theme::Midnight => {
                r#"
                body { background-color: #0B1120; }
                #dashboard-content { background-color: #111827; color: #E5E7EB; border-radius: 10px; }
                h1 { color: #5EEAD4; }
                h2, h3, h4, h5, h6 { color: #A5B4FC; }
                "#
            }
        };

        Some(HeadElement::Style(PreEscaped(css.to_owned())))
    }
}
