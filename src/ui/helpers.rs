use std::error::Error;

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::Beer;

/// Placeholder shown for attributes the source left out.
const MISSING_VALUE: &str = "-";

/// One `Label: value` line per attribute for the detail panel.
pub(crate) fn detail_lines(beer: &Beer) -> Vec<Line<'static>> {
    beer.attributes()
        .iter()
        .map(|(label, value)| {
            let value = value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(MISSING_VALUE);
            Line::from(vec![
                Span::styled(
                    format!("{label}: "),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(value.to_string()),
            ])
        })
        .collect()
}

/// Extract the most relevant message from a chained error.
pub(crate) fn surface_error(err: &(dyn Error + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}
