//! Domain models that mirror the `beers` table and get passed throughout the
//! TUI. They stay plain data holders: the store fills them, the view state keeps
//! copies, and the UI only reads them.

use std::fmt;

use serde::de::Error as _;
use serde::Deserialize;

/// The nine free-text attributes of a beer exactly as the remote source sends
/// them. Nothing here is parsed or validated: `ibu`, `alcohol` and `blg` look
/// numeric but are kept as opaque strings because the source never promised a
/// format for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BeerDetails {
    pub brand: Option<String>,
    pub name: Option<String>,
    pub style: Option<String>,
    pub hop: Option<String>,
    pub yeast: Option<String>,
    pub malts: Option<String>,
    pub ibu: Option<String>,
    pub alcohol: Option<String>,
    pub blg: Option<String>,
}

impl BeerDetails {
    /// Decode a response body. Only a JSON object is a beer; serde would also
    /// map an array onto the fields by position, so anything else is refused
    /// before the struct is built.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom("expected a JSON object"));
        }
        serde_json::from_value(value)
    }
}

/// A beer row as persisted in the local store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Beer {
    /// Primary key assigned by SQLite on insert. Never reused, even after the
    /// table has been cleared.
    pub id: i64,
    pub details: BeerDetails,
}

impl Beer {
    /// Labelled attributes in the order the detail panel shows them.
    pub fn attributes(&self) -> [(&'static str, Option<&str>); 9] {
        let d = &self.details;
        [
            ("Brand", d.brand.as_deref()),
            ("Name", d.name.as_deref()),
            ("Style", d.style.as_deref()),
            ("Hop", d.hop.as_deref()),
            ("Yeast", d.yeast.as_deref()),
            ("Malts", d.malts.as_deref()),
            ("IBU", d.ibu.as_deref()),
            ("Alcohol", d.alcohol.as_deref()),
            ("BLG", d.blg.as_deref()),
        ]
    }

    /// Compose the one-line `Brand - Name (Style)` label used by the history
    /// list, skipping whatever the source left out.
    pub fn summary(&self) -> String {
        let d = &self.details;
        let brand = non_blank(d.brand.as_deref());
        let name = non_blank(d.name.as_deref());

        let mut summary = match (brand, name) {
            (Some(brand), Some(name)) => format!("{brand} - {name}"),
            (Some(only), None) | (None, Some(only)) => only.to_string(),
            (None, None) => format!("Beer #{}", self.id),
        };
        if let Some(style) = non_blank(d.style.as_deref()) {
            summary.push_str(&format!(" ({style})"));
        }
        summary
    }
}

impl fmt::Display for Beer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
