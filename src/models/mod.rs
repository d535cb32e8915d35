use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Catalog media type as reported by TMDB (`media_type`).
///
/// Anything we do not route on (e.g. `person`) is kept verbatim in `Other`,
/// so a single odd item never poisons a whole saved snapshot and is written
/// back unchanged.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Movie,
    Tv,
    #[strum(default)]
    Other(String),
}

impl From<String> for MediaKind {
    fn from(raw: String) -> Self {
        raw.parse().unwrap_or_else(|_| Self::Other(raw))
    }
}

impl From<MediaKind> for String {
    fn from(kind: MediaKind) -> Self {
        kind.to_string()
    }
}

/// A catalog item as kept in the watchlist.
///
/// Field names follow the TMDB payloads so trending/search results can be
/// saved as-is. Fields we don't model are kept in `extra` and written back
/// untouched.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SavedEntry {
    pub id: i64,

    /// Movies carry `title`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// TV shows carry `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "media_type", default)]
    pub media_kind: MediaKind,

    #[serde(default)]
    pub poster_path: Option<String>,

    #[serde(rename = "vote_average", default)]
    pub rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SavedEntry {
    pub fn new(id: i64, title: impl Into<String>, media_kind: MediaKind) -> Self {
        let title = title.into();
        let (title, name) = match media_kind {
            MediaKind::Tv => (None, Some(title)),
            _ => (Some(title), None),
        };
        Self {
            id,
            title,
            name,
            media_kind,
            poster_path: None,
            rating: None,
            release_date: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    /// `release_date` for movies, `first_air_date` for TV.
    pub fn display_date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or_else(|| self.extra.get("first_air_date").and_then(|v| v.as_str()))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CastMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

/// `SavedEntry` plus the extended metadata of a details lookup
/// (`append_to_response=credits`).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DetailEntry {
    #[serde(flatten)]
    pub entry: SavedEntry,

    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub credits: Credits,
}

impl DetailEntry {
    /// Narrow back down to what the watchlist stores.
    pub fn to_saved(&self) -> SavedEntry {
        self.entry.clone()
    }
}
