use std::collections::BTreeMap;

pub(crate) const SEARCH_PATH: &str = "/search";
pub(crate) const QUERY_PARAM: &str = "q";

/// A navigable address: path plus decoded query parameters.
///
/// The router owns the real location; this is a read-only view of it that
/// the search sync reasons about.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Address {
    pub path: String,
    pub query: BTreeMap<String, String>,
}

impl Address {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: BTreeMap::new(),
        }
    }

    /// Build from a pathname and a raw search string (with or without `?`).
    pub fn from_parts(pathname: &str, search: &str) -> Self {
        Self {
            path: pathname.to_string(),
            query: parse_query(search),
        }
    }

    /// Parse `"/path?a=1&b=2"`. A `#fragment` is ignored.
    pub fn parse(href: &str) -> Self {
        let href = href.split('#').next().unwrap_or_default();
        match href.split_once('?') {
            Some((path, search)) => Self::from_parts(path, search),
            None => Self::new(href),
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    pub fn is_path(&self, path: &str) -> bool {
        self.path == path
    }
}

/// Decode one query component the way `URLSearchParams` does: `+` is a space,
/// then percent-decoding. Invalid UTF-8 sequences are replaced, not rejected.
pub(crate) fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(s) => s.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned(),
    }
}

pub(crate) fn parse_query(search: &str) -> BTreeMap<String, String> {
    let search = search.strip_prefix('?').unwrap_or(search);
    let mut out = BTreeMap::new();
    for pair in search.split('&').filter(|p| !p.is_empty()) {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        // First occurrence wins, like `URLSearchParams::get`.
        out.entry(decode_component(k))
            .or_insert_with(|| decode_component(v));
    }
    out
}

/// `/search?q=<encoded>` for a non-empty query, bare `/search` otherwise.
pub(crate) fn search_href(query: &str) -> String {
    if query.is_empty() {
        SEARCH_PATH.to_string()
    } else {
        format!("{SEARCH_PATH}?{QUERY_PARAM}={}", urlencoding::encode(query))
    }
}
