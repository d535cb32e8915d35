use crate::models::{CastMember, Credits, DetailEntry, Genre, MediaKind, SavedEntry};
use leptos::prelude::*;

/// Remote content catalog (TMDB-shaped).
///
/// Implementations never fail outward: on any transport or decode problem
/// they resolve to a substitute value so pages have nothing fatal to render.
#[allow(async_fn_in_trait)]
pub trait ContentProvider {
    async fn fetch_trending(&self) -> Vec<SavedEntry>;

    /// Empty query resolves to no results without asking the catalog.
    async fn search_multi(&self, query: &str) -> Vec<SavedEntry>;

    async fn fetch_details(&self, kind: MediaKind, id: i64) -> DetailEntry;
}

/// Fixed data used when no catalog is configured or a request fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackCatalog;

fn entry(
    id: i64,
    title: &str,
    kind: MediaKind,
    poster: &str,
    rating: f64,
    date: &str,
) -> SavedEntry {
    let is_tv = kind == MediaKind::Tv;
    let mut e = SavedEntry::new(id, title, kind);
    e.poster_path = Some(poster.to_string());
    e.rating = Some(rating);
    if is_tv {
        e.extra.insert("first_air_date".to_string(), date.into());
    } else {
        e.release_date = Some(date.to_string());
    }
    e
}

impl FallbackCatalog {
    pub fn trending(&self) -> Vec<SavedEntry> {
        vec![
            entry(550, "Fight Club", MediaKind::Movie, "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg", 8.4, "1999-10-15"),
            entry(1399, "Game of Thrones", MediaKind::Tv, "/u3bZgnGQ9T01sWNhy95hkfU0Mvs.jpg", 8.4, "2011-04-17"),
            entry(27205, "Inception", MediaKind::Movie, "/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg", 8.3, "2010-07-15"),
            entry(157336, "Interstellar", MediaKind::Movie, "/gEU2QniL6C971PNLyfeRT3856OX.jpg", 8.3, "2014-11-05"),
        ]
    }

    pub fn search(&self, query: &str) -> Vec<SavedEntry> {
        if query.is_empty() {
            return vec![];
        }
        let mut e = SavedEntry::new(999, format!("Result for {query}"), MediaKind::Movie);
        e.rating = Some(6.5);
        e.release_date = Some("2023-01-01".to_string());
        vec![e]
    }

    pub fn details(&self, kind: MediaKind, id: i64) -> DetailEntry {
        let mut base = SavedEntry::new(id, "Mock Movie Details", kind);
        // Placeholder carries both names so either media kind has a title.
        base.title = Some("Mock Movie Details".to_string());
        base.name = Some("Mock TV Show Details".to_string());
        base.poster_path = Some("/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg".to_string());
        base.rating = Some(8.5);
        base.release_date = Some("1999-10-15".to_string());

        DetailEntry {
            entry: base,
            overview: Some(
                "This is a detailed overview of the mock movie. It is very interesting and full of action."
                    .to_string(),
            ),
            tagline: None,
            backdrop_path: Some("/hZkgoQYus5vegHoetLkCJzb17zJ.jpg".to_string()),
            runtime: None,
            genres: vec![
                Genre { id: 1, name: "Drama".to_string() },
                Genre { id: 2, name: "Thriller".to_string() },
            ],
            credits: Credits {
                cast: vec![
                    CastMember {
                        id: 1,
                        name: "Brad Pitt".to_string(),
                        character: Some("Tyler Durden".to_string()),
                        profile_path: Some("/cckcYc2v0yh1tc9QjRelptcOBko.jpg".to_string()),
                    },
                    CastMember {
                        id: 2,
                        name: "Edward Norton".to_string(),
                        character: Some("The Narrator".to_string()),
                        profile_path: Some("/5XBzD5WuTyVQZeS4VI25z2moPrY.jpg".to_string()),
                    },
                ],
            },
        }
    }
}

impl ContentProvider for FallbackCatalog {
    async fn fetch_trending(&self) -> Vec<SavedEntry> {
        self.trending()
    }

    async fn search_multi(&self, query: &str) -> Vec<SavedEntry> {
        self.search(query)
    }

    async fn fetch_details(&self, kind: MediaKind, id: i64) -> DetailEntry {
        self.details(kind, id)
    }
}

/// Ticket for one in-flight catalog request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Drops late responses: only the most recently issued ticket may apply its
/// result. Bump it on teardown so nothing lands on a view that is gone.
#[derive(Clone, Copy)]
pub struct RequestGuard {
    current: RwSignal<u64>,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(0),
        }
    }

    pub fn begin(&self) -> RequestTicket {
        let next = self.current.get_untracked() + 1;
        self.current.set(next);
        RequestTicket(next)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.current
            .try_get_untracked()
            .is_some_and(|cur| cur == ticket.0)
    }

    pub fn invalidate(&self) {
        self.current.try_update(|n| *n += 1);
    }
}

impl Default for RequestGuard {
    fn default() -> Self {
        Self::new()
    }
}
