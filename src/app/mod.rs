use crate::catalog::{ContentProvider, FallbackCatalog, RequestGuard};
use crate::models::{DetailEntry, MediaKind, SavedEntry};
use crate::search::{use_search_sync, SearchHandle};
use crate::state::{use_watchlist, AppContext, AppState};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::hooks::{use_params_map, use_query_map};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    // Router hooks (and so the search box) need the <Router> context.
    view! {
        <Router>
            <Header />
            <main>
                <Routes fallback=|| view! { <p>"Not found"</p> }>
                    <Route path=path!("") view=HomePage />
                    <Route path=path!("search") view=SearchPage />
                    <Route path=path!("watchlist") view=WatchlistPage />
                    <Route path=path!("details/:kind/:id") view=DetailsPage />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let watchlist = use_watchlist();

    view! {
        <nav>
            <A href="/">"CineVault"</A>
            <SearchBox />
            <A href="/">"Home"</A>
            <A href="/watchlist">
                {move || format!("Watchlist ({})", watchlist.len())}
            </A>
        </nav>
    }
}

#[component]
pub fn SearchBox() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let SearchHandle {
        input,
        on_input,
        submit,
        ..
    } = use_search_sync(&app_state.0.config);

    let on_submit = move |e: ev::SubmitEvent| {
        e.prevent_default();
        submit.run(());
    };

    view! {
        <form role="search" on:submit=on_submit>
            <input
                r#type="text"
                placeholder="Titles, people, genres..."
                prop:value=move || input.get()
                on:input=move |e| on_input.run(event_target_value(&e))
            />
        </form>
    }
}

/// Heart button bound to the shared watchlist.
#[component]
pub fn SaveToggle(entry: SavedEntry) -> impl IntoView {
    let watchlist = use_watchlist();
    let id = entry.id;
    let saved = {
        let watchlist = watchlist.clone();
        move || watchlist.contains(id)
    };
    let label = {
        let saved = saved.clone();
        move || {
            if saved() {
                "Remove from watchlist"
            } else {
                "Add to watchlist"
            }
        }
    };

    view! {
        <button
            aria-label=label
            on:click=move |e: ev::MouseEvent| {
                e.prevent_default();
                watchlist.toggle(entry.clone());
            }
        >
            {move || if saved() { "♥" } else { "♡" }}
        </button>
    }
}

#[component]
pub fn EntryCard(entry: SavedEntry) -> impl IntoView {
    let href = format!("/details/{}/{}", entry.media_kind, entry.id);
    let title = entry.display_title().to_string();
    let rating = entry
        .rating
        .map(|r| format!("★ {r:.1}"))
        .unwrap_or_else(|| "★ N/A".to_string());

    view! {
        <article>
            <A href=href>
                <h3>{title}</h3>
                <span>{rating}</span>
            </A>
            <SaveToggle entry=entry />
        </article>
    }
}

fn entry_list(items: Vec<SavedEntry>) -> impl IntoView {
    items
        .into_iter()
        .map(|entry| view! { <EntryCard entry=entry /> })
        .collect_view()
}

#[component]
pub fn HomePage() -> impl IntoView {
    let items: RwSignal<Vec<SavedEntry>> = RwSignal::new(vec![]);
    let guard = RequestGuard::new();

    let ticket = guard.begin();
    spawn_local(async move {
        let trending = FallbackCatalog.fetch_trending().await;
        if guard.is_current(ticket) {
            items.try_set(trending);
        }
    });
    on_cleanup(move || guard.invalidate());

    view! {
        <section>
            <h2>"Trending This Week"</h2>
            {move || entry_list(items.get())}
        </section>
    }
}

#[component]
pub fn SearchPage() -> impl IntoView {
    let query = use_query_map();
    let q = move || query.get().get("q").unwrap_or_default();

    let results: RwSignal<Vec<SavedEntry>> = RwSignal::new(vec![]);
    let loading = RwSignal::new(false);
    let guard = RequestGuard::new();

    Effect::new(move |_| {
        let q = q();
        let ticket = guard.begin();
        if q.is_empty() {
            results.set(vec![]);
            loading.set(false);
            return;
        }
        loading.set(true);
        spawn_local(async move {
            let hits = FallbackCatalog.search_multi(&q).await;
            // A newer query (or unmount) supersedes this one.
            if guard.is_current(ticket) {
                results.try_set(hits);
                loading.try_set(false);
            }
        });
    });
    on_cleanup(move || guard.invalidate());

    view! {
        <section>
            <Show when=move || !q().is_empty() fallback=|| ()>
                <h2>{move || format!("Search Results for \"{}\"", q())}</h2>
            </Show>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <p>"Loading..."</p> }
            >
                <Show
                    when=move || !results.get().is_empty() || q().is_empty()
                    fallback=|| view! { <p>"No results found."</p> }
                >
                    {move || entry_list(results.get())}
                </Show>
            </Show>
        </section>
    }
}

#[component]
pub fn WatchlistPage() -> impl IntoView {
    let watchlist = use_watchlist();
    let entries = watchlist.entries();

    view! {
        <section>
            <h2>"My Watchlist"</h2>
            <Show
                when=move || !watchlist.is_empty()
                fallback=|| view! { <p>"No movies in your watchlist, add some!"</p> }
            >
                {move || entry_list(entries.get())}
            </Show>
        </section>
    }
}

#[component]
pub fn DetailsPage() -> impl IntoView {
    let params = use_params_map();
    let kind = move || {
        params
            .get()
            .get("kind")
            .and_then(|k| k.parse::<MediaKind>().ok())
            .unwrap_or_default()
    };
    let id = move || params.get().get("id").and_then(|v| v.parse::<i64>().ok());

    let details: RwSignal<Option<DetailEntry>> = RwSignal::new(None);
    let guard = RequestGuard::new();

    Effect::new(move |_| {
        let (kind, id) = (kind(), id());
        let ticket = guard.begin();
        details.set(None);
        let Some(id) = id else {
            return;
        };
        spawn_local(async move {
            let d = FallbackCatalog.fetch_details(kind, id).await;
            if guard.is_current(ticket) {
                details.try_set(Some(d));
            }
        });
    });
    on_cleanup(move || guard.invalidate());

    view! {
        <section>
            {move || match details.get() {
                None => view! { <p>"Loading..."</p> }.into_any(),
                Some(d) => {
                    let genres = d.genres.iter().map(|g| g.name.as_str()).collect::<Vec<_>>().join(", ");
                    let cast = d
                        .credits
                        .cast
                        .iter()
                        .take(10)
                        .map(|c| view! { <li>{c.name.clone()}</li> })
                        .collect_view();
                    view! {
                        <article>
                            <h1>{d.entry.display_title().to_string()}</h1>
                            <p>{d.entry.display_date().unwrap_or_default().to_string()}</p>
                            <p>{genres}</p>
                            <p>{d.overview.clone().unwrap_or_default()}</p>
                            <ul>{cast}</ul>
                            <SaveToggle entry=d.to_saved() />
                        </article>
                    }
                    .into_any()
                }
            }}
        </section>
    }
}
