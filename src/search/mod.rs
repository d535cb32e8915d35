mod session;
mod sync;

pub use session::SearchSession;
pub use sync::{NavigateMode, Navigation, SearchSync};

use crate::address::Address;
use crate::config::SyncConfig;
use crate::debounce::WindowScheduler;
use leptos::logging::log;
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;

/// What the search box needs from [`use_search_sync`].
#[derive(Clone, Copy)]
pub struct SearchHandle {
    /// Text in the box.
    pub input: ReadSignal<String>,
    /// Wire to `on:input`.
    pub on_input: Callback<String>,
    /// Wire to the form's `on:submit`.
    pub submit: Callback<()>,
}

/// Keep the search box, its debounced value and the router location in step.
///
/// Must be called under a `<Router>`. Owns one debounce timer, cleared when
/// the calling component unmounts.
pub fn use_search_sync(config: &SyncConfig) -> SearchHandle {
    let location = use_location();
    let (pathname, search) = (location.pathname, location.search);
    let navigate = use_navigate();

    let current_untracked =
        move || Address::from_parts(&pathname.get_untracked(), &search.get_untracked());

    let session = SearchSession::new(
        &current_untracked(),
        WindowScheduler,
        config.debounce_ms,
        current_untracked,
        move |nav: Navigation| {
            log!("search: navigate {:?} {}", nav.mode, nav.href);
            let options = NavigateOptions {
                replace: nav.mode == NavigateMode::Replace,
                ..Default::default()
            };
            navigate(&nav.href, options);
        },
    );
    let (input, set_input) = signal(session.input());
    let session = StoredValue::new_local(session);

    // Router -> input.
    Effect::new(move |_| {
        let here = Address::from_parts(&pathname.get(), &search.get());
        if let Some(q) = session.try_with_value(|s| s.on_address_change(&here)).flatten() {
            set_input.set(q);
        }
    });

    let on_input = Callback::new(move |value: String| {
        set_input.set(value.clone());
        session.with_value(|s| s.on_input(value));
    });

    let submit = Callback::new(move |_: ()| {
        let here = current_untracked();
        session.with_value(|s| s.submit(&here));
    });

    on_cleanup(move || {
        session.try_with_value(|s| s.close());
    });

    SearchHandle {
        input,
        on_input,
        submit,
    }
}
