use crate::address::{search_href, Address, QUERY_PARAM, SEARCH_PATH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigateMode {
    /// Rewrite the current history entry (typing).
    Replace,
    /// New history entry (explicit submit).
    Push,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub href: String,
    pub mode: NavigateMode,
}

impl Navigation {
    fn replace(href: String) -> Self {
        Self {
            href,
            mode: NavigateMode::Replace,
        }
    }

    fn push(href: String) -> Self {
        Self {
            href,
            mode: NavigateMode::Push,
        }
    }
}

/// Reconciles the search box text, its debounced value and the address.
///
/// Navigation only ever comes out of [`on_stabilized`](Self::on_stabilized)
/// and [`submit`](Self::submit). `last_synced` records the last query that
/// was either navigated to or read from the address; a stabilized value
/// equal to it is never navigated again, which is what breaks the
/// address -> input -> debounce -> address loop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchSync {
    input: String,
    last_synced: String,
    /// Query of the navigation we issued and have not yet seen come back.
    in_flight: Option<String>,
}

/// `Some(q)` on the search route (missing `q` is `""`), `None` elsewhere.
pub(crate) fn search_query_of(addr: &Address) -> Option<String> {
    addr.is_path(SEARCH_PATH)
        .then(|| addr.param(QUERY_PARAM).unwrap_or_default().to_string())
}

impl SearchSync {
    pub fn mount(addr: &Address) -> Self {
        let q = search_query_of(addr).unwrap_or_default();
        Self {
            input: q.clone(),
            last_synced: q,
            in_flight: None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn last_synced(&self) -> &str {
        &self.last_synced
    }

    /// Keystroke.
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// The address changed. Returns the query now in the input when the
    /// address overwrote it; the caller must cancel its pending debounce so
    /// no earlier typing fires afterwards.
    ///
    /// The echo of our own last navigation is ignored, so text typed while
    /// that navigation was in flight is kept.
    pub fn on_address_change(&mut self, addr: &Address) -> Option<String> {
        let expected = self.in_flight.take();
        let q = search_query_of(addr)?;

        if expected.as_deref() == Some(q.as_str()) {
            return None;
        }
        if q == self.input {
            // Already showing it; just record that the address holds it.
            self.last_synced = q;
            return None;
        }

        self.input = q.clone();
        self.last_synced = q.clone();
        Some(q)
    }

    /// The debounced value settled on `stabilized` while the router is at
    /// `current`.
    pub fn on_stabilized(&mut self, stabilized: &str, current: &Address) -> Option<Navigation> {
        if stabilized == self.last_synced {
            return None;
        }
        self.last_synced = stabilized.to_string();

        let shown = search_query_of(current);
        if shown.as_deref() == Some(stabilized) {
            // No address change would follow, so no echo to wait for.
            return None;
        }

        if !stabilized.is_empty() {
            self.in_flight = Some(stabilized.to_string());
            return Some(Navigation::replace(search_href(stabilized)));
        }

        let on_search_with_query = shown.is_some_and(|q| !q.is_empty());
        if on_search_with_query {
            self.in_flight = Some(String::new());
            return Some(Navigation::replace(search_href("")));
        }
        None
    }

    /// Enter / search button, with the router at `current`. Skips the
    /// debounce wait and adds a history entry. Blank input does nothing.
    pub fn submit(&mut self, current: &Address) -> Option<Navigation> {
        if self.input.trim().is_empty() {
            return None;
        }
        self.last_synced = self.input.clone();
        // Re-submitting the shown query changes nothing the router reports.
        if search_query_of(current).as_deref() != Some(self.input.as_str()) {
            self.in_flight = Some(self.input.clone());
        }
        Some(Navigation::push(search_href(&self.input)))
    }

    /// Search box torn down.
    pub fn unmount(&mut self) {
        *self = Self::default();
    }
}
