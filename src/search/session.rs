use super::sync::{Navigation, SearchSync};
use crate::address::Address;
use crate::debounce::{Debouncer, Scheduler};
use std::cell::RefCell;
use std::rc::Rc;

/// One mounted search box: the [`SearchSync`] state plus its debounce timer.
///
/// Framework-free. The caller reports keystrokes, address changes and
/// submits; navigations come out through `navigate`, either directly (submit)
/// or from the timer once typing has been quiet for the delay.
pub struct SearchSession<S: Scheduler> {
    sync: Rc<RefCell<SearchSync>>,
    debouncer: Debouncer<String, S>,
    navigate: Rc<dyn Fn(Navigation)>,
}

impl<S: Scheduler> SearchSession<S> {
    /// `current` reads the address at the moment the debounce fires.
    pub fn new(
        initial: &Address,
        scheduler: S,
        delay_ms: i32,
        current: impl Fn() -> Address + 'static,
        navigate: impl Fn(Navigation) + 'static,
    ) -> Self {
        let sync = Rc::new(RefCell::new(SearchSync::mount(initial)));
        let navigate: Rc<dyn Fn(Navigation)> = Rc::new(navigate);

        let debouncer = {
            let (sync, navigate) = (sync.clone(), navigate.clone());
            Debouncer::new(scheduler, delay_ms, move |settled: String| {
                let nav = sync.borrow_mut().on_stabilized(&settled, &current());
                if let Some(nav) = nav {
                    navigate(nav);
                }
            })
        };

        Self {
            sync,
            debouncer,
            navigate,
        }
    }

    pub fn input(&self) -> String {
        self.sync.borrow().input().to_string()
    }

    #[cfg(test)]
    fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn on_input(&self, value: String) {
        self.sync.borrow_mut().set_input(value.clone());
        self.debouncer.push(value);
    }

    /// Returns the new input text when the address overwrote it. Typing that
    /// was still waiting on the timer is dropped in that case.
    pub fn on_address_change(&self, addr: &Address) -> Option<String> {
        let overwritten = self.sync.borrow_mut().on_address_change(addr);
        if overwritten.is_some() {
            self.debouncer.cancel();
        }
        overwritten
    }

    pub fn submit(&self, current: &Address) {
        let Some(nav) = self.sync.borrow_mut().submit(current) else {
            return;
        };
        // Submitting makes whatever was pending moot.
        self.debouncer.cancel();
        (self.navigate)(nav);
    }

    /// Search box torn down: no timer may fire afterwards.
    pub fn close(&self) {
        self.debouncer.cancel();
        self.sync.borrow_mut().unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::ManualScheduler;
    use crate::search::NavigateMode;

    /// A session wired to a fake router: navigations update `address` and
    /// are recorded in order.
    struct Harness {
        clock: ManualScheduler,
        address: Rc<RefCell<Address>>,
        navs: Rc<RefCell<Vec<Navigation>>>,
        session: SearchSession<ManualScheduler>,
    }

    impl Harness {
        fn at(href: &str) -> Self {
            let clock = ManualScheduler::new();
            let address = Rc::new(RefCell::new(Address::parse(href)));
            let navs = Rc::new(RefCell::new(Vec::new()));

            let current = {
                let address = address.clone();
                move || address.borrow().clone()
            };
            let navigate = {
                let (address, navs) = (address.clone(), navs.clone());
                move |nav: Navigation| {
                    *address.borrow_mut() = Address::parse(&nav.href);
                    navs.borrow_mut().push(nav);
                }
            };
            let initial = Address::parse(href);
            let session = SearchSession::new(&initial, clock.clone(), 500, current, navigate);

            Self {
                clock,
                address,
                navs,
                session,
            }
        }

        /// Report the current address back, as the router effect would.
        fn router_reports(&self) -> Option<String> {
            let here = self.address.borrow().clone();
            self.session.on_address_change(&here)
        }

        /// Address changed from outside (back button, link).
        fn external(&self, href: &str) -> Option<String> {
            *self.address.borrow_mut() = Address::parse(href);
            self.router_reports()
        }

        fn hrefs(&self) -> Vec<(String, NavigateMode)> {
            self.navs
                .borrow()
                .iter()
                .map(|n| (n.href.clone(), n.mode))
                .collect()
        }
    }

    #[test]
    fn test_typing_replaces_once_after_quiet_period() {
        let h = Harness::at("/");
        h.session.on_input("m".to_string());
        h.clock.advance(100);
        h.session.on_input("ma".to_string());
        h.clock.advance(100);
        h.session.on_input("mat".to_string());

        h.clock.advance(499);
        assert!(h.hrefs().is_empty());
        h.clock.advance(1);
        assert_eq!(
            h.hrefs(),
            vec![("/search?q=mat".to_string(), NavigateMode::Replace)]
        );

        assert_eq!(h.router_reports(), None);
        h.clock.advance(5_000);
        assert_eq!(h.navs.borrow().len(), 1);
    }

    #[test]
    fn test_external_navigation_drops_pending_typing() {
        let h = Harness::at("/search?q=alien");
        h.session.on_input("aliens".to_string());
        assert!(h.session.is_pending());

        // Back button before the timer fires.
        h.clock.advance(200);
        assert_eq!(h.external("/search?q=heat").as_deref(), Some("heat"));
        assert_eq!(h.session.input(), "heat");
        assert!(!h.session.is_pending());

        h.clock.advance(5_000);
        assert!(h.hrefs().is_empty(), "stale typing must not navigate");
        assert_eq!(h.address.borrow().param("q"), Some("heat"));
    }

    #[test]
    fn test_typing_during_echo_is_kept() {
        let h = Harness::at("/");
        h.session.on_input("ab".to_string());
        h.clock.advance(500);
        h.session.on_input("abc".to_string());

        // Router gets round to reporting the first replace.
        assert_eq!(h.router_reports(), None);
        assert_eq!(h.session.input(), "abc");

        h.clock.advance(500);
        assert_eq!(
            h.hrefs().last(),
            Some(&("/search?q=abc".to_string(), NavigateMode::Replace))
        );
    }

    #[test]
    fn test_submit_pushes_and_cancels_pending_debounce() {
        let h = Harness::at("/");
        h.session.on_input("fight club".to_string());
        assert!(h.session.is_pending());

        let here = h.address.borrow().clone();
        h.session.submit(&here);
        assert!(!h.session.is_pending());
        assert_eq!(
            h.hrefs(),
            vec![("/search?q=fight%20club".to_string(), NavigateMode::Push)]
        );

        assert_eq!(h.router_reports(), None);
        h.clock.advance(1_000);
        assert_eq!(h.navs.borrow().len(), 1);
    }

    #[test]
    fn test_external_navigation_to_shown_query_after_redundant_typing() {
        let h = Harness::at("/");
        h.session.on_input("dune".to_string());
        // A link lands on the same query before the timer fires.
        assert_eq!(h.external("/search?q=dune"), None);
        h.clock.advance(500);
        assert!(h.hrefs().is_empty());

        h.session.on_input("dunes".to_string());
        h.external("/watchlist");
        assert_eq!(h.external("/search?q=dune").as_deref(), Some("dune"));
        assert_eq!(h.session.input(), "dune");
    }

    #[test]
    fn test_clearing_the_box_drops_the_query() {
        let h = Harness::at("/search?q=heat");
        assert_eq!(h.session.input(), "heat");
        h.session.on_input(String::new());
        h.clock.advance(500);
        assert_eq!(
            h.hrefs(),
            vec![("/search".to_string(), NavigateMode::Replace)]
        );
    }

    #[test]
    fn test_close_cancels_timer() {
        let h = Harness::at("/");
        h.session.on_input("x".to_string());
        assert_eq!(h.clock.pending_count(), 1);

        h.session.close();
        assert_eq!(h.clock.pending_count(), 0);
        assert_eq!(h.session.input(), "");
        h.clock.advance(1_000);
        assert!(h.hrefs().is_empty());
    }

    #[test]
    fn test_drop_cancels_timer() {
        let h = Harness::at("/");
        h.session.on_input("x".to_string());
        let Harness { clock, navs, session, .. } = h;
        drop(session);
        assert_eq!(clock.pending_count(), 0);
        clock.advance(1_000);
        assert!(navs.borrow().is_empty());
    }
}
