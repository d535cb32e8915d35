mod scheduler;

pub use scheduler::{ManualScheduler, Scheduler, TimerId, WindowScheduler};

use std::cell::RefCell;
use std::rc::{Rc, Weak};

struct DebounceState<T> {
    pending: Option<TimerId>,
    sink: Rc<dyn Fn(T)>,
}

/// Trailing-edge debounce over a single cancellable timer.
///
/// Every [`push`](Debouncer::push) cancels the pending emission and restarts
/// the quiet period; the sink sees the last pushed value once the input has
/// been quiet for `delay_ms`. Dropping the debouncer cancels anything still
/// pending, so nothing fires after its owner is gone.
pub struct Debouncer<T: Clone + 'static, S: Scheduler> {
    scheduler: S,
    delay_ms: i32,
    state: Rc<RefCell<DebounceState<T>>>,
}

impl<T: Clone + 'static, S: Scheduler> Debouncer<T, S> {
    pub fn new(scheduler: S, delay_ms: i32, sink: impl Fn(T) + 'static) -> Self {
        Self {
            scheduler,
            delay_ms,
            state: Rc::new(RefCell::new(DebounceState {
                pending: None,
                sink: Rc::new(sink),
            })),
        }
    }

    pub fn push(&self, value: T) {
        self.cancel();

        let weak: Weak<RefCell<DebounceState<T>>> = Rc::downgrade(&self.state);
        let tid = self.scheduler.schedule(
            self.delay_ms,
            Box::new(move || {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                let sink = {
                    let mut st = state.borrow_mut();
                    st.pending = None;
                    st.sink.clone()
                };
                sink(value);
            }),
        );
        self.state.borrow_mut().pending = tid;
    }

    /// Drop the pending emission, if any.
    pub fn cancel(&self) {
        if let Some(tid) = self.state.borrow_mut().pending.take() {
            self.scheduler.cancel(tid);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state.borrow().pending.is_some()
    }
}

impl<T: Clone + 'static, S: Scheduler> Drop for Debouncer<T, S> {
    fn drop(&mut self) {
        self.cancel();
    }
}
