use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;

/// Browser timeout handle (`setTimeout` return value).
pub type TimerId = i32;

/// One-shot, cancellable timers on the UI event loop.
pub trait Scheduler {
    /// Run `callback` once after `delay_ms`. `None` if no timer could be set,
    /// in which case the callback is dropped without running.
    fn schedule(&self, delay_ms: i32, callback: Box<dyn FnOnce()>) -> Option<TimerId>;

    /// Cancel a pending timer. Unknown or already-fired ids are ignored.
    fn cancel(&self, id: TimerId);
}

/// `window.setTimeout` / `window.clearTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowScheduler;

impl Scheduler for WindowScheduler {
    fn schedule(&self, delay_ms: i32, callback: Box<dyn FnOnce()>) -> Option<TimerId> {
        let win = web_sys::window()?;
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || callback());
        win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            delay_ms,
        )
        .ok()
    }

    fn cancel(&self, id: TimerId) {
        if let Some(win) = web_sys::window() {
            win.clear_timeout_with_handle(id);
        }
    }
}

type Pending = BTreeMap<(u64, TimerId), Box<dyn FnOnce()>>;

#[derive(Default)]
struct ManualClock {
    now_ms: u64,
    next_id: TimerId,
    pending: Pending,
}

/// Virtual-clock scheduler: nothing fires until [`ManualScheduler::advance`].
///
/// Timers due at the same instant fire in scheduling order.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<ManualClock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.borrow().now_ms
    }

    pub fn pending_count(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    /// Move the clock forward, firing every timer that comes due on the way.
    /// Callbacks may schedule or cancel further timers.
    pub fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now_ms + ms;
        loop {
            let due = {
                let mut clock = self.clock.borrow_mut();
                let next = clock
                    .pending
                    .keys()
                    .next()
                    .copied()
                    .filter(|(at, _)| *at <= target);
                match next {
                    Some(key) => {
                        clock.now_ms = key.0;
                        clock.pending.remove(&key)
                    }
                    None => None,
                }
            };
            match due {
                Some(cb) => cb(),
                None => break,
            }
        }
        self.clock.borrow_mut().now_ms = target;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: i32, callback: Box<dyn FnOnce()>) -> Option<TimerId> {
        let mut clock = self.clock.borrow_mut();
        clock.next_id += 1;
        let id = clock.next_id;
        let at = clock.now_ms + delay_ms.max(0) as u64;
        clock.pending.insert((at, id), callback);
        Some(id)
    }

    fn cancel(&self, id: TimerId) {
        self.clock.borrow_mut().pending.retain(|(_, tid), _| *tid != id);
    }
}
