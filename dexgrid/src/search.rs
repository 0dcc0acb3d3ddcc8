/// Delay before a burst of keystrokes is considered settled.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Debounced search input.
///
/// Each keystroke cancels the previous pending deadline and schedules a new
/// one; only a deadline that survives untouched fires. The debounce is the
/// sole backpressure: in-flight fetches for a superseded query are not
/// cancelled here, they are discarded by the data source on arrival.
///
/// Time is supplied by the host as `now_ms`, so the controller works with any
/// clock (frame timestamps, test counters).
#[derive(Clone, Debug)]
pub struct SearchQueryController {
    raw: String,
    settled: String,
    deadline_ms: Option<u64>,
    delay_ms: u64,
}

impl Default for SearchQueryController {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchQueryController {
    pub fn new() -> Self {
        Self {
            raw: String::new(),
            settled: String::new(),
            deadline_ms: None,
            delay_ms: SEARCH_DEBOUNCE_MS,
        }
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Seeds both raw and settled text, e.g. from a persisted query restored
    /// by the host at startup.
    pub fn with_initial_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.raw = query.clone();
        self.settled = query;
        self
    }

    /// Current input text, as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The last settled (debounced) query.
    pub fn settled(&self) -> &str {
        &self.settled
    }

    /// True while the raw text differs from the settled query.
    pub fn is_searching(&self) -> bool {
        self.raw != self.settled
    }

    /// Records a keystroke at `now_ms`.
    pub fn input(&mut self, text: impl Into<String>, now_ms: u64) {
        let text = text.into();
        if text == self.raw {
            return;
        }
        self.raw = text;
        if self.raw == self.settled {
            // Typed back to the settled value; nothing left to fire.
            self.deadline_ms = None;
            return;
        }
        gtrace!(raw = %self.raw, deadline = now_ms + self.delay_ms, "debounce rescheduled");
        self.deadline_ms = Some(now_ms + self.delay_ms);
    }

    /// Fires the settled query once its deadline has passed.
    ///
    /// Returns the newly settled query at most once per deadline.
    pub fn poll(&mut self, now_ms: u64) -> Option<&str> {
        let deadline = self.deadline_ms?;
        if now_ms < deadline {
            return None;
        }
        self.deadline_ms = None;
        self.settled = self.raw.clone();
        gdebug!(query = %self.settled, "search query settled");
        Some(self.settled.as_str())
    }

    /// Settles immediately (e.g. the user pressed Enter).
    pub fn flush(&mut self) -> Option<&str> {
        self.deadline_ms = None;
        if self.raw == self.settled {
            return None;
        }
        self.settled = self.raw.clone();
        Some(self.settled.as_str())
    }
}
