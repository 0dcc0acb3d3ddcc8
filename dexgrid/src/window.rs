/// Configuration for [`SlidingWindow`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowOptions {
    /// Items shifted per sentinel crossing; also the fetch chunk size.
    pub chunk: usize,
    /// Assumed rendered height of one item row, in pixels.
    ///
    /// Padding adjustments are computed from this estimate. When real rendered
    /// heights differ, the substituted padding drifts from the true content
    /// height; that drift is a known fragility of this variant.
    pub row_height_estimate: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            chunk: 20,
            row_height_estimate: 170,
        }
    }
}

/// Events from the top/bottom sentinel elements entering the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SentinelEvent {
    TopVisible,
    BottomVisible,
}

/// Where the window sits within the full collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowPhase {
    AtStart,
    MidScroll,
    AtEnd,
}

/// What the host must do after a sentinel event was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowEffect {
    /// Boundary event with no movement; nothing to re-render.
    None,
    /// Re-render the span `[first_index, first_index + len)`.
    Rendered { first_index: usize, len: usize },
    /// The forward span is not loaded yet; fetch another page and re-apply
    /// the event once data arrives.
    NeedsFetch,
}

/// Manual DOM-windowing over the accumulated list.
///
/// Alternative to [`crate::VirtualGrid`]: instead of positioning cells from
/// the scroll offset, the host keeps a bounded span of `2 × chunk` items in
/// the DOM and substitutes the unrendered remainder with top/bottom padding.
/// This is a reducer: sentinel visibility events go in, a new window state and
/// a re-render effect come out, with no shared mutable capture.
#[derive(Clone, Debug)]
pub struct SlidingWindow {
    options: WindowOptions,
    current_index: usize,
    padding_top: u64,
    padding_bottom: u64,
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self::new(WindowOptions::default())
    }
}

impl SlidingWindow {
    pub fn new(options: WindowOptions) -> Self {
        Self {
            options,
            current_index: 0,
            padding_top: 0,
            padding_bottom: 0,
        }
    }

    pub fn options(&self) -> WindowOptions {
        self.options
    }

    /// Upper bound on simultaneously rendered items.
    pub fn dom_page_size(&self) -> usize {
        self.options.chunk * 2
    }

    /// First item index currently materialized in the DOM.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn padding_top(&self) -> u64 {
        self.padding_top
    }

    pub fn padding_bottom(&self) -> u64 {
        self.padding_bottom
    }

    /// Items actually rendered given how many are loaded.
    pub fn rendered_len(&self, loaded_count: usize) -> usize {
        loaded_count
            .saturating_sub(self.current_index)
            .min(self.dom_page_size())
    }

    fn at_end(&self, max_count: usize) -> bool {
        max_count >= self.dom_page_size()
            && self.current_index == max_count - self.dom_page_size()
    }

    pub fn phase(&self, max_count: usize) -> WindowPhase {
        if self.current_index == 0 {
            WindowPhase::AtStart
        } else if self.at_end(max_count) {
            WindowPhase::AtEnd
        } else {
            WindowPhase::MidScroll
        }
    }

    /// Resets to the top of a fresh collection (query change).
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.padding_top = 0;
        self.padding_bottom = 0;
    }

    /// Applies one sentinel event.
    ///
    /// `loaded_count` is the accumulated item count, `max_count` the
    /// server-side total (or `loaded_count` while unknown), `has_more` whether
    /// further pages exist.
    pub fn apply(
        &mut self,
        event: SentinelEvent,
        loaded_count: usize,
        max_count: usize,
        has_more: bool,
    ) -> WindowEffect {
        match event {
            SentinelEvent::TopVisible => self.apply_top(loaded_count),
            SentinelEvent::BottomVisible => self.apply_bottom(loaded_count, max_count, has_more),
        }
    }

    fn shift_amount(&self) -> u64 {
        self.options.chunk as u64 * self.options.row_height_estimate as u64
    }

    fn apply_top(&mut self, loaded_count: usize) -> WindowEffect {
        if self.current_index == 0 {
            // Visual normalization at the very top.
            self.padding_top = 0;
            self.padding_bottom = 0;
            return WindowEffect::None;
        }

        let first_index = self.current_index.saturating_sub(self.options.chunk);
        let shift = self.shift_amount();
        self.padding_top = self.padding_top.saturating_sub(shift);
        self.padding_bottom = self.padding_bottom.saturating_add(shift);
        self.current_index = first_index;
        if self.current_index == 0 {
            self.padding_top = 0;
            self.padding_bottom = 0;
        }
        gtrace!(first_index, "window shifted backward");

        WindowEffect::Rendered {
            first_index,
            len: self.rendered_len(loaded_count),
        }
    }

    fn apply_bottom(
        &mut self,
        loaded_count: usize,
        max_count: usize,
        has_more: bool,
    ) -> WindowEffect {
        if self.at_end(max_count) {
            return WindowEffect::None;
        }

        let first_index = self.current_index + self.options.chunk;
        if loaded_count >= first_index + self.options.chunk {
            let shift = self.shift_amount();
            self.padding_top = self.padding_top.saturating_add(shift);
            self.padding_bottom = self.padding_bottom.saturating_sub(shift);
            self.current_index = first_index;
            gtrace!(first_index, "window shifted forward");
            WindowEffect::Rendered {
                first_index,
                len: self.rendered_len(loaded_count),
            }
        } else if has_more {
            // Defer the shift until the next page arrives.
            WindowEffect::NeedsFetch
        } else {
            WindowEffect::None
        }
    }
}
