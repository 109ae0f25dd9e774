use tracing::debug;

/// Ordered slices of one acquisition with a current position.
///
/// `current` is always a valid index when the series is non-empty and 0
/// otherwise.
#[derive(Clone, Debug)]
pub struct Series<S> {
    slices: Vec<S>,
    current: usize,
}

impl<S> Default for Series<S> {
    fn default() -> Self {
        Self {
            slices: Vec::new(),
            current: 0,
        }
    }
}

impl<S> Series<S> {
    pub fn new(slices: Vec<S>) -> Self {
        Self { slices, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&S> {
        self.slices.get(self.current)
    }

    pub fn get(&self, index: usize) -> Option<&S> {
        self.slices.get(index)
    }

    pub fn slices(&self) -> &[S] {
        &self.slices
    }

    /// Replace the slices, keeping the position clamped into range.
    pub fn replace(&mut self, slices: Vec<S>) {
        self.slices = slices;
        self.current = self.clamp(self.current);
    }

    /// Jump to `index` (clamped). Returns the new index if it changed.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        let target = self.clamp(index);
        self.move_to(target)
    }

    /// Step one slice forward, stopping at the end.
    pub fn next(&mut self) -> Option<usize> {
        self.select(self.current.saturating_add(1))
    }

    /// Step one slice back, stopping at the start.
    pub fn previous(&mut self) -> Option<usize> {
        if self.current == 0 {
            return None;
        }
        self.select(self.current - 1)
    }

    /// Step forward with wraparound to the first slice.
    pub fn advance_wrapping(&mut self) -> Option<usize> {
        if self.slices.is_empty() {
            return None;
        }
        let target = (self.current + 1) % self.slices.len();
        self.move_to(target)
    }

    fn move_to(&mut self, target: usize) -> Option<usize> {
        if target == self.current {
            return None;
        }
        debug!(from = self.current, to = target, "Slice changed");
        self.current = target;
        Some(target)
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.slices.len().saturating_sub(1))
    }
}
