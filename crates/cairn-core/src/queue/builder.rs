use std::fmt;

use super::{BasicQueue, FrozenCallback};

/// Configures a [`BasicQueue`] before it is handed out.
pub struct BasicQueueBuilder<T> {
    items: Vec<T>,
    frozen: bool,
    on_frozen: Option<FrozenCallback<T>>,
}

impl<T> BasicQueueBuilder<T> {
    pub(super) fn new() -> Self {
        Self {
            items: Vec::new(),
            frozen: false,
            on_frozen: None,
        }
    }

    /// Initial contents, moved in as given.
    pub fn contents(mut self, items: Vec<T>) -> Self {
        self.items = items;
        self
    }

    /// Whether the queue starts frozen.
    pub fn frozen(mut self, frozen: bool) -> Self {
        self.frozen = frozen;
        self
    }

    /// Callback run on every operation rejected while frozen.
    pub fn on_frozen<F>(mut self, callback: F) -> Self
    where
        F: Fn(&BasicQueue<T>) + Send + Sync + 'static,
    {
        self.on_frozen = Some(super::frozen_callback(callback));
        self
    }

    /// Finishes the queue.
    pub fn build(self) -> BasicQueue<T> {
        BasicQueue::from_parts(self.items, self.frozen, self.on_frozen)
    }
}

impl<T> Default for BasicQueueBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for BasicQueueBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicQueueBuilder")
            .field("items", &self.items)
            .field("frozen", &self.frozen)
            .field("on_frozen", &self.on_frozen.is_some())
            .finish()
    }
}
