/// Notifications emitted by the selection manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    /// A selection entry effectively changed.
    Changed,
    /// The additions history was modified.
    AdditionsHistoryUpdated,
}

pub type SelectionCallback = Box<dyn Fn(SelectionEvent)>;

/// Fan-out of [`SelectionEvent`]s to subscribers.
///
/// Callbacks run synchronously while the manager is still borrowed; they must not call back
/// into the manager.
#[derive(Default)]
pub struct SelectionEvents {
    subscribers: Vec<SelectionCallback>,
}

impl SelectionEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: SelectionCallback) {
        self.subscribers.push(callback);
    }

    #[inline]
    pub fn emit(&self, event: SelectionEvent) {
        for cb in &self.subscribers {
            cb(event);
        }
    }
}

impl std::fmt::Debug for SelectionEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionEvents")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
