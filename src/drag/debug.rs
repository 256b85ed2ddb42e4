use itertools::Itertools as _;

use super::Draggable;

impl Draggable {
    pub(super) fn debug_log_event(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("[{:?} gesture {}] {message}", self.id, self.session.id());
        if !self.options.debug_event_log {
            return;
        }
        self.push_debug_log_line(message);
    }

    fn push_debug_log_line(&mut self, message: String) {
        let cap = self.options.debug_event_log_capacity.clamp(1, 10_000);
        while self.debug_log.len() >= cap {
            self.debug_log.pop_front();
        }
        self.debug_log
            .push_back(format!("[gesture {}] {}", self.session.id(), message));
    }

    /// Clear the debug event log.
    pub fn debug_log_clear(&mut self) {
        self.debug_log.clear();
    }

    /// The debug event log, one line per event (oldest first).
    ///
    /// Only populated while [`super::DragOptions::debug_event_log`] is enabled.
    pub fn debug_log_text(&self) -> String {
        self.debug_log.iter().join("\n")
    }
}
