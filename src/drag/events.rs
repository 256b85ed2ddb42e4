/// Notifications emitted by a [`super::Draggable`].
///
/// Per gesture the order is: `DragStart`, any number of `DragEnter`/`DragLeave` pairs,
/// `DragEnd`, then `Dropped` only if the release resolved a target.
/// A press that never crosses the drag threshold emits a single `Click` instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragEvent {
    DragStart { source: egui::Id },
    DragEnter { source: egui::Id, target: egui::Id },
    DragLeave { source: egui::Id, target: egui::Id },
    DragEnd { source: egui::Id },
    Dropped { source: egui::Id, target: egui::Id },
    Click { source: egui::Id },
}

impl DragEvent {
    /// The draggable that emitted the event.
    pub fn source(&self) -> egui::Id {
        match *self {
            Self::DragStart { source }
            | Self::DragEnter { source, .. }
            | Self::DragLeave { source, .. }
            | Self::DragEnd { source }
            | Self::Dropped { source, .. }
            | Self::Click { source } => source,
        }
    }

    /// The drop target involved, if any.
    pub fn target(&self) -> Option<egui::Id> {
        match *self {
            Self::DragEnter { target, .. }
            | Self::DragLeave { target, .. }
            | Self::Dropped { target, .. } => Some(target),
            Self::DragStart { .. } | Self::DragEnd { .. } | Self::Click { .. } => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::DragStart { .. } => "drag_start",
            Self::DragEnter { .. } => "drag_enter",
            Self::DragLeave { .. } => "drag_leave",
            Self::DragEnd { .. } => "drag_end",
            Self::Dropped { .. } => "dropped",
            Self::Click { .. } => "click",
        }
    }
}

/// Handle returned by [`EventEmitter::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&DragEvent)>;

#[derive(Default)]
pub struct EventEmitter {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventEmitter {
    pub fn subscribe(&mut self, listener: impl FnMut(&DragEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver to every listener, in subscription order.
    pub fn emit(&mut self, event: &DragEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}
