use std::rc::{Rc, Weak};

use egui::{Pos2, Vec2};

use super::proxy::DragProxy;
use super::target::DropTarget;
use super::types::PointerSample;

/// Observable phase of a draggable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,

    /// Pressed, but the pointer has not yet moved past the drag threshold.
    Pending,

    /// Dragging: the proxy is visible and drop targets are tracked.
    Active,
}

#[derive(Debug)]
pub(super) struct ActiveDrag {
    pub(super) origin: PointerSample,
    pub(super) current: PointerSample,
    pub(super) proxy: DragProxy,

    /// Document-space position the proxy was last placed at.
    pub(super) proxy_pos: Option<Pos2>,

    /// Hovered target. The id outlives the target, so a leave can still be reported for a
    /// target the application dropped mid-drag.
    pub(super) last_target: Option<(egui::Id, Weak<DropTarget>)>,
    pub(super) scroll: Vec2,
}

impl ActiveDrag {
    pub(super) fn last_target_id(&self) -> Option<egui::Id> {
        self.last_target.as_ref().map(|(id, _)| *id)
    }

    pub(super) fn is_last_target(&self, target: Option<&Rc<DropTarget>>) -> bool {
        match (&self.last_target, target) {
            (None, None) => true,
            (Some((_, last)), Some(target)) => last.ptr_eq(&Rc::downgrade(target)),
            _ => false,
        }
    }

    /// Make `target` the hovered one, returning the previous one.
    pub(super) fn replace_last_target(
        &mut self,
        target: Option<&Rc<DropTarget>>,
    ) -> Option<(egui::Id, Weak<DropTarget>)> {
        let next = target.map(|t| (t.id(), Rc::downgrade(t)));
        std::mem::replace(&mut self.last_target, next)
    }
}

#[derive(Debug, Default)]
pub(super) enum Phase {
    #[default]
    Idle,
    Pending {
        origin: PointerSample,
    },
    Active(ActiveDrag),
}

/// The one gesture a draggable can have in flight. The proxy only exists inside `Phase::Active`.
#[derive(Debug, Default)]
pub(super) struct DragSession {
    next_id: u64,
    id: u64,
    pub(super) phase: Phase,
}

impl DragSession {
    pub(super) fn phase(&self) -> DragPhase {
        match self.phase {
            Phase::Idle => DragPhase::Idle,
            Phase::Pending { .. } => DragPhase::Pending,
            Phase::Active(_) => DragPhase::Active,
        }
    }

    /// Serial of the current (or last) gesture, for logging.
    pub(super) fn id(&self) -> u64 {
        self.id
    }

    pub(super) fn press(&mut self, origin: PointerSample) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id.saturating_add(1);
        self.id = id;
        self.phase = Phase::Pending { origin };
        id
    }

    pub(super) fn pending_origin(&self) -> Option<PointerSample> {
        match self.phase {
            Phase::Pending { origin } => Some(origin),
            Phase::Idle | Phase::Active(_) => None,
        }
    }

    pub(super) fn activate(&mut self, active: ActiveDrag) {
        self.phase = Phase::Active(active);
    }

    pub(super) fn active(&self) -> Option<&ActiveDrag> {
        match &self.phase {
            Phase::Active(active) => Some(active),
            Phase::Idle | Phase::Pending { .. } => None,
        }
    }

    pub(super) fn active_mut(&mut self) -> Option<&mut ActiveDrag> {
        match &mut self.phase {
            Phase::Active(active) => Some(active),
            Phase::Idle | Phase::Pending { .. } => None,
        }
    }

    /// Leave whatever phase we are in; returns the active drag if there was one.
    pub(super) fn reset(&mut self) -> Option<ActiveDrag> {
        match std::mem::take(&mut self.phase) {
            Phase::Active(active) => Some(active),
            Phase::Idle | Phase::Pending { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use egui::pos2;

    use super::*;
    use crate::drag::types::{ElementId, PointerSource, RawKind};

    fn sample(x: f32, y: f32) -> PointerSample {
        PointerSample {
            pos: pos2(x, y),
            time: 0.0,
            raw: RawKind::MouseDown,
            source: PointerSource::Mouse,
        }
    }

    fn active() -> ActiveDrag {
        ActiveDrag {
            origin: sample(0.0, 0.0),
            current: sample(20.0, 0.0),
            proxy: DragProxy {
                node: ElementId(9),
                size: Vec2::splat(10.0),
            },
            proxy_pos: None,
            last_target: None,
            scroll: Vec2::ZERO,
        }
    }

    #[test]
    fn press_assigns_increasing_ids() {
        let mut session = DragSession::default();
        assert_eq!(session.press(sample(0.0, 0.0)), 1);
        assert_eq!(session.phase(), DragPhase::Pending);
        session.reset();
        assert_eq!(session.press(sample(0.0, 0.0)), 2);
        assert_eq!(session.id(), 2);
    }

    #[test]
    fn reset_hands_back_the_active_drag() {
        let mut session = DragSession::default();
        session.press(sample(0.0, 0.0));
        assert!(session.reset().is_none());

        session.activate(active());
        assert_eq!(session.phase(), DragPhase::Active);
        let taken = session.reset().expect("was active");
        assert_eq!(taken.proxy.node, ElementId(9));
        assert_eq!(session.phase(), DragPhase::Idle);
        assert!(session.active().is_none());
    }

    #[test]
    fn last_target_identity() {
        let t = Rc::new(DropTarget::new(egui::Id::new("t"), []));
        let other = Rc::new(DropTarget::new(egui::Id::new("other"), []));
        let mut drag = active();
        assert!(drag.is_last_target(None));
        assert!(drag.replace_last_target(Some(&t)).is_none());
        assert!(drag.is_last_target(Some(&t)));
        assert!(!drag.is_last_target(Some(&other)));
        assert!(!drag.is_last_target(None));
    }

    #[test]
    fn last_target_id_survives_the_target() {
        let t = Rc::new(DropTarget::new(egui::Id::new("t"), []));
        let mut drag = active();
        drag.replace_last_target(Some(&t));
        drop(t);

        assert_eq!(drag.last_target_id(), Some(egui::Id::new("t")));
        assert!(!drag.is_last_target(None));
        let (id, weak) = drag.replace_last_target(None).expect("was hovering");
        assert_eq!(id, egui::Id::new("t"));
        assert!(weak.upgrade().is_none());
        assert_eq!(drag.last_target_id(), None);
    }
}
