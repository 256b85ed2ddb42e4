use std::cell::RefCell;
use std::rc::{Rc, Weak};

use egui::Pos2;

use super::surface::DragSurface;
use super::types::ElementId;

/// What a drop target hook learns about the drag that triggered it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropContext {
    /// The dragged instance.
    pub source: egui::Id,

    /// The target being notified.
    pub target: egui::Id,

    /// Pointer position in client space.
    pub pointer: Pos2,
}

type Hook = Box<dyn Fn(&DropContext)>;

/// A zone that dragged items can be dropped on.
///
/// A target is a set of container elements plus three notification hooks. The application owns
/// it (usually as an `Rc<DropTarget>`); draggables only keep weak references.
pub struct DropTarget {
    id: egui::Id,
    containers: RefCell<Vec<ElementId>>,
    on_enter: Option<Hook>,
    on_leave: Option<Hook>,
    on_drop: Option<Hook>,
}

impl std::fmt::Debug for DropTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropTarget")
            .field("id", &self.id)
            .field("containers", &self.containers.borrow())
            .finish_non_exhaustive()
    }
}

impl DropTarget {
    pub fn new(id: egui::Id, containers: impl IntoIterator<Item = ElementId>) -> Self {
        Self {
            id,
            containers: RefCell::new(containers.into_iter().collect()),
            on_enter: None,
            on_leave: None,
            on_drop: None,
        }
    }

    /// Called when a drag first hovers one of the containers.
    #[must_use]
    pub fn on_enter(mut self, hook: impl Fn(&DropContext) + 'static) -> Self {
        self.on_enter = Some(Box::new(hook));
        self
    }

    /// Called when a drag stops hovering the target (including when the drag ends).
    #[must_use]
    pub fn on_leave(mut self, hook: impl Fn(&DropContext) + 'static) -> Self {
        self.on_leave = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_drop(mut self, hook: impl Fn(&DropContext) + 'static) -> Self {
        self.on_drop = Some(Box::new(hook));
        self
    }

    pub fn id(&self) -> egui::Id {
        self.id
    }

    pub fn containers(&self) -> Vec<ElementId> {
        self.containers.borrow().clone()
    }

    /// Replace the container set. Takes effect on the next hit-test, even mid-drag.
    pub fn set_containers(&self, containers: impl IntoIterator<Item = ElementId>) {
        *self.containers.borrow_mut() = containers.into_iter().collect();
    }

    /// `true` if one of the containers is `element` or an ancestor of it.
    pub fn contains_element(&self, surface: &dyn DragSurface, element: ElementId) -> bool {
        self.containers
            .borrow()
            .iter()
            .any(|&container| surface.contains(container, element))
    }

    pub(crate) fn notify_enter(&self, ctx: &DropContext) {
        if let Some(hook) = &self.on_enter {
            hook(ctx);
        }
    }

    pub(crate) fn notify_leave(&self, ctx: &DropContext) {
        if let Some(hook) = &self.on_leave {
            hook(ctx);
        }
    }

    pub(crate) fn notify_drop(&self, ctx: &DropContext) {
        if let Some(hook) = &self.on_drop {
            hook(ctx);
        }
    }
}

/// Ordered, non-owning set of drop targets.
#[derive(Debug, Default)]
pub struct DropTargetRegistry {
    targets: Vec<Weak<DropTarget>>,
}

impl DropTargetRegistry {
    /// Register a target. Registering the same target again is a no-op.
    ///
    /// Returns `true` if the target was added.
    pub fn register(&mut self, target: &Rc<DropTarget>) -> bool {
        self.prune();
        if self.contains(target) {
            return false;
        }
        self.targets.push(Rc::downgrade(target));
        true
    }

    /// Unregister a target. Unregistering an unknown target is a no-op.
    ///
    /// Returns `true` if the target was removed.
    pub fn unregister(&mut self, target: &Rc<DropTarget>) -> bool {
        self.prune();
        let weak = Rc::downgrade(target);
        let before = self.targets.len();
        self.targets.retain(|t| !t.ptr_eq(&weak));
        self.targets.len() != before
    }

    pub fn contains(&self, target: &Rc<DropTarget>) -> bool {
        let weak = Rc::downgrade(target);
        self.targets.iter().any(|t| t.ptr_eq(&weak))
    }

    /// Number of live registered targets.
    pub fn len(&self) -> usize {
        self.targets.iter().filter(|t| t.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget targets the application has dropped.
    pub fn prune(&mut self) {
        self.targets.retain(|t| t.strong_count() > 0);
    }

    /// Live targets in registration order.
    pub fn iter(&self) -> impl Iterator<Item = Rc<DropTarget>> + '_ {
        self.targets.iter().filter_map(Weak::upgrade)
    }

    /// The first target (in registration order) with a container that is, or is an ancestor of,
    /// the hovered element.
    pub fn hit_test(
        &self,
        surface: &dyn DragSurface,
        hovered: Option<ElementId>,
    ) -> Option<Rc<DropTarget>> {
        let hovered = hovered?;
        self.iter()
            .find(|target| target.contains_element(surface, hovered))
    }
}
