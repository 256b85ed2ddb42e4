use std::collections::VecDeque;
use std::rc::Rc;

use egui::{CursorIcon, Pos2, Vec2};

mod debug;
mod egui_input;
mod error;
mod events;
mod geometry;
mod normalize;
mod options;
mod proxy;
mod session;
mod surface;
mod target;
mod types;


pub use egui_input::EguiInputBridge;
pub use error::DragError;
pub use events::{DragEvent, EventEmitter, SubscriptionId};
pub use geometry::{ScrollMetrics, autoscroll_offset, clamp_proxy_pos, document_pos, indicator_rect};
pub use normalize::{NormalizedInput, PointerNormalizer};
pub use options::{
    AUTOSCROLL_STEP, AUTOSCROLL_TRIGGER_DISTANCE, AutoscrollMode, DOCUMENT_MARGIN, DRAG_THRESHOLD,
    DragOptions, PROXY_BOUND,
};
pub use proxy::{DragProxy, ProxyFactory, ProxySpec, proxy_from_element, proxy_scale};
pub use session::DragPhase;
pub use surface::DragSurface;
pub use target::{DropContext, DropTarget, DropTargetRegistry};
pub use types::{
    ElementId, MouseButton, PointerEvent, PointerPhase, PointerSample, PointerSource, RawInput,
    RawKind, TouchPhase, TouchPoint,
};

use session::{ActiveDrag, DragSession};

/// What the host should do with an input after handing it to a [`Draggable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResponse {
    /// None of the draggable's listeners were interested.
    Ignored,

    /// Consumed; the host should suppress the platform's default action for it.
    Consumed,
}

/// A visual element that can be picked up with a mouse or finger and dropped on registered
/// [`DropTarget`]s.
///
/// The host feeds every input to [`Self::handle_input`] together with its [`DragSurface`].
/// A press on the element becomes a drag once the pointer travels further than
/// [`DragOptions::drag_threshold`]; otherwise it resolves as a click.
///
/// Lifecycle: `Idle → Pending → Active → Idle`. While active, a proxy (a scaled clone of the
/// element) follows the pointer in document space, drop targets get enter/leave notifications,
/// and the viewport scrolls when the pointer nears an edge.
pub struct Draggable {
    pub options: DragOptions,

    id: egui::Id,
    element: ElementId,

    /// `set_draggable` state.
    enabled: bool,

    /// Between construction/[`Self::attach`] and [`Self::teardown`].
    attached: bool,

    normalizer: PointerNormalizer,
    session: DragSession,
    targets: DropTargetRegistry,
    emitter: EventEmitter,
    proxy_factory: Option<ProxyFactory>,

    debug_log: VecDeque<String>,
}

impl std::fmt::Debug for Draggable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Draggable")
            .field("id", &self.id)
            .field("element", &self.element)
            .field("enabled", &self.enabled)
            .field("attached", &self.attached)
            .field("phase", &self.session.phase())
            .field("targets", &self.targets.len())
            .field("custom_proxy", &self.proxy_factory.is_some())
            .finish_non_exhaustive()
    }
}

impl Draggable {
    pub fn new(id: egui::Id, element: ElementId) -> Self {
        Self::new_with_options(id, element, DragOptions::default())
    }

    pub fn new_with_options(id: egui::Id, element: ElementId, options: DragOptions) -> Self {
        Self {
            normalizer: PointerNormalizer::new(options.primary_button_only),
            options,
            id,
            element,
            enabled: true,
            attached: true,
            session: DragSession::default(),
            targets: DropTargetRegistry::default(),
            emitter: EventEmitter::default(),
            proxy_factory: None,
            debug_log: VecDeque::new(),
        }
    }

    pub fn id(&self) -> egui::Id {
        self.id
    }

    /// The element that is pressed to start a drag, and cloned for the default proxy.
    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn phase(&self) -> DragPhase {
        self.session.phase()
    }

    pub fn is_being_dragged(&self) -> bool {
        self.session.phase() == DragPhase::Active
    }

    pub fn is_draggable(&self) -> bool {
        self.enabled
    }

    fn is_listening(&self) -> bool {
        self.enabled && self.attached
    }

    /// Cursor the host should show while hovering the element.
    pub fn hover_cursor(&self) -> Option<CursorIcon> {
        if !self.is_listening() {
            return None;
        }
        Some(if self.is_being_dragged() {
            CursorIcon::Grabbing
        } else {
            CursorIcon::Grab
        })
    }

    /// The proxy of the drag in progress.
    pub fn proxy(&self) -> Option<DragProxy> {
        self.session.active().map(|a| a.proxy)
    }

    /// Document-space position the proxy was last placed at.
    pub fn proxy_position(&self) -> Option<Pos2> {
        self.session.active().and_then(|a| a.proxy_pos)
    }

    /// Scroll offset the proxy position is currently computed against.
    pub fn scroll_snapshot(&self) -> Option<Vec2> {
        self.session.active().map(|a| a.scroll)
    }

    /// Where the press that started the current gesture happened (client space).
    pub fn press_origin(&self) -> Option<Pos2> {
        self.session
            .pending_origin()
            .or_else(|| self.session.active().map(|a| a.origin))
            .map(|s| s.pos)
    }

    /// The drop target currently hovered by the drag, if any.
    pub fn hovered_target(&self) -> Option<egui::Id> {
        self.session
            .active()
            .and_then(ActiveDrag::last_target_id)
    }

    // ------------------------------------------------------------------------
    // Registration & subscription

    /// Register a drop target. Adding the same target twice is a no-op.
    pub fn add_drop_target(&mut self, target: &Rc<DropTarget>) -> bool {
        self.targets.register(target)
    }

    /// Unregister a drop target. Removing an unknown target is a no-op.
    pub fn remove_drop_target(&mut self, target: &Rc<DropTarget>) -> bool {
        self.targets.unregister(target)
    }

    pub fn drop_targets(&self) -> &DropTargetRegistry {
        &self.targets
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&DragEvent) + 'static) -> SubscriptionId {
        self.emitter.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.emitter.unsubscribe(id)
    }

    /// Replace the default proxy (a scaled clone of [`Self::element`]) with a custom one.
    pub fn set_proxy_factory(
        &mut self,
        factory: impl FnMut(&mut dyn DragSurface, ElementId, &DragOptions) -> Result<DragProxy, DragError>
        + 'static,
    ) {
        self.proxy_factory = Some(Box::new(factory));
    }

    pub fn reset_proxy_factory(&mut self) {
        self.proxy_factory = None;
    }

    // ------------------------------------------------------------------------
    // Enable / attach

    /// Enable or disable dragging. Disabling cancels a drag in progress.
    pub fn set_draggable(&mut self, surface: &mut dyn DragSurface, draggable: bool) {
        if !draggable {
            self.cancel(surface);
            self.normalizer.reset();
        }
        self.enabled = draggable;
    }

    /// Re-attach after [`Self::teardown`].
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// The view is going away: cancel any gesture and stop listening.
    pub fn teardown(&mut self, surface: &mut dyn DragSurface) {
        self.cancel(surface);
        surface.set_indicator(self.id, None);
        self.normalizer.reset();
        self.attached = false;
    }

    /// Abort the current gesture. An active drag ends without a drop.
    pub fn cancel(&mut self, surface: &mut dyn DragSurface) {
        self.stop_dragging(surface, None);
    }

    // ------------------------------------------------------------------------
    // Input

    /// Feed one host input.
    ///
    /// # Errors
    /// If the drag could not start because the surface had no usable geometry or refused to
    /// render the proxy. The gesture is already back to idle when this returns.
    pub fn handle_input(
        &mut self,
        surface: &mut dyn DragSurface,
        input: &RawInput,
    ) -> Result<InputResponse, DragError> {
        if !self.is_listening() {
            return Ok(InputResponse::Ignored);
        }

        self.normalizer
            .set_primary_button_only(self.options.primary_button_only);
        let Some(normalized) = self.normalizer.normalize(surface, input) else {
            return Ok(InputResponse::Ignored);
        };

        match normalized {
            NormalizedInput::Pointer(event) => self.handle_pointer(surface, event),
            NormalizedInput::SuppressNativeDrag { target } => Ok(if self.owns(surface, target) {
                InputResponse::Consumed
            } else {
                InputResponse::Ignored
            }),
            NormalizedInput::PointerLeftSurface => {
                if !self.is_being_dragged() {
                    return Ok(InputResponse::Ignored);
                }
                self.debug_log_event("pointer left surface");
                self.cancel(surface);
                Ok(InputResponse::Consumed)
            }
            NormalizedInput::Blur => match self.phase() {
                DragPhase::Idle => Ok(InputResponse::Ignored),
                DragPhase::Pending | DragPhase::Active => {
                    self.debug_log_event("window blur");
                    self.cancel(surface);
                    Ok(InputResponse::Consumed)
                }
            },
            NormalizedInput::Scroll => {
                if !self.is_being_dragged() {
                    return Ok(InputResponse::Ignored);
                }
                self.on_scroll(surface);
                Ok(InputResponse::Consumed)
            }
        }
    }

    fn owns(&self, surface: &dyn DragSurface, target: Option<ElementId>) -> bool {
        target.is_some_and(|t| surface.contains(self.element, t))
    }

    fn handle_pointer(
        &mut self,
        surface: &mut dyn DragSurface,
        event: PointerEvent,
    ) -> Result<InputResponse, DragError> {
        match (event.phase, self.phase()) {
            (PointerPhase::Down, DragPhase::Idle) => {
                if !self.owns(surface, event.target) {
                    return Ok(InputResponse::Ignored);
                }
                self.session.press(event.sample);
                self.debug_log_event(format!(
                    "press ({:.1},{:.1}) source={:?}",
                    event.sample.pos.x, event.sample.pos.y, event.sample.source
                ));
                Ok(InputResponse::Consumed)
            }
            (PointerPhase::Move, DragPhase::Pending) => self.maybe_start_drag(surface, event),
            (PointerPhase::Move, DragPhase::Active) => {
                self.drag_to(surface, event);
                Ok(InputResponse::Consumed)
            }
            (PointerPhase::Up | PointerPhase::Click, DragPhase::Pending) => {
                self.click();
                Ok(InputResponse::Consumed)
            }
            (PointerPhase::Up | PointerPhase::Click, DragPhase::Active) => {
                self.release(surface, event);
                Ok(InputResponse::Consumed)
            }
            // A second press mid-gesture, or anything while no press is in progress
            // (including the platform click that trails a finished drag).
            (PointerPhase::Down, DragPhase::Pending | DragPhase::Active)
            | (PointerPhase::Move | PointerPhase::Up | PointerPhase::Click, DragPhase::Idle) => {
                Ok(InputResponse::Ignored)
            }
        }
    }

    fn maybe_start_drag(
        &mut self,
        surface: &mut dyn DragSurface,
        event: PointerEvent,
    ) -> Result<InputResponse, DragError> {
        let Some(origin) = self.session.pending_origin() else {
            return Ok(InputResponse::Ignored);
        };
        let distance = event.sample.pos.distance(origin.pos);
        if !self.options.threshold_crossed(distance) {
            return Ok(InputResponse::Consumed);
        }

        self.start_dragging(surface, origin, event)?;
        Ok(InputResponse::Consumed)
    }

    fn start_dragging(
        &mut self,
        surface: &mut dyn DragSurface,
        origin: PointerSample,
        event: PointerEvent,
    ) -> Result<(), DragError> {
        let proxy = match &mut self.proxy_factory {
            Some(factory) => factory(&mut *surface, self.element, &self.options),
            None => proxy_from_element(surface, self.element, &self.options),
        };
        let proxy = match proxy {
            Ok(proxy) => proxy,
            Err(err) => {
                self.session.reset();
                self.debug_log_event(format!("drag aborted: {err}"));
                return Err(err);
            }
        };

        let scroll = surface.scroll_offset();
        self.session.activate(ActiveDrag {
            origin,
            current: event.sample,
            proxy,
            proxy_pos: None,
            last_target: None,
            scroll,
        });
        surface.set_cursor(Some(CursorIcon::Grabbing));

        self.debug_log_event(format!(
            "drag_start proxy={:?} size=({:.1},{:.1}) scroll=({:.1},{:.1})",
            proxy.node, proxy.size.x, proxy.size.y, scroll.x, scroll.y
        ));
        self.emitter.emit(&DragEvent::DragStart { source: self.id });

        self.drag_to(surface, event);
        Ok(())
    }

    /// Active move: hit-test, notify target changes, reposition.
    fn drag_to(&mut self, surface: &mut dyn DragSurface, event: PointerEvent) {
        let hovered = self.targets.hit_test(surface, event.target);
        let Some(active) = self.session.active_mut() else {
            return;
        };
        active.current = event.sample;

        self.drag_over(surface, hovered);
        self.reposition(surface, true);
    }

    /// Fire leave/enter if the hovered target changed.
    fn drag_over(&mut self, surface: &mut dyn DragSurface, target: Option<Rc<DropTarget>>) {
        let Some(active) = self.session.active_mut() else {
            return;
        };
        if active.is_last_target(target.as_ref()) {
            return;
        }

        let pointer = active.current.pos;
        let previous = active.replace_last_target(target.as_ref());

        if let Some((previous_id, previous)) = previous {
            // A target dropped by the application gets no hook call, but listeners still see
            // the leave that pairs with its enter.
            if let Some(previous) = previous.upgrade() {
                previous.notify_leave(&DropContext {
                    source: self.id,
                    target: previous_id,
                    pointer,
                });
            }
            self.debug_log_event(format!("drag_leave target={previous_id:?}"));
            self.emitter.emit(&DragEvent::DragLeave {
                source: self.id,
                target: previous_id,
            });
        }

        match target {
            Some(target) => {
                target.notify_enter(&DropContext {
                    source: self.id,
                    target: target.id(),
                    pointer,
                });
                self.debug_log_event(format!("drag_enter target={:?}", target.id()));
                self.emitter.emit(&DragEvent::DragEnter {
                    source: self.id,
                    target: target.id(),
                });
            }
            None => surface.set_indicator(self.id, None),
        }
    }

    /// Place the proxy for the current pointer and scroll snapshot, then maybe autoscroll.
    ///
    /// An autoscroll refreshes the snapshot and repositions once more, without re-evaluating
    /// autoscroll, so one update nudges the viewport at most once.
    fn reposition(&mut self, surface: &mut dyn DragSurface, evaluate_autoscroll: bool) {
        let document_size = surface.document_size();
        let viewport_size = surface.viewport_size();
        let Some(active) = self.session.active_mut() else {
            return;
        };

        let pointer_doc = document_pos(active.current.pos, active.scroll);
        let pos = clamp_proxy_pos(
            pointer_doc,
            active.proxy.size,
            document_size,
            self.options.document_margin,
        );
        surface.move_proxy(active.proxy.node, pos);
        active.proxy_pos = Some(pos);

        let indicator = active
            .last_target
            .is_some()
            .then(|| indicator_rect(pointer_doc, self.options.indicator_half_size));
        surface.set_indicator(self.id, indicator);

        log::trace!(
            "{:?} proxy at ({:.1},{:.1}) pointer=({:.1},{:.1}) scroll=({:.1},{:.1})",
            self.id,
            pos.x,
            pos.y,
            active.current.pos.x,
            active.current.pos.y,
            active.scroll.x,
            active.scroll.y
        );

        if !evaluate_autoscroll {
            return;
        }

        let metrics = ScrollMetrics {
            scroll: active.scroll,
            viewport_size,
            document_size,
        };
        let Some(next) = autoscroll_offset(
            active.current.pos,
            metrics,
            self.options.autoscroll_trigger_distance,
            self.options.autoscroll,
        ) else {
            return;
        };

        surface.set_scroll_offset(next);
        active.scroll = surface.scroll_offset();
        self.reposition(surface, false);
    }

    fn on_scroll(&mut self, surface: &mut dyn DragSurface) {
        let scroll = surface.scroll_offset();
        let Some(active) = self.session.active_mut() else {
            return;
        };
        active.scroll = scroll;
        self.reposition(surface, true);
    }

    /// Active release: resolve the target under the release point (not the cached one) and
    /// finish the drag.
    fn release(&mut self, surface: &mut dyn DragSurface, event: PointerEvent) {
        if let Some(active) = self.session.active_mut() {
            active.current = event.sample;
        }
        let resolved = self.targets.hit_test(surface, event.target);
        self.stop_dragging(surface, resolved);
    }

    /// Leave `Active` (or drop a pending press).
    ///
    /// Order: leave on the hovered target, proxy removed, `DragEnd`, then drop hook and
    /// `Dropped` if a target was resolved.
    fn stop_dragging(&mut self, surface: &mut dyn DragSurface, drop_target: Option<Rc<DropTarget>>) {
        if !self.is_being_dragged() {
            if self.phase() == DragPhase::Pending {
                self.debug_log_event("pending press dropped");
            }
            self.session.reset();
            return;
        }

        self.drag_over(surface, None);
        let Some(active) = self.session.reset() else {
            return;
        };
        surface.set_indicator(self.id, None);
        surface.remove_proxy(active.proxy.node);
        surface.set_cursor(None);

        self.debug_log_event(format!(
            "drag_end at ({:.1},{:.1}) target={:?}",
            active.current.pos.x,
            active.current.pos.y,
            drop_target.as_ref().map(|t| t.id())
        ));
        self.emitter.emit(&DragEvent::DragEnd { source: self.id });

        if let Some(target) = drop_target {
            target.notify_drop(&DropContext {
                source: self.id,
                target: target.id(),
                pointer: active.current.pos,
            });
            self.emitter.emit(&DragEvent::Dropped {
                source: self.id,
                target: target.id(),
            });
        }
    }

    /// Pending release: the press was a click, not a drag.
    fn click(&mut self) {
        self.session.reset();
        self.debug_log_event("click");
        self.emitter.emit(&DragEvent::Click { source: self.id });
    }
}
