//! Pick up an element with a mouse or finger, carry a floating proxy of it across a scrollable
//! surface, and drop it on one of several registered drop zones.
//!
//! The engine never renders anything itself: it talks to the host through [`DragSurface`]
//! ("give me element geometry", "scroll to here", "render a clone of this element") and
//! reports what happened through [`DragEvent`]s and [`DropTarget`] hooks.
#![forbid(unsafe_code)]

pub mod drag;
pub mod scene;

pub use drag::{
    AutoscrollMode, DragError, DragEvent, DragOptions, DragPhase, DragProxy, DragSurface,
    Draggable, DropContext, DropTarget, DropTargetRegistry, EguiInputBridge, ElementId,
    InputResponse, MouseButton, ProxySpec, RawInput, SubscriptionId, TouchPhase, TouchPoint,
};
pub use scene::{SceneProxy, SimpleScene};
