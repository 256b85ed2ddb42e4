use egui::{CursorIcon, Pos2, Rect, Vec2};

use super::proxy::ProxySpec;
use super::types::ElementId;

/// Everything the drag engine needs from the host's visual tree and viewport.
///
/// Coordinates:
/// - *client* space is relative to the visible viewport (what pointer events report),
/// - *document* space is relative to the scrollable content (client + scroll offset).
pub trait DragSurface {
    /// Unscaled size of a rendered element, or `None` if it has no layout yet.
    fn element_size(&self, element: ElementId) -> Option<Vec2>;

    /// Size of the whole scrollable document.
    fn document_size(&self) -> Vec2;

    /// Size of the visible viewport.
    fn viewport_size(&self) -> Vec2;

    fn scroll_offset(&self) -> Vec2;

    fn set_scroll_offset(&mut self, offset: Vec2);

    /// Topmost element under a client-space point. Drag proxies must not be reported.
    fn element_at(&self, client_pos: Pos2) -> Option<ElementId>;

    /// `true` if `ancestor` is `element` or one of its ancestors.
    fn contains(&self, ancestor: ElementId, element: ElementId) -> bool;

    /// Render a detached clone of `spec.source` and return its node.
    fn render_proxy(&mut self, spec: &ProxySpec) -> Option<ElementId>;

    /// Place a proxy's top-left corner at a document-space position.
    fn move_proxy(&mut self, proxy: ElementId, document_pos: Pos2);

    fn remove_proxy(&mut self, proxy: ElementId);

    /// Show (`Some`, document space) or hide (`None`) the pointer indicator owned by `owner`.
    fn set_indicator(&mut self, owner: egui::Id, rect: Option<Rect>);

    /// Surface-wide cursor override; `None` restores the default.
    fn set_cursor(&mut self, cursor: Option<CursorIcon>);
}
