use egui::{CursorIcon, Pos2, Rect, Vec2};

use crate::drag::{DragSurface, ElementId, ProxySpec};

#[derive(Clone, Copy, Debug)]
struct SceneNode {
    parent: Option<ElementId>,

    /// Document-space layout; `None` until the element is laid out.
    rect: Option<Rect>,
}

/// A rendered drag proxy in a [`SimpleScene`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneProxy {
    pub source: ElementId,

    /// Document-space rect (already scaled).
    pub rect: Rect,
    pub opacity: f32,
}

/// A minimal retained element tree with a scrollable viewport.
///
/// Good enough to drive [`crate::Draggable`] from an immediate-mode UI (lay the elements out
/// each frame with [`Self::set_rect`]) and used as the collaborator in tests.
#[derive(Debug)]
pub struct SimpleScene {
    nodes: ahash::HashMap<ElementId, SceneNode>,

    /// Paint order, back to front.
    order: Vec<ElementId>,
    next_id: u64,

    document_size: Vec2,
    viewport_size: Vec2,
    scroll: Vec2,

    proxies: ahash::HashMap<ElementId, SceneProxy>,
    indicators: ahash::HashMap<egui::Id, Rect>,
    cursor: Option<CursorIcon>,
    render_proxies: bool,
    scroll_requests: usize,
}

impl SimpleScene {
    pub fn new(document_size: Vec2, viewport_size: Vec2) -> Self {
        Self {
            nodes: Default::default(),
            order: Vec::new(),
            next_id: 1,
            document_size,
            viewport_size,
            scroll: Vec2::ZERO,
            proxies: Default::default(),
            indicators: Default::default(),
            cursor: None,
            render_proxies: true,
            scroll_requests: 0,
        }
    }

    fn allocate_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, parent: Option<ElementId>, rect: Option<Rect>) -> ElementId {
        let id = self.allocate_id();
        self.nodes.insert(id, SceneNode { parent, rect });
        self.order.push(id);
        id
    }

    /// Add a top-level element at a document-space rect.
    pub fn add_root(&mut self, rect: Rect) -> ElementId {
        self.insert(None, Some(rect))
    }

    pub fn add_child(&mut self, parent: ElementId, rect: Rect) -> ElementId {
        self.insert(Some(parent), Some(rect))
    }

    /// Add an element that has not been laid out yet.
    pub fn add_unrendered(&mut self, parent: Option<ElementId>) -> ElementId {
        self.insert(parent, None)
    }

    pub fn set_rect(&mut self, element: ElementId, rect: Option<Rect>) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.rect = rect;
        }
    }

    pub fn rect(&self, element: ElementId) -> Option<Rect> {
        self.nodes.get(&element)?.rect
    }

    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.get(&element)?.parent
    }

    /// `element` followed by its ancestors, innermost first.
    pub fn ancestors(&self, element: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(
            self.nodes.contains_key(&element).then_some(element),
            |&e| self.parent(e),
        )
    }

    /// Elements in paint order (back to front).
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, Option<Rect>)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.nodes.get(id).map(|n| (*id, n.rect)))
    }

    pub fn set_document_size(&mut self, size: Vec2) {
        self.document_size = size;
    }

    pub fn set_viewport_size(&mut self, size: Vec2) {
        self.viewport_size = size;
    }

    /// Scroll as the user would; the caller is expected to report a `RawInput::Scroll`.
    pub fn scroll_to(&mut self, offset: Vec2) {
        let max = (self.document_size - self.viewport_size).max(Vec2::ZERO);
        self.scroll = Vec2::new(offset.x.min(max.x).max(0.0), offset.y.min(max.y).max(0.0));
    }

    /// Number of programmatic scrolls requested through [`DragSurface::set_scroll_offset`].
    pub fn scroll_requests(&self) -> usize {
        self.scroll_requests
    }

    /// When disabled, [`DragSurface::render_proxy`] fails (e.g. the renderer is not ready).
    pub fn set_proxy_rendering(&mut self, enabled: bool) {
        self.render_proxies = enabled;
    }

    pub fn proxies(&self) -> impl Iterator<Item = (ElementId, &SceneProxy)> + '_ {
        self.proxies.iter().map(|(id, p)| (*id, p))
    }

    pub fn proxy(&self, node: ElementId) -> Option<&SceneProxy> {
        self.proxies.get(&node)
    }

    pub fn indicator(&self, owner: egui::Id) -> Option<Rect> {
        self.indicators.get(&owner).copied()
    }

    pub fn cursor(&self) -> Option<CursorIcon> {
        self.cursor
    }
}

impl DragSurface for SimpleScene {
    fn element_size(&self, element: ElementId) -> Option<Vec2> {
        self.rect(element).map(|r| r.size())
    }

    fn document_size(&self) -> Vec2 {
        self.document_size
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: Vec2) {
        self.scroll_requests += 1;
        self.scroll_to(offset);
    }

    fn element_at(&self, client_pos: Pos2) -> Option<ElementId> {
        let doc_pos = client_pos + self.scroll;
        self.order.iter().rev().copied().find(|id| {
            self.nodes
                .get(id)
                .and_then(|n| n.rect)
                .is_some_and(|r| r.contains(doc_pos))
        })
    }

    fn contains(&self, ancestor: ElementId, element: ElementId) -> bool {
        self.ancestors(element).any(|e| e == ancestor)
    }

    fn render_proxy(&mut self, spec: &ProxySpec) -> Option<ElementId> {
        if !self.render_proxies || !self.nodes.contains_key(&spec.source) {
            return None;
        }
        let node = self.allocate_id();
        self.proxies.insert(
            node,
            SceneProxy {
                source: spec.source,
                rect: Rect::from_min_size(Pos2::ZERO, spec.scaled_size()),
                opacity: spec.opacity,
            },
        );
        Some(node)
    }

    fn move_proxy(&mut self, proxy: ElementId, document_pos: Pos2) {
        if let Some(p) = self.proxies.get_mut(&proxy) {
            p.rect = Rect::from_min_size(document_pos, p.rect.size());
        }
    }

    fn remove_proxy(&mut self, proxy: ElementId) {
        self.proxies.remove(&proxy);
    }

    fn set_indicator(&mut self, owner: egui::Id, rect: Option<Rect>) {
        match rect {
            Some(rect) => {
                self.indicators.insert(owner, rect);
            }
            None => {
                self.indicators.remove(&owner);
            }
        }
    }

    fn set_cursor(&mut self, cursor: Option<CursorIcon>) {
        self.cursor = cursor;
    }
}
