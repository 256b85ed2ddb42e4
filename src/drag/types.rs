use egui::Pos2;

/// Identity of a node in the host's visual tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub u64);

impl ElementId {
    pub const fn from_u64(id: u64) -> Self {
        Self(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// Phase of a canonical pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Click,
}

/// The raw event kind a [`PointerSample`] was lowered from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RawKind {
    MouseDown,
    MouseMove,
    MouseUp,
    MouseClick,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

/// One normalized pointer observation, in client (viewport) space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub pos: Pos2,

    /// Host time in seconds.
    pub time: f64,

    pub raw: RawKind,
    pub source: PointerSource,
}

/// A canonical pointer event, independent of whether it came from a mouse or a finger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub sample: PointerSample,

    /// The element physically under the pointer, if any.
    pub target: Option<ElementId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub pos: Pos2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// Heterogeneous host input, before normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum RawInput {
    MouseDown {
        pos: Pos2,
        button: MouseButton,
        target: Option<ElementId>,
        time: f64,
    },
    MouseMove {
        pos: Pos2,
        target: Option<ElementId>,
        time: f64,
    },
    MouseUp {
        pos: Pos2,
        target: Option<ElementId>,
        time: f64,
    },
    MouseClick {
        pos: Pos2,
        target: Option<ElementId>,
        time: f64,
    },
    Touch {
        phase: TouchPhase,

        /// Changed touch points; only the first one is tracked.
        touches: Vec<TouchPoint>,

        /// Element the touch started on. Touch streams keep reporting it for their whole life.
        origin: Option<ElementId>,
        time: f64,
    },

    /// The platform is about to start its own (native) drag gesture.
    NativeDragStart { target: Option<ElementId> },

    /// The pointer crossed out of the document through its edge.
    PointerLeftSurface,

    /// The window lost focus.
    Blur,

    /// The surface scrolled (user or programmatic).
    Scroll,
}
