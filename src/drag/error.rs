use super::types::ElementId;

/// Why a gesture was aborted back to idle.
///
/// Both variants are timing conditions on the host side; the user can simply start a new drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragError {
    /// The surface could not report a usable size for the element (not rendered yet, or empty).
    MissingGeometry { element: ElementId },

    /// The surface declined to render a proxy for the element.
    ProxyUnavailable { element: ElementId },
}

impl std::fmt::Display for DragError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingGeometry { element } => {
                write!(f, "no usable geometry for element {}", element.0)
            }
            Self::ProxyUnavailable { element } => {
                write!(f, "surface could not render a drag proxy for element {}", element.0)
            }
        }
    }
}

impl std::error::Error for DragError {}
