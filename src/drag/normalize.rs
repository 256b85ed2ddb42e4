use super::surface::DragSurface;
use super::types::{
    MouseButton, PointerEvent, PointerPhase, PointerSample, PointerSource, RawInput, RawKind,
    TouchPhase, TouchPoint,
};

/// Result of lowering one [`RawInput`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NormalizedInput {
    Pointer(PointerEvent),

    /// A native drag gesture that the host must cancel (its default action is suppressed).
    SuppressNativeDrag { target: Option<super::types::ElementId> },

    PointerLeftSurface,
    Blur,
    Scroll,
}

/// Lowers mouse and touch input into one canonical pointer stream.
///
/// Only one finger is followed at a time: the first touch of a gesture is tracked until it ends,
/// and changes reported for other fingers are ignored.
#[derive(Debug)]
pub struct PointerNormalizer {
    primary_button_only: bool,
    tracked_touch: Option<u64>,
}

impl Default for PointerNormalizer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PointerNormalizer {
    pub fn new(primary_button_only: bool) -> Self {
        Self {
            primary_button_only,
            tracked_touch: None,
        }
    }

    pub fn set_primary_button_only(&mut self, primary_button_only: bool) {
        self.primary_button_only = primary_button_only;
    }

    /// Forget the tracked finger (e.g. after the draggable is disabled).
    pub fn reset(&mut self) {
        self.tracked_touch = None;
    }

    /// Returns `None` for input that should be dropped (malformed touches, ignored buttons).
    pub fn normalize(
        &mut self,
        surface: &dyn DragSurface,
        input: &RawInput,
    ) -> Option<NormalizedInput> {
        let mouse = |phase, raw, pos, target, time| {
            NormalizedInput::Pointer(PointerEvent {
                phase,
                sample: PointerSample {
                    pos,
                    time,
                    raw,
                    source: PointerSource::Mouse,
                },
                target,
            })
        };

        match *input {
            RawInput::MouseDown {
                pos,
                button,
                target,
                time,
            } => {
                if self.primary_button_only && button != MouseButton::Primary {
                    return None;
                }
                Some(mouse(PointerPhase::Down, RawKind::MouseDown, pos, target, time))
            }
            RawInput::MouseMove { pos, target, time } => {
                Some(mouse(PointerPhase::Move, RawKind::MouseMove, pos, target, time))
            }
            RawInput::MouseUp { pos, target, time } => {
                Some(mouse(PointerPhase::Up, RawKind::MouseUp, pos, target, time))
            }
            RawInput::MouseClick { pos, target, time } => {
                Some(mouse(PointerPhase::Click, RawKind::MouseClick, pos, target, time))
            }
            RawInput::Touch {
                phase,
                ref touches,
                origin,
                time,
            } => self
                .normalize_touch(surface, phase, touches, origin, time)
                .map(NormalizedInput::Pointer),
            RawInput::NativeDragStart { target } => {
                Some(NormalizedInput::SuppressNativeDrag { target })
            }
            RawInput::PointerLeftSurface => Some(NormalizedInput::PointerLeftSurface),
            RawInput::Blur => Some(NormalizedInput::Blur),
            RawInput::Scroll => Some(NormalizedInput::Scroll),
        }
    }

    fn normalize_touch(
        &mut self,
        surface: &dyn DragSurface,
        phase: TouchPhase,
        touches: &[TouchPoint],
        origin: Option<super::types::ElementId>,
        time: f64,
    ) -> Option<PointerEvent> {
        let touch = match (phase, self.tracked_touch) {
            (TouchPhase::Start, None) => {
                let first = touches.first()?;
                self.tracked_touch = Some(first.id);
                first
            }
            (_, Some(tracked)) => touches.iter().find(|t| t.id == tracked)?,
            // A finger we never saw start: follow it anyway.
            (_, None) => touches.first()?,
        };

        let (pointer_phase, raw) = match phase {
            TouchPhase::Start => (PointerPhase::Down, RawKind::TouchStart),
            TouchPhase::Move => (PointerPhase::Move, RawKind::TouchMove),
            TouchPhase::End => (PointerPhase::Up, RawKind::TouchEnd),
            TouchPhase::Cancel => (PointerPhase::Up, RawKind::TouchCancel),
        };

        // Presses belong to the element the finger landed on; everything after that is
        // attributed to whatever is under the finger now, since touches produce no hover events.
        let target = if phase == TouchPhase::Start {
            origin.or_else(|| surface.element_at(touch.pos))
        } else {
            surface.element_at(touch.pos).or(origin)
        };

        if matches!(phase, TouchPhase::End | TouchPhase::Cancel) {
            self.tracked_touch = None;
        }

        Some(PointerEvent {
            phase: pointer_phase,
            sample: PointerSample {
                pos: touch.pos,
                time,
                raw,
                source: PointerSource::Touch,
            },
            target,
        })
    }
}
