use super::surface::DragSurface;
use super::types::{ElementId, MouseButton, RawInput, TouchPhase, TouchPoint};

/// Translates a frame's worth of [`egui::Event`]s into [`RawInput`].
///
/// Mouse targets are resolved through [`DragSurface::element_at`]; touch streams remember the
/// element each finger landed on.
///
/// Backends that synthesize pointer events from touches report every touch twice. Feed only one
/// of the two streams to a draggable (see [`Self::ignore_touch`]).
#[derive(Debug, Default)]
pub struct EguiInputBridge {
    touch_origins: ahash::HashMap<u64, Option<ElementId>>,

    /// Skip [`egui::Event::Touch`] and rely on the synthesized pointer events.
    pub ignore_touch: bool,
}

impl EguiInputBridge {
    pub fn translate(
        &mut self,
        events: &[egui::Event],
        surface: &dyn DragSurface,
        time: f64,
    ) -> Vec<RawInput> {
        events
            .iter()
            .filter_map(|event| self.translate_one(event, surface, time))
            .collect()
    }

    fn translate_one(
        &mut self,
        event: &egui::Event,
        surface: &dyn DragSurface,
        time: f64,
    ) -> Option<RawInput> {
        match event {
            egui::Event::PointerButton {
                pos,
                button,
                pressed,
                ..
            } => {
                let pos = *pos;
                let target = surface.element_at(pos);
                Some(if *pressed {
                    RawInput::MouseDown {
                        pos,
                        button: mouse_button(*button),
                        target,
                        time,
                    }
                } else if *button == egui::PointerButton::Primary {
                    RawInput::MouseUp { pos, target, time }
                } else {
                    return None;
                })
            }
            egui::Event::PointerMoved(pos) => Some(RawInput::MouseMove {
                pos: *pos,
                target: surface.element_at(*pos),
                time,
            }),
            egui::Event::PointerGone => Some(RawInput::PointerLeftSurface),
            egui::Event::WindowFocused(false) => Some(RawInput::Blur),
            egui::Event::Touch { id, phase, pos, .. } => {
                if self.ignore_touch {
                    return None;
                }
                let phase = touch_phase(*phase);
                let origin = match phase {
                    TouchPhase::Start => {
                        let origin = surface.element_at(*pos);
                        self.touch_origins.insert(id.0, origin);
                        origin
                    }
                    TouchPhase::Move => self.touch_origins.get(&id.0).copied().flatten(),
                    TouchPhase::End | TouchPhase::Cancel => {
                        self.touch_origins.remove(&id.0).flatten()
                    }
                };
                Some(RawInput::Touch {
                    phase,
                    touches: vec![TouchPoint { id: id.0, pos: *pos }],
                    origin,
                    time,
                })
            }
            _ => None,
        }
    }
}

fn mouse_button(button: egui::PointerButton) -> MouseButton {
    match button {
        egui::PointerButton::Primary => MouseButton::Primary,
        egui::PointerButton::Secondary => MouseButton::Secondary,
        egui::PointerButton::Middle => MouseButton::Middle,
        egui::PointerButton::Extra1 | egui::PointerButton::Extra2 => MouseButton::Other,
    }
}

fn touch_phase(phase: egui::TouchPhase) -> TouchPhase {
    match phase {
        egui::TouchPhase::Start => TouchPhase::Start,
        egui::TouchPhase::Move => TouchPhase::Move,
        egui::TouchPhase::End => TouchPhase::End,
        egui::TouchPhase::Cancel => TouchPhase::Cancel,
    }
}

#[cfg(test)]
mod tests {
    use egui::{Rect, Vec2, pos2};

    use super::*;
    use crate::scene::SimpleScene;

    fn touch(phase: egui::TouchPhase, x: f32, y: f32) -> egui::Event {
        egui::Event::Touch {
            device_id: egui::TouchDeviceId(0),
            id: egui::TouchId(3),
            phase,
            pos: pos2(x, y),
            force: None,
        }
    }

    #[test]
    fn touch_stream_keeps_its_origin() {
        let mut scene = SimpleScene::new(Vec2::new(800.0, 600.0), Vec2::new(800.0, 600.0));
        let card = scene.add_root(Rect::from_min_size(pos2(0.0, 0.0), Vec2::splat(50.0)));
        let mut bridge = EguiInputBridge::default();

        let raw = bridge.translate(
            &[
                touch(egui::TouchPhase::Start, 10.0, 10.0),
                touch(egui::TouchPhase::Move, 400.0, 400.0),
                touch(egui::TouchPhase::End, 400.0, 400.0),
            ],
            &scene,
            0.0,
        );
        assert_eq!(raw.len(), 3);
        for input in &raw {
            let RawInput::Touch { origin, .. } = input else {
                panic!("expected touch, got {input:?}");
            };
            assert_eq!(*origin, Some(card));
        }
        assert!(bridge.touch_origins.is_empty());
    }

    #[test]
    fn mouse_and_focus_events() {
        let mut scene = SimpleScene::new(Vec2::new(800.0, 600.0), Vec2::new(800.0, 600.0));
        let card = scene.add_root(Rect::from_min_size(pos2(0.0, 0.0), Vec2::splat(50.0)));
        let mut bridge = EguiInputBridge::default();

        let raw = bridge.translate(
            &[
                egui::Event::PointerButton {
                    pos: pos2(5.0, 5.0),
                    button: egui::PointerButton::Primary,
                    pressed: true,
                    modifiers: egui::Modifiers::NONE,
                },
                egui::Event::PointerButton {
                    pos: pos2(5.0, 5.0),
                    button: egui::PointerButton::Secondary,
                    pressed: false,
                    modifiers: egui::Modifiers::NONE,
                },
                egui::Event::PointerMoved(pos2(300.0, 300.0)),
                egui::Event::WindowFocused(true),
                egui::Event::WindowFocused(false),
                egui::Event::PointerGone,
            ],
            &scene,
            2.0,
        );

        assert_eq!(
            raw,
            vec![
                RawInput::MouseDown {
                    pos: pos2(5.0, 5.0),
                    button: MouseButton::Primary,
                    target: Some(card),
                    time: 2.0,
                },
                RawInput::MouseMove {
                    pos: pos2(300.0, 300.0),
                    target: None,
                    time: 2.0,
                },
                RawInput::Blur,
                RawInput::PointerLeftSurface,
            ]
        );
    }

    #[test]
    fn touch_can_be_ignored() {
        let scene = SimpleScene::new(Vec2::new(800.0, 600.0), Vec2::new(800.0, 600.0));
        let mut bridge = EguiInputBridge {
            ignore_touch: true,
            ..Default::default()
        };
        let raw = bridge.translate(&[touch(egui::TouchPhase::Start, 1.0, 1.0)], &scene, 0.0);
        assert!(raw.is_empty());
    }
}
