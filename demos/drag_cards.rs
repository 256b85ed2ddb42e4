#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use eframe::egui;
use egui::{Color32, Rect, Stroke, StrokeKind, Vec2, pos2, vec2};
use egui_drop_zones::{
    DragSurface as _, Draggable, DropTarget, EguiInputBridge, ElementId, RawInput, SimpleScene,
};

const DOCUMENT_SIZE: Vec2 = vec2(1600.0, 1400.0);
const CARD_SIZE: Vec2 = vec2(140.0, 90.0);

struct Zone {
    element: ElementId,
    target: Rc<DropTarget>,
    hovered: Rc<Cell<bool>>,
    dropped: Rc<Cell<usize>>,
}

struct App {
    scene: SimpleScene,
    bridge: EguiInputBridge,
    cards: Vec<Draggable>,
    zones: Vec<Zone>,
    log: Rc<RefCell<VecDeque<String>>>,
}

impl Default for App {
    fn default() -> Self {
        let mut scene = SimpleScene::new(DOCUMENT_SIZE, vec2(800.0, 600.0));
        let log = Rc::new(RefCell::new(VecDeque::new()));

        let zones: Vec<Zone> = [pos2(900.0, 150.0), pos2(300.0, 900.0), pos2(1200.0, 1100.0)]
            .into_iter()
            .enumerate()
            .map(|(i, min)| {
                let element = scene.add_root(Rect::from_min_size(min, Vec2::splat(260.0)));
                let hovered = Rc::new(Cell::new(false));
                let dropped = Rc::new(Cell::new(0));
                let (enter, leave, count) = (hovered.clone(), hovered.clone(), dropped.clone());
                let target = Rc::new(
                    DropTarget::new(egui::Id::new(("zone", i)), [element])
                        .on_enter(move |_| enter.set(true))
                        .on_leave(move |_| leave.set(false))
                        .on_drop(move |_| count.set(count.get() + 1)),
                );
                Zone {
                    element,
                    target,
                    hovered,
                    dropped,
                }
            })
            .collect();

        let cards = (0..4)
            .map(|i| {
                let min = pos2(60.0, 60.0 + i as f32 * (CARD_SIZE.y + 30.0));
                let element = scene.add_root(Rect::from_min_size(min, CARD_SIZE));
                // A child, so presses on the label still start the drag.
                scene.add_child(
                    element,
                    Rect::from_min_size(min + vec2(10.0, 10.0), vec2(80.0, 20.0)),
                );

                let mut draggable = Draggable::new(egui::Id::new(("card", i)), element);
                for zone in &zones {
                    draggable.add_drop_target(&zone.target);
                }
                let log = log.clone();
                draggable.subscribe(move |event| {
                    let mut log = log.borrow_mut();
                    log.push_back(format!("{:?}: {}", event.source(), event.name()));
                    while log.len() > 8 {
                        log.pop_front();
                    }
                });
                draggable
            })
            .collect();

        Self {
            scene,
            bridge: {
                let mut bridge = EguiInputBridge::default();
                // Touches also arrive as synthesized pointer events.
                bridge.ignore_touch = true;
                bridge
            },
            cards,
            zones,
            log,
        }
    }
}

/// Screen-space pointer events to the scene's client space.
fn to_client(event: &egui::Event, origin: Vec2) -> egui::Event {
    let mut event = event.clone();
    match &mut event {
        egui::Event::PointerMoved(pos)
        | egui::Event::PointerButton { pos, .. }
        | egui::Event::Touch { pos, .. } => *pos -= origin,
        _ => {}
    }
    event
}

impl App {
    fn feed(&mut self, input: &RawInput) {
        for card in &mut self.cards {
            if let Err(err) = card.handle_input(&mut self.scene, input) {
                log::warn!("{:?}: {err}", card.id());
            }
        }
    }

    fn viewport_ui(&mut self, ui: &mut egui::Ui) {
        let viewport = ui.max_rect();
        let origin = viewport.min.to_vec2();
        self.scene.set_viewport_size(viewport.size());
        let response = ui.allocate_rect(viewport, egui::Sense::hover());

        let (events, scroll_delta, time) = ui.input(|i| (i.events.clone(), i.smooth_scroll_delta, i.time));
        let events: Vec<_> = events.iter().map(|e| to_client(e, origin)).collect();
        for input in self.bridge.translate(&events, &self.scene, time) {
            self.feed(&input);
        }

        if response.hovered() && scroll_delta != Vec2::ZERO {
            let offset = self.scene.scroll_offset() - scroll_delta;
            self.scene.scroll_to(offset);
            self.feed(&RawInput::Scroll);
        }

        self.paint(ui, viewport);

        let hovered = ui
            .input(|i| i.pointer.hover_pos())
            .and_then(|pos| self.scene.element_at(pos - origin));
        let cursor = self.scene.cursor().or_else(|| {
            let hovered = hovered?;
            self.cards
                .iter()
                .find(|c| self.scene.contains(c.element(), hovered))
                .and_then(Draggable::hover_cursor)
        });
        if let Some(cursor) = cursor {
            ui.ctx().set_cursor_icon(cursor);
        }
    }

    fn paint(&self, ui: &egui::Ui, viewport: Rect) {
        let painter = ui.painter_at(viewport);
        let to_screen = |r: Rect| r.translate(viewport.min.to_vec2() - self.scene.scroll_offset());
        let visuals = ui.visuals();

        painter.rect_filled(viewport, 0.0, visuals.extreme_bg_color);

        for zone in &self.zones {
            let Some(rect) = self.scene.rect(zone.element) else {
                continue;
            };
            let stroke = if zone.hovered.get() {
                Stroke::new(3.0, visuals.selection.stroke.color)
            } else {
                Stroke::new(1.0, visuals.weak_text_color())
            };
            painter.rect_stroke(to_screen(rect), 8.0, stroke, StrokeKind::Inside);
            painter.text(
                to_screen(rect).center(),
                egui::Align2::CENTER_CENTER,
                format!("dropped: {}", zone.dropped.get()),
                egui::FontId::proportional(16.0),
                visuals.text_color(),
            );
        }

        for (i, card) in self.cards.iter().enumerate() {
            let Some(rect) = self.scene.rect(card.element()) else {
                continue;
            };
            let fill = if card.is_being_dragged() {
                visuals.widgets.inactive.bg_fill
            } else {
                visuals.widgets.active.bg_fill
            };
            painter.rect_filled(to_screen(rect), 6.0, fill);
            painter.text(
                to_screen(rect).left_top() + vec2(12.0, 12.0),
                egui::Align2::LEFT_TOP,
                format!("Card {i}"),
                egui::FontId::proportional(14.0),
                visuals.text_color(),
            );
        }

        for (_, proxy) in self.scene.proxies() {
            let fill = visuals.selection.bg_fill.gamma_multiply(proxy.opacity);
            painter.rect_filled(to_screen(proxy.rect), 6.0, fill);
        }

        for card in &self.cards {
            if let Some(rect) = self.scene.indicator(card.id()) {
                painter.circle_filled(to_screen(rect).center(), rect.width() / 2.0, Color32::RED);
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let scroll = self.scene.scroll_offset();
                ui.label(format!("scroll: ({:.0}, {:.0})", scroll.x, scroll.y));
                if ui.button("Clear log").clicked() {
                    self.log.borrow_mut().clear();
                }
            });
            for line in self.log.borrow().iter() {
                ui.monospace(line);
            }
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.viewport_ui(ui));

        if self.cards.iter().any(Draggable::is_being_dragged) {
            ctx.request_repaint();
        }
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_title("egui_drop_zones: drag cards"),
        ..Default::default()
    };
    eframe::run_native(
        "egui_drop_zones: drag cards",
        options,
        Box::new(|_cc| Ok(Box::new(App::default()))),
    )
}
