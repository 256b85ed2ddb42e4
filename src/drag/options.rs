use egui::Vec2;

/// Minimum pointer travel (in points) before a press turns into a drag.
pub const DRAG_THRESHOLD: f32 = 15.0;

/// The default drag proxy is scaled down to fit inside a box of this size.
pub const PROXY_BOUND: Vec2 = Vec2::new(250.0, 250.0);

/// The proxy never gets closer than this to the document edges.
pub const DOCUMENT_MARGIN: f32 = 30.0;

/// Dragging within this distance of a viewport edge triggers a scroll.
pub const AUTOSCROLL_TRIGGER_DISTANCE: f32 = 100.0;

/// Scroll nudge per positioning update in [`AutoscrollMode::FixedStep`].
pub const AUTOSCROLL_STEP: f32 = 30.0;

/// How the viewport is nudged while the pointer sits near one of its edges.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AutoscrollMode {
    /// Scroll by a constant step per positioning update.
    FixedStep(f32),

    /// Scroll by how far the pointer has intruded into the trigger band.
    Proportional,

    Disabled,
}

impl Default for AutoscrollMode {
    fn default() -> Self {
        Self::FixedStep(AUTOSCROLL_STEP)
    }
}

/// Options for [`super::Draggable`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragOptions {
    /// Pointer distance from the press point required to start dragging.
    ///
    /// The comparison is strict: moving exactly this far is still a click.
    pub drag_threshold: f32,

    /// Bounding box the default proxy is scaled down into (aspect ratio preserved, never upscaled).
    pub proxy_bound: Vec2,

    /// Opacity requested for the rendered proxy.
    pub proxy_opacity: f32,

    /// Distance kept between the proxy and the document edges.
    pub document_margin: f32,

    pub autoscroll_trigger_distance: f32,
    pub autoscroll: AutoscrollMode,

    /// The pointer indicator is a square of twice this size centered on the pointer.
    pub indicator_half_size: f32,

    /// If true, presses with anything but the primary mouse button are ignored.
    pub primary_button_only: bool,

    /// If true, record gesture transitions in a small ring buffer (see `Draggable::debug_log_text`).
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep (ring buffer).
    pub debug_event_log_capacity: usize,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            drag_threshold: DRAG_THRESHOLD,
            proxy_bound: PROXY_BOUND,
            proxy_opacity: 0.7,
            document_margin: DOCUMENT_MARGIN,
            autoscroll_trigger_distance: AUTOSCROLL_TRIGGER_DISTANCE,
            autoscroll: AutoscrollMode::default(),
            indicator_half_size: 5.0,
            primary_button_only: true,
            debug_event_log: false,
            debug_event_log_capacity: 200,
        }
    }
}

impl DragOptions {
    pub(crate) fn threshold_crossed(&self, distance: f32) -> bool {
        distance > self.drag_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strict() {
        let opt = DragOptions::default();
        assert!(!opt.threshold_crossed(15.0));
        assert!(opt.threshold_crossed(15.01));
        assert!(!opt.threshold_crossed(2.2));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_ron_config_keeps_defaults() {
        let opt: DragOptions = ron::from_str("(drag_threshold: 8.0, autoscroll: Proportional)")
            .expect("valid ron");
        assert_eq!(opt.drag_threshold, 8.0);
        assert_eq!(opt.autoscroll, AutoscrollMode::Proportional);
        assert_eq!(opt.document_margin, DOCUMENT_MARGIN);
        assert_eq!(opt.proxy_bound, PROXY_BOUND);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn empty_json_config_is_default() {
        let opt: DragOptions = serde_json::from_str("{}").expect("valid json");
        assert_eq!(opt, DragOptions::default());
    }
}
