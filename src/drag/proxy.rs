use egui::Vec2;

use super::error::DragError;
use super::options::DragOptions;
use super::surface::DragSurface;
use super::types::ElementId;

/// A request to render a floating clone of an element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProxySpec {
    pub source: ElementId,

    /// Unscaled size of the source element; the clone keeps it and is transformed by `scale`
    /// around its top-left corner.
    pub inner_size: Vec2,
    pub scale: f32,
    pub opacity: f32,
}

impl ProxySpec {
    pub fn scaled_size(&self) -> Vec2 {
        self.inner_size * self.scale
    }
}

/// The floating representation of a dragged item, owned by the active drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragProxy {
    pub node: ElementId,

    /// On-screen (transformed) size, used for clamping.
    pub size: Vec2,
}

/// Produces the drag proxy when a drag starts.
pub type ProxyFactory =
    Box<dyn FnMut(&mut dyn DragSurface, ElementId, &DragOptions) -> Result<DragProxy, DragError>>;

/// Scale factor that fits `size` into `bound`, preserving aspect ratio and never upscaling.
///
/// `None` if `size` is not a real, non-empty size.
pub fn proxy_scale(size: Vec2, bound: Vec2) -> Option<f32> {
    if !(size.x.is_finite() && size.y.is_finite()) || size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }
    let scale_x = bound.x / size.x;
    let scale_y = bound.y / size.y;
    Some(scale_x.min(scale_y).min(1.0))
}

/// Default proxy: a scaled-down clone of the element itself.
///
/// # Errors
/// [`DragError::MissingGeometry`] if the element has no usable size,
/// [`DragError::ProxyUnavailable`] if the surface refuses to render the clone.
pub fn proxy_from_element(
    surface: &mut dyn DragSurface,
    element: ElementId,
    options: &DragOptions,
) -> Result<DragProxy, DragError> {
    let inner_size = surface
        .element_size(element)
        .ok_or(DragError::MissingGeometry { element })?;
    let scale =
        proxy_scale(inner_size, options.proxy_bound).ok_or(DragError::MissingGeometry { element })?;

    let spec = ProxySpec {
        source: element,
        inner_size,
        scale,
        opacity: options.proxy_opacity,
    };
    let node = surface
        .render_proxy(&spec)
        .ok_or(DragError::ProxyUnavailable { element })?;

    Ok(DragProxy {
        node,
        size: spec.scaled_size(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_elements_are_scaled_to_fit() {
        let scale = proxy_scale(Vec2::new(1000.0, 500.0), Vec2::splat(250.0));
        assert_eq!(scale, Some(0.25));
    }

    #[test]
    fn small_elements_are_never_upscaled() {
        let scale = proxy_scale(Vec2::new(40.0, 20.0), Vec2::splat(250.0));
        assert_eq!(scale, Some(1.0));
    }

    #[test]
    fn tall_element_is_bounded_by_height() {
        let scale = proxy_scale(Vec2::new(100.0, 500.0), Vec2::splat(250.0)).unwrap();
        let size = Vec2::new(100.0, 500.0) * scale;
        assert_eq!(size, Vec2::new(50.0, 250.0));
    }

    #[test]
    fn degenerate_sizes_have_no_scale() {
        assert_eq!(proxy_scale(Vec2::ZERO, Vec2::splat(250.0)), None);
        assert_eq!(proxy_scale(Vec2::new(10.0, 0.0), Vec2::splat(250.0)), None);
        assert_eq!(proxy_scale(Vec2::new(f32::NAN, 10.0), Vec2::splat(250.0)), None);
    }
}
