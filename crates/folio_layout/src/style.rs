//! Unified element styling
//!
//! [`ElementStyle`] holds the inline visual state of one element. Every field
//! is optional: unset fields emit nothing, so the stylesheet stays in charge.
//! Animation values land here through [`ElementStyle::apply`], and
//! [`ElementStyle::to_css`] renders a deterministic inline `style` string.
//!
//! ```rust
//! use folio_core::Color;
//! use folio_layout::ElementStyle;
//!
//! let style = ElementStyle::new()
//!     .bg(Color::from_hex(0x6366f1).with_alpha(0.2))
//!     .rounded(12.0)
//!     .translate(0.0, 40.0)
//!     .opacity(0.0);
//! assert_eq!(
//!     style.to_css(),
//!     "background-color: rgba(99, 102, 241, 0.2); border-radius: 12px; opacity: 0; transform: translate(0px, 40px)"
//! );
//! ```

use folio_animation::{Property, PropertyValues};
use folio_core::color::trim_float;
use folio_core::Color;

/// Visual style properties for an element
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementStyle {
    /// Left offset as a percentage of the container
    pub left_pct: Option<f32>,
    /// Top offset as a percentage of the container
    pub top_pct: Option<f32>,
    pub width_px: Option<f32>,
    pub height_px: Option<f32>,
    pub width_pct: Option<f32>,
    pub height_pct: Option<f32>,
    pub margin_right_px: Option<f32>,
    pub background: Option<Color>,
    /// Raw CSS background image, e.g. a gradient
    pub background_image: Option<String>,
    pub background_position: Option<(f32, f32)>,
    pub corner_radius: Option<f32>,
    pub color: Option<Color>,
    pub opacity: Option<f32>,
    pub visible: Option<bool>,
    pub translate: Option<(f32, f32)>,
    pub translate_pct: Option<(f32, f32)>,
    pub rotate_deg: Option<f32>,
    pub skew_y_deg: Option<f32>,
    pub scale: Option<f32>,
    pub scale_y: Option<f32>,
    pub blur_px: Option<f32>,
    pub brightness: Option<f32>,
    pub glow_opacity: Option<f32>,
    pub glow_scale: Option<f32>,
    /// Animation phase offset for CSS-driven loops
    pub animation_delay_ms: Option<f32>,
    pub animation_duration_ms: Option<f32>,
    pub z_index: Option<i32>,
}

impl ElementStyle {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Position by percentage of the container
    pub fn at_pct(mut self, left: f32, top: f32) -> Self {
        self.left_pct = Some(left);
        self.top_pct = Some(top);
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width_px = Some(width);
        self.height_px = Some(height);
        self
    }

    pub fn width_pct(mut self, pct: f32) -> Self {
        self.width_pct = Some(pct);
        self
    }

    pub fn height_pct(mut self, pct: f32) -> Self {
        self.height_pct = Some(pct);
        self
    }

    pub fn margin_right(mut self, px: f32) -> Self {
        self.margin_right_px = Some(px);
        self
    }

    pub fn z(mut self, index: i32) -> Self {
        self.z_index = Some(index);
        self
    }

    // =========================================================================
    // Paint
    // =========================================================================

    pub fn bg(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn background_image(mut self, image: impl Into<String>) -> Self {
        self.background_image = Some(image.into());
        self
    }

    pub fn background_position(mut self, x_pct: f32, y_pct: f32) -> Self {
        self.background_position = Some((x_pct, y_pct));
        self
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity.clamp(0.0, 1.0));
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = Some(false);
        self
    }

    // =========================================================================
    // Transform & filter
    // =========================================================================

    pub fn translate(mut self, x: f32, y: f32) -> Self {
        self.translate = Some((x, y));
        self
    }

    pub fn scale(mut self, factor: f32) -> Self {
        self.scale = Some(factor);
        self
    }

    pub fn rotate_deg(mut self, degrees: f32) -> Self {
        self.rotate_deg = Some(degrees);
        self
    }

    pub fn blur(mut self, px: f32) -> Self {
        self.blur_px = Some(px);
        self
    }

    /// Phase and period of a CSS keyframe loop
    pub fn animation_timing(mut self, duration_ms: f32, delay_ms: f32) -> Self {
        self.animation_duration_ms = Some(duration_ms);
        self.animation_delay_ms = Some(delay_ms);
        self
    }

    // =========================================================================
    // Animation values
    // =========================================================================

    /// Overlay animated property values
    pub fn apply(&mut self, values: &PropertyValues) {
        for (property, value) in values.iter() {
            match property {
                Property::Opacity => self.opacity = Some(value.clamp(0.0, 1.0)),
                Property::Visibility => self.visible = Some(value > 0.0),
                Property::X => self.translate = Some((value, self.translate.map_or(0.0, |t| t.1))),
                Property::Y => self.translate = Some((self.translate.map_or(0.0, |t| t.0), value)),
                Property::XPercent => {
                    self.translate_pct = Some((value, self.translate_pct.map_or(0.0, |t| t.1)))
                }
                Property::YPercent => {
                    self.translate_pct = Some((self.translate_pct.map_or(0.0, |t| t.0), value))
                }
                Property::Scale => self.scale = Some(value),
                Property::ScaleY => self.scale_y = Some(value),
                Property::Rotate => self.rotate_deg = Some(value),
                Property::SkewY => self.skew_y_deg = Some(value),
                Property::Blur => self.blur_px = Some(value.max(0.0)),
                Property::Brightness => self.brightness = Some(value.max(0.0)),
                Property::Width => self.width_pct = Some(value),
                Property::Height => self.height_pct = Some(value),
                Property::GlowOpacity => self.glow_opacity = Some(value.clamp(0.0, 1.0)),
                Property::GlowScale => self.glow_scale = Some(value),
                Property::BackgroundPositionX => {
                    self.background_position =
                        Some((value, self.background_position.map_or(0.0, |p| p.1)))
                }
                Property::BackgroundPositionY => {
                    self.background_position =
                        Some((self.background_position.map_or(0.0, |p| p.0), value))
                }
            }
        }
    }

    /// Merge another style on top of this one (other's set fields win)
    pub fn merge(&self, other: &ElementStyle) -> ElementStyle {
        macro_rules! pick {
            ($($field:ident),*) => {
                ElementStyle { $($field: other.$field.clone().or_else(|| self.$field.clone())),* }
            };
        }
        pick!(
            left_pct, top_pct, width_px, height_px, width_pct, height_pct, margin_right_px,
            background, background_image, background_position, corner_radius, color, opacity,
            visible, translate, translate_pct, rotate_deg, skew_y_deg, scale, scale_y, blur_px,
            brightness, glow_opacity, glow_scale, animation_delay_ms, animation_duration_ms,
            z_index
        )
    }

    pub fn is_empty(&self) -> bool {
        *self == ElementStyle::default()
    }

    fn transform_css(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some((x, y)) = self.translate.filter(|t| *t != (0.0, 0.0)) {
            parts.push(format!("translate({}px, {}px)", trim_float(x), trim_float(y)));
        }
        if let Some((x, y)) = self.translate_pct.filter(|t| *t != (0.0, 0.0)) {
            parts.push(format!("translate({}%, {}%)", trim_float(x), trim_float(y)));
        }
        if let Some(deg) = self.rotate_deg.filter(|d| *d != 0.0) {
            parts.push(format!("rotate({}deg)", trim_float(deg)));
        }
        if let Some(deg) = self.skew_y_deg.filter(|d| *d != 0.0) {
            parts.push(format!("skewY({}deg)", trim_float(deg)));
        }
        if let Some(s) = self.scale.filter(|s| *s != 1.0) {
            parts.push(format!("scale({})", trim_float(s)));
        }
        if let Some(s) = self.scale_y.filter(|s| *s != 1.0) {
            parts.push(format!("scaleY({})", trim_float(s)));
        }
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    fn filter_css(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(px) = self.blur_px.filter(|b| *b > 0.0) {
            parts.push(format!("blur({}px)", trim_float(px)));
        }
        if let Some(b) = self.brightness.filter(|b| *b != 1.0) {
            parts.push(format!("brightness({})", trim_float(b)));
        }
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    /// Inline CSS declarations in a fixed order
    pub fn to_css(&self) -> String {
        let mut decls: Vec<String> = Vec::new();
        let mut push = |name: &str, value: String| decls.push(format!("{name}: {value}"));

        if let Some(v) = self.left_pct {
            push("left", format!("{}%", trim_float(v)));
        }
        if let Some(v) = self.top_pct {
            push("top", format!("{}%", trim_float(v)));
        }
        match (self.width_px, self.width_pct) {
            (Some(px), _) => push("width", format!("{}px", trim_float(px))),
            (None, Some(pct)) => push("width", format!("{}%", trim_float(pct))),
            _ => {}
        }
        match (self.height_px, self.height_pct) {
            (Some(px), _) => push("height", format!("{}px", trim_float(px))),
            (None, Some(pct)) => push("height", format!("{}%", trim_float(pct))),
            _ => {}
        }
        if let Some(v) = self.margin_right_px {
            push("margin-right", format!("{}px", trim_float(v)));
        }
        if let Some(c) = self.background {
            push("background-color", c.to_css());
        }
        if let Some(image) = &self.background_image {
            push("background-image", image.clone());
        }
        if let Some((x, y)) = self.background_position {
            push(
                "background-position",
                format!("{}% {}%", trim_float(x), trim_float(y)),
            );
        }
        if let Some(r) = self.corner_radius {
            push("border-radius", format!("{}px", trim_float(r)));
        }
        if let Some(c) = self.color {
            push("color", c.to_css());
        }
        if let Some(o) = self.opacity {
            push("opacity", trim_float(o));
        }
        if self.visible == Some(false) {
            push("visibility", "hidden".to_string());
        }
        if let Some(t) = self.transform_css() {
            push("transform", t);
        }
        if let Some(f) = self.filter_css() {
            push("filter", f);
        }
        if let Some(o) = self.glow_opacity {
            push("--glow-opacity", trim_float(o));
        }
        if let Some(s) = self.glow_scale {
            push("--glow-scale", trim_float(s));
        }
        if let Some(d) = self.animation_duration_ms {
            push("animation-duration", format!("{}ms", trim_float(d)));
        }
        if let Some(d) = self.animation_delay_ms {
            push("animation-delay", format!("{}ms", trim_float(d)));
        }
        if let Some(z) = self.z_index {
            push("z-index", z.to_string());
        }

        decls.join("; ")
    }
}

/// Create a new element style
pub fn style() -> ElementStyle {
    ElementStyle::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_style_renders_nothing() {
        assert!(ElementStyle::new().is_empty());
        assert_eq!(ElementStyle::new().to_css(), "");
    }

    #[test]
    fn test_apply_animation_values() {
        let mut s = style().translate(10.0, 0.0);
        s.apply(
            &PropertyValues::new()
                .with(Property::Y, -5.0)
                .with(Property::Scale, 1.02)
                .with(Property::Blur, 15.0)
                .with(Property::Visibility, 0.0),
        );
        assert_eq!(s.translate, Some((10.0, -5.0)));
        assert_eq!(
            s.to_css(),
            "visibility: hidden; transform: translate(10px, -5px) scale(1.02); filter: blur(15px)"
        );
    }

    #[test]
    fn test_identity_transforms_are_omitted() {
        let mut s = style();
        s.apply(
            &PropertyValues::new()
                .with(Property::Y, 0.0)
                .with(Property::Scale, 1.0)
                .with(Property::Opacity, 1.0),
        );
        assert_eq!(s.to_css(), "opacity: 1");
    }

    #[test]
    fn test_merge_prefers_other() {
        let base = style().opacity(0.5).rounded(4.0);
        let merged = base.merge(&style().opacity(1.0));
        assert_eq!(merged.opacity, Some(1.0));
        assert_eq!(merged.corner_radius, Some(4.0));
    }
}
