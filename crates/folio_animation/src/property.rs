//! Animatable properties and the per-target value store

use std::fmt;

use folio_core::Target;
use rustc_hash::FxHashMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;

/// A numeric style channel an animation can drive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    Opacity,
    /// 0 hidden, 1 visible (`autoAlpha` style visibility channel)
    Visibility,
    /// Horizontal offset in px
    X,
    /// Vertical offset in px
    Y,
    /// Horizontal offset as a percentage of the element's width
    XPercent,
    /// Vertical offset as a percentage of the element's height
    YPercent,
    Scale,
    ScaleY,
    /// Degrees
    Rotate,
    /// Degrees
    SkewY,
    /// Blur radius in px
    Blur,
    Brightness,
    /// Percentage of the containing block
    Width,
    /// Percentage of the containing block
    Height,
    /// Opacity of an element's glow layer
    GlowOpacity,
    /// Scale of an element's glow layer
    GlowScale,
    /// Percent
    BackgroundPositionX,
    /// Percent
    BackgroundPositionY,
}

impl Property {
    /// Value an element has when no animation has touched the property
    pub fn identity(&self) -> f32 {
        match self {
            Property::Opacity
            | Property::Visibility
            | Property::Scale
            | Property::ScaleY
            | Property::Brightness
            | Property::GlowScale => 1.0,
            Property::Width | Property::Height => 100.0,
            _ => 0.0,
        }
    }

    /// Name used in the manifest and in debug output
    pub fn name(&self) -> &'static str {
        match self {
            Property::Opacity => "opacity",
            Property::Visibility => "visibility",
            Property::X => "x",
            Property::Y => "y",
            Property::XPercent => "xPercent",
            Property::YPercent => "yPercent",
            Property::Scale => "scale",
            Property::ScaleY => "scaleY",
            Property::Rotate => "rotate",
            Property::SkewY => "skewY",
            Property::Blur => "blur",
            Property::Brightness => "brightness",
            Property::Width => "width",
            Property::Height => "height",
            Property::GlowOpacity => "glowOpacity",
            Property::GlowScale => "glowScale",
            Property::BackgroundPositionX => "backgroundPositionX",
            Property::BackgroundPositionY => "backgroundPositionY",
        }
    }

    /// Whether the property composes into the CSS `transform`
    pub fn is_transform(&self) -> bool {
        matches!(
            self,
            Property::X
                | Property::Y
                | Property::XPercent
                | Property::YPercent
                | Property::Scale
                | Property::ScaleY
                | Property::Rotate
                | Property::SkewY
        )
    }

    /// Whether the property composes into the CSS `filter`
    pub fn is_filter(&self) -> bool {
        matches!(self, Property::Blur | Property::Brightness)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A small ordered set of property values
///
/// Tweens rarely touch more than four properties, so the list stays inline.
/// Serializes as a `{ "opacity": 0.0, "y": 40.0 }` map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyValues(SmallVec<[(Property, f32); 4]>);

impl PropertyValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, property: Property, value: f32) -> Self {
        self.set(property, value);
        self
    }

    /// Insert or overwrite a value
    pub fn set(&mut self, property: Property, value: f32) {
        match self.0.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = value,
            None => self.0.push((property, value)),
        }
    }

    pub fn get(&self, property: Property) -> Option<f32> {
        self.0
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| *v)
    }

    /// Value or the property's identity
    pub fn get_or_identity(&self, property: Property) -> f32 {
        self.get(property).unwrap_or_else(|| property.identity())
    }

    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.0.iter().map(|(p, _)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, f32)> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlay every value from `other`
    pub fn merge(&mut self, other: &PropertyValues) {
        for (property, value) in other.iter() {
            self.set(property, value);
        }
    }

    /// Linear interpolation between two value sets over the properties of `to`
    pub fn lerp(from: &PropertyValues, to: &PropertyValues, t: f32) -> PropertyValues {
        let mut out = PropertyValues::new();
        for (property, end) in to.iter() {
            let start = from.get_or_identity(property);
            out.set(property, start + (end - start) * t);
        }
        out
    }
}

impl Serialize for PropertyValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (property, value) in self.iter() {
            map.serialize_entry(property.name(), &value)?;
        }
        map.end()
    }
}

impl FromIterator<(Property, f32)> for PropertyValues {
    fn from_iter<I: IntoIterator<Item = (Property, f32)>>(iter: I) -> Self {
        let mut values = PropertyValues::new();
        for (property, value) in iter {
            values.set(property, value);
        }
        values
    }
}

/// Current animated values per target
///
/// Only properties an animation has written are stored; everything else
/// reads as the property's identity.
#[derive(Clone, Debug, Default)]
pub struct PropertyStore {
    values: FxHashMap<Target, PropertyValues>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, target: &Target, property: Property) -> f32 {
        self.values
            .get(target)
            .map(|values| values.get_or_identity(property))
            .unwrap_or_else(|| property.identity())
    }

    pub fn set(&mut self, target: &Target, property: Property, value: f32) {
        self.values
            .entry(target.clone())
            .or_default()
            .set(property, value);
    }

    pub fn apply(&mut self, target: &Target, values: &PropertyValues) {
        if values.is_empty() {
            return;
        }
        self.values.entry(target.clone()).or_default().merge(values);
    }

    /// All written values for a target
    pub fn values_of(&self, target: &Target) -> Option<&PropertyValues> {
        self.values.get(target)
    }

    /// Current values of the given properties, falling back to identity
    pub fn read(&self, target: &Target, properties: impl Iterator<Item = Property>) -> PropertyValues {
        properties.map(|p| (p, self.get(target, p))).collect()
    }

    /// Forget everything written for a target
    pub fn clear(&mut self, target: &Target) {
        self.values.remove(target);
    }

    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.values.keys()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
