use std::collections::BTreeMap;
use std::fmt;

/// Name of a visual element a component writes to.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct TargetId(pub String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for TargetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&TargetId> for TargetId {
    fn from(id: &TargetId) -> Self {
        id.clone()
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numeric properties a rendering surface must be able to apply.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    X,
    Y,
    XPercent,
    YPercent,
    Scale,
    ScaleX,
    Rotation,
    RotationX,
    RotationY,
    Opacity,
    Blur,
    MaskRadius,
    MaskX,
    MaskY,
    Width,
    Height,
    BorderRadius,
}

impl Property {
    /// Value assumed for a property nobody has written yet.
    pub fn rest_value(self) -> f64 {
        match self {
            Self::Scale | Self::ScaleX | Self::Opacity => 1.0,
            _ => 0.0,
        }
    }
}

/// Property name to value.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PropertyMap(BTreeMap<Property, f64>);

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, prop: Property, value: f64) -> Self {
        self.0.insert(prop, value);
        self
    }

    pub fn set(&mut self, prop: Property, value: f64) {
        self.0.insert(prop, value);
    }

    pub fn get(&self, prop: Property) -> Option<f64> {
        self.0.get(&prop).copied()
    }

    pub fn get_or_rest(&self, prop: Property) -> f64 {
        self.get(prop).unwrap_or_else(|| prop.rest_value())
    }

    pub fn keys(&self) -> impl Iterator<Item = Property> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, f64)> + '_ {
        self.0.iter().map(|(p, v)| (*p, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Property, f64)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (Property, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// An element handle plus its last written property values.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct AnimatedTarget {
    pub props: PropertyMap,
    pub text: Option<String>,
}

#[cfg(test)]
#[path = "../../tests/unit/animation/property.rs"]
mod tests;
