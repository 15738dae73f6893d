use crate::animation::property::TargetId;
use crate::foundation::core::{Point, Rect};
use crate::input::orientation::OrientationSample;
use crate::scene::delegate::ElementInfo;
use crate::scene::listeners::ListenerKind;

/// Raw input from the host environment.
///
/// Pointer positions are in viewport space; element rectangles are in document space.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerMove { x: f64, y: f64 },
    /// A tap or click. Consent prompts are only raised in response to one.
    Tap { x: f64, y: f64 },
    Scroll { y: f64 },
    Orientation(OrientationSample),
    /// Out-of-band answer to an orientation permission prompt.
    PermissionResolved { granted: bool },
    Resize { width: f64, height: f64 },
    /// Element geometry changed; `rect: None` removes the element from layout.
    Layout {
        target: TargetId,
        #[serde(default)]
        rect: Option<Rect>,
    },
    Visibility { visible: bool },
    /// Pointer moved onto a new element; `path` is that element followed by its ancestors.
    Hover { path: Vec<ElementInfo> },
    RowEnter { row: TargetId },
    RowLeave { row: TargetId },
}

impl InputEvent {
    pub fn kind(&self) -> ListenerKind {
        match self {
            Self::PointerMove { .. } | Self::Tap { .. } => ListenerKind::PointerMove,
            Self::Scroll { .. } => ListenerKind::Scroll,
            Self::Orientation(_) | Self::PermissionResolved { .. } => ListenerKind::Orientation,
            Self::Resize { .. } | Self::Layout { .. } => ListenerKind::Resize,
            Self::Visibility { .. } => ListenerKind::Visibility,
            Self::Hover { .. } | Self::RowEnter { .. } | Self::RowLeave { .. } => ListenerKind::Hover,
        }
    }

    pub fn pointer(&self) -> Option<Point> {
        match *self {
            Self::PointerMove { x, y } => Some(Point::new(x, y)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/events.rs"]
mod tests;
