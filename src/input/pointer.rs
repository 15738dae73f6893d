use crate::foundation::core::{Point, Rect, Vec2, Viewport};

/// Which axes decide whether the pointer is inside the reference box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitAxis {
    /// Only the vertical extent counts (full-width sections).
    Vertical,
    #[default]
    Both,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerReading {
    pub inside: bool,
    /// Pointer relative to the reference box's top-left corner, present only while inside.
    pub local: Option<Point>,
}

/// Converts viewport-space pointer positions into coordinates relative to a reference box.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    bounds: Option<Rect>,
    axis: HitAxis,
    inside: bool,
}

impl PointerTracker {
    pub fn new(axis: HitAxis) -> Self {
        Self {
            bounds: None,
            axis,
            inside: false,
        }
    }

    /// Viewport-space bounding box of the reference element, `None` while unmounted.
    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
        if self.bounds.is_none() {
            self.inside = false;
        }
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    pub fn contains(&self, p: Point) -> bool {
        let Some(b) = self.bounds else {
            return false;
        };
        let vertical = p.y >= b.y0 && p.y <= b.y1;
        match self.axis {
            HitAxis::Vertical => vertical,
            HitAxis::Both => vertical && p.x >= b.x0 && p.x <= b.x1,
        }
    }

    pub fn track(&mut self, p: Point) -> PointerReading {
        self.inside = self.contains(p);
        let local = match (self.inside, self.bounds) {
            (true, Some(b)) => Some(Point::new(p.x - b.x0, p.y - b.y0)),
            _ => None,
        };
        PointerReading {
            inside: self.inside,
            local,
        }
    }
}

/// Document-space box to viewport space for the given vertical scroll offset.
pub fn to_viewport_space(doc: Rect, scroll_y: f64) -> Rect {
    Rect::new(doc.x0, doc.y0 - scroll_y, doc.x1, doc.y1 - scroll_y)
}

/// Pointer position mapped to `[-1, 1]` on both axes, centred on the viewport.
pub fn normalize_in_viewport(p: Point, viewport: Viewport) -> Vec2 {
    let x = (p.x / viewport.width - 0.5) * 2.0;
    let y = (p.y / viewport.height - 0.5) * 2.0;
    Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0))
}

#[cfg(test)]
#[path = "../../tests/unit/input/pointer.rs"]
mod tests;
