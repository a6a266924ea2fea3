/// Bounding box of the combobox input at the moment it opened, in viewport
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl AnchorRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Where the floating option panel sits. Computed once on open from a
/// snapshot of the anchor; never re-derived while the panel is up. Scroll
/// and resize close the panel instead of re-anchoring it, so a stale
/// placement can never detach from its input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub opens_upward: bool,
}

impl PanelPlacement {
    /// Drop below the anchor, flipping above only when the space below
    /// cannot fit the panel and the space above can do better.
    pub fn compute(anchor: AnchorRect, viewport: Viewport, max_height: f64) -> Self {
        let below = (viewport.height - anchor.bottom()).max(0.0);
        let above = anchor.y.max(0.0);
        let opens_upward = below < max_height && above > below;

        let height = if opens_upward {
            max_height.min(above)
        } else {
            max_height.min(below.max(0.0))
        };
        let y = if opens_upward {
            anchor.y - height
        } else {
            anchor.bottom()
        };

        Self {
            x: anchor.x,
            y,
            width: anchor.width,
            height,
            opens_upward,
        }
    }
}
