// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Viewport-aware tooltip placement.
//!
//! A tooltip is centered above its owner unless the centered label would
//! overflow the right edge of the viewport, in which case it is anchored to
//! the owner's right edge. The decision is re-taken whenever the viewport
//! width changes.

/// Axis-aligned box in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl Bounds {
    /// Build from edges.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) * 0.5
    }
}

/// Which side the label hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TooltipSide {
    /// Centered over the owner.
    #[default]
    Centered,
    /// Right edge aligned with the owner's right edge.
    RightAligned,
}

/// Decide the side for a label whose centered box is `label`.
pub fn place_tooltip(label: Bounds, viewport_width: f32) -> TooltipSide {
    if label.right > viewport_width {
        TooltipSide::RightAligned
    } else {
        TooltipSide::Centered
    }
}

/// Placement state for one mounted tooltip.
///
/// The label width is only known after the label has been laid out once, so
/// the tracker is fed measurements and viewport widths and keeps the last
/// decision. Dropping the tracker is the unmount.
#[derive(Debug, Clone, Default)]
pub struct TooltipPlacement {
    side: TooltipSide,
    label_width: Option<f32>,
    viewport_width: Option<f32>,
}

impl TooltipPlacement {
    /// Fresh tracker; centered until measured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current side.
    pub fn side(&self) -> TooltipSide {
        self.side
    }

    /// Record the label's laid-out width and re-decide.
    pub fn measure(&mut self, owner: Bounds, label_width: f32, viewport_width: f32) -> TooltipSide {
        self.label_width = Some(label_width);
        self.viewport_width = Some(viewport_width);
        self.side = place_tooltip(centered(owner, label_width), viewport_width);
        self.side
    }

    /// Re-measure if the label text changed width since the last
    /// measurement, e.g. when a hint replaces the normal label.
    pub fn on_label_width(
        &mut self,
        owner: Bounds,
        label_width: f32,
        viewport_width: f32,
    ) -> TooltipSide {
        match self.label_width {
            Some(width) if (width - label_width).abs() < f32::EPSILON => self.side,
            _ => self.measure(owner, label_width, viewport_width),
        }
    }

    /// Re-decide if the viewport width changed since the last decision.
    /// Before the first measurement this only records the width.
    pub fn on_resize(&mut self, owner: Bounds, viewport_width: f32) -> TooltipSide {
        if self.viewport_width == Some(viewport_width) {
            return self.side;
        }
        self.viewport_width = Some(viewport_width);
        if let Some(label_width) = self.label_width {
            self.side = place_tooltip(centered(owner, label_width), viewport_width);
        }
        self.side
    }

    /// Left edge of the label for the current side.
    pub fn label_left(&self, owner: Bounds, label_width: f32) -> f32 {
        match self.side {
            TooltipSide::Centered => owner.center_x() - label_width * 0.5,
            TooltipSide::RightAligned => owner.right - label_width,
        }
    }
}

fn centered(owner: Bounds, label_width: f32) -> Bounds {
    let left = owner.center_x() - label_width * 0.5;
    Bounds::new(left, owner.top, left + label_width, owner.bottom)
}
