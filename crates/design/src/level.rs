//! # Level Layout
//!
//! The fixed terrain every design is played on: two platforms at the same
//! height separated by a gap, a void floor far below the gap, and the
//! built-in starter structures.

use serde::{Deserialize, Serialize};

use crate::material::Material;
use crate::model::Design;

/// Half-thickness of a road plank. Deck nodes sit this far below the
/// platform so plank tops run flush with it.
pub const PLANK_HALF_HEIGHT: f32 = 0.06;

/// Spending limit enforced by the editor before a run may start.
pub const DEFAULT_BUDGET: f32 = 5000.0;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Height of both platform surfaces.
    pub platform_y: f32,
    /// Right end of the left platform.
    pub gap_start: f32,
    /// Left end of the right platform.
    pub gap_end: f32,
    pub world_min: f32,
    pub world_max: f32,
    /// Height of the void floor spanning the gap.
    pub floor_y: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            platform_y: 0.0,
            gap_start: 0.0,
            gap_end: 12.0,
            world_min: -30.0,
            world_max: 40.0,
            floor_y: -10.0,
        }
    }
}

impl Layout {
    #[must_use]
    pub fn gap_width(&self) -> f32 {
        self.gap_end - self.gap_start
    }

    /// Node height for a road deck flush with the platforms.
    #[must_use]
    pub fn deck_y(&self) -> f32 {
        self.platform_y - PLANK_HALF_HEIGHT
    }
}

/// The shipped starter bridge: an anchor on each cliff edge, two free
/// nodes splitting the gap into thirds, and three road beams between them.
#[must_use]
pub fn default_design(layout: &Layout) -> Design {
    let mut design = Design::new();
    let y = layout.deck_y();
    let third = layout.gap_width() / 3.0;

    let left = design.add_node(layout.gap_start, y, true);
    let mid_a = design.add_node(layout.gap_start + third, y, false);
    let mid_b = design.add_node(layout.gap_start + 2.0 * third, y, false);
    let right = design.add_node(layout.gap_end, y, true);

    for (a, b) in [(left, mid_a), (mid_a, mid_b), (mid_b, right)] {
        if let Err(err) = design.add_beam(a, b, Material::Road) {
            tracing::error!("starter bridge rejected beam {a}-{b}: {err}");
        }
    }
    design
}

/// Two anchors joined by a single wood beam across the whole gap. There is
/// no deck, so nothing carries the train.
#[must_use]
pub fn wood_span_design(layout: &Layout) -> Design {
    let mut design = Design::new();
    let y = layout.deck_y();
    let left = design.add_node(layout.gap_start, y, true);
    let right = design.add_node(layout.gap_end, y, true);
    if let Err(err) = design.add_beam(left, right, Material::Wood) {
        tracing::error!("wood span rejected: {err}");
    }
    design
}
