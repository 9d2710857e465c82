use serde::{Deserialize, Serialize};

/// Beam material. Fixed when the beam is placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Wood,
    Steel,
    /// Deck member; the simulation gives it a plank the train can drive on.
    Road,
}

/// Per-material constants. Everything scales with member length except the
/// spring parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaterialProps {
    pub cost_per_meter: f32,
    /// Peak joint reaction force a member tolerates, per meter of length.
    pub break_force_per_meter: f32,
    /// Joint spring frequency in Hz.
    pub frequency: f32,
    /// Joint damping ratio.
    pub damping_ratio: f32,
}

const WOOD: MaterialProps = MaterialProps {
    cost_per_meter: 100.0,
    break_force_per_meter: 900.0,
    frequency: 14.0,
    damping_ratio: 0.5,
};

const STEEL: MaterialProps = MaterialProps {
    cost_per_meter: 240.0,
    break_force_per_meter: 2600.0,
    frequency: 24.0,
    damping_ratio: 0.7,
};

const ROAD: MaterialProps = MaterialProps {
    cost_per_meter: 180.0,
    break_force_per_meter: 1800.0,
    frequency: 20.0,
    damping_ratio: 0.7,
};

impl Material {
    pub const ALL: [Material; 3] = [Material::Wood, Material::Steel, Material::Road];

    #[must_use]
    pub const fn props(self) -> &'static MaterialProps {
        match self {
            Material::Wood => &WOOD,
            Material::Steel => &STEEL,
            Material::Road => &ROAD,
        }
    }

    #[must_use]
    pub const fn is_road(self) -> bool {
        matches!(self, Material::Road)
    }

    #[must_use]
    pub fn cost(self, length: f32) -> f32 {
        self.props().cost_per_meter * length
    }

    #[must_use]
    pub fn break_force(self, length: f32) -> f32 {
        self.props().break_force_per_meter * length
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Material::Wood => "wood",
            Material::Steel => "steel",
            Material::Road => "road",
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
