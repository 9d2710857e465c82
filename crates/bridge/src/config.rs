//! # Simulation Config
//!
//! Every tunable of a run in one serde tree. Missing keys fall back to the
//! shipped tuning, so a config file only needs the values it changes.

use design::{Layout, DEFAULT_BUDGET};
use physics::Spring;
use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub layout: Layout,
    /// Vertical gravity in m/s², negative is down.
    pub gravity: f32,
    pub timing: TimingConfig,
    pub limits: OutcomeLimits,
    pub train: TrainConfig,
    /// Spending limit checked by the editor before a run starts.
    pub budget: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            gravity: -9.8,
            timing: TimingConfig::default(),
            limits: OutcomeLimits::default(),
            train: TrainConfig::default(),
            budget: DEFAULT_BUDGET,
        }
    }
}

impl SimConfig {
    /// Reject settings the stepper cannot run with.
    ///
    /// # Errors
    ///
    /// [`BridgeError::Config`] naming the offending field.
    pub fn validate(&self) -> Result<(), BridgeError> {
        if !(self.timing.fixed_dt.is_finite() && self.timing.fixed_dt > 0.0) {
            return Err(BridgeError::Config("timing.fixed_dt must be positive"));
        }
        if self.timing.max_substeps == 0 {
            return Err(BridgeError::Config("timing.max_substeps must be at least 1"));
        }
        if self.layout.gap_end <= self.layout.gap_start {
            return Err(BridgeError::Config("layout.gap_end must lie right of gap_start"));
        }
        Ok(())
    }

    /// X the rear car must pass to win.
    #[must_use]
    pub fn finish_x(&self) -> f32 {
        self.layout.gap_end + self.limits.win_margin
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Length of one physics step in seconds.
    pub fixed_dt: f64,
    /// Cap on physics steps per frame; leftover time stays banked.
    pub max_substeps: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_substeps: 6,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomeLimits {
    /// Any car below this height has fallen off the bridge.
    pub crash_y: f32,
    /// Distance past the right cliff edge the rear car must reach.
    pub win_margin: f32,
    /// Seconds of simulated time before a pending run fails.
    pub timeout: f64,
}

impl Default for OutcomeLimits {
    fn default() -> Self {
        Self {
            crash_y: -3.0,
            win_margin: 2.0,
            timeout: 18.0,
        }
    }
}

/// Geometry, mass and drive of the three-car train.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Gap between the locomotive centre and the left cliff edge.
    pub front_offset: f32,
    /// Centre-to-centre distance between adjacent cars.
    pub car_spacing: f32,
    pub chassis_half_width: f32,
    pub chassis_half_height: f32,
    pub chassis_density: f32,
    pub chassis_friction: f32,
    /// Chassis centre height above the platform at spawn.
    pub ride_height: f32,
    pub wheel_radius: f32,
    pub wheel_density: f32,
    pub wheel_friction: f32,
    /// Wheel centres in chassis space, mirrored front and back.
    pub wheel_offset_x: f32,
    pub wheel_offset_y: f32,
    pub suspension: Spring,
    pub suspension_travel: f32,
    pub coupler_rest_length: f32,
    pub coupler: Spring,
    /// Locomotive wheel speed in rad/s; negative spins clockwise and rolls
    /// the train toward +x.
    pub motor_speed: f32,
    pub motor_max_torque: f32,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            front_offset: 2.0,
            car_spacing: 2.2,
            chassis_half_width: 0.9,
            chassis_half_height: 0.22,
            chassis_density: 2.2,
            chassis_friction: 0.6,
            ride_height: 0.62,
            wheel_radius: 0.22,
            wheel_density: 1.6,
            wheel_friction: 1.2,
            wheel_offset_x: 0.55,
            wheel_offset_y: -0.3,
            suspension: Spring::new(5.5, 0.7),
            suspension_travel: 0.15,
            coupler_rest_length: 2.0,
            coupler: Spring::new(2.8, 0.8),
            motor_speed: -14.0,
            motor_max_torque: 12.0,
        }
    }
}
