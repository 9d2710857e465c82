//! # Train Builder
//!
//! Three box cars on the left platform, each on two suspended wheels, held
//! together by spring couplers. Only the locomotive, the car nearest the
//! gap, is driven.

use design::Layout;
use physics::{
    BodyDesc, BodyHandle, CollisionLayer, DistanceJointDesc, Fixture, JointHandle, Motor,
    PhysicsSim, Shape, Vec2, WheelJointDesc,
};
use tracing::debug;

use crate::config::TrainConfig;
use crate::error::BridgeError;

pub const CAR_COUNT: usize = 3;
pub const WHEEL_COUNT: usize = CAR_COUNT * 2;

const TRAIN_RESTITUTION: f32 = 0.0;

struct Car {
    chassis: BodyHandle,
    wheels: [BodyHandle; 2],
    axles: [JointHandle; 2],
}

/// Handles of the train's bodies and joints, front to back.
#[derive(Clone, Debug)]
pub struct Train {
    /// `cars[0]` is the locomotive.
    pub cars: [BodyHandle; CAR_COUNT],
    pub wheels: [BodyHandle; WHEEL_COUNT],
    pub axles: [JointHandle; WHEEL_COUNT],
    pub couplers: [JointHandle; CAR_COUNT - 1],
    motors_on: bool,
}

impl Train {
    /// Spawn the train resting on the left platform, locomotive in front.
    ///
    /// # Errors
    ///
    /// [`BridgeError::Physics`] if the physics world rejects a joint.
    pub fn build(
        physics: &mut PhysicsSim,
        layout: &Layout,
        config: &TrainConfig,
    ) -> Result<Self, BridgeError> {
        let front_x = layout.gap_start - config.front_offset;
        let y = layout.platform_y + config.ride_height;
        let drive = Motor {
            speed: config.motor_speed,
            max_torque: config.motor_max_torque,
        };

        let cars = [
            build_car(physics, config, Vec2::new(front_x, y), Some(drive))?,
            build_car(physics, config, Vec2::new(front_x - config.car_spacing, y), None)?,
            build_car(
                physics,
                config,
                Vec2::new(front_x - 2.0 * config.car_spacing, y),
                None,
            )?,
        ];

        let mut couplers = Vec::with_capacity(CAR_COUNT - 1);
        for pair in cars.windows(2) {
            couplers.push(physics.add_distance_joint(&DistanceJointDesc {
                body_a: pair[0].chassis,
                body_b: pair[1].chassis,
                local_anchor_a: Vec2::ZERO,
                local_anchor_b: Vec2::ZERO,
                rest_length: config.coupler_rest_length,
                spring: config.coupler,
            })?);
        }

        let train = Self {
            cars: std::array::from_fn(|i| cars[i].chassis),
            wheels: std::array::from_fn(|i| cars[i / 2].wheels[i % 2]),
            axles: std::array::from_fn(|i| cars[i / 2].axles[i % 2]),
            couplers: std::array::from_fn(|i| couplers[i]),
            motors_on: true,
        };
        debug!(front_x, y, "train built");
        Ok(train)
    }

    #[must_use]
    pub fn locomotive(&self) -> BodyHandle {
        self.cars[0]
    }

    /// Axles carrying a drive motor.
    #[must_use]
    pub fn driven_axles(&self) -> &[JointHandle] {
        &self.axles[..2]
    }

    #[must_use]
    pub fn motors_on(&self) -> bool {
        self.motors_on
    }

    /// Chassis centres, front to back.
    #[must_use]
    pub fn car_positions(&self, physics: &PhysicsSim) -> [Vec2; CAR_COUNT] {
        self.cars.map(|car| {
            physics
                .body_pose(car)
                .map_or(Vec2::ZERO, |pose| pose.position)
        })
    }

    /// Cut the drive on every axle so the wheels roll freely.
    ///
    /// # Errors
    ///
    /// [`BridgeError::Physics`] if an axle joint is gone.
    pub fn stop_motors(&mut self, physics: &mut PhysicsSim) -> Result<(), BridgeError> {
        for axle in self.axles {
            physics.disable_motor(axle)?;
        }
        self.motors_on = false;
        Ok(())
    }
}

fn build_car(
    physics: &mut PhysicsSim,
    config: &TrainConfig,
    centre: Vec2,
    drive: Option<Motor>,
) -> Result<Car, BridgeError> {
    let chassis = physics.add_body(
        &BodyDesc::dynamic(
            Shape::Box {
                half_extents: Vec2::new(config.chassis_half_width, config.chassis_half_height),
            },
            Fixture::new(
                config.chassis_density,
                config.chassis_friction,
                TRAIN_RESTITUTION,
                CollisionLayer::Train,
            ),
        )
        .with_position(centre),
    );

    let mut wheel = |side: f32| -> Result<(BodyHandle, JointHandle), BridgeError> {
        let anchor = Vec2::new(side * config.wheel_offset_x, config.wheel_offset_y);
        let body = physics.add_body(
            &BodyDesc::dynamic(
                Shape::Circle {
                    radius: config.wheel_radius,
                },
                Fixture::new(
                    config.wheel_density,
                    config.wheel_friction,
                    TRAIN_RESTITUTION,
                    CollisionLayer::Train,
                ),
            )
            .with_position(centre + anchor),
        );
        let axle = physics.add_wheel_joint(&WheelJointDesc {
            chassis,
            wheel: body,
            local_anchor: anchor,
            suspension: config.suspension,
            travel: config.suspension_travel,
            motor: drive,
        })?;
        Ok((body, axle))
    };

    let (front_wheel, front_axle) = wheel(1.0)?;
    let (rear_wheel, rear_axle) = wheel(-1.0)?;
    Ok(Car {
        chassis,
        wheels: [front_wheel, rear_wheel],
        axles: [front_axle, rear_axle],
    })
}
