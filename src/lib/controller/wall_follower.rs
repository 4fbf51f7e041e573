//! Wall following control core.
//!
//! Every control cycle a raw range sample is filtered, turned into a distance
//! error (`target - distance`, positive when too close to the wall) and mapped
//! to an inner/outer wheel command by the selected strategy. The inner wheel
//! is the one on the wall side.

use crate::controller::adjustment;
use crate::controller::diagnostics::Diagnostics;
use crate::controller::motor::{DriveCommand, WallSide, Wheel, WheelCommand, Wheels};
use crate::drivers::ultrasonic::range_sensor::RangeSensor;
use crate::filtering::invalid_sample::InvalidSampleFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerType {
    BangBang,
    PType,
}
impl ControllerType {
    pub fn name(&self) -> &'static str {
        match self {
            ControllerType::BangBang => "BangBang",
            ControllerType::PType => "PType",
        }
    }

    pub fn menu_label(&self) -> &'static str {
        match self {
            ControllerType::BangBang => "bangbang",
            ControllerType::PType => "p type",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct BangBangConfig {
    pub target_cm: i32,
    pub deadband_cm: i32,
    // at or below this distance the outer wheel reverses
    pub safe_distance_cm: i32,
    pub base_speed: u32,
    pub delta: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct PTypeConfig {
    pub target_cm: i32,
    pub threshold_cm: i32,
    pub base_speed: u32,
    pub gain: f32,
    pub close_gain: f32,
    pub inner_far_gain: f32,
    pub outer_far_gain: f32,
    pub min_cap_cm: i32,
    pub max_cap_cm: i32,
}
impl PTypeConfig {
    // inner wheel, too close
    pub fn adjustment(&self, dist_error: i32) -> f32 {
        adjustment::linear(self.gain, dist_error)
    }

    // outer wheel, too close
    pub fn close_adjustment(&self, dist_error: i32) -> f32 {
        adjustment::capped_close(self.close_gain, self.target_cm, self.min_cap_cm, dist_error)
    }

    // inner wheel, too far
    pub fn inner_far_adjustment(&self, dist_error: i32) -> f32 {
        adjustment::capped_far(self.inner_far_gain, self.target_cm, self.max_cap_cm, dist_error)
    }

    // outer wheel, too far
    pub fn outer_far_adjustment(&self, dist_error: i32) -> f32 {
        adjustment::capped_far(self.outer_far_gain, self.target_cm, self.max_cap_cm, dist_error)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FilterConfig {
    // samples at or above this are "no echo"
    pub sentinel_cm: i32,
    pub invalid_sample_limit: usize,
}

/// Control strategy, chosen once at startup.
#[derive(Clone, Copy, Debug)]
pub enum Strategy {
    BangBang(BangBangConfig),
    PType(PTypeConfig),
}
impl Strategy {
    pub fn controller_type(&self) -> ControllerType {
        match self {
            Strategy::BangBang(_) => ControllerType::BangBang,
            Strategy::PType(_) => ControllerType::PType,
        }
    }

    pub fn target_cm(&self) -> i32 {
        match self {
            Strategy::BangBang(config) => config.target_cm,
            Strategy::PType(config) => config.target_cm,
        }
    }

    pub fn command(&self, distance_cm: i32) -> SideCommand {
        match self {
            Strategy::BangBang(config) => bang_bang(config, distance_cm),
            Strategy::PType(config) => p_type(config, distance_cm),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ControllerConfig {
    pub strategy: Strategy,
    pub filter: FilterConfig,
    pub wall_side: WallSide,
    // both wheels run forward at this speed until the first cycle
    pub start_speed: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SideCommand {
    pub inner: WheelCommand,
    pub outer: WheelCommand,
}

pub fn dist_error(target_cm: i32, distance_cm: i32) -> i32 {
    target_cm.saturating_sub(distance_cm)
}

// speeds are floored at zero, fractions truncated
fn to_speed(speed: f32) -> u32 {
    if speed <= 0.0 {
        0
    } else {
        speed as u32
    }
}

pub fn bang_bang(config: &BangBangConfig, distance_cm: i32) -> SideCommand {
    let dist_error = dist_error(config.target_cm, distance_cm);
    let base = config.base_speed;
    let delta = config.delta;

    if dist_error.unsigned_abs() <= config.deadband_cm.unsigned_abs() {
        SideCommand {
            inner: WheelCommand::forward(base + delta),
            outer: WheelCommand::forward(base + delta),
        }
    } else if dist_error > 0 {
        if distance_cm <= config.safe_distance_cm {
            // pivot away from the wall
            SideCommand {
                inner: WheelCommand::forward(base),
                outer: WheelCommand::backward(base + 2 * delta),
            }
        } else {
            SideCommand {
                inner: WheelCommand::forward(base + delta),
                outer: WheelCommand::forward(base),
            }
        }
    } else {
        SideCommand {
            inner: WheelCommand::forward(base),
            outer: WheelCommand::forward(base + 2 * delta),
        }
    }
}

pub fn p_type(config: &PTypeConfig, distance_cm: i32) -> SideCommand {
    let dist_error = dist_error(config.target_cm, distance_cm);
    let base = config.base_speed as f32;

    if dist_error.unsigned_abs() <= config.threshold_cm.unsigned_abs() {
        SideCommand {
            inner: WheelCommand::forward(config.base_speed),
            outer: WheelCommand::forward(config.base_speed),
        }
    } else if dist_error > 0 {
        SideCommand {
            inner: WheelCommand::forward(to_speed(base + config.adjustment(dist_error))),
            outer: WheelCommand::backward(to_speed(base + config.close_adjustment(dist_error))),
        }
    } else {
        SideCommand {
            inner: WheelCommand::forward(to_speed(base - config.inner_far_adjustment(dist_error))),
            outer: WheelCommand::forward(to_speed(base + config.outer_far_adjustment(dist_error))),
        }
    }
}

/// Controller instance: owns the sample filter and publishes the latest
/// distance and error to `diagnostics`.
pub struct WallFollower<'d> {
    config: ControllerConfig,
    filter: InvalidSampleFilter<i32>,
    diagnostics: &'d Diagnostics,
}

impl<'d> WallFollower<'d> {
    pub fn new(config: ControllerConfig, diagnostics: &'d Diagnostics) -> WallFollower<'d> {
        WallFollower {
            config,
            filter: InvalidSampleFilter::new(
                config.filter.sentinel_cm,
                config.filter.invalid_sample_limit,
            ),
            diagnostics,
        }
    }

    pub fn controller_type(&self) -> ControllerType {
        self.config.strategy.controller_type()
    }

    pub fn start<L: Wheel, R: Wheel>(&self, wheels: &mut Wheels<L, R>) {
        wheels.apply(&DriveCommand::cruise(self.config.start_speed));
    }

    pub fn filter(&mut self, raw_cm: i32) -> i32 {
        let distance = self.filter.update(raw_cm);
        self.diagnostics.publish_distance(distance);
        distance
    }

    /// Fetch one sample, convert meters to whole centimeters and filter it. A
    /// failed or non-finite read counts as a "no echo" sample.
    pub fn read_distance<S: RangeSensor>(&mut self, sensor: &mut S) -> i32 {
        let raw_cm = match sensor.fetch_sample() {
            Ok(meters) if meters.is_finite() => (meters * 100.0) as i32,
            _ => self.config.filter.sentinel_cm,
        };
        self.filter(raw_cm)
    }

    pub fn process(&mut self, distance_cm: i32) -> DriveCommand {
        let strategy = &self.config.strategy;
        self.diagnostics
            .publish_error(dist_error(strategy.target_cm(), distance_cm));
        let command = strategy.command(distance_cm);
        DriveCommand::from_sides(self.config.wall_side, command.inner, command.outer)
    }

    /// One control cycle: sample, filter, compute and apply.
    pub fn step<S, L, R>(&mut self, sensor: &mut S, wheels: &mut Wheels<L, R>) -> DriveCommand
    where
        S: RangeSensor,
        L: Wheel,
        R: Wheel,
    {
        let distance = self.read_distance(sensor);
        let command = self.process(distance);
        wheels.apply(&command);
        command
    }
}
