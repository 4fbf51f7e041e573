use crate::config::sys_config;
use wallfollower::controller::wall_follower::{
    BangBangConfig, ControllerConfig, PTypeConfig, Strategy,
};

pub const WALL_DIST_CM: i32 = 30;
pub const WALL_DIST_ERR_THRESH_CM: i32 = 3;
pub const SAFE_DISTANCE_CM: i32 = 25;
pub const FWD_SPEED_BANG: u32 = 120;
pub const DELTA: u32 = 130;

pub const P_DIST_CM: i32 = 30;
pub const P_THRESH_CM: i32 = 3;
pub const FWD_SPEED: u32 = 130;
pub const GAIN: f32 = 20.0;
pub const CLOSE_GAIN: f32 = 0.9;
pub const LEFT_FAR_GAIN: f32 = 2.4;
pub const RIGHT_FAR_GAIN: f32 = 6.6;
pub const MIN_CAP_DISTANCE_CM: i32 = 17;
pub const MAX_CAP_DISTANCE_CM: i32 = 45;

pub const BANG_BANG: BangBangConfig = BangBangConfig {
    target_cm: WALL_DIST_CM,
    deadband_cm: WALL_DIST_ERR_THRESH_CM,
    safe_distance_cm: SAFE_DISTANCE_CM,
    base_speed: FWD_SPEED_BANG,
    delta: DELTA,
};

// far gains are named for a wall on the left: inner = left wheel
pub const P_TYPE: PTypeConfig = PTypeConfig {
    target_cm: P_DIST_CM,
    threshold_cm: P_THRESH_CM,
    base_speed: FWD_SPEED,
    gain: GAIN,
    close_gain: CLOSE_GAIN,
    inner_far_gain: LEFT_FAR_GAIN,
    outer_far_gain: RIGHT_FAR_GAIN,
    min_cap_cm: MIN_CAP_DISTANCE_CM,
    max_cap_cm: MAX_CAP_DISTANCE_CM,
};

pub fn controller_config(strategy: Strategy) -> ControllerConfig {
    ControllerConfig {
        strategy,
        filter: sys_config::FILTER,
        wall_side: sys_config::WALL_SIDE,
        start_speed: sys_config::MOTOR_HIGH,
    }
}
