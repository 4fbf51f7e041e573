#![allow(dead_code)]

use wallfollower::controller::motor::{Direction, WallSide, WheelMounting};
use wallfollower::controller::wall_follower::FilterConfig;

// control loop period, ~14 Hz including the sensor read
pub const POLL_SLEEP_TIME_MS: u64 = 50;
// status screen refresh, 5 Hz
pub const PRINTER_SLEEP_TIME_MS: u64 = 200;

pub const SYSCLK_HZ: u32 = 48_000_000;
pub const SERIAL_BAUD: u32 = 115200;
pub const MOTOR_PWM_HZ: u32 = 20_000;

// commanded speed that maps to full PWM duty
pub const MAX_MOTOR_SPEED: u32 = 740;
// both wheels run at this speed until the first control cycle
pub const MOTOR_HIGH: u32 = 200;

pub const WALL_SIDE: WallSide = WallSide::Left;
pub const WHEEL_MOUNTING: WheelMounting = WheelMounting {
    left: Direction::Forward,
    right: Direction::Backward,
};

pub const US_SENTINEL_CM: i32 = 255;
pub const INVALID_SAMPLE_LIMIT: usize = 20;

pub const FILTER: FilterConfig = FilterConfig {
    sentinel_cm: US_SENTINEL_CM,
    invalid_sample_limit: INVALID_SAMPLE_LIMIT,
};
