//! Host simulation of the wall follower.
//!
//! A differential drive robot drives beside a straight wall on its left, with
//! the ultrasonic sensor angled 45 degrees towards the wall. A control thread
//! and a printer thread run at the firmware's periods and share the same
//! diagnostics atomics.

use std::f32::consts::{FRAC_PI_4, PI};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::config::{sys_config, tuning};
use wallfollower::controller::diagnostics::Diagnostics;
use wallfollower::controller::motor::{Direction, Wheel, WheelMounting, Wheels};
use wallfollower::controller::status::{MainMenu, Status};
use wallfollower::controller::wall_follower::{ControllerType, Strategy, WallFollower};
use wallfollower::drivers::ultrasonic::hcsr04::MAX_RANGE_M;
use wallfollower::drivers::ultrasonic::range_sensor::RangeSensor;

static DIAGNOSTICS: Diagnostics = Diagnostics::new();
static DONE: AtomicBool = AtomicBool::new(false);

const SIM_CYCLES: u32 = 200;
const START_OFFSET_CM: f32 = 45.0;
const WHEEL_RADIUS_CM: f32 = 2.1;
const TRACK_WIDTH_CM: f32 = 15.0;
const SENSOR_ANGLE_RAD: f32 = FRAC_PI_4;
// every Nth ping gets no echo
const DROPOUT_PERIOD: u32 = 17;

#[derive(Default)]
struct SimWheel {
    speed: u32,
    direction: Option<Direction>,
}
impl SimWheel {
    // deg/s at the wheel to cm/s at the ground
    fn ground_speed(&self) -> f32 {
        let sign = match self.direction {
            Some(Direction::Backward) => -1.0,
            _ => 1.0,
        };
        sign * self.speed as f32 * PI / 180.0 * WHEEL_RADIUS_CM
    }
}
impl Wheel for SimWheel {
    fn set_speed(&mut self, speed: u32) {
        self.speed = speed;
    }
    fn forward(&mut self) {
        self.direction = Some(Direction::Forward);
    }
    fn backward(&mut self) {
        self.direction = Some(Direction::Backward);
    }
}

/// Robot pose relative to the wall.
struct PhysicsState {
    // distance from the wall to the robot center
    offset_cm: f32,
    // 0 = parallel to the wall, positive = turned towards it
    heading: f32,
    pings: u32,
}
impl PhysicsState {
    fn new(offset_cm: f32) -> Self {
        Self {
            offset_cm,
            heading: 0.0,
            pings: 0,
        }
    }

    fn update(&mut self, left_cm_s: f32, right_cm_s: f32, dt: f32) {
        let linear = (left_cm_s + right_cm_s) / 2.0;
        let angular = (right_cm_s - left_cm_s) / TRACK_WIDTH_CM;
        self.heading = (self.heading + angular * dt).clamp(-PI, PI);
        // sliding along the wall on contact
        self.offset_cm = (self.offset_cm - linear * self.heading.sin() * dt).max(0.0);
    }
}
impl RangeSensor for PhysicsState {
    type Error = ();

    fn fetch_sample(&mut self) -> Result<f32, ()> {
        self.pings += 1;
        if self.pings % DROPOUT_PERIOD == 0 {
            return Ok(MAX_RANGE_M);
        }
        let ray = self.heading + SENSOR_ANGLE_RAD;
        if ray <= 0.0 || ray >= PI {
            // pointing away from the wall
            return Ok(MAX_RANGE_M);
        }
        let range_m = self.offset_cm / ray.sin() / 100.0;
        Ok(range_m.min(MAX_RANGE_M))
    }
}

fn parse_selection(selection: Option<&str>) -> Option<ControllerType> {
    match selection? {
        "bangbang" | "left" => Some(ControllerType::BangBang),
        "ptype" | "right" => Some(ControllerType::PType),
        _ => None,
    }
}

fn control_thread(controller_type: ControllerType) {
    let strategy = match controller_type {
        ControllerType::BangBang => Strategy::BangBang(tuning::BANG_BANG),
        ControllerType::PType => Strategy::PType(tuning::P_TYPE),
    };
    let mut follower = WallFollower::new(tuning::controller_config(strategy), &DIAGNOSTICS);
    let mut wheels = Wheels::new(
        SimWheel::default(),
        SimWheel::default(),
        WheelMounting::default(),
    );
    let mut robot = PhysicsState::new(START_OFFSET_CM);
    let period = Duration::from_millis(sys_config::POLL_SLEEP_TIME_MS);

    follower.start(&mut wheels);
    for _ in 0..SIM_CYCLES {
        let distance = follower.read_distance(&mut robot);
        let command = follower.process(distance);
        wheels.apply(&command);
        robot.update(
            wheels.left().ground_speed(),
            wheels.right().ground_speed(),
            period.as_secs_f32(),
        );
        thread::sleep(period);
    }
    wheels.stop();
    println!(
        "{} finished {} cycles, {:.1} cm from the wall",
        follower.controller_type().name(),
        SIM_CYCLES,
        robot.offset_cm
    );
}

fn printer_thread(controller_type: ControllerType) {
    let period = Duration::from_millis(sys_config::PRINTER_SLEEP_TIME_MS);
    while !DONE.load(Ordering::Relaxed) {
        let status = Status {
            controller_type,
            diagnostics: &DIAGNOSTICS,
        };
        print!("{}", status);
        thread::sleep(period);
    }
}

pub fn run(selection: Option<&str>) {
    let Some(controller_type) = parse_selection(selection) else {
        print!("{}", MainMenu);
        println!("usage: wallfollower <bangbang|ptype>");
        return;
    };

    let printer = thread::spawn(move || printer_thread(controller_type));
    let control = thread::spawn(move || control_thread(controller_type));

    if control.join().is_err() {
        eprintln!("control thread panicked");
    }
    DONE.store(true, Ordering::Relaxed);
    if printer.join().is_err() {
        eprintln!("printer thread panicked");
    }
}
