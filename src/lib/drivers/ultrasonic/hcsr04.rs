use crate::drivers::ultrasonic::range_sensor::RangeSensor;
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::{InputPin, OutputPin};
use libm::fminf;

/// Reported when no echo comes back inside the sensor's range.
pub const MAX_RANGE_M: f32 = 2.55;

const SETTLE_US: u32 = 2;
const TRIGGER_PULSE_US: u32 = 10;
const POLL_STEP_US: u32 = 10;
// round trip time of sound over one meter
const US_PER_M: f32 = 5800.0;
// the module raises echo ~450us after the trigger burst
const ECHO_START_TIMEOUT_US: u32 = 5_000;
// echo width at MAX_RANGE_M
const MAX_ECHO_US: u32 = 14_790;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    PinError,
    NotStarted,
    Timeout,
}

#[derive(Clone, Copy)]
enum State {
    Idle,
    WaitingForEcho { waited_us: u32 },
    Echo { width_us: u32 },
}

pub struct HCSR04<TRIG, ECHO, DELAY> {
    trigger: TRIG,
    echo: ECHO,
    delay: DELAY,
    state: State,
}

impl<TRIG, ECHO, DELAY> HCSR04<TRIG, ECHO, DELAY>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    DELAY: DelayUs<u32>,
{
    pub fn new(trigger: TRIG, echo: ECHO, delay: DELAY) -> Self {
        Self {
            trigger,
            echo,
            delay,
            state: State::Idle,
        }
    }

    /// Send the 10us trigger pulse that starts a measurement.
    pub fn start(&mut self) -> Result<(), ErrorCode> {
        self.trigger.set_low().map_err(|_| ErrorCode::PinError)?;
        self.delay.delay_us(SETTLE_US);
        self.trigger.set_high().map_err(|_| ErrorCode::PinError)?;
        self.delay.delay_us(TRIGGER_PULSE_US);
        self.trigger.set_low().map_err(|_| ErrorCode::PinError)?;
        self.state = State::WaitingForEcho { waited_us: 0 };
        Ok(())
    }

    /// Advance the running measurement by one poll step. Yields the distance
    /// in meters once the echo pulse has ended.
    pub fn poll(&mut self) -> nb::Result<f32, ErrorCode> {
        match self.state {
            State::Idle => Err(nb::Error::Other(ErrorCode::NotStarted)),
            State::WaitingForEcho { waited_us } => {
                if self.echo.is_high().map_err(|_| ErrorCode::PinError)? {
                    self.state = State::Echo { width_us: 0 };
                    Err(nb::Error::WouldBlock)
                } else if waited_us >= ECHO_START_TIMEOUT_US {
                    // sensor never answered, likely disconnected
                    self.state = State::Idle;
                    Err(nb::Error::Other(ErrorCode::Timeout))
                } else {
                    self.delay.delay_us(POLL_STEP_US);
                    self.state = State::WaitingForEcho {
                        waited_us: waited_us + POLL_STEP_US,
                    };
                    Err(nb::Error::WouldBlock)
                }
            }
            State::Echo { width_us } => {
                if self.echo.is_low().map_err(|_| ErrorCode::PinError)? {
                    self.state = State::Idle;
                    Ok(width_to_meters(width_us))
                } else if width_us >= MAX_ECHO_US {
                    // nothing reflected within range
                    self.state = State::Idle;
                    Ok(MAX_RANGE_M)
                } else {
                    self.delay.delay_us(POLL_STEP_US);
                    self.state = State::Echo {
                        width_us: width_us + POLL_STEP_US,
                    };
                    Err(nb::Error::WouldBlock)
                }
            }
        }
    }
}

impl<TRIG, ECHO, DELAY> RangeSensor for HCSR04<TRIG, ECHO, DELAY>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    DELAY: DelayUs<u32>,
{
    type Error = ErrorCode;

    fn fetch_sample(&mut self) -> Result<f32, ErrorCode> {
        self.start()?;
        nb::block!(self.poll())
    }
}

pub fn width_to_meters(width_us: u32) -> f32 {
    fminf(width_us as f32 / US_PER_M, MAX_RANGE_M)
}
