use crate::controller::motor::{Direction, Wheel};
use embedded_hal::PwmPin;

/*
Helper Function
input: speed magnitude, speed that maps to full duty, direction
out: 0 <= tuple: u16 <= max_duty
Decription: drives M1A for forward, M1B for backward, the other input stays
low. Speeds above max_speed saturate at max_duty.
*/
pub fn convert_speed_to_power(
    speed: u32,
    max_speed: u32,
    direction: Direction,
    max_duty: u16,
) -> (u16, u16) {
    if max_speed == 0 {
        return (0, 0);
    }
    let speed = speed.min(max_speed) as u64;
    let duty = (speed * max_duty as u64 / max_speed as u64) as u16; //truncate

    match direction {
        Direction::Forward => (duty, 0),
        Direction::Backward => (0, duty),
    }
}

pub struct MDD3A<X, Y> {
    pwm: (X, Y),
    max_speed: u32,
    speed: u32,
    direction: Direction,
}

impl<X, Y> MDD3A<X, Y>
where
    X: PwmPin<Duty = u16>,
    Y: PwmPin<Duty = u16>,
{
    // max_speed is the commanded speed that maps to full duty
    pub fn new(in1: (X, Y), max_speed: u32) -> Self {
        Self {
            pwm: in1,
            max_speed,
            speed: 0,
            direction: Direction::Forward,
        }
    }

    pub fn start(&mut self) {
        self.pwm.0.enable();
        self.pwm.1.enable();
    }

    pub fn get_duty(&self) -> (u16, u16) {
        (self.pwm.0.get_duty(), self.pwm.1.get_duty())
    }

    fn set_power(&mut self) {
        let max_duty = self.pwm.0.get_max_duty().min(self.pwm.1.get_max_duty());
        let (speedx, speedy) =
            convert_speed_to_power(self.speed, self.max_speed, self.direction, max_duty);
        self.pwm.0.set_duty(speedx);
        self.pwm.1.set_duty(speedy);
    }
}

impl<X, Y> Wheel for MDD3A<X, Y>
where
    X: PwmPin<Duty = u16>,
    Y: PwmPin<Duty = u16>,
{
    fn set_speed(&mut self, speed: u32) {
        self.speed = speed;
        self.set_power();
    }

    fn forward(&mut self) {
        self.direction = Direction::Forward;
        self.set_power();
    }

    fn backward(&mut self) {
        self.direction = Direction::Backward;
        self.set_power();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPwm {
        duty: u16,
        max_duty: u16,
        enabled: bool,
    }
    impl MockPwm {
        fn new(max_duty: u16) -> Self {
            MockPwm {
                duty: 0,
                max_duty,
                enabled: false,
            }
        }
    }
    impl PwmPin for MockPwm {
        type Duty = u16;
        fn disable(&mut self) {
            self.enabled = false;
        }
        fn enable(&mut self) {
            self.enabled = true;
        }
        fn get_duty(&self) -> u16 {
            self.duty
        }
        fn get_max_duty(&self) -> u16 {
            self.max_duty
        }
        fn set_duty(&mut self, duty: u16) {
            self.duty = duty;
        }
    }

    #[test]
    fn speed_scales_to_duty() {
        assert_eq!(convert_speed_to_power(370, 740, Direction::Forward, 2400), (1200, 0));
        assert_eq!(convert_speed_to_power(370, 740, Direction::Backward, 2400), (0, 1200));
        assert_eq!(convert_speed_to_power(5000, 740, Direction::Forward, 2400), (2400, 0));
        assert_eq!(convert_speed_to_power(0, 740, Direction::Backward, 2400), (0, 0));
        assert_eq!(convert_speed_to_power(100, 0, Direction::Forward, 2400), (0, 0));
    }

    #[test]
    fn direction_change_moves_duty_to_other_input() {
        let mut motor = MDD3A::new((MockPwm::new(2400), MockPwm::new(2400)), 740);
        motor.start();
        motor.set_speed(740);
        motor.forward();
        assert_eq!(motor.get_duty(), (2400, 0));
        motor.backward();
        assert_eq!(motor.get_duty(), (0, 2400));
        motor.set_speed(0);
        assert_eq!(motor.get_duty(), (0, 0));
    }

    #[test]
    fn start_enables_both_channels() {
        let mut motor = MDD3A::new((MockPwm::new(100), MockPwm::new(100)), 740);
        motor.start();
        assert!(motor.pwm.0.enabled && motor.pwm.1.enabled);
    }
}
