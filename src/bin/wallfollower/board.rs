use stm32f4xx_hal::{
    gpio::{Input, Output, Pin, PushPull},
    pac::{TIM1, TIM5},
    timer::{pwm::PwmChannel, DelayUs},
};
use wallfollower::controller::diagnostics::Diagnostics;
use wallfollower::drivers::motor::mdd3a;
use wallfollower::drivers::ultrasonic::hcsr04;

pub type UsSensor =
    hcsr04::HCSR04<Pin<'A', 0, Output<PushPull>>, Pin<'A', 1, Input>, DelayUs<TIM5>>;
pub type LeftMotor = mdd3a::MDD3A<PwmChannel<TIM1, 0>, PwmChannel<TIM1, 1>>;
pub type RightMotor = mdd3a::MDD3A<PwmChannel<TIM1, 2>, PwmChannel<TIM1, 3>>;

// written by control_loop, read by printer
pub static DIAGNOSTICS: Diagnostics = Diagnostics::new();
