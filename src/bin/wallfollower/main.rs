#![cfg_attr(target_os = "none", no_main)]
#![cfg_attr(target_os = "none", no_std)]

mod config {
    pub mod sys_config;
    pub mod tuning;
}

#[cfg(target_os = "none")]
mod board;
#[cfg(target_os = "none")]
mod control;
#[cfg(target_os = "none")]
mod printer;

// off target, run the same controllers against a simulated robot
#[cfg(not(target_os = "none"))]
mod sim;

#[cfg(not(target_os = "none"))]
fn main() {
    let selection = std::env::args().nth(1);
    sim::run(selection.as_deref());
}

#[cfg(target_os = "none")]
#[rtic::app(device = stm32f4xx_hal::pac, peripherals = true, dispatchers = [SPI2, SPI3])]
mod app {
    use crate::board::{LeftMotor, RightMotor, UsSensor, DIAGNOSTICS};
    use crate::config::{sys_config, tuning};
    use crate::control::control_loop;
    use crate::printer::printer;
    use core::fmt::Write;
    use cortex_m::asm;
    use panic_write::PanicHandler;
    use stm32f4xx_hal::{
        pac::USART2,
        prelude::*,
        serial::{Config, Serial, Tx},
    };
    use systick_monotonic::Systick;
    use wallfollower::controller::motor::Wheels;
    use wallfollower::controller::status::MainMenu;
    use wallfollower::controller::wall_follower::{ControllerType, Strategy, WallFollower};
    use wallfollower::drivers::motor::mdd3a;
    use wallfollower::drivers::ultrasonic::hcsr04;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        tx: core::pin::Pin<PanicHandler<Tx<USART2>>>,
        follower: WallFollower<'static>,
        us_sensor: UsSensor,
        wheels: Wheels<LeftMotor, RightMotor>,
        controller_type: ControllerType,
    }

    #[monotonic(binds = SysTick, default = true)]
    type MonoTimer = Systick<1000>;

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        // configure clocks
        let rcc = ctx.device.RCC.constrain();
        let mono = Systick::new(ctx.core.SYST, sys_config::SYSCLK_HZ);
        let clocks = rcc.cfgr.sysclk(sys_config::SYSCLK_HZ.Hz()).freeze();

        let gpioa = ctx.device.GPIOA.split();
        let gpiob = ctx.device.GPIOB.split();

        // set up uart tx
        let tx_pin = gpioa.pa2.into_alternate();
        let serial = Serial::tx(
            ctx.device.USART2,
            tx_pin,
            Config::default()
                .baudrate(sys_config::SERIAL_BAUD.bps())
                .wordlength_8()
                .parity_none(),
            &clocks,
        )
        .unwrap();
        let mut tx = PanicHandler::new(serial);

        // set up ultrasonic sensor, TIM5 paces the echo polling
        let trigger = gpioa.pa0.into_push_pull_output();
        let echo = gpioa.pa1.into_floating_input();
        let delay = ctx.device.TIM5.delay_us(&clocks);
        let us_sensor = hcsr04::HCSR04::new(trigger, echo, delay);

        // set up PWM, left motor on channels 1-2, right motor on channels 3-4
        let channels = (
            gpioa.pa8.into_alternate(),
            gpioa.pa9.into_alternate(),
            gpioa.pa10.into_alternate(),
            gpioa.pa11.into_alternate(),
        );
        let pwms = ctx
            .device
            .TIM1
            .pwm_hz(channels, sys_config::MOTOR_PWM_HZ.Hz(), &clocks)
            .split();
        let mut left_motor = mdd3a::MDD3A::new((pwms.0, pwms.1), sys_config::MAX_MOTOR_SPEED);
        let mut right_motor = mdd3a::MDD3A::new((pwms.2, pwms.3), sys_config::MAX_MOTOR_SPEED);
        left_motor.start();
        right_motor.start();
        let mut wheels = Wheels::new(left_motor, right_motor, sys_config::WHEEL_MOUNTING);

        // controller selection, left button = bang-bang, right button = p-type
        let left_button = gpiob.pb0.into_pull_up_input();
        let right_button = gpiob.pb1.into_pull_up_input();
        write!(tx, "{}", MainMenu).unwrap();
        let controller_type = loop {
            if left_button.is_low() {
                while left_button.is_low() {
                    asm::nop();
                }
                break ControllerType::BangBang;
            }
            if right_button.is_low() {
                while right_button.is_low() {
                    asm::nop();
                }
                break ControllerType::PType;
            }
        };
        let strategy = match controller_type {
            ControllerType::BangBang => Strategy::BangBang(tuning::BANG_BANG),
            ControllerType::PType => Strategy::PType(tuning::P_TYPE),
        };

        let follower = WallFollower::new(tuning::controller_config(strategy), &DIAGNOSTICS);
        follower.start(&mut wheels);

        writeln!(tx, "system initialized\r").unwrap();

        control_loop::spawn().unwrap();
        printer::spawn().unwrap();

        (
            Shared {},
            Local {
                tx,
                follower,
                us_sensor,
                wheels,
                controller_type,
            },
            init::Monotonics(mono),
        )
    }

    #[idle]
    fn idle(_ctx: idle::Context) -> ! {
        loop {
            asm::nop();
        }
    }

    extern "Rust" {
        #[task(local = [follower, us_sensor, wheels], priority = 2)]
        fn control_loop(cx: control_loop::Context);

        #[task(local = [tx, controller_type], priority = 1)]
        fn printer(cx: printer::Context);
    }
}
