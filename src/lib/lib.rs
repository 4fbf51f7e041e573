#![cfg_attr(not(test), no_std)]

pub mod controller {
    pub mod adjustment;
    pub mod diagnostics;
    pub mod motor;
    pub mod status;
    pub mod wall_follower;
}

pub mod drivers {
    pub mod motor {
        pub mod mdd3a;
    }
    pub mod ultrasonic {
        pub mod hcsr04;
        pub mod range_sensor;
    }
}

pub mod filtering {
    pub mod invalid_sample;
}
