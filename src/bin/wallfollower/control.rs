use crate::app::control_loop;
use crate::config::sys_config;
use systick_monotonic::fugit::Duration;

pub fn control_loop(cx: control_loop::Context) {
    // sample, filter and drive; sensor dropouts are absorbed by the filter
    cx.local.follower.step(cx.local.us_sensor, cx.local.wheels);

    control_loop::spawn_after(Duration::<u64, 1, 1000>::millis(
        sys_config::POLL_SLEEP_TIME_MS,
    ))
    .unwrap();
}
