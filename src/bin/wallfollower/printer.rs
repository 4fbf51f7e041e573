use crate::app::printer;
use crate::board::DIAGNOSTICS;
use crate::config::sys_config;
use core::fmt::Write;
use systick_monotonic::fugit::Duration;
use wallfollower::controller::status::Status;

// clear screen, cursor home
const CLEAR: &str = "\x1b[2J\x1b[H";

pub fn printer(cx: printer::Context) {
    let status = Status {
        controller_type: *cx.local.controller_type,
        diagnostics: &DIAGNOSTICS,
    };
    write!(cx.local.tx, "{}{}", CLEAR, status).unwrap();

    // 5 Hz
    printer::spawn_after(Duration::<u64, 1, 1000>::millis(
        sys_config::PRINTER_SLEEP_TIME_MS,
    ))
    .unwrap();
}
