use core::sync::atomic::{AtomicI32, Ordering};

/// Latest filtered distance and distance error, written by the control loop
/// and read by the status display. Readers may see values one cycle stale.
pub struct Diagnostics {
    distance_cm: AtomicI32,
    error_cm: AtomicI32,
}
impl Diagnostics {
    pub const fn new() -> Diagnostics {
        Diagnostics {
            distance_cm: AtomicI32::new(0),
            error_cm: AtomicI32::new(0),
        }
    }

    pub fn publish_distance(&self, distance_cm: i32) {
        self.distance_cm.store(distance_cm, Ordering::Relaxed);
    }

    pub fn publish_error(&self, error_cm: i32) {
        self.error_cm.store(error_cm, Ordering::Relaxed);
    }

    pub fn distance_cm(&self) -> i32 {
        self.distance_cm.load(Ordering::Relaxed)
    }

    pub fn error_cm(&self) -> i32 {
        self.error_cm.load(Ordering::Relaxed)
    }
}
impl Default for Diagnostics {
    fn default() -> Diagnostics {
        Diagnostics::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SHARED: Diagnostics = Diagnostics::new();

    #[test]
    fn latest_values_win() {
        let diagnostics = Diagnostics::default();
        assert_eq!((diagnostics.distance_cm(), diagnostics.error_cm()), (0, 0));
        diagnostics.publish_distance(42);
        diagnostics.publish_error(-12);
        diagnostics.publish_distance(28);
        assert_eq!(diagnostics.distance_cm(), 28);
        assert_eq!(diagnostics.error_cm(), -12);
    }

    #[test]
    fn readable_from_another_thread() {
        SHARED.publish_error(7);
        let seen = std::thread::spawn(|| SHARED.error_cm()).join().unwrap();
        assert_eq!(seen, 7);
    }
}
