use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// A blocking counting throttle bounding concurrent analyses.
///
/// [`Gate::pass`] hands out an RAII pass; the slot is returned when the pass
/// drops, including on unwind, so a panicking analysis cannot leak one.
pub struct Gate {
    slots: Mutex<usize>,
    cv: Condvar,
}

/// A held slot in a [`Gate`]. Dropping it frees the slot.
pub struct GatePass<'a> {
    gate: &'a Gate,
}

impl Gate {
    pub fn new(slots: usize) -> Self {
        assert!(slots > 0, "slots must be > 0");
        Self {
            slots: Mutex::new(slots),
            cv: Condvar::new(),
        }
    }

    /// Take a slot, blocking until one is available.
    ///
    /// Also returns the time spent waiting (zero if no wait was required).
    pub fn pass(&self) -> (GatePass<'_>, Duration) {
        let start = Instant::now();
        let mut waited = false;

        let mut slots = self.slots.lock().expect("gate mutex poisoned");
        while *slots == 0 {
            waited = true;
            slots = self.cv.wait(slots).expect("gate mutex poisoned");
        }
        *slots -= 1;
        drop(slots);

        let wait = if waited { start.elapsed() } else { Duration::ZERO };
        (GatePass { gate: self }, wait)
    }
}

impl Drop for GatePass<'_> {
    fn drop(&mut self) {
        let mut slots = self.gate.slots.lock().expect("gate mutex poisoned");
        *slots += 1;
        self.gate.cv.notify_one();
    }
}
