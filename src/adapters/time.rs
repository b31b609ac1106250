//! Clock adapters.
//!
//! - [`SystemClock`]: monotonic milliseconds since boot.
//!   - **`feature = "espidf"`** wraps `esp_timer_get_time()` from the
//!     ESP-IDF high-resolution timer.
//!   - otherwise uses `std::time::Instant` for host-side simulation.
//! - [`ManualClock`]: a clock that only moves when told to, for tests
//!   and deterministic replays.
//!
//! Both truncate to `u32` milliseconds; consumers compare with
//! `wrapping_sub`, so the wrap after ~49 days is harmless.

use core::cell::Cell;

use crate::app::ports::Clock;

/// Monotonic system clock.
pub struct SystemClock {
    #[cfg(not(feature = "espidf"))]
    start: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(feature = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Microseconds since boot.
    #[cfg(feature = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since construction.
    #[cfg(not(feature = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u32 {
        // Truncation is the wrap.
        (self.uptime_us() / 1_000) as u32
    }
}

/// Hand-advanced clock.
///
/// Interior-mutable so a test can keep a shared reference while the
/// controller owns `&ManualClock` as its [`Clock`].
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<u32>,
}

impl ManualClock {
    pub fn new(start_ms: u32) -> Self {
        Self {
            now_ms: Cell::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: u32) {
        self.now_ms.set(now_ms);
    }

    /// Move forward by `delta_ms`, wrapping like the hardware counter.
    pub fn advance(&self, delta_ms: u32) -> u32 {
        let next = self.now_ms.get().wrapping_add(delta_ms);
        self.now_ms.set(next);
        next
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now_ms.get()
    }
}
