//! Time sources for driving the simulation
//!
//! The game only ever sees elapsed milliseconds. A `Driver` turns readings
//! from any `Clock` into frame deltas, so tests can swap in a `ManualClock`
//! and step virtual time exactly.

use std::cell::Cell;

use crate::consts::MAX_FRAME_MS;

/// Monotonic millisecond time source
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Wall clock for native hosts
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct SystemClock {
    start: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Browser clock (`Date.now()`)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct BrowserClock;

#[cfg(target_arch = "wasm32")]
impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

/// Converts clock readings into whole-millisecond frame deltas
#[derive(Debug)]
pub struct Driver<C: Clock> {
    clock: C,
    last_ms: Option<f64>,
    /// Sub-millisecond remainder carried into the next frame
    carry_ms: f64,
}

impl<C: Clock> Driver<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last_ms: None,
            carry_ms: 0.0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Milliseconds elapsed since the previous poll.
    ///
    /// The first poll returns 0. A single frame is capped at `MAX_FRAME_MS`
    /// so a long stall (sleeping tab, debugger) doesn't replay a burst of ticks.
    pub fn poll(&mut self) -> u32 {
        let now = self.clock.now_ms();
        let elapsed = match self.last_ms {
            Some(last) => (now - last).clamp(0.0, MAX_FRAME_MS as f64),
            None => 0.0,
        };
        self.last_ms = Some(now);

        let total = elapsed + self.carry_ms;
        let whole = total.floor();
        self.carry_ms = total - whole;
        whole as u32
    }

    /// Forget the previous reading (e.g. after the host was suspended)
    pub fn resync(&mut self) {
        self.last_ms = None;
        self.carry_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_poll_is_zero() {
        let clock = ManualClock::new();
        clock.set(12_345.0);
        let mut driver = Driver::new(clock);
        assert_eq!(driver.poll(), 0);
        driver.clock().advance(16.0);
        assert_eq!(driver.poll(), 16);
    }

    #[test]
    fn test_fractions_carry_over() {
        let mut driver = Driver::new(ManualClock::new());
        driver.poll();

        let mut total = 0;
        for _ in 0..3 {
            driver.clock().advance(16.5);
            total += driver.poll();
        }
        // 49.5 ms elapsed; the half stays in the carry
        assert_eq!(total, 49);
        driver.clock().advance(0.5);
        assert_eq!(driver.poll(), 1);
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut driver = Driver::new(ManualClock::new());
        driver.poll();
        driver.clock().advance(10_000.0);
        assert_eq!(driver.poll(), MAX_FRAME_MS);
    }

    #[test]
    fn test_clock_going_backwards() {
        let clock = ManualClock::new();
        clock.set(100.0);
        let mut driver = Driver::new(clock);
        driver.poll();
        driver.clock().set(50.0);
        assert_eq!(driver.poll(), 0);
    }

    #[test]
    fn test_resync() {
        let mut driver = Driver::new(ManualClock::new());
        driver.poll();
        driver.clock().advance(100.0);
        driver.resync();
        assert_eq!(driver.poll(), 0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock::default();
        let before = clock.now_ms();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let after = clock.now_ms();
        assert!(before >= 0.0);
        assert!(after > before);

        let mut driver = Driver::new(SystemClock::default());
        assert_eq!(driver.poll(), 0);
        std::thread::sleep(std::time::Duration::from_millis(5));
        let dt = driver.poll();
        assert!(dt >= 4, "expected about 5ms, got {}", dt);
        assert!(dt <= MAX_FRAME_MS);
    }
}
