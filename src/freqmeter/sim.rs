//! Simulated timers for host tests

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::{GateDuration, GateTimerInfo, GatedCounter, PulseCounterInfo};
use crate::support::BackgroundTimer;

#[derive(Default)]
pub struct SimCounter {
    value: AtomicU32,
    pending: AtomicBool,
    running: AtomicBool,
    irq_enabled: AtomicBool,
    wraps: AtomicU32,
    pulse_after_read: AtomicBool,
}

impl SimCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// `n` edges on the input, returns number of wraps
    pub fn advance(&self, n: u32) -> u32 {
        if !self.is_running() || n == 0 {
            return 0;
        }

        let v = self.value.load(Ordering::SeqCst) as u64 + n as u64;
        let wraps = (v / Self::WIDTH as u64) as u32;
        self.value
            .store((v % Self::WIDTH as u64) as u32, Ordering::SeqCst);

        if wraps > 0 {
            self.wraps.fetch_add(wraps, Ordering::SeqCst);
            if self.irq_enabled.load(Ordering::SeqCst) {
                self.pending.store(true, Ordering::SeqCst);
            }
        }
        wraps
    }

    /// next `value()` returns the current value, then one more edge arrives
    pub fn pulse_after_next_read(&self) {
        self.pulse_after_read.store(true, Ordering::SeqCst);
    }

    pub fn overflowed_since_start(&self) -> bool {
        self.wraps.load(Ordering::SeqCst) > 0
    }
}

impl PulseCounterInfo for SimCounter {
    const WIDTH: u32 = 1 << 16;

    fn init(&self) {}

    fn configure(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.value.store(0, Ordering::SeqCst);
        self.pending.store(false, Ordering::SeqCst);
        self.wraps.store(0, Ordering::SeqCst);
        self.irq_enabled.store(true, Ordering::SeqCst);
    }

    fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
    }

    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.irq_enabled.store(false, Ordering::SeqCst);
    }

    fn clear_interrupt(&self) {
        self.pending.store(false, Ordering::SeqCst);
    }

    fn value(&self) -> u32 {
        let v = self.value.load(Ordering::SeqCst);
        if self.pulse_after_read.swap(false, Ordering::SeqCst) {
            self.advance(1);
        }
        v
    }

    fn is_irq_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct SimGate {
    running: AtomicBool,
    closes: AtomicU32,
}

impl SimGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> u32 {
        self.closes.load(Ordering::SeqCst)
    }
}

impl GateTimerInfo for SimGate {
    const TICKS_PER_MS: u32 = 4;

    fn init(&self) {}

    fn configure(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
    }

    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.closes.fetch_add(1, Ordering::SeqCst);
    }

    fn clear_interrupt(&self) {}
}

pub struct SimBackground {
    enabled: AtomicBool,
    suspends: AtomicU32,
}

impl SimBackground {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            suspends: AtomicU32::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn suspends(&self) -> u32 {
        self.suspends.load(Ordering::SeqCst)
    }
}

impl BackgroundTimer for SimBackground {
    type State = bool;

    fn suspend(&self) -> bool {
        self.suspends.fetch_add(1, Ordering::SeqCst);
        self.enabled.swap(false, Ordering::SeqCst)
    }

    fn restore(&self, state: bool) {
        self.enabled.store(state, Ordering::SeqCst);
    }
}

/// Meter wired to simulated timers, the test plays the role of both ISRs
pub struct Bench {
    pub meter: GatedCounter<SimCounter, SimGate>,
}

impl Bench {
    pub fn new() -> Self {
        let meter = GatedCounter::new(SimCounter::new(), SimGate::new());
        meter.init();
        Self { meter }
    }

    pub fn counter(&self) -> &SimCounter {
        self.meter.counter()
    }

    pub fn gate(&self) -> &SimGate {
        self.meter.gate()
    }

    /// `n` input edges. With `serviced` the overflow ISR runs right after
    /// every wrap, otherwise the overflow stays pending.
    pub fn pulses(&self, n: u32, serviced: bool) {
        let counter = self.counter();
        let mut left = n;
        while left > 0 {
            let to_wrap = SimCounter::WIDTH - counter.value.load(Ordering::SeqCst);
            if left < to_wrap {
                counter.advance(left);
                break;
            }

            counter.advance(to_wrap);
            left -= to_wrap;
            if serviced && counter.is_irq_pending() {
                self.meter.on_overflow();
            }
        }
    }

    /// `n` edges spread evenly over the whole gate, returns the total count
    pub fn run_uniform(&self, gate: GateDuration, n: u32) -> u32 {
        self.meter.start(gate);

        let ticks = self.meter.target_ticks() as u64;
        let mut delivered = 0u64;
        for k in 0..ticks {
            let upto = ((k + 1) * n as u64 + ticks - 1) / ticks;
            self.pulses((upto - delivered) as u32, true);
            delivered = upto;
            self.meter.on_tick();
        }

        self.meter.result().unwrap_or(u32::MAX)
    }

    /// one edge every `period` ticks, first edge in tick interval `phase`
    pub fn run_periodic(&self, gate: GateDuration, period: u32, phase: u32) -> u32 {
        self.meter.start(gate);

        for k in 0..self.meter.target_ticks() {
            if k >= phase && (k - phase) % period == 0 {
                self.pulses(1, true);
            }
            self.meter.on_tick();
        }

        self.meter.result().unwrap_or(u32::MAX)
    }
}
