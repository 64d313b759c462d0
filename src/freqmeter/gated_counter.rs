use core::convert::Infallible;
use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use crate::support::{BackgroundTimer, SuspendGuard};

use super::{GateDuration, GateTimerInfo, Measurement, PulseCounterInfo};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GateState {
    Idle = 0,
    Arming = 1,
    Counting = 2,
    Closed = 3,
}

impl GateState {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => GateState::Arming,
            2 => GateState::Counting,
            3 => GateState::Closed,
            _ => GateState::Idle,
        }
    }
}

/// Counts input pulses for a fixed gate interval.
///
/// Every shared variable has exactly one writer:
/// - `overflows` - pulse counter overflow ISR
/// - `ticks`, `total`, `ready` - gate timer ISR
///
/// The main line resets them in [`GatedCounter::start`] while both timers are
/// stopped, and reads `total` only after it has seen `ready` (Acquire pairs
/// with the Release store in [`GatedCounter::on_tick`]).
///
/// Both ISRs must run at the same priority, so neither of them can preempt
/// the other between sampling the counter and checking its overflow flag.
pub struct GatedCounter<PC, GT> {
    counter: PC,
    gate: GT,

    state: AtomicU8,
    overflows: AtomicU32,
    ticks: AtomicU32,
    target: AtomicU32,
    total: AtomicU32,
    ready: AtomicBool,
}

impl<PC, GT> GatedCounter<PC, GT>
where
    PC: PulseCounterInfo,
    GT: GateTimerInfo,
{
    pub const fn new(counter: PC, gate: GT) -> Self {
        Self {
            counter,
            gate,
            state: AtomicU8::new(GateState::Idle as u8),
            overflows: AtomicU32::new(0),
            ticks: AtomicU32::new(0),
            target: AtomicU32::new(0),
            total: AtomicU32::new(0),
            ready: AtomicBool::new(false),
        }
    }

    /// one-time peripheral init
    pub fn init(&self) {
        self.counter.init();
        self.gate.init();
        self.state.store(GateState::Idle as u8, Ordering::Relaxed);
    }

    /// Open a new gate of `duration`.
    pub fn start(&self, duration: GateDuration) {
        match self.state() {
            GateState::Arming | GateState::Counting => {
                warn!("Gate restarted before close");
                self.gate.stop();
                self.counter.stop();
            }
            _ => {}
        }

        self.state.store(GateState::Arming as u8, Ordering::Relaxed);

        self.ready.store(false, Ordering::Relaxed);
        self.target
            .store(duration.ticks(GT::TICKS_PER_MS), Ordering::Relaxed);
        self.ticks.store(0, Ordering::Relaxed);
        self.overflows.store(0, Ordering::Relaxed);
        self.total.store(0, Ordering::Relaxed);

        self.gate.configure();
        self.counter.configure();

        // visible to the ISRs before the first tick can fire
        self.state
            .store(GateState::Counting as u8, Ordering::Release);

        self.counter.start();
        self.gate.start();
    }

    /// Pulse counter overflow ISR
    #[inline]
    pub fn on_overflow(&self) {
        if self.state() == GateState::Counting {
            self.overflows.fetch_add(1, Ordering::Relaxed);
        }
        self.counter.clear_interrupt();
    }

    /// Gate timer tick ISR
    pub fn on_tick(&self) {
        self.gate.clear_interrupt();

        if self.state() != GateState::Counting {
            return;
        }

        // grab counter value before it changes any more
        let raw = self.counter.value();
        let mut overflows = self.overflows.load(Ordering::Relaxed);

        let ticks = self.ticks.load(Ordering::Relaxed) + 1;
        self.ticks.store(ticks, Ordering::Relaxed);
        if ticks < self.target.load(Ordering::Relaxed) {
            return;
        }

        // counter wrapped but the overflow ISR did not run yet
        if self.counter.is_irq_pending() && raw < PC::WRAP_GUARD {
            overflows = overflows.wrapping_add(1);
        }

        self.counter.stop();
        self.gate.stop();

        self.total
            .store(Self::total_pulses(overflows, raw), Ordering::Relaxed);
        self.state.store(GateState::Closed as u8, Ordering::Relaxed);
        self.ready.store(true, Ordering::Release);
    }

    fn total_pulses(overflows: u32, raw: u32) -> u32 {
        let total = overflows as u64 * PC::WIDTH as u64 + raw as u64;
        if total > u32::MAX as u64 {
            u32::MAX
        } else {
            total as u32
        }
    }

    #[cfg(test)]
    pub(crate) fn counter(&self) -> &PC {
        &self.counter
    }

    #[cfg(test)]
    pub(crate) fn gate(&self) -> &GT {
        &self.gate
    }

    pub fn state(&self) -> GateState {
        GateState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn elapsed_ticks(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn target_ticks(&self) -> u32 {
        self.target.load(Ordering::Relaxed)
    }

    pub fn overflows(&self) -> u32 {
        self.overflows.load(Ordering::Relaxed)
    }

    /// Total pulse count of the last closed gate
    pub fn result(&self) -> Option<u32> {
        if self.is_ready() {
            Some(self.total.load(Ordering::Relaxed))
        } else {
            None
        }
    }

    pub fn try_wait(&self) -> nb::Result<u32, Infallible> {
        self.result().ok_or(nb::Error::WouldBlock)
    }

    /// Spin until the gate closes
    pub fn wait(&self) -> u32 {
        nb::block!(self.try_wait()).unwrap_or_else(|e| match e {})
    }

    /// One full cycle: suspend `background`, count, restore, convert
    pub fn measure<B>(&self, duration: GateDuration, background: &B) -> Measurement
    where
        B: BackgroundTimer,
    {
        let pulses = {
            let _suspended = SuspendGuard::new(background);
            self.start(duration);
            self.wait()
        };

        let m = Measurement::new(pulses, duration);
        trace!(
            "gate {} ms: {} pulses, {} Hz",
            duration.millis(),
            m.pulses,
            m.hz()
        );
        m
    }
}
