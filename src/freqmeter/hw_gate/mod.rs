/// Periodic tick source which opens and closes the gate.
pub trait GateTimerInfo: Sync {
    /// Whole number of ticks in one millisecond
    const TICKS_PER_MS: u32;

    /// enable and reset the peripheral
    fn init(&self);

    /// stop, load the tick period, enable tick interrupt
    fn configure(&self);

    /// Start ticking. The pulse counter must start on the same clock edge.
    fn start(&self);

    /// stop ticking and disable the tick interrupt
    fn stop(&self);

    /// clear tick interrupt flag
    fn clear_interrupt(&self);
}

#[cfg(feature = "stm32f103")]
mod gate_f103;
#[cfg(feature = "stm32f103")]
pub use gate_f103::Tim3GateTimer;
