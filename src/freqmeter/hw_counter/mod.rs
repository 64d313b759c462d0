/// Free-running counter clocked by the measured signal.
///
/// Implementors touch the hardware through `&self` only, so a single static
/// instance can be shared by the overflow ISR, the gate ISR and the main line.
pub trait PulseCounterInfo: Sync {
    /// Counter modulus: the value is always `0..WIDTH`
    const WIDTH: u32;

    /// Raw values below this, seen together with a pending overflow, mean the
    /// counter has wrapped but the overflow interrupt was not serviced yet.
    const WRAP_GUARD: u32 = 256;

    /// enable and reset the peripheral
    fn init(&self);

    /// stop, clear to zero, clock from the input pin (rising edge), enable
    /// overflow interrupt. Call only while stopped.
    fn configure(&self);

    /// start counting, may be deferred to the gate timer start edge
    fn start(&self);

    /// stop counting and disable the overflow interrupt
    fn stop(&self);

    /// clear overflow interrupt flag
    fn clear_interrupt(&self);

    /// current value of counter register
    fn value(&self) -> u32;

    /// overflow happened but was not cleared yet
    fn is_irq_pending(&self) -> bool;
}

#[cfg(feature = "stm32f103")]
mod counter_f103;
#[cfg(feature = "stm32f103")]
pub use counter_f103::Tim2PulseCounter;
