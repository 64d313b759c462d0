mod frequency;
mod gated_counter;
mod hw_counter;
mod hw_gate;

#[cfg(test)]
pub(crate) mod sim;

pub use frequency::{
    quantization, to_frequency, GateDuration, Measurement, MAX_GATE_MS, MIN_GATE_MS,
};
pub use gated_counter::{GateState, GatedCounter};
pub use hw_counter::PulseCounterInfo;
pub use hw_gate::GateTimerInfo;

#[cfg(feature = "stm32f103")]
pub use hw_counter::Tim2PulseCounter;
#[cfg(feature = "stm32f103")]
pub use hw_gate::Tim3GateTimer;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Gate shorter than [`MIN_GATE_MS`]
    GateTooShort,
    /// Gate longer than [`MAX_GATE_MS`]
    GateTooLong,
}
