use core::convert::TryFrom;

use fugit::{HertzU64, MillisDurationU32};

use super::Error;

/// Shortest accepted gate, ms
pub const MIN_GATE_MS: u32 = 1;

/// Longest accepted gate, ms
pub const MAX_GATE_MS: u32 = 10_000;

/// Validated gate interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateDuration(MillisDurationU32);

impl GateDuration {
    pub fn from_millis(ms: u32) -> Result<Self, Error> {
        Self::new(MillisDurationU32::from_ticks(ms))
    }

    pub fn new(duration: MillisDurationU32) -> Result<Self, Error> {
        let ms = duration.ticks();
        if ms < MIN_GATE_MS {
            Err(Error::GateTooShort)
        } else if ms > MAX_GATE_MS {
            Err(Error::GateTooLong)
        } else {
            Ok(Self(duration))
        }
    }

    pub fn millis(&self) -> u32 {
        self.0.ticks()
    }

    pub fn duration(&self) -> MillisDurationU32 {
        self.0
    }

    /// Gate length in timer ticks
    pub fn ticks(&self, ticks_per_ms: u32) -> u32 {
        self.millis().saturating_mul(ticks_per_ms)
    }
}

impl TryFrom<MillisDurationU32> for GateDuration {
    type Error = Error;

    fn try_from(value: MillisDurationU32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for GateDuration {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=u32} ms", self.millis())
    }
}

/// `pulses * 1000 / gate_ms`, truncated.
///
/// Computed in u64: `u32::MAX * 1000` still fits, so the highest
/// representable result is ~4.29 THz for a 1 ms gate, far above anything a
/// timer input can follow.
pub fn to_frequency(pulses: u32, gate: GateDuration) -> HertzU64 {
    HertzU64::from_raw(pulses as u64 * 1_000 / gate.millis() as u64)
}

/// Frequency step of one pulse for this gate, rounded up
pub fn quantization(gate: GateDuration) -> HertzU64 {
    let ms = gate.millis() as u64;
    HertzU64::from_raw((1_000 + ms - 1) / ms)
}

/// Result of one gate cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Measurement {
    pub pulses: u32,
    pub gate: GateDuration,
    pub frequency: HertzU64,
}

impl Measurement {
    pub fn new(pulses: u32, gate: GateDuration) -> Self {
        Self {
            pulses,
            gate,
            frequency: to_frequency(pulses, gate),
        }
    }

    pub fn hz(&self) -> u64 {
        self.frequency.raw()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Measurement {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{=u32} pulses / {} -> {=u64} Hz",
            self.pulses,
            self.gate,
            self.hz()
        )
    }
}
