//! Gated frequency meter.
//!
//! Pulses on the input pin are counted by one hardware timer clocked from the
//! pin, a second timer opens a gate of a fixed number of milliseconds. When the
//! gate closes the counter is stopped and the 16-bit counter value is extended
//! with the number of serviced overflows. The result is converted to Hz and
//! printed on a character LCD.
//!
//! The gating algorithm ([`freqmeter::GatedCounter`]) knows nothing about
//! registers: it is written against [`freqmeter::PulseCounterInfo`] and
//! [`freqmeter::GateTimerInfo`]. Concrete STM32F103 timers live behind the
//! `stm32f103` feature.

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

mod fmt;

pub mod config;
pub mod display;
pub mod freqmeter;
pub mod support;
