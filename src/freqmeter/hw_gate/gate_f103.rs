// GATE TIMER == TIM3, master of TIM2

use stm32f1xx_hal::device::{tim2, RCC, TIM3};

use super::GateTimerInfo;
use crate::config::TIMER_CLOCK_FREQ;

const TICKS_PER_MS: u32 = 4;

// 1 MHz after prescaler
const PRESCALER: u32 = TIMER_CLOCK_FREQ / 1_000_000 - 1;
// 250 us
const AUTORELOAD: u32 = 1_000 / TICKS_PER_MS - 1;

const CR1_URS: u32 = 1 << 2;
const CR2_MMS_ENABLE: u32 = 0b001 << 4; // TRGO <- CEN

pub struct Tim3GateTimer;

impl Tim3GateTimer {
    fn tim(&self) -> &'static tim2::RegisterBlock {
        unsafe { &*(TIM3::ptr() as *const tim2::RegisterBlock) }
    }
}

impl GateTimerInfo for Tim3GateTimer {
    const TICKS_PER_MS: u32 = TICKS_PER_MS;

    fn init(&self) {
        let enr = unsafe { &(*RCC::ptr()).apb1enr };
        let rstr = unsafe { &(*RCC::ptr()).apb1rstr };

        enr.modify(|_, w| w.tim3en().set_bit());
        rstr.modify(|_, w| w.tim3rst().set_bit());
        rstr.modify(|_, w| w.tim3rst().clear_bit());
    }

    fn configure(&self) {
        // pause
        self.stop();

        let tim = self.tim();

        tim.psc.write(|w| unsafe { w.bits(PRESCALER) });
        tim.arr.write(|w| unsafe { w.bits(AUTORELOAD) });

        // only overflow generates update interrupt
        tim.cr1
            .modify(|r, w| unsafe { w.bits(r.bits() | CR1_URS) });

        // Trigger an update event to load the prescaler value to the clock
        tim.egr.write(|w| w.ug().set_bit());

        tim.cnt.write(|w| unsafe { w.bits(0) });
        tim.sr.write(|w| w.uif().clear_bit());

        tim.cr2.write(|w| unsafe { w.bits(CR2_MMS_ENABLE) });

        // enable tick interrupt
        tim.dier.write(|w| w.uie().set_bit());
    }

    fn start(&self) {
        self.tim().cr1.modify(|_, w| w.cen().set_bit());
    }

    fn stop(&self) {
        let tim = self.tim();

        tim.cr1.modify(|_, w| w.cen().clear_bit());
        tim.dier.write(|w| w.uie().clear_bit());
    }

    fn clear_interrupt(&self) {
        self.tim().sr.write(|w| w.uif().clear_bit());
    }
}
