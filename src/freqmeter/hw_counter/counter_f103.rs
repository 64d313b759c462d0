// PULSE COUNTER == TIM2, input PA0 (TIM2_CH1_ETR)

use stm32f1xx_hal::device::{tim2, RCC, TIM2};

use super::PulseCounterInfo;

// TIMx_SMCR
const SMCR_SMS_MASK: u32 = 0b111;
const SMCR_SMS_TRIGGER: u32 = 0b110;
const SMCR_TS_ITR2: u32 = 0b010 << 4; // TIM2 <- TIM3 TRGO
const SMCR_ECE: u32 = 1 << 14; // external clock mode 2, ETP = 0 -> rising edge

pub struct Tim2PulseCounter;

impl Tim2PulseCounter {
    fn tim(&self) -> &'static tim2::RegisterBlock {
        unsafe { &*TIM2::ptr() }
    }
}

impl PulseCounterInfo for Tim2PulseCounter {
    const WIDTH: u32 = u16::MAX as u32 + 1;

    // stm32f1xx-hal-0.9.0/src/rcc/enable.rs
    fn init(&self) {
        let enr = unsafe { &(*RCC::ptr()).apb1enr };
        let rstr = unsafe { &(*RCC::ptr()).apb1rstr };

        enr.modify(|_, w| w.tim2en().set_bit());
        rstr.modify(|_, w| w.tim2rst().set_bit());
        rstr.modify(|_, w| w.tim2rst().clear_bit());
    }

    fn configure(&self) {
        // pause
        self.stop();

        let tim = self.tim();

        // no prescaler, count every edge
        tim.psc.write(|w| unsafe { w.bits(0) });

        // autoreload
        tim.arr.write(|w| unsafe { w.bits(u16::MAX as u32) });

        // Trigger an update event to load the prescaler value to the clock
        tim.egr.write(|w| w.ug().set_bit());

        tim.cnt.write(|w| unsafe { w.bits(0) });
        tim.sr.write(|w| w.uif().clear_bit());

        // ETR rising edge, no filter, no ETR prescaler.
        // Slave mode is left disabled until start()
        tim.smcr
            .write(|w| unsafe { w.bits(SMCR_ECE | SMCR_TS_ITR2) });

        // enable overflow interrupt
        tim.dier.write(|w| w.uie().set_bit());
    }

    fn start(&self) {
        // Trigger mode: CEN is set by TIM3 TRGO, both counters start on one edge
        self.tim()
            .smcr
            .modify(|r, w| unsafe { w.bits((r.bits() & !SMCR_SMS_MASK) | SMCR_SMS_TRIGGER) });
    }

    fn stop(&self) {
        let tim = self.tim();

        tim.smcr
            .modify(|r, w| unsafe { w.bits(r.bits() & !SMCR_SMS_MASK) });
        tim.cr1.modify(|_, w| w.cen().clear_bit());
        tim.dier.write(|w| w.uie().clear_bit());
    }

    fn clear_interrupt(&self) {
        self.tim().sr.write(|w| w.uif().clear_bit());
    }

    fn value(&self) -> u32 {
        self.tim().cnt.read().bits() & (u16::MAX as u32)
    }

    fn is_irq_pending(&self) -> bool {
        self.tim().sr.read().uif().bit_is_set()
    }
}
