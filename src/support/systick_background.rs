use cortex_m::peripheral::SYST;

use super::BackgroundTimer;

const CSR_TICKINT: u32 = 1 << 1;

/// SysTick drives the RTIC monotonic. Its interrupt would add jitter to the
/// gate ISRs, so it is masked while counting; the monotonic just falls behind
/// by one gate.
pub struct SysTickBackground;

impl BackgroundTimer for SysTickBackground {
    type State = bool;

    fn suspend(&self) -> bool {
        let syst = unsafe { &*SYST::PTR };
        let csr = syst.csr.read();
        unsafe { syst.csr.write(csr & !CSR_TICKINT) };
        csr & CSR_TICKINT != 0
    }

    fn restore(&self, state: bool) {
        if state {
            let syst = unsafe { &*SYST::PTR };
            unsafe { syst.csr.modify(|r| r | CSR_TICKINT) };
        }
    }
}
