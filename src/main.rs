#![no_std]
#![no_main]

mod logging;

use panic_abort as _;

use freqmeter_lcd::freqmeter::{GatedCounter, Tim2PulseCounter, Tim3GateTimer};

//---------------------------------------------------------------

/// Shared by the counting ISRs and the measurement task, see [`GatedCounter`]
static FREQMETER: GatedCounter<Tim2PulseCounter, Tim3GateTimer> =
    GatedCounter::new(Tim2PulseCounter, Tim3GateTimer);

//---------------------------------------------------------------

#[rtic::app(device = stm32f1xx_hal::pac, peripherals = true, dispatchers = [USART1])]
mod app {
    use freqmeter_lcd::{
        config,
        display::{self, lcd_pcf8574::Lcd},
        freqmeter::GateDuration,
        support::SysTickBackground,
    };
    use fugit::ExtU64;
    use stm32f1xx_hal::{
        gpio::{Alternate, OpenDrain, PB6, PB7},
        i2c::{BlockingI2c, Mode},
        pac::{I2C1, TIM4},
        prelude::*,
        timer::DelayUs,
    };
    use systick_monotonic::Systick;

    use super::FREQMETER;

    type LcdI2c = BlockingI2c<I2C1, (PB6<Alternate<OpenDrain>>, PB7<Alternate<OpenDrain>>)>;
    type LcdDisplay = Lcd<LcdI2c, DelayUs<TIM4>>;

    // 1 ms
    #[monotonic(binds = SysTick, default = true)]
    type MonoTimer = Systick<1000>;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        lcd: LcdDisplay,
        gate: GateDuration,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        defmt::trace!("++ Start up! ++");

        let mut flash = ctx.device.FLASH.constrain();
        let rcc = ctx.device.RCC.constrain();

        let clocks = rcc
            .cfgr
            .use_hse(config::XTAL_FREQ.Hz())
            .sysclk(config::SYSCLK_FREQ.Hz())
            .pclk1(config::PCLK1_FREQ.Hz())
            .freeze(&mut flash.acr);

        defmt::info!(
            "Clocks: sysclk={}, pclk1={}",
            clocks.sysclk().to_Hz(),
            clocks.pclk1().to_Hz()
        );

        let mut afio = ctx.device.AFIO.constrain();
        let mut gpioa = ctx.device.GPIOA.split();
        let mut gpiob = ctx.device.GPIOB.split();

        // PA0 == TIM2_ETR, the pin itself is not used, TIM2 reads it directly
        let _input = gpioa.pa0.into_floating_input(&mut gpioa.crl);

        let scl = gpiob.pb6.into_alternate_open_drain(&mut gpiob.crl);
        let sda = gpiob.pb7.into_alternate_open_drain(&mut gpiob.crl);
        let i2c = BlockingI2c::i2c1(
            ctx.device.I2C1,
            (scl, sda),
            &mut afio.mapr,
            Mode::Standard {
                frequency: config::I2C_FREQ.Hz(),
            },
            clocks,
            1000,
            10,
            1000,
            1000,
        );

        let mut lcd = Lcd::new(
            i2c,
            ctx.device.TIM4.delay_us(&clocks),
            config::LCD_I2C_ADDR,
            config::LCD_COLS,
            config::LCD_ROWS,
        );
        if let Err(e) = display::show_splash(&mut lcd) {
            defmt::error!("LCD init failed: {}", defmt::Debug2Format(&e));
        }

        let gate = GateDuration::from_millis(config::GATE_DURATION_MS)
            .unwrap_or_else(|e| defmt::panic!("Invalid gate duration: {}", e));
        defmt::info!("Gate: {}", gate);

        FREQMETER.init();

        let mono = Systick::new(ctx.core.SYST, clocks.sysclk().to_Hz());

        // keep the banner on screen for a while
        if measure::spawn_after(config::SPLASH_TIME_MS.millis()).is_err() {
            defmt::panic!("Failed to start measurement");
        }

        (Shared {}, Local { lcd, gate }, init::Monotonics(mono))
    }

    /// Main-line loop: one gate per run, reschedules itself
    #[task(local = [lcd, gate], priority = 1)]
    fn measure(ctx: measure::Context) {
        let m = FREQMETER.measure(*ctx.local.gate, &SysTickBackground);
        defmt::debug!("{}", m);

        if let Err(e) = display::show_frequency(ctx.local.lcd, &m) {
            defmt::warn!("LCD write failed: {}", defmt::Debug2Format(&e));
        }

        if measure::spawn().is_err() {
            defmt::error!("Measurement not rescheduled");
        }
    }

    #[task(binds = TIM2, priority = 2)]
    fn pulse_overflow(_: pulse_overflow::Context) {
        FREQMETER.on_overflow();
    }

    #[task(binds = TIM3, priority = 2)]
    fn gate_tick(_: gate_tick::Context) {
        FREQMETER.on_tick();
    }
}
