/// HSE crystal, Hz
pub const XTAL_FREQ: u32 = 8_000_000;

/// core clock, Hz
pub const SYSCLK_FREQ: u32 = 72_000_000;

/// APB1, Hz
pub const PCLK1_FREQ: u32 = SYSCLK_FREQ / 2;

/// APB1 timers run at 2 x PCLK1 when the APB1 prescaler is not 1
pub const TIMER_CLOCK_FREQ: u32 = PCLK1_FREQ * 2;

//-----------------------------------------------------------------------------

/// counting period, ms
pub const GATE_DURATION_MS: u32 = 82;

/// startup banner time, ms
pub const SPLASH_TIME_MS: u64 = 1000;

//-----------------------------------------------------------------------------

/// PCF8574 backpack address
pub const LCD_I2C_ADDR: u8 = 0x27;

pub const LCD_COLS: u8 = 16;
pub const LCD_ROWS: u8 = 2;

/// I2C bus clock, Hz
pub const I2C_FREQ: u32 = 100_000;

//-----------------------------------------------------------------------------

// Interrupt priorities live in the #[task] attributes of the RTIC app:
// both counting ISRs share one priority (2), the measurement task runs at 1.
