//! HD44780 character LCD behind a PCF8574 I2C expander ("I2C backpack").
//!
//! Expander pinout: P0 - RS, P1 - RW, P2 - EN, P3 - backlight, P4..P7 - D4..D7.
//! The controller is driven in 4-bit mode, write only.

use embedded_hal::blocking::{
    delay::{DelayMs, DelayUs},
    i2c,
};

use super::CharDisplay;

const RS: u8 = 1 << 0;
const EN: u8 = 1 << 2;
const BACKLIGHT: u8 = 1 << 3;

// commands
const CLEAR_DISPLAY: u8 = 0x01;
const RETURN_HOME: u8 = 0x02;
const ENTRY_MODE_SET: u8 = 0x04;
const DISPLAY_CONTROL: u8 = 0x08;
const FUNCTION_SET: u8 = 0x20;
const SET_DDRAM_ADDR: u8 = 0x80;

// flags
const ENTRY_LEFT: u8 = 0x02;
const DISPLAY_ON: u8 = 0x04;
const MODE_4BIT: u8 = 0x00;
const LINES_2: u8 = 0x08;
const DOTS_5X8: u8 = 0x00;

const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

pub struct Lcd<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    cols: u8,
    rows: u8,
    backlight: u8,
}

impl<I2C, D, E> Lcd<I2C, D>
where
    I2C: i2c::Write<Error = E>,
    D: DelayUs<u32> + DelayMs<u32>,
{
    pub fn new(i2c: I2C, delay: D, address: u8, cols: u8, rows: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            cols,
            rows,
            backlight: BACKLIGHT,
        }
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn expander_write(&mut self, data: u8) -> Result<(), E> {
        self.i2c.write(self.address, &[data | self.backlight])
    }

    fn pulse_enable(&mut self, data: u8) -> Result<(), E> {
        self.expander_write(data | EN)?;
        self.delay.delay_us(1); // > 450 ns
        self.expander_write(data & !EN)?;
        self.delay.delay_us(50); // > 37 us to settle
        Ok(())
    }

    fn write4bits(&mut self, value: u8) -> Result<(), E> {
        self.expander_write(value)?;
        self.pulse_enable(value)
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<(), E> {
        self.write4bits((value & 0xf0) | mode)?;
        self.write4bits(((value << 4) & 0xf0) | mode)
    }

    fn command(&mut self, value: u8) -> Result<(), E> {
        self.send(value, 0)
    }

    fn write_char(&mut self, value: u8) -> Result<(), E> {
        self.send(value, RS)
    }

    pub fn home(&mut self) -> Result<(), E> {
        self.command(RETURN_HOME)?;
        self.delay.delay_us(2000);
        Ok(())
    }
}

impl<I2C, D, E> CharDisplay for Lcd<I2C, D>
where
    I2C: i2c::Write<Error = E>,
    D: DelayUs<u32> + DelayMs<u32>,
{
    type Error = E;

    fn init(&mut self) -> Result<(), E> {
        // power-up: > 40 ms after Vcc rises to 2.7 V
        self.delay.delay_ms(50);
        self.expander_write(0)?;
        self.delay.delay_ms(50);

        // HD44780 datasheet fig. 24: force 8-bit mode 3 times, then switch to 4-bit
        self.write4bits(0x03 << 4)?;
        self.delay.delay_us(4500);
        self.write4bits(0x03 << 4)?;
        self.delay.delay_us(4500);
        self.write4bits(0x03 << 4)?;
        self.delay.delay_us(150);
        self.write4bits(0x02 << 4)?;

        let lines = if self.rows > 1 { LINES_2 } else { 0 };
        self.command(FUNCTION_SET | MODE_4BIT | lines | DOTS_5X8)?;
        self.command(DISPLAY_CONTROL | DISPLAY_ON)?;
        self.clear()?;
        self.command(ENTRY_MODE_SET | ENTRY_LEFT)?;
        self.home()
    }

    fn backlight(&mut self, on: bool) -> Result<(), E> {
        self.backlight = if on { BACKLIGHT } else { 0 };
        self.expander_write(0)
    }

    fn clear(&mut self) -> Result<(), E> {
        self.command(CLEAR_DISPLAY)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), E> {
        let row = core::cmp::min(row, self.rows.saturating_sub(1)) as usize;
        let row = core::cmp::min(row, ROW_OFFSETS.len() - 1);
        let col = core::cmp::min(col, self.cols.saturating_sub(1));
        self.command(SET_DDRAM_ADDR | (col + ROW_OFFSETS[row]))
    }

    fn print(&mut self, text: &str) -> Result<(), E> {
        for b in text.bytes() {
            // the HD44780 ROM only matches ASCII
            self.write_char(if b.is_ascii() { b } else { b'?' })?;
        }
        Ok(())
    }
}
