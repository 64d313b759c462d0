use core::fmt::Write;

use heapless::String;

use crate::freqmeter::Measurement;

pub mod lcd_pcf8574;

pub const SPLASH_TITLE: &str = "Frequency";
pub const SPLASH_VERSION: &str = "Counter v0.1b";

pub const FREQ_LABEL: &str = "Frequency: ";
pub const FREQ_UNITS: &str = " Hz ";

/// units column when the number is short enough
const FREQ_UNITS_COL: u8 = 7;

/// Minimal character display.
pub trait CharDisplay {
    type Error;

    fn init(&mut self) -> Result<(), Self::Error>;
    fn backlight(&mut self, on: bool) -> Result<(), Self::Error>;
    fn clear(&mut self) -> Result<(), Self::Error>;
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error>;
    fn print(&mut self, text: &str) -> Result<(), Self::Error>;
}

/// Init the display and show the startup banner
pub fn show_splash<D: CharDisplay>(display: &mut D) -> Result<(), D::Error> {
    display.init()?;
    display.backlight(true)?;
    display.clear()?;

    display.set_cursor(0, 0)?;
    display.print(SPLASH_TITLE)?;
    display.set_cursor(0, 1)?;
    display.print(SPLASH_VERSION)
}

/// Redraw the whole screen with a new result.
///
/// ```text
/// Frequency:
/// 1000    Hz
/// ```
pub fn show_frequency<D: CharDisplay>(display: &mut D, m: &Measurement) -> Result<(), D::Error> {
    // u64::MAX is 20 digits
    let mut value: String<20> = String::new();
    let _ = write!(value, "{}", m.hz());

    display.clear()?;
    display.set_cursor(0, 0)?;
    display.print(FREQ_LABEL)?;

    display.set_cursor(0, 1)?;
    display.print(&value)?;

    // long numbers push the units right instead of being overwritten
    let units_col = core::cmp::max(FREQ_UNITS_COL, value.len() as u8);
    display.set_cursor(units_col, 1)?;
    display.print(FREQ_UNITS)
}
