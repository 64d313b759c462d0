mod background_timer;

#[cfg(feature = "cortex-m")]
mod systick_background;

pub use background_timer::{BackgroundTimer, SuspendGuard};

#[cfg(feature = "cortex-m")]
pub use systick_background::SysTickBackground;
