/// global logger
use defmt_rtt as _;

defmt::timestamp!("[{=u64}ms]", crate::app::monotonics::now().ticks());
