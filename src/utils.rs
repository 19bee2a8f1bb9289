#[macro_export]
macro_rules! console_warn {
    ($($t:tt)*) => {
        web_sys::console::warn_1(&format!($($t)*).into())
    };
}

pub fn set_panic_hook() {
    // Panics are reported through `console.error` with a readable message
    // instead of the bare "unreachable executed" trap.
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Route `log` records to the browser console. Safe to call more than once.
pub fn init_logging() {
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        console_warn!("Logger already initialized: {}", err);
    }
}
