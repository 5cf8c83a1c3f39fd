//! Platform abstraction layer
//!
//! Logging setup for both targets; browser glue lives in `web`.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Install the logger and panic hook for the browser console
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
    }
}

/// Install `env_logger`, defaulting to `info` when `RUST_LOG` is unset
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
