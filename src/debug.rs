// Full debug tracing of controller steps and API calls
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static FULL_DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

pub fn set_full_debug(enabled: bool) {
    FULL_DEBUG_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_full_debug_enabled() -> bool {
    FULL_DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Milliseconds since the epoch
pub fn get_timestamp() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[macro_export]
macro_rules! debug_api_call {
    ($method:expr, $url:expr) => {
        if $crate::debug::is_full_debug_enabled() {
            let timestamp = $crate::debug::get_timestamp();
            println!("🌐 [{}] API: {} {}", timestamp, $method, $url);
        }
    };
    ($method:expr, $url:expr, $body:expr) => {
        if $crate::debug::is_full_debug_enabled() {
            let timestamp = $crate::debug::get_timestamp();
            println!("🌐 [{}] API: {} {} - Body: {}", timestamp, $method, $url, $body);
        }
    };
}

#[macro_export]
macro_rules! debug_info {
    ($($arg:tt)*) => {
        if $crate::debug::is_full_debug_enabled() {
            let timestamp = $crate::debug::get_timestamp();
            println!("ℹ️  [{}] DEBUG: {}", timestamp, format!($($arg)*));
        }
    };
}
