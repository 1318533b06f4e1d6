//! Stderr diagnostics that stay out of the way of the terminal UI.
//!
//! While the dashboard owns the terminal, messages are buffered and flushed
//! once it is restored. Debug messages are dropped unless verbose mode is on.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Start holding messages instead of printing them
pub fn activate() {
    if let Ok(mut guard) = BUFFER.lock() {
        *guard = Some(Vec::new());
    }
}

/// Stop buffering and hand back everything collected so far
pub fn drain() -> Vec<String> {
    BUFFER
        .lock()
        .ok()
        .and_then(|mut guard| guard.take())
        .unwrap_or_default()
}

/// Emit a message (buffered if the UI is active)
pub fn emit(msg: String) {
    let mut guard = match BUFFER.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// Emit only in verbose mode
pub fn debug(msg: String) {
    if is_verbose() {
        emit(msg);
    }
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logging::emit(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::debug(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test touches the process-wide buffer so parallel tests can't interleave.
    #[test]
    fn test_buffer_lifecycle() {
        activate();
        set_verbose(false);
        emit("first".to_string());
        debug("hidden".to_string());
        set_verbose(true);
        debug("shown".to_string());
        set_verbose(false);

        let drained = drain();
        assert!(drained.contains(&"first".to_string()));
        assert!(drained.contains(&"shown".to_string()));
        assert!(!drained.contains(&"hidden".to_string()));

        // Nothing left once drained
        assert!(drain().is_empty());
    }
}
