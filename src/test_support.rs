//! Helpers shared by unit tests that touch process state.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Serializes tests that read or mutate environment variables.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static ENV_LOCK: Mutex<()> = Mutex::new(());
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Env mutation races with concurrent reads, hence unsafe on this edition;
/// callers must hold [`env_guard`] for the duration of the test.
pub fn set_env(key: &str, value: &str) {
    unsafe { std::env::set_var(key, value) }
}

pub fn clear_env(key: &str) {
    unsafe { std::env::remove_var(key) }
}

/// Clear every variable the pipeline's credential resolver reads.
pub fn clear_pipeline_env() {
    for key in [
        "OPENAI_API_KEY",
        "AIPIPE_API_KEY",
        "OPENAI_BASE_URL",
        "AIPIPE_BASE_URL",
        "OPENAI_MODEL",
        "AIPIPE_AUTH_STYLE",
    ] {
        clear_env(key);
    }
}

/// Clear every variable the service config reads.
pub fn clear_service_env() {
    for key in [
        "TASKFORGE_DATA_DIR",
        "TASKFORGE_SECRET",
        "USER_NAME",
        "USER_EMAIL",
    ] {
        clear_env(key);
    }
}
