//! Console and file logging.
//!
//! Every event reaches the console through `tracing` and is also appended to
//! a file under `$XDG_CACHE_HOME/zdot/`. See [`Surface`] for which file.

mod logger;
mod subscriber;
mod types;
mod utils;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{Log, Surface, TaskEntry, TaskStatus};
pub use utils::format_local_timestamp;

/// Serializes `XDG_CACHE_HOME` changes across test threads.
#[cfg(test)]
static CACHE_HOME_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Run `f` with `XDG_CACHE_HOME` pointing at `dir`.
#[cfg(test)]
pub(crate) fn with_cache_home<T>(dir: &std::path::Path, f: impl FnOnce() -> T) -> T {
    let _lock = CACHE_HOME_LOCK
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    // SAFETY: every test that touches XDG_CACHE_HOME holds CACHE_HOME_LOCK.
    #[allow(unsafe_code)]
    unsafe {
        std::env::set_var("XDG_CACHE_HOME", dir);
    }
    let out = f();
    // SAFETY: as above.
    #[allow(unsafe_code)]
    unsafe {
        std::env::remove_var("XDG_CACHE_HOME");
    }
    out
}

/// A [`Logger`] whose events reach a private log file for the life of the
/// returned guard.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_logger(
    surface: Surface,
) -> (Logger, tempfile::TempDir, tracing::dispatcher::DefaultGuard) {
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};
    let tmp = tempfile::tempdir().expect("temp dir");
    let (layer, log) = with_cache_home(tmp.path(), || {
        (
            subscriber::FileLayer::new(surface, "test").expect("file layer"),
            Logger::new("test"),
        )
    });
    let registry = tracing_subscriber::registry().with(layer.with_filter(LevelFilter::DEBUG));
    let guard = tracing::dispatcher::set_default(&tracing::Dispatch::new(registry));
    (log, tmp, guard)
}
