//! Test logger that keeps every record on the thread that emitted it.

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        RECORDS.with(|r| {
            r.borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// Installs the capture logger as the global logger.
///
/// Must run before anything else in the test binary installs a logger.
pub(crate) fn install() {
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}

/// Drops everything recorded on this thread so far.
pub(crate) fn clear() {
    RECORDS.with(|r| r.borrow_mut().clear());
}

/// Removes and returns the messages logged at `level` on this thread.
pub(crate) fn take(level: Level) -> Vec<String> {
    RECORDS.with(|r| {
        let mut records = r.borrow_mut();
        let (hit, rest): (Vec<_>, Vec<_>) = records.drain(..).partition(|(l, _)| *l == level);
        *records = rest;
        hit.into_iter().map(|(_, message)| message).collect()
    })
}
