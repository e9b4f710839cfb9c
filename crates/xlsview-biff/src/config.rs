//! Process-wide engine settings.
//!
//! Both settings are global: the last writer wins and nothing resets them
//! implicitly.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, RwLock};

use lazy_static::lazy_static;

/// Callback invoked for every FORMULA, ARRAY and SHRFMLA record seen while
/// parsing a worksheet. Receives the record id and the raw record body.
pub type FormulaHandler = Arc<dyn Fn(u16, &[u8]) + Send + Sync>;

static DEBUG_LEVEL: AtomicI32 = AtomicI32::new(0);

lazy_static! {
    static ref FORMULA_HANDLER: RwLock<Option<FormulaHandler>> = RwLock::new(None);
}

/// Current debug verbosity. 0 is off.
pub fn debug_level() -> i32 {
    DEBUG_LEVEL.load(Ordering::Relaxed)
}

/// Set the debug verbosity and return the previous level.
///
/// Level 1 logs stream structure at `debug`; level 2 and above also logs
/// every record at `trace`.
pub fn set_debug_level(level: i32) -> i32 {
    DEBUG_LEVEL.swap(level, Ordering::Relaxed)
}

/// Install (or clear, with `None`) the formula record handler. Returns the
/// handler it replaces.
pub fn set_formula_handler(handler: Option<FormulaHandler>) -> Option<FormulaHandler> {
    let mut slot = FORMULA_HANDLER
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    std::mem::replace(&mut *slot, handler)
}

pub(crate) fn debug_enabled() -> bool {
    debug_level() > 0
}

pub(crate) fn trace_enabled() -> bool {
    debug_level() >= 2
}

/// Hand a formula-family record to the installed handler, if any.
pub(crate) fn notify_formula(record_type: u16, body: &[u8]) {
    // Clone out of the lock so a handler may itself call set_formula_handler.
    let handler = FORMULA_HANDLER
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone();
    if let Some(handler) = handler {
        handler(record_type, body);
    }
}
