//! Where boundary calls report their status code.

use std::cell::Cell;

use crate::error::ErrorCode;

thread_local! {
    static LAST_ERROR: Cell<u32> = const { Cell::new(0) };
}

/// Receives the status code of every boundary call: [`ErrorCode::Success`]
/// on success, the failure code otherwise.
pub trait ErrorSink {
    /// Records `code`.
    fn report(&self, code: ErrorCode);
}

impl<F> ErrorSink for F
where
    F: Fn(ErrorCode),
{
    fn report(&self, code: ErrorCode) {
        self(code)
    }
}

/// Per-thread "last error" slot, read back with [`last_error`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LastError;

impl ErrorSink for LastError {
    fn report(&self, code: ErrorCode) {
        set_last_error(code.value());
    }
}

/// Status code of the most recent boundary call on this thread.
pub fn last_error() -> u32 {
    LAST_ERROR.with(Cell::get)
}

/// Overwrites this thread's last-error slot.
pub fn set_last_error(code: u32) {
    LAST_ERROR.with(|slot| slot.set(code));
}
