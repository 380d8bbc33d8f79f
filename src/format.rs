//! The diagnostics-registry extension point.
//!
//! Error- and exception-raising subsystems that build formatted messages from
//! a list of typed arguments discover how to render each argument through
//! [`FormatArg`]: a compile-time registration pairing the argument type with
//! a one-character tag (selecting the renderer) and a `prepare` step
//! extracting the raw value the renderer consumes.
//!
//! [`ScopedHandle`] registers itself here so a diagnostic can embed a repr of
//! the wrapped object without disturbing the handle's credit.
//!
//! [`ScopedHandle`]: crate::ScopedHandle

use crate::{handle::ScopedHandle, model::RefCounted};

/// A type that can be passed as an argument to a formatted-diagnostic
/// constructor.
///
/// Implementations are static registrations: the diagnostics subsystem reads
/// [`TAG`] to pick a renderer and calls [`prepare`] to extract the value the
/// renderer operates on. `prepare` must be pure with respect to the argument
/// — observing it, never mutating it.
///
/// [`TAG`]: FormatArg::TAG
/// [`prepare`]: FormatArg::prepare
pub trait FormatArg {
    /// One-character tag identifying the renderer for this argument type.
    const TAG: char;

    /// The raw value handed to the renderer.
    type Prepared;

    /// Extracts the value the renderer consumes.
    fn prepare(&self) -> Self::Prepared;
}

/// Renders as a repr of the wrapped object. The prepared pointer borrows the
/// handle's credit: it is valid while the handle is, and the renderer must
/// not release through it.
impl<T: RefCounted> FormatArg for ScopedHandle<T> {
    const TAG: char = 'R';

    type Prepared = *const T;

    #[inline]
    fn prepare(&self) -> *const T {
        self.as_ptr().cast_const()
    }
}
