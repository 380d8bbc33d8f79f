//! The interface to the foreign object model.
//!
//! This module defines the two traits through which the rest of the crate
//! talks to a reference-counted runtime: [`RefCounted`] exposes the runtime's
//! retain and release operations for a concrete object type, and [`Subtype`]
//! records that an object type embeds the runtime's universal base object as
//! a layout prefix.
//!
//! Neither trait performs any bookkeeping of its own. Correct pairing of
//! retains with releases is the responsibility of [`ScopedHandle`], which is
//! the only caller of these operations inside the crate.
//!
//! [`ScopedHandle`]: crate::ScopedHandle

/// An object type whose instances are managed by a foreign runtime's
/// reference counts.
///
/// One unit of reference-count ownership is called a *credit*: it is created
/// by [`retain`] (or by whatever runtime operation handed out the pointer in
/// the first place, such as allocation) and consumed by exactly one matching
/// [`release`].
///
/// # Safety
///
/// Implementors must guarantee:
///
/// 1. [`retain`] and [`release`] are both no-ops when called with a null
///    pointer.
/// 2. [`retain`] on a live object creates exactly one new credit, and
///    [`release`] consumes exactly one credit, freeing the object only when
///    the last credit is consumed.
/// 3. An object stays live for as long as at least one credit for it is
///    outstanding.
/// 4. Neither operation unwinds. A release runs inside [`Drop`]
///    implementations, where unwinding would abort.
///
/// [`retain`]: RefCounted::retain
/// [`release`]: RefCounted::release
pub unsafe trait RefCounted: Sized + 'static {
    /// Increments the object's reference count, creating a new credit owned
    /// by the caller.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `ptr` is null, or points to a live object of this type with at
    ///    least one outstanding credit.
    unsafe fn retain(ptr: *mut Self);

    /// Decrements the object's reference count, consuming one credit owned
    /// by the caller. May free the object.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `ptr` is null, or points to a live object of this type.
    /// 2. If `ptr` is non-null, the caller owns a credit for the object and
    ///    gives it up with this call. The pointer must not be used afterward
    ///    unless the caller holds another credit.
    unsafe fn release(ptr: *mut Self);
}

/// An object type laid out with the runtime's universal base object as a
/// prefix.
///
/// Runtimes with a single-inheritance object model typically place the base
/// object's header at the start of every concrete object, so that any object
/// pointer can be treated as a pointer to the base type. Implementing this
/// trait records that layout fact and unlocks the base-typed views on
/// [`ScopedHandle`]: [`as_base_ptr`] and [`upcast`].
///
/// The base type itself does not implement `Subtype`, so the base conversion
/// surface only exists where it is meaningful. There is never a second,
/// ambiguous way to reach `*mut Self::Base` when `Self` already is the base.
///
/// # Safety
///
/// Implementors must guarantee:
///
/// 1. `Self` is `#[repr(C)]` with an instance of [`Self::Base`] (or a type
///    with its exact layout) as the first field, so that a `*mut Self` may be
///    cast to a valid `*mut Self::Base` addressing the same object.
/// 2. Retain and release through the base-typed pointer operate on the same
///    reference count as retain and release through the `Self`-typed pointer.
///
/// [`ScopedHandle`]: crate::ScopedHandle
/// [`as_base_ptr`]: crate::ScopedHandle::as_base_ptr
/// [`upcast`]: crate::ScopedHandle::upcast
/// [`Self::Base`]: Subtype::Base
pub unsafe trait Subtype: RefCounted {
    /// The runtime's universal base object type.
    type Base: RefCounted;
}
