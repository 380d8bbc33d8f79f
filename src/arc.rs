//! An [`Arc`]-backed object model.
//!
//! [`ArcObject`] is a heap object whose reference count is the strong count
//! of a [`triomphe::Arc`]. It implements [`RefCounted`], so it can stand in
//! for a foreign runtime wherever one is needed without FFI: in tests, in
//! examples, or as a reference for writing [`RefCounted`] implementations
//! against a real runtime.
//!
//! # Safety Invariant
//!
//! Every `*mut ArcObject<V>` handed out by this module comes from
//! [`triomphe::Arc::into_raw`], and the module never hands out any other
//! pointer. The [`RefCounted`] implementation relies on this provenance to
//! reconstruct the [`Arc`] for retain and release.
//!
//! [`Arc`]: triomphe::Arc

use crate::model::RefCounted;

/// A heap object managed by a [`triomphe::Arc`] whose strong count plays the
/// role of a foreign runtime's reference count.
///
/// [`alloc`](ArcObject::alloc) creates an object with count 1 and returns the
/// pointer carrying that credit, ready to be adopted:
///
/// ```
/// use scoped_handle::{ArcObject, ScopedHandle};
///
/// let ptr = ArcObject::alloc("hello");
/// // SAFETY: `alloc` returned a pointer carrying one credit.
/// let handle = unsafe { ScopedHandle::adopt(ptr) };
/// // SAFETY: the handle is non-null and nothing mutates the object.
/// assert_eq!(*unsafe { handle.as_ref() }.value(), "hello");
/// // Dropping the handle releases the credit and frees the object.
/// ```
#[repr(transparent)]
pub struct ArcObject<V> {
    /// The wrapped value.
    value: V,
}

impl<V: 'static> ArcObject<V> {
    /// Allocates a new object with reference count 1.
    ///
    /// The returned pointer carries that one credit; the caller is
    /// responsible for exactly one eventual [`release`](RefCounted::release),
    /// typically by handing the pointer to [`ScopedHandle::adopt`].
    ///
    /// [`ScopedHandle::adopt`]: crate::ScopedHandle::adopt
    pub fn alloc(value: V) -> *mut ArcObject<V> {
        let arc = triomphe::Arc::new(ArcObject { value });
        triomphe::Arc::into_raw(arc).cast_mut()
    }

    /// Returns a reference to the wrapped value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the object's current reference count.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `ptr` came from [`ArcObject::alloc`] and the object is still live
    ///    (at least one credit outstanding).
    pub unsafe fn strong_count(ptr: *const ArcObject<V>) -> usize {
        // SAFETY: The pointer is live and came from `Arc::into_raw` inside
        // `alloc` (guaranteed by the caller), which fulfills the requirements
        // for `ArcBorrow::from_ptr`.
        let arc_borrow = unsafe { triomphe::ArcBorrow::from_ptr(ptr) };
        triomphe::ArcBorrow::strong_count(&arc_borrow)
    }
}

// SAFETY: The contract is discharged onto `triomphe::Arc`:
// 1. Both operations return early on null.
// 2. Retain clones the `Arc` and forgets the clone (+1 strong); release
//    reconstructs an `Arc` and drops it (-1 strong, deallocating at zero).
// 3. `Arc` keeps the allocation live while the strong count is positive.
// 4. Neither `Arc::clone` nor `Arc::drop` unwinds.
unsafe impl<V: 'static> RefCounted for ArcObject<V> {
    unsafe fn retain(ptr: *mut Self) {
        if ptr.is_null() {
            return;
        }
        // SAFETY: The pointer is live and came from `Arc::into_raw` inside
        // `alloc` (guaranteed by the caller), which fulfills the requirements
        // for `ArcBorrow::from_ptr`.
        let arc_borrow = unsafe { triomphe::ArcBorrow::from_ptr(ptr.cast_const()) };
        // The forgotten clone is the new credit the caller now owns.
        core::mem::forget(arc_borrow.clone_arc());
    }

    unsafe fn release(ptr: *mut Self) {
        if ptr.is_null() {
            return;
        }
        // SAFETY:
        // 1. The pointer has the correct type and came from `Arc::into_raw`
        //    inside `alloc` (guaranteed by the caller).
        // 2. The caller gives up its credit, so consuming the pointer here
        //    pairs one `from_raw` with the `into_raw` that created it.
        let arc = unsafe { triomphe::Arc::from_raw(ptr.cast_const()) };
        core::mem::drop(arc);
    }
}
