//! The owning handle type.
//!
//! This module encapsulates the `ptr` field of [`ScopedHandle`], ensuring it
//! is only visible within this module. This visibility restriction guarantees
//! the safety invariant: **a non-null pointer always carries exactly one
//! reference-count credit owned by the handle**.
//!
//! # Safety Invariant
//!
//! The `ptr` field can only be set by the construction paths in this file:
//!
//! - [`ScopedHandle::null`] / [`Default`]: null, no credit.
//! - [`ScopedHandle::adopt`]: non-null only if the caller transferred a
//!   credit in (documented caller obligation).
//! - [`Clone`] and [`Clone::clone_from`]: the pointer is retained before it
//!   is stored, creating the credit the new value owns.
//! - [`ScopedHandle::take`] and [`ScopedHandle::upcast`]: the credit moves
//!   between handles together with the pointer.
//!
//! The field is cleared (without a release) only where the credit provably
//! leaves the handle: [`ScopedHandle::escape`], [`ScopedHandle::take`], and
//! [`ScopedHandle::upcast`]. [`Drop`] relies on this invariant to release
//! exactly once per credit, on every exit path.

use core::{fmt, marker::PhantomData};

use crate::model::{RefCounted, Subtype};

/// A scope-bound handle owning one reference-count credit for a foreign
/// object.
///
/// A handle is either *empty* (null pointer, no credit, dropping it does
/// nothing) or *owning* (non-null pointer, exactly one credit, dropping it
/// releases that credit exactly once). No other state exists, and no credit
/// is ever shared between two handles: cloning retains the object first, so
/// the clone owns a credit of its own.
///
/// The pointee type `T` ties the handle to its runtime through the
/// [`RefCounted`] implementation; the handle itself never reads or writes the
/// pointee.
pub struct ScopedHandle<T: RefCounted> {
    /// Pointer to the managed object.
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. If non-null, the pointer addresses a live object of type `T` and
    ///    the handle owns exactly one outstanding credit for it, which
    ///    nothing else will release.
    /// 2. If null, the handle owns no credit and its drop performs no
    ///    release.
    ptr: *mut T,

    /// Marker tying the handle to `T` for auto-trait and variance purposes.
    _marker: PhantomData<T>,
}

impl<T: RefCounted> ScopedHandle<T> {
    /// Creates an empty handle.
    ///
    /// The handle owns no credit; dropping it performs no release.
    #[inline]
    pub const fn null() -> Self {
        Self {
            ptr: core::ptr::null_mut(),
            _marker: PhantomData,
        }
    }

    /// Takes ownership of a pointer that already carries one credit.
    ///
    /// No retain occurs: the caller's credit transfers into the handle, which
    /// becomes responsible for the one matching release. This is the only way
    /// a new managed pointer enters the crate.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `ptr` is null, or points to a live object of type `T`.
    /// 2. If `ptr` is non-null, the caller owns one credit for the object
    ///    (e.g. it was freshly allocated, or the caller retained it) and
    ///    transfers that credit to the handle. Nothing else may release it.
    #[inline]
    pub unsafe fn adopt(ptr: *mut T) -> Self {
        Self {
            // SAFETY:
            // 1. Guaranteed by the caller: the pointer carries one credit
            //    that now belongs to this handle.
            // 2. A null `ptr` produces an empty handle with no credit.
            ptr,
            _marker: PhantomData,
        }
    }

    /// Returns the managed pointer without affecting the credit.
    ///
    /// The pointer is valid for as long as the handle (or some other credit
    /// for the object) is live.
    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr
    }

    /// Returns `true` if the handle is empty.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    /// Returns a shared reference to the managed object.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The handle is non-null.
    /// 2. For the duration of the returned borrow, the object is not mutated
    ///    through any other pointer.
    #[inline]
    pub unsafe fn as_ref(&self) -> &T {
        debug_assert!(!self.ptr.is_null());
        // SAFETY:
        // 1. The pointer is non-null (guaranteed by the caller) and addresses
        //    a live `T` (field invariant 1).
        // 2. Absence of conflicting mutation is guaranteed by the caller.
        unsafe { &*self.ptr }
    }

    /// Returns an exclusive reference to the managed object.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The handle is non-null.
    /// 2. For the duration of the returned borrow, the object is not read or
    ///    written through any other pointer. Note that other credits for the
    ///    same object (clones, other adopters) usually make this impossible
    ///    to guarantee.
    #[inline]
    pub unsafe fn as_mut(&mut self) -> &mut T {
        debug_assert!(!self.ptr.is_null());
        // SAFETY:
        // 1. The pointer is non-null (guaranteed by the caller) and addresses
        //    a live `T` (field invariant 1).
        // 2. Exclusivity is guaranteed by the caller.
        unsafe { &mut *self.ptr }
    }

    /// Consumes the handle and returns the pointer without releasing.
    ///
    /// The handle's credit transfers to the caller, who becomes responsible
    /// for exactly one eventual release. This is the designed mechanism for
    /// handing a managed object to an interface that expects to receive an
    /// already-accounted reference.
    #[inline]
    pub fn escape(self) -> *mut T {
        let ptr = self.ptr;
        // The credit leaves with the returned pointer; skip the release.
        core::mem::forget(self);
        ptr
    }

    /// Moves the credit out of this handle, leaving it empty.
    ///
    /// The returned handle owns the original pointer and credit; no retain or
    /// release occurs. Dropping `self` afterward is a no-op.
    #[inline]
    pub fn take(&mut self) -> Self {
        core::mem::replace(self, Self::null())
    }
}

impl<T: Subtype> ScopedHandle<T> {
    /// Returns the managed pointer viewed as the runtime's base object type.
    ///
    /// No credit is affected; validity of the returned pointer is bounded by
    /// the handle's lifetime, exactly as for [`as_ptr`](Self::as_ptr).
    #[inline]
    pub fn as_base_ptr(&self) -> *mut T::Base {
        // Sound per the `Subtype` layout contract: the base object is a
        // prefix of `T`.
        self.ptr.cast::<T::Base>()
    }

    /// Consumes the handle and re-wraps the credit at the base object type.
    ///
    /// No retain or release occurs; the one credit simply changes its static
    /// type.
    #[inline]
    pub fn upcast(self) -> ScopedHandle<T::Base> {
        let ptr = self.escape().cast::<T::Base>();
        // SAFETY:
        // 1. The pointer came out of a live handle, so it is null or a live
        //    `T`, and a live `T` is a live `T::Base` per the `Subtype` layout
        //    contract.
        // 2. `escape` transferred this handle's credit to us, and the
        //    `Subtype` contract makes it a credit on the same count when
        //    viewed through the base type.
        unsafe { ScopedHandle::adopt(ptr) }
    }
}

impl<T: RefCounted> Default for ScopedHandle<T> {
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl<T: RefCounted> Clone for ScopedHandle<T> {
    /// Creates a second, independently owning handle for the same object.
    ///
    /// The object is retained (a no-op if the handle is empty), so the clone
    /// owns a credit of its own and both handles release independently.
    #[inline]
    fn clone(&self) -> Self {
        // SAFETY:
        // 1. The pointer is null or live with one outstanding credit (field
        //    invariant), satisfying `retain`'s requirement.
        unsafe {
            T::retain(self.ptr);
        }
        Self {
            // SAFETY:
            // 1. The retain above created the credit this handle owns.
            // 2. A null pointer was not retained and carries no credit.
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }

    /// Replaces `self`'s object with `source`'s, releasing the old credit.
    ///
    /// The new pointer is retained *before* the old one is released. The
    /// order matters when both handles address the same object through the
    /// same remaining credit: releasing first could drop the count to zero
    /// and free the object before the retain runs on a dangling pointer.
    /// With this order an aliasing assignment is a net no-op on the count.
    #[inline]
    fn clone_from(&mut self, source: &Self) {
        // SAFETY:
        // 1. `source`'s pointer is null or live with one outstanding credit
        //    (field invariant), satisfying `retain`'s requirement.
        unsafe {
            T::retain(source.ptr);
        }
        let old = core::mem::replace(&mut self.ptr, source.ptr);
        // SAFETY:
        // 1. `old` is null or still live: the credit this handle held for it
        //    has not been consumed yet.
        // 2. That credit is owned by this handle and is given up here; the
        //    field now points elsewhere, so nothing releases it again.
        unsafe {
            T::release(old);
        }
    }
}

impl<T: RefCounted> Drop for ScopedHandle<T> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY:
        // 1. The pointer is null or addresses a live object (field
        //    invariant 1).
        // 2. A non-null handle owns exactly one credit, consumed by this one
        //    release; the handle ceases to exist afterward. A null pointer
        //    makes the call a no-op per the `RefCounted` contract, which
        //    covers moved-from (`take`) and overwritten handles.
        unsafe {
            T::release(self.ptr);
        }
    }
}

impl<T: RefCounted> fmt::Debug for ScopedHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScopedHandle").field(&self.ptr).finish()
    }
}

impl<T: RefCounted> PartialEq for ScopedHandle<T> {
    /// Pointer identity: two handles are equal iff they manage the same
    /// object, regardless of how many credits exist for it.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl<T: RefCounted> Eq for ScopedHandle<T> {}

impl<T: RefCounted> PartialEq<*mut T> for ScopedHandle<T> {
    #[inline]
    fn eq(&self, other: &*mut T) -> bool {
        self.ptr == *other
    }
}

impl<T: RefCounted> PartialEq<*const T> for ScopedHandle<T> {
    #[inline]
    fn eq(&self, other: &*const T) -> bool {
        self.ptr.cast_const() == *other
    }
}
