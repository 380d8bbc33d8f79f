#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    unused_doc_comments
)]
//! Scope-bound owning handles for foreign reference-counted object models.
//!
//! # Overview
//!
//! Many runtimes manage their heap with manual reference counting: every live
//! reference to an object is accounted for by an explicit retain, and the
//! object is freed when a matching release brings the count back to zero.
//! Holding such a pointer correctly across copies, moves, reassignments, and
//! early returns is a classic source of use-after-free and double-free bugs.
//!
//! This crate provides [`ScopedHandle`], a wrapper that ties exactly one unit
//! of reference-count ownership (one *credit*) to a Rust scope:
//!
//! - A non-null handle owns exactly one credit and releases it exactly once,
//!   when the handle is dropped or overwritten.
//! - Cloning a handle retains the object first, so the clone owns its own
//!   independent credit.
//! - Moving a handle transfers the credit without touching the count.
//! - [`ScopedHandle::escape`] deliberately hands the credit back to the
//!   caller, for interfaces that expect to receive an already-accounted
//!   reference.
//!
//! The foreign runtime itself is not part of this crate. It is abstracted
//! behind the [`RefCounted`] trait, which an object type implements to expose
//! its runtime's retain and release operations. Runtimes with a universal
//! base object type additionally describe their layout through [`Subtype`],
//! which unlocks credit-preserving upcasts.
//!
//! [`ArcObject`] supplies an object model backed by [`triomphe::Arc`],
//! usable as a stand-in runtime in tests or as a reference for writing
//! [`RefCounted`] implementations.
//!
//! # Safety Strategy
//!
//! All credit bookkeeping is concentrated in [`handle`], where the pointer
//! field is module-private: it can only be set by the documented construction
//! paths, so the ownership invariants are verifiable within a single file.
//! The unsafe surface is kept at the edges — adopting a raw pointer
//! ([`ScopedHandle::adopt`]) and dereferencing ([`ScopedHandle::as_ref`]) are
//! `unsafe` with documented obligations, while clone, drop, move, and escape
//! are safe because the invariants make their retain/release pairing correct
//! by construction.
//!
//! [`handle`]: ScopedHandle

extern crate alloc;

mod arc;
mod format;
mod handle;
mod model;

pub use arc::ArcObject;
pub use format::FormatArg;
pub use handle::ScopedHandle;
pub use model::{RefCounted, Subtype};
