//! Sealed trait marker for Transport implementations.
//!
//! Prevents implementations of `Transport` outside this crate so that every
//! implementation honours the never-fail envelope contract.

pub(crate) mod private {
    /// Sealed trait marker.
    pub trait Sealed {}
}
