//! A growable array layered on a separately owned block of uninitialized memory.
//!
//! [`RawMemory`] owns the allocation and nothing else. [`Vector`] owns one
//! `RawMemory` and tracks how many of its leading slots hold live values.

mod raw_memory;
mod vector;

pub(crate) mod errors;

pub use errors::AllocErr;
pub use raw_memory::RawMemory;
pub use vector::{IntoIter, Vector};
