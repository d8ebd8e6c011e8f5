//! Diff engine for textdiff.
//!
//! Compares two texts and produces an edit script of `Equal`, `Insert` and
//! `Delete` operations. The comparison is pure and total: any two strings,
//! including empty ones, produce a result.
//!
//! # Key Types
//!
//! - [`DiffResult`] / [`DiffOperation`] / [`DiffKind`] -- the coalesced edit script
//! - [`DiffOptions`] / [`Granularity`] / [`Algorithm`] -- comparison tunables
//! - [`DiffStats`] -- character counts and similarity
//! - [`CancellationToken`] -- aborts long comparisons

pub mod align;
pub mod cancel;
pub mod engine;
pub mod error;
pub mod result;
pub mod tokenize;

pub use align::Algorithm;
pub use cancel::{CancellationToken, Interrupt, Uninterruptible};
pub use engine::{
    compare, compare_cancellable, compare_in_background, compare_with, DiffOptions,
    DEFAULT_MAX_TABLE_CELLS,
};
pub use error::{DiffError, Result};
pub use result::{DiffKind, DiffOperation, DiffResult, DiffStats};
pub use tokenize::{tokenize, Granularity};
