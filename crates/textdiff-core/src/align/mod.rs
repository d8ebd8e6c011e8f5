//! Token alignment: minimal edit scripts over two token sequences.
//!
//! Both aligners return the same number of `Equal` steps (the LCS length).
//! Where several minimal alignments exist `lcs` favours removing from the
//! original first.

pub mod lcs;
pub mod myers;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cancel::Interrupt;

/// One step of an alignment, expressed as token indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    /// The token at `old` in the original matches the one at `new`.
    Equal { old: usize, new: usize },
    /// `old[i]` is removed.
    Delete(usize),
    /// `new[j]` is added.
    Insert(usize),
}

/// Which alignment algorithm to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// `Lcs` while the table fits the cell budget, `Myers` beyond it.
    #[default]
    Auto,
    /// Dynamic-programming LCS table. O(n*m) time and memory.
    Lcs,
    /// Linear-space Myers search. O((n+m)*D) time.
    Myers,
}

impl Algorithm {
    /// The lowercase name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Auto => "auto",
            Algorithm::Lcs => "lcs",
            Algorithm::Myers => "myers",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Algorithm::Auto),
            "lcs" => Ok(Algorithm::Lcs),
            "myers" => Ok(Algorithm::Myers),
            other => Err(format!("unknown algorithm: {other}")),
        }
    }
}

/// Pick the concrete algorithm for a problem of the given size.
pub fn resolve(
    algorithm: Algorithm,
    old_len: usize,
    new_len: usize,
    max_table_cells: u64,
) -> Algorithm {
    match algorithm {
        Algorithm::Auto => {
            let cells = (old_len as u64).saturating_mul(new_len as u64);
            if cells <= max_table_cells {
                Algorithm::Lcs
            } else {
                debug!(cells, max_table_cells, "table too large, using myers");
                Algorithm::Myers
            }
        }
        concrete => concrete,
    }
}

/// Align two token sequences with the requested algorithm.
pub fn align<I: Interrupt>(
    old: &[&str],
    new: &[&str],
    algorithm: Algorithm,
    max_table_cells: u64,
    interrupt: &I,
) -> Result<Vec<Edit>, I::Error> {
    if old.is_empty() || new.is_empty() {
        let mut edits: Vec<Edit> = (0..old.len()).map(Edit::Delete).collect();
        edits.extend((0..new.len()).map(Edit::Insert));
        return Ok(edits);
    }

    let algorithm = resolve(algorithm, old.len(), new.len(), max_table_cells);
    debug!(%algorithm, old = old.len(), new = new.len(), "aligning");
    match algorithm {
        Algorithm::Myers => myers::align(old, new, interrupt),
        _ => lcs::align(old, new, interrupt),
    }
}
