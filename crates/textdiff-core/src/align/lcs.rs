//! Longest-common-subsequence alignment over a suffix table.

use crate::cancel::Interrupt;

use super::Edit;

/// `table[i][j]` holds the LCS length of `old[i..]` and `new[j..]`.
struct Table {
    cells: Vec<u32>,
    width: usize,
}

impl Table {
    fn build<I: Interrupt>(
        old: &[&str],
        new: &[&str],
        interrupt: &I,
    ) -> Result<Self, I::Error> {
        let width = new.len() + 1;
        let mut cells = vec![0u32; (old.len() + 1) * width];
        for i in (0..old.len()).rev() {
            interrupt.check()?;
            for j in (0..new.len()).rev() {
                cells[i * width + j] = if old[i] == new[j] {
                    cells[(i + 1) * width + j + 1] + 1
                } else {
                    cells[(i + 1) * width + j].max(cells[i * width + j + 1])
                };
            }
        }
        Ok(Self { cells, width })
    }

    fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.width + j]
    }
}

/// Align `old` and `new` through a full LCS table.
///
/// Matching tokens are always taken. On a mismatch the walk deletes from
/// `old` unless inserting keeps a strictly longer common subsequence.
pub fn align<I: Interrupt>(
    old: &[&str],
    new: &[&str],
    interrupt: &I,
) -> Result<Vec<Edit>, I::Error> {
    let table = Table::build(old, new, interrupt)?;
    let (n, m) = (old.len(), new.len());
    let mut edits = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);

    while i < n && j < m {
        if old[i] == new[j] {
            edits.push(Edit::Equal { old: i, new: j });
            i += 1;
            j += 1;
        } else if table.get(i + 1, j) >= table.get(i, j + 1) {
            edits.push(Edit::Delete(i));
            i += 1;
        } else {
            edits.push(Edit::Insert(j));
            j += 1;
        }
    }
    edits.extend((i..n).map(Edit::Delete));
    edits.extend((j..m).map(Edit::Insert));
    Ok(edits)
}
