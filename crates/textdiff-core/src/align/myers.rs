//! Myers' O((n+m)*D) alignment in linear space.
//!
//! Delegates to the divide-and-conquer implementation in `similar`, which
//! recurses on middle snakes instead of keeping a trace. The hook collects
//! its ranges as token edits and polls the interrupt on every callback.

use similar::algorithms::{myers, DiffHook};

use crate::cancel::Interrupt;

use super::Edit;

struct EditCollector<'a, I> {
    edits: Vec<Edit>,
    interrupt: &'a I,
}

impl<I: Interrupt> DiffHook for EditCollector<'_, I> {
    type Error = I::Error;

    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> Result<(), I::Error> {
        self.interrupt.check()?;
        self.edits.extend((0..len).map(|i| Edit::Equal {
            old: old_index + i,
            new: new_index + i,
        }));
        Ok(())
    }

    fn delete(&mut self, old_index: usize, old_len: usize, _new_index: usize) -> Result<(), I::Error> {
        self.interrupt.check()?;
        self.edits
            .extend((old_index..old_index + old_len).map(Edit::Delete));
        Ok(())
    }

    fn insert(&mut self, _old_index: usize, new_index: usize, new_len: usize) -> Result<(), I::Error> {
        self.interrupt.check()?;
        self.edits
            .extend((new_index..new_index + new_len).map(Edit::Insert));
        Ok(())
    }
}

/// Align `old` and `new` with Myers' algorithm.
pub fn align<I: Interrupt>(
    old: &[&str],
    new: &[&str],
    interrupt: &I,
) -> Result<Vec<Edit>, I::Error> {
    interrupt.check()?;
    let mut collector = EditCollector {
        edits: Vec::with_capacity(old.len().max(new.len())),
        interrupt,
    };
    myers::diff(&mut collector, old, 0..old.len(), new, 0..new.len())?;
    // A cancellation can land after the last callback.
    interrupt.check()?;
    Ok(collector.edits)
}
