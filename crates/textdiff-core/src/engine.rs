//! The comparison entry points.
//!
//! Tokenize, strip the shared prefix and suffix, align the middle, then
//! coalesce token edits into operations. Within every change region the
//! deleted text is emitted before the inserted text.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::align::{self, Algorithm, Edit};
use crate::cancel::{CancellationToken, Interrupt, Uninterruptible};
use crate::error::{DiffError, Result};
use crate::result::{DiffKind, DiffOperation, DiffResult};
use crate::tokenize::{tokenize, Granularity};

/// Default cell budget for the LCS table under [`Algorithm::Auto`].
pub const DEFAULT_MAX_TABLE_CELLS: u64 = 4_000_000;

/// Tunables for a comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// The token unit to align over.
    pub granularity: Granularity,
    /// The alignment algorithm.
    pub algorithm: Algorithm,
    /// Largest LCS table `Auto` will build before switching to Myers.
    pub max_table_cells: u64,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            granularity: Granularity::Char,
            algorithm: Algorithm::Auto,
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
        }
    }
}

impl DiffOptions {
    /// Default options at the given granularity.
    pub fn with_granularity(granularity: Granularity) -> Self {
        Self {
            granularity,
            ..Default::default()
        }
    }
}

/// Compare two texts character by character.
///
/// ```
/// use textdiff_core::{compare, DiffOperation};
///
/// let diff = compare("Hello", "Hello World");
/// assert_eq!(
///     diff.operations(),
///     &[DiffOperation::equal("Hello"), DiffOperation::insert(" World")]
/// );
/// ```
pub fn compare(original: &str, modified: &str) -> DiffResult {
    compare_with(original, modified, &DiffOptions::default())
}

/// Compare two texts with explicit options.
pub fn compare_with(original: &str, modified: &str, options: &DiffOptions) -> DiffResult {
    match run(original, modified, options, &Uninterruptible) {
        Ok(result) => result,
        Err(never) => match never {},
    }
}

/// Compare two texts, aborting with [`DiffError::Cancelled`] if `token`
/// fires before the comparison finishes.
pub fn compare_cancellable(
    original: &str,
    modified: &str,
    options: &DiffOptions,
    token: &CancellationToken,
) -> Result<DiffResult> {
    run(original, modified, options, token)
}

/// Run a comparison on the blocking thread pool.
///
/// Cancelling `token` aborts the worker; no partial result is returned.
pub async fn compare_in_background(
    original: String,
    modified: String,
    options: DiffOptions,
    token: CancellationToken,
) -> Result<DiffResult> {
    tokio::task::spawn_blocking(move || run(&original, &modified, &options, &token))
        .await
        .map_err(|e| DiffError::Worker(e.to_string()))?
}

fn run<I: Interrupt>(
    original: &str,
    modified: &str,
    options: &DiffOptions,
    interrupt: &I,
) -> std::result::Result<DiffResult, I::Error> {
    interrupt.check()?;
    let granularity = options.granularity;

    if original == modified {
        let operations = if original.is_empty() {
            Vec::new()
        } else {
            vec![DiffOperation::equal(original)]
        };
        return Ok(DiffResult::new(granularity, operations));
    }

    let old = tokenize(original, granularity);
    let new = tokenize(modified, granularity);
    debug!(original = old.len(), modified = new.len(), %granularity, "tokenized");

    let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let old_mid = &old[prefix..old.len() - suffix];
    let new_mid = &new[prefix..new.len() - suffix];

    let edits = align::align(
        old_mid,
        new_mid,
        options.algorithm,
        options.max_table_cells,
        interrupt,
    )?;

    let mut builder = ScriptBuilder::default();
    for token in &old[..prefix] {
        builder.push(DiffKind::Equal, token);
    }
    for edit in edits {
        match edit {
            Edit::Equal { old, .. } => builder.push(DiffKind::Equal, old_mid[old]),
            Edit::Delete(i) => builder.push(DiffKind::Delete, old_mid[i]),
            Edit::Insert(j) => builder.push(DiffKind::Insert, new_mid[j]),
        }
    }
    for token in &old[old.len() - suffix..] {
        builder.push(DiffKind::Equal, token);
    }

    let operations = builder.finish();
    debug!(operations = operations.len(), "diff complete");
    Ok(DiffResult::new(granularity, operations))
}

/// Accumulates token edits into coalesced operations.
///
/// Deleted and inserted text is buffered until the next retained token so a
/// change region always flushes as one `Delete` followed by one `Insert`.
#[derive(Default)]
struct ScriptBuilder {
    operations: Vec<DiffOperation>,
    deleted: String,
    inserted: String,
}

impl ScriptBuilder {
    fn push(&mut self, kind: DiffKind, text: &str) {
        match kind {
            DiffKind::Delete => self.deleted.push_str(text),
            DiffKind::Insert => self.inserted.push_str(text),
            DiffKind::Equal => {
                self.flush();
                match self.operations.last_mut() {
                    Some(last) if last.kind == DiffKind::Equal => last.text.push_str(text),
                    _ => self.operations.push(DiffOperation::equal(text)),
                }
            }
        }
    }

    fn flush(&mut self) {
        if !self.deleted.is_empty() {
            let text = std::mem::take(&mut self.deleted);
            self.operations.push(DiffOperation::delete(text));
        }
        if !self.inserted.is_empty() {
            let text = std::mem::take(&mut self.inserted);
            self.operations.push(DiffOperation::insert(text));
        }
    }

    fn finish(mut self) -> Vec<DiffOperation> {
        self.flush();
        self.operations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(diff: &DiffResult) -> Vec<(DiffKind, &str)> {
        diff.operations()
            .iter()
            .map(|op| (op.kind, op.text.as_str()))
            .collect()
    }

    #[test]
    fn trailing_addition() {
        let diff = compare("Hello", "Hello World");
        assert_eq!(
            ops(&diff),
            vec![(DiffKind::Equal, "Hello"), (DiffKind::Insert, " World")]
        );
    }

    #[test]
    fn trailing_removal() {
        let diff = compare("Hello World", "Hello");
        assert_eq!(
            ops(&diff),
            vec![(DiffKind::Equal, "Hello"), (DiffKind::Delete, " World")]
        );
    }

    #[test]
    fn no_change() {
        let diff = compare("Same Text", "Same Text");
        assert_eq!(ops(&diff), vec![(DiffKind::Equal, "Same Text")]);
        assert!(diff.is_identical());
    }

    #[test]
    fn both_empty() {
        assert!(compare("", "").is_empty());
    }

    #[test]
    fn pure_insert_and_delete() {
        assert_eq!(ops(&compare("", "abc")), vec![(DiffKind::Insert, "abc")]);
        assert_eq!(ops(&compare("abc", "")), vec![(DiffKind::Delete, "abc")]);
    }

    #[test]
    fn disjoint_texts_delete_before_insert() {
        let diff = compare("abc", "xyz");
        assert_eq!(
            ops(&diff),
            vec![(DiffKind::Delete, "abc"), (DiffKind::Insert, "xyz")]
        );
    }

    #[test]
    fn change_region_is_grouped() {
        // Interleaved single-character edits collapse into one region.
        let diff = compare("kitten", "sitting");
        for pair in diff.operations().windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
            assert!(!(pair[0].kind == DiffKind::Insert && pair[1].kind == DiffKind::Delete));
        }
        assert_eq!(diff.original_text(), "kitten");
        assert_eq!(diff.modified_text(), "sitting");
        assert_eq!(diff.stats().equal, 4);
    }

    #[test]
    fn word_granularity() {
        let options = DiffOptions::with_granularity(Granularity::Word);
        let diff = compare_with("the cat sat", "the dog sat", &options);
        assert_eq!(
            ops(&diff),
            vec![
                (DiffKind::Equal, "the "),
                (DiffKind::Delete, "cat"),
                (DiffKind::Insert, "dog"),
                (DiffKind::Equal, " sat"),
            ]
        );
        assert_eq!(diff.granularity(), Granularity::Word);
    }

    #[test]
    fn line_granularity() {
        let options = DiffOptions::with_granularity(Granularity::Line);
        let diff = compare_with("a\nb\nc\n", "a\nB\nc\n", &options);
        assert_eq!(
            ops(&diff),
            vec![
                (DiffKind::Equal, "a\n"),
                (DiffKind::Delete, "b\n"),
                (DiffKind::Insert, "B\n"),
                (DiffKind::Equal, "c\n"),
            ]
        );
    }

    #[test]
    fn algorithms_agree_on_edit_size() {
        let original = "The quick brown fox jumps over the lazy dog";
        let modified = "A quick brown cat leaps over the lazy dogs";
        let mut equal = Vec::new();
        for algorithm in [Algorithm::Lcs, Algorithm::Myers] {
            let options = DiffOptions {
                algorithm,
                ..Default::default()
            };
            let diff = compare_with(original, modified, &options);
            assert_eq!(diff.original_text(), original);
            assert_eq!(diff.modified_text(), modified);
            equal.push(diff.stats().equal);
        }
        assert_eq!(equal[0], equal[1]);
    }

    #[test]
    fn auto_falls_back_to_myers_on_tiny_budget() {
        let options = DiffOptions {
            max_table_cells: 0,
            ..Default::default()
        };
        let diff = compare_with("abcdef", "abXdeYf", &options);
        assert_eq!(diff.apply("abcdef").as_deref(), Some("abXdeYf"));
    }

    #[test]
    fn multibyte_text() {
        let diff = compare("naïve café", "naive cafés");
        assert_eq!(diff.original_text(), "naïve café");
        assert_eq!(diff.modified_text(), "naive cafés");
    }

    #[test]
    fn cancelled_token_aborts() {
        let token = CancellationToken::new();
        token.cancel();
        let result = compare_cancellable("abc", "abd", &DiffOptions::default(), &token);
        assert_eq!(result, Err(DiffError::Cancelled));
    }

    #[test]
    fn live_token_completes() {
        let token = CancellationToken::new();
        let result = compare_cancellable("abc", "abd", &DiffOptions::default(), &token).unwrap();
        assert_eq!(result, compare("abc", "abd"));
    }

    #[tokio::test]
    async fn background_comparison() {
        let diff = compare_in_background(
            "Hello".into(),
            "Hello World".into(),
            DiffOptions::default(),
            CancellationToken::new(),
        )
        .await
        .unwrap();
        assert_eq!(diff, compare("Hello", "Hello World"));
    }

    #[tokio::test]
    async fn background_comparison_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let result = compare_in_background(
            "left".into(),
            "right".into(),
            DiffOptions::default(),
            token,
        )
        .await;
        assert_eq!(result, Err(DiffError::Cancelled));
    }

    fn scrambled(len: usize, alphabet: &[u8], mut seed: u64) -> String {
        (0..len)
            .map(|_| {
                seed ^= seed << 13;
                seed ^= seed >> 7;
                seed ^= seed << 17;
                alphabet[(seed % alphabet.len() as u64) as usize] as char
            })
            .collect()
    }

    #[test]
    fn large_unrelated_texts_round_trip() {
        // Mostly 'a' keeps the edit distance in the thousands while the
        // table would need billions of cells.
        let alphabet = b"aaaaaaaaaaaaaaabcdefgh";
        let original = scrambled(50_000, alphabet, 0x2545_f491);
        let modified = scrambled(50_000, alphabet, 0x9e37_79b9);
        assert_ne!(original, modified);

        let diff = compare(&original, &modified);
        assert_eq!(diff.apply(&original).as_deref(), Some(modified.as_str()));
        for pair in diff.operations().windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
        }
    }

    #[tokio::test]
    async fn background_comparison_cancelled_while_running() {
        let original = scrambled(20_000, b"abcdefghijklmnopqrstuvwxyz", 0x2545_f491);
        let modified = scrambled(20_000, b"abcdefghijklmnopqrstuvwxyz", 0x9e37_79b9);
        let token = CancellationToken::new();
        let task = tokio::spawn(compare_in_background(
            original,
            modified,
            DiffOptions::default(),
            token.clone(),
        ));

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        token.cancel();
        assert_eq!(task.await.unwrap(), Err(DiffError::Cancelled));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: DiffOptions = serde_json::from_str(r#"{ "granularity": "line" }"#).unwrap();
        assert_eq!(options.granularity, Granularity::Line);
        assert_eq!(options.algorithm, Algorithm::Auto);
        assert_eq!(options.max_table_cells, DEFAULT_MAX_TABLE_CELLS);
    }
}
