use crate::error::{Result, SimplifyError};
use crate::similarity::Metric;
use crate::vocab::VocabTable;
use std::cmp::Ordering;

#[cfg(windows)]
const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";

/// Replaces words with their nearest neighbor from a restricted
/// replacement vocabulary.
///
/// Holds two read-only tables for the duration of a run: the full
/// embeddings table and the restricted replacement table. The metric is
/// passed into each call rather than stored, so a caller can switch
/// strategies between calls without touching the engine.
pub struct Simplifier {
    embeddings: VocabTable,
    replacements: VocabTable,
}

impl Simplifier {
    /// Build an engine over the two tables.
    ///
    /// Fails if the embeddings table is empty, or if both tables are
    /// populated with different vector dimensionalities. An empty
    /// replacement table is allowed; every word then passes through
    /// unchanged.
    pub fn new(embeddings: VocabTable, replacements: VocabTable) -> Result<Simplifier> {
        if embeddings.is_empty() {
            return Err(SimplifyError::EmptyVocabulary);
        }
        if !replacements.is_empty() && embeddings.dims() != replacements.dims() {
            return Err(SimplifyError::LengthMismatch(
                embeddings.dims(),
                replacements.dims(),
            ));
        }
        Ok(Simplifier {
            embeddings,
            replacements,
        })
    }

    pub fn embeddings(&self) -> &VocabTable {
        &self.embeddings
    }

    pub fn replacements(&self) -> &VocabTable {
        &self.replacements
    }

    /// Decide what should appear in the output in place of `word`.
    ///
    /// A word already in the replacement table, or absent from the
    /// embeddings table, passes through unchanged. Otherwise every
    /// replacement entry is scored against the word's vector and the best
    /// one wins; ties keep the earliest-inserted entry. Candidates that
    /// cannot be scored under cosine (zero-magnitude vectors) are skipped.
    pub fn simplify_word<'a>(&'a self, metric: Metric, word: &'a str) -> Result<&'a str> {
        if self.replacements.contains(word) {
            return Ok(word);
        }
        let Some(target) = self.embeddings.get(word) else {
            return Ok(word);
        };

        let mut best_word = None;
        let mut best_score = metric.initial_best();
        for (candidate, vector) in self.replacements.iter() {
            let score = match metric.score(target, vector) {
                Ok(score) => score,
                Err(SimplifyError::ZeroMagnitude) => continue,
                Err(e) => return Err(e),
            };
            if metric.improves(score, best_score) {
                best_score = score;
                best_word = Some(candidate);
            }
        }

        Ok(best_word.unwrap_or(word))
    }

    /// Simplify a whole text.
    ///
    /// Lines are split on any line-break sequence and words on whitespace
    /// runs; words are rejoined with single spaces and lines with the
    /// platform line separator. Trailing whitespace is trimmed from the
    /// final result. No punctuation stripping or case folding is done.
    pub fn process_text(&self, metric: Metric, input: &str) -> Result<String> {
        let mut lines = Vec::new();
        for line in input.lines() {
            let mut words = Vec::new();
            for word in line.split_whitespace() {
                words.push(self.simplify_word(metric, word)?);
            }
            lines.push(words.join(" "));
        }
        Ok(lines.join(LINE_SEPARATOR).trim_end().to_string())
    }

    /// Rank the top `n` replacement candidates for `word` under `metric`,
    /// best first. A word with no vector yields an empty ranking.
    pub fn rank_replacements(
        &self,
        metric: Metric,
        word: &str,
        n: usize,
    ) -> Result<Vec<(&str, f64)>> {
        let Some(target) = self.embeddings.get(word) else {
            return Ok(Vec::new());
        };

        let mut scores: Vec<(&str, f64)> = Vec::with_capacity(self.replacements.len());
        for (candidate, vector) in self.replacements.iter() {
            match metric.score(target, vector) {
                Ok(score) => scores.push((candidate, score)),
                Err(SimplifyError::ZeroMagnitude) => continue,
                Err(e) => return Err(e),
            }
        }

        match metric {
            Metric::Euclidean => {
                scores.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
            }
            Metric::DotProduct | Metric::Cosine => {
                scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal))
            }
        }
        scores.truncate(n);

        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn table(csv: &str) -> VocabTable {
        VocabTable::from_csv_reader(Cursor::new(csv)).unwrap()
    }

    fn engine(embeddings: &str, replacement_words: &str) -> Simplifier {
        let e = table(embeddings);
        let r = VocabTable::from_word_list_reader(Cursor::new(replacement_words), &e).unwrap();
        Simplifier::new(e, r).unwrap()
    }

    #[test]
    fn word_in_replacement_table_is_kept() {
        let s = engine("happy,1.0,0.0\njoyful,0.9,0.1\n", "happy\n");
        assert_eq!(s.simplify_word(Metric::Cosine, "happy").unwrap(), "happy");
    }

    #[test]
    fn unknown_word_passes_through() {
        let s = engine("happy,1.0,0.0\n", "happy\n");
        assert_eq!(s.simplify_word(Metric::Cosine, "xyzzy").unwrap(), "xyzzy");
    }

    #[test]
    fn cosine_picks_nearest_replacement() {
        let s = engine(
            "joyful,1.0,0.0\nelated,0.9,0.1\nhappy,1.0,0.0\n",
            "happy\n",
        );
        assert_eq!(s.simplify_word(Metric::Cosine, "joyful").unwrap(), "happy");
    }

    #[test]
    fn euclidean_picks_minimum_distance() {
        let s = engine(
            "joyful,1.0,0.0\nelated,0.9,0.1\nhappy,1.0,0.0\nfar,100.0,100.0\n",
            "happy\nfar\n",
        );
        assert_eq!(s.simplify_word(Metric::Euclidean, "elated").unwrap(), "happy");
    }

    #[test]
    fn dot_product_and_cosine_can_disagree() {
        // "long" wins on raw dot product by magnitude, "aligned" on angle
        let s = engine(
            "query,1.0,1.0\nlong,10.0,0.0\naligned,0.8,0.8\n",
            "long\naligned\n",
        );
        assert_eq!(s.simplify_word(Metric::DotProduct, "query").unwrap(), "long");
        assert_eq!(s.simplify_word(Metric::Cosine, "query").unwrap(), "aligned");
    }

    #[test]
    fn empty_replacement_table_passes_everything_through() {
        let s = engine("joyful,1.0,0.0\nhappy,1.0,0.0\n", "missing\n");
        assert!(s.replacements().is_empty());
        assert_eq!(s.simplify_word(Metric::Cosine, "joyful").unwrap(), "joyful");
    }

    #[test]
    fn ties_keep_the_earliest_entry() {
        let s = engine(
            "first,1.0,0.0\nsecond,1.0,0.0\nquery,2.0,0.0\n",
            "first\nsecond\n",
        );
        // Both candidates score identically against "query" under every metric
        for metric in [Metric::DotProduct, Metric::Cosine, Metric::Euclidean] {
            assert_eq!(s.simplify_word(metric, "query").unwrap(), "first");
        }
    }

    #[test]
    fn zero_magnitude_candidate_is_skipped_under_cosine() {
        let s = engine(
            "null,0.0,0.0\nhappy,1.0,0.0\njoyful,0.9,0.1\n",
            "null\nhappy\n",
        );
        assert_eq!(s.simplify_word(Metric::Cosine, "joyful").unwrap(), "happy");
    }

    #[test]
    fn degenerate_target_leaves_word_unchanged_under_cosine() {
        let s = engine("void,0.0,0.0\nhappy,1.0,0.0\n", "happy\n");
        assert_eq!(s.simplify_word(Metric::Cosine, "void").unwrap(), "void");
    }

    #[test]
    fn process_text_replaces_across_lines() {
        let s = engine(
            "joyful,1.0,0.0\nhappy,1.0,0.0\nday,0.0,1.0\n",
            "happy\nday\n",
        );
        let out = s.process_text(Metric::Cosine, "joyful day\nxyzzy joyful").unwrap();
        assert_eq!(out, format!("happy day{LINE_SEPARATOR}xyzzy happy"));
    }

    #[test]
    fn process_text_collapses_whitespace_runs() {
        let s = engine("joyful,1.0,0.0\nhappy,1.0,0.0\nday,0.0,1.0\n", "happy\nday\n");
        let out = s.process_text(Metric::Cosine, "  joyful \t day  ").unwrap();
        assert_eq!(out, "happy day");
    }

    #[test]
    fn process_text_trims_trailing_whitespace() {
        let s = engine("happy,1.0,0.0\n", "happy\n");
        let out = s.process_text(Metric::DotProduct, "happy\n\n\n").unwrap();
        assert_eq!(out, "happy");
    }

    #[test]
    fn new_rejects_empty_embeddings() {
        let e = table("happy,1.0\n");
        let r = VocabTable::from_word_list_reader(Cursor::new("missing\n"), &e).unwrap();
        // r has dims 1 but no entries; use it as the embeddings side
        assert!(matches!(
            Simplifier::new(r, e),
            Err(SimplifyError::EmptyVocabulary)
        ));
    }

    #[test]
    fn new_rejects_mismatched_table_dimensions() {
        let e = table("happy,1.0,0.0\n");
        let r = table("day,1.0\n");
        assert!(matches!(
            Simplifier::new(e, r),
            Err(SimplifyError::LengthMismatch(2, 1))
        ));
    }

    #[test]
    fn rank_orders_best_first_per_metric() {
        let s = engine(
            "query,1.0,0.0\nnear,0.9,0.1\nfar,0.0,5.0\n",
            "near\nfar\n",
        );
        let by_cosine = s.rank_replacements(Metric::Cosine, "query", 10).unwrap();
        assert_eq!(by_cosine[0].0, "near");
        let by_euclidean = s.rank_replacements(Metric::Euclidean, "query", 10).unwrap();
        assert_eq!(by_euclidean[0].0, "near");
        assert!(by_euclidean[0].1 < by_euclidean[1].1);
    }

    #[test]
    fn rank_truncates_and_handles_oov() {
        let s = engine(
            "query,1.0,0.0\na,0.9,0.1\nb,0.8,0.2\nc,0.7,0.3\n",
            "a\nb\nc\n",
        );
        assert_eq!(s.rank_replacements(Metric::Cosine, "query", 2).unwrap().len(), 2);
        assert!(s.rank_replacements(Metric::Cosine, "xyzzy", 2).unwrap().is_empty());
    }
}
