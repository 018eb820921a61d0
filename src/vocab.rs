use crate::error::{Result, SimplifyError};
use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// An immutable word-to-vector table holding vectors in a contiguous array.
///
/// Iteration order is insertion order, which is also the scan order the
/// substitution engine uses to break ties between equally-scored candidates.
#[derive(Debug)]
pub struct VocabTable {
    words: Vec<String>,               // vocabulary - index to word map
    word_map: HashMap<String, usize>, // word to index map
    vectors: Vec<f64>,                // A single, flattened Vec of all vector data
    dims: usize,                      // The dimension of each vector
}

impl VocabTable {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn contains(&self, word: &str) -> bool {
        self.word_map.contains_key(word)
    }

    /// The vector stored for `word`, if any. Lookup is case-sensitive.
    pub fn get(&self, word: &str) -> Option<&[f64]> {
        self.word_map
            .get(word)
            .map(|&idx| &self.vectors[idx * self.dims..(idx + 1) * self.dims])
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.words
            .iter()
            .enumerate()
            .map(|(idx, word)| (word.as_str(), &self.vectors[idx * self.dims..(idx + 1) * self.dims]))
    }

    /// Read a word-embeddings table from a comma-separated text file where
    /// the first field of each line is the word and the remaining fields are
    /// the vector components.
    pub fn from_csv_file(path: impl AsRef<Path>) -> Result<VocabTable> {
        let file = fs::File::open(path)?;
        Self::from_csv_reader(BufReader::new(file))
    }

    /// Same as [`VocabTable::from_csv_file`], from any buffered reader.
    ///
    /// Blank lines are skipped. The first record fixes the dimensionality;
    /// every later record must match it. A word appearing twice overwrites
    /// its earlier vector. An input with no records is an error.
    pub fn from_csv_reader<R: BufRead>(reader: R) -> Result<VocabTable> {
        let mut words: Vec<String> = Vec::new();
        let mut word_map: HashMap<String, usize> = HashMap::new();
        let mut vectors: Vec<f64> = Vec::new();
        let mut dims: usize = 0; // Dimension will be determined from the first record

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut parts = line.split(',');
            let Some(word) = parts.next() else {
                continue;
            };
            let word = word.trim().to_string();
            let values: Vec<f64> = parts
                .map(|s| s.trim().parse::<f64>())
                .collect::<std::result::Result<Vec<f64>, _>>()
                .map_err(|source| SimplifyError::ParseFloat {
                    line: index + 1,
                    source,
                })?;

            if words.is_empty() {
                dims = values.len();
                if dims == 0 {
                    return Err(SimplifyError::EmptyVector);
                }
            } else if values.len() != dims {
                return Err(SimplifyError::DimensionMismatch {
                    line: index + 1,
                    word,
                    found: values.len(),
                    expected: dims,
                });
            }

            match word_map.get(&word) {
                Some(&idx) => {
                    // Repeated word: replace the vector, keep the scan position
                    vectors[idx * dims..(idx + 1) * dims].copy_from_slice(&values);
                }
                None => {
                    word_map.insert(word.clone(), words.len());
                    words.push(word);
                    vectors.extend_from_slice(&values);
                }
            }
        }

        if words.is_empty() {
            return Err(SimplifyError::EmptyVocabulary);
        }

        Ok(VocabTable {
            words,
            word_map,
            vectors,
            dims,
        })
    }

    /// Build a restricted table from a one-word-per-line file, taking each
    /// word's vector from `embeddings`.
    pub fn from_word_list_file(path: impl AsRef<Path>, embeddings: &VocabTable) -> Result<VocabTable> {
        let file = fs::File::open(path)?;
        Self::from_word_list_reader(BufReader::new(file), embeddings)
    }

    /// Same as [`VocabTable::from_word_list_file`], from any buffered reader.
    ///
    /// Words without a vector in `embeddings` are skipped, as are blank
    /// lines and repeated words. The result may be empty.
    pub fn from_word_list_reader<R: BufRead>(reader: R, embeddings: &VocabTable) -> Result<VocabTable> {
        let mut words: Vec<String> = Vec::new();
        let mut word_map: HashMap<String, usize> = HashMap::new();
        let mut vectors: Vec<f64> = Vec::new();

        for line_result in reader.lines() {
            let line = line_result?;
            let word = line.trim();
            if word.is_empty() || word_map.contains_key(word) {
                continue;
            }
            let Some(vector) = embeddings.get(word) else {
                continue;
            };
            word_map.insert(word.to_string(), words.len());
            words.push(word.to_string());
            vectors.extend_from_slice(vector);
        }

        Ok(VocabTable {
            words,
            word_map,
            vectors,
            dims: embeddings.dims(),
        })
    }
}
