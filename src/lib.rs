//! Replace words in a text with their closest semantic match from a
//! restricted replacement vocabulary, using precomputed word embeddings
//! and a selectable similarity metric.

pub mod error;
pub mod similarity;
pub mod simplifier;
pub mod vocab;

pub use error::{Result, SimplifyError};
pub use similarity::Metric;
pub use simplifier::Simplifier;
pub use vocab::VocabTable;
