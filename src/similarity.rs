use crate::error::{Result, SimplifyError};
use std::fmt;
use std::str::FromStr;

/// Norm below this is treated as a zero vector.
const EPS: f64 = 1e-8;

/// Similarity strategy for comparing two word vectors.
///
/// Dot product and cosine score higher for more similar vectors; Euclidean
/// distance scores lower. Callers should not compare raw scores across
/// metrics - use [`Metric::improves`] to rank candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    DotProduct,
    Cosine,
    Euclidean,
}

impl Metric {
    /// Score the similarity of two equal-length vectors.
    ///
    /// Both vectors must be non-empty and of the same length. Cosine
    /// similarity additionally requires both vectors to have non-zero
    /// magnitude and signals [`SimplifyError::ZeroMagnitude`] otherwise,
    /// rather than dividing by zero.
    pub fn score(self, a: &[f64], b: &[f64]) -> Result<f64> {
        validate(a, b)?;
        match self {
            Metric::DotProduct => Ok(dot(a, b)),
            Metric::Cosine => {
                let norm_a = norm(a);
                let norm_b = norm(b);
                if norm_a < EPS || norm_b < EPS {
                    return Err(SimplifyError::ZeroMagnitude);
                }
                Ok(dot(a, b) / (norm_a * norm_b))
            }
            Metric::Euclidean => {
                let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
                Ok(sum.sqrt())
            }
        }
    }

    /// Whether `candidate` is strictly better than `incumbent` under this
    /// metric. Strict comparison means ties keep the incumbent.
    pub fn improves(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Metric::DotProduct | Metric::Cosine => candidate > incumbent,
            Metric::Euclidean => candidate < incumbent,
        }
    }

    /// Starting score that any real candidate beats.
    pub fn initial_best(self) -> f64 {
        match self {
            Metric::DotProduct | Metric::Cosine => f64::NEG_INFINITY,
            Metric::Euclidean => f64::INFINITY,
        }
    }
}

fn validate(a: &[f64], b: &[f64]) -> Result<()> {
    if a.is_empty() || b.is_empty() {
        return Err(SimplifyError::EmptyVector);
    }
    if a.len() != b.len() {
        return Err(SimplifyError::LengthMismatch(a.len(), b.len()));
    }
    Ok(())
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn norm(a: &[f64]) -> f64 {
    a.iter().map(|x| x * x).sum::<f64>().sqrt()
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::DotProduct => "dot-product",
            Metric::Cosine => "cosine",
            Metric::Euclidean => "euclidean",
        };
        f.write_str(name)
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dot" | "dot-product" => Ok(Metric::DotProduct),
            "cosine" => Ok(Metric::Cosine),
            "euclidean" => Ok(Metric::Euclidean),
            other => Err(format!(
                "unknown metric '{other}', expected one of: dot-product, cosine, euclidean"
            )),
        }
    }
}
