//! Result types for the dysbiosis index.

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Index score for a single sample.
///
/// `score` is the natural log of increased over decreased abundance. It is
/// NaN when the decreased abundance is zero and `-inf` when only the
/// increased abundance is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexScore {
    /// Sample identifier.
    pub sample_id: String,
    /// Log-ratio score. Non-finite values serialize as `"NaN"`, `"inf"` or `"-inf"`.
    #[serde(with = "score_repr")]
    pub score: f64,
}

impl IndexScore {
    /// Create a new score.
    pub fn new(sample_id: impl Into<String>, score: f64) -> Self {
        Self {
            sample_id: sample_id.into(),
            score,
        }
    }

    /// False when the score is NaN.
    pub fn is_defined(&self) -> bool {
        !self.score.is_nan()
    }
}

impl From<IndexScore> for (String, f64) {
    fn from(s: IndexScore) -> Self {
        (s.sample_id, s.score)
    }
}

/// Collection of per-sample index scores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexResultSet {
    /// Scores in emission order.
    pub scores: Vec<IndexScore>,
}

impl IndexResultSet {
    /// Create a new result set.
    pub fn new(scores: Vec<IndexScore>) -> Self {
        Self { scores }
    }

    /// Number of scores.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Look up the score for a sample.
    pub fn get(&self, sample_id: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|s| s.sample_id == sample_id)
            .map(|s| s.score)
    }

    /// Iterate over scores.
    pub fn iter(&self) -> impl Iterator<Item = &IndexScore> {
        self.scores.iter()
    }

    /// Scores that are not NaN.
    pub fn defined(&self) -> Vec<&IndexScore> {
        self.scores.iter().filter(|s| s.is_defined()).collect()
    }

    /// Scores sorted ascending, NaN last.
    pub fn sorted_by_score(&self) -> Vec<&IndexScore> {
        let mut sorted: Vec<_> = self.scores.iter().collect();
        sorted.sort_by(|a, b| match (a.score.is_nan(), b.score.is_nan()) {
            (true, true) => std::cmp::Ordering::Equal,
            (true, false) => std::cmp::Ordering::Greater,
            (false, true) => std::cmp::Ordering::Less,
            (false, false) => a.score.total_cmp(&b.score),
        });
        sorted
    }

    /// Summary statistics over the result set.
    pub fn summary(&self) -> IndexSummary {
        let finite: Vec<f64> = self
            .scores
            .iter()
            .map(|s| s.score)
            .filter(|v| v.is_finite())
            .collect();

        let (mean, min, max) = if finite.is_empty() {
            (f64::NAN, f64::NAN, f64::NAN)
        } else {
            (
                finite.iter().sum::<f64>() / finite.len() as f64,
                finite.iter().copied().fold(f64::INFINITY, f64::min),
                finite.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            )
        };

        IndexSummary {
            total: self.len(),
            defined: self.scores.iter().filter(|s| s.is_defined()).count(),
            undefined: self.scores.iter().filter(|s| !s.is_defined()).count(),
            negative_infinite: self
                .scores
                .iter()
                .filter(|s| s.score == f64::NEG_INFINITY)
                .count(),
            mean,
            min,
            max,
        }
    }

    /// Write scores to a TSV file.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "sample_id\tscore")?;
        for s in &self.scores {
            writeln!(writer, "{}\t{}", s.sample_id, s.score)?;
        }
        writer.flush()?;

        Ok(())
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON string written by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FromIterator<IndexScore> for IndexResultSet {
    fn from_iter<I: IntoIterator<Item = IndexScore>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for IndexResultSet {
    type Item = IndexScore;
    type IntoIter = std::vec::IntoIter<IndexScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.scores.into_iter()
    }
}

/// Score representation that survives formats without NaN or infinity.
mod score_repr {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(score: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if score.is_nan() {
            serializer.serialize_str("NaN")
        } else if *score == f64::INFINITY {
            serializer.serialize_str("inf")
        } else if *score == f64::NEG_INFINITY {
            serializer.serialize_str("-inf")
        } else {
            serializer.serialize_f64(*score)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(v),
            Repr::Text(s) => match s.as_str() {
                "NaN" | "nan" => Ok(f64::NAN),
                "inf" | "+inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(serde::de::Error::custom(format!("invalid score '{}'", other))),
            },
        }
    }
}

/// Summary statistics for a result set. `mean`, `min` and `max` are taken
/// over finite scores only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSummary {
    pub total: usize,
    pub defined: usize,
    pub undefined: usize,
    pub negative_infinite: usize,
    #[serde(with = "score_repr")]
    pub mean: f64,
    #[serde(with = "score_repr")]
    pub min: f64,
    #[serde(with = "score_repr")]
    pub max: f64,
}

impl std::fmt::Display for IndexSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Samples scored:      {}", self.total)?;
        writeln!(f, "  Defined:           {}", self.defined)?;
        writeln!(f, "  Undefined (NaN):   {}", self.undefined)?;
        writeln!(f, "  Negative infinity: {}", self.negative_infinite)?;
        writeln!(f, "Mean (finite):       {:.4}", self.mean)?;
        writeln!(f, "Range (finite):      [{:.4}, {:.4}]", self.min, self.max)?;
        Ok(())
    }
}
