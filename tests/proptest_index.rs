//! Property tests for the dysbiosis index
//!
//! Random small tables over a five-token vocabulary, checked against a
//! direct dense computation.

use dysbiosis_index::prelude::*;
use nalgebra::DMatrix;
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

const VOCAB: &[&str] = &["a", "b", "c", "d", "e"];

#[derive(Debug, Clone)]
struct TableCase {
    values: Vec<Vec<u32>>,
    tokens: Vec<Vec<usize>>,
    n_samples: usize,
}

impl TableCase {
    fn metadata(&self) -> Vec<ObservationMetadata> {
        self.tokens
            .iter()
            .map(|toks| ObservationMetadata::new().with("taxonomy", toks.iter().map(|&t| VOCAB[t])))
            .collect()
    }

    fn sample_ids(&self) -> Vec<String> {
        (0..self.n_samples).map(|i| format!("S{}", i)).collect()
    }

    fn observation_ids(&self) -> Vec<String> {
        (0..self.values.len()).map(|i| format!("otu_{}", i)).collect()
    }

    fn dense(&self) -> DenseTable {
        let flat: Vec<f64> = self
            .values
            .iter()
            .flat_map(|row| row.iter().map(|&v| v as f64))
            .collect();
        let data = DMatrix::from_row_slice(self.values.len(), self.n_samples, &flat);
        DenseTable::new(data, self.observation_ids(), self.sample_ids(), self.metadata()).unwrap()
    }

    fn sparse(&self) -> AbundanceTable {
        let mut triplets = Vec::new();
        for (row, values) in self.values.iter().enumerate() {
            for (col, &v) in values.iter().enumerate() {
                if v > 0 {
                    triplets.push((row, col, v as f64));
                }
            }
        }
        AbundanceTable::from_triplets(&triplets, self.observation_ids(), self.sample_ids(), self.metadata())
            .unwrap()
    }

    fn group_sum(&self, members: &HashSet<String>, col: usize) -> f64 {
        self.values
            .iter()
            .zip(&self.tokens)
            .filter(|(_, toks)| toks.iter().any(|&t| members.contains(VOCAB[t])))
            .map(|(row, _)| row[col] as f64)
            .sum()
    }

    fn any_match(&self, members: &HashSet<String>) -> bool {
        self.tokens
            .iter()
            .any(|toks| toks.iter().any(|&t| members.contains(VOCAB[t])))
    }
}

fn arb_case() -> impl Strategy<Value = TableCase> {
    (1usize..8, 1usize..6).prop_flat_map(|(n_obs, n_samples)| {
        (
            vec(vec(0u32..50, n_samples), n_obs),
            vec(vec(0usize..VOCAB.len(), 1..3), n_obs),
        )
            .prop_map(move |(values, tokens)| TableCase {
                values,
                tokens,
                n_samples,
            })
    })
}

fn arb_members() -> impl Strategy<Value = HashSet<String>> {
    vec(0usize..VOCAB.len(), 0..3)
        .prop_map(|idx| idx.into_iter().map(|i| VOCAB[i].to_string()).collect())
}

fn same_score(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b || (a - b).abs() < 1e-9
}

fn scores<T: ObservationTable>(
    table: &T,
    increased: &HashSet<String>,
    decreased: &HashSet<String>,
) -> Result<HashMap<String, f64>> {
    Ok(compute_index(table, increased, decreased, "taxonomy")?
        .map(|s| (s.sample_id, s.score))
        .collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Errors exactly when a group matches nothing; otherwise one score per sample
    #[test]
    fn matches_direct_computation(case in arb_case(), inc in arb_members(), dec in arb_members()) {
        let table = case.sparse();
        let result = scores(&table, &inc, &dec);

        if !case.any_match(&inc) {
            prop_assert!(matches!(result, Err(DysbiosisError::EmptyGroup(Group::Increased))));
        } else if !case.any_match(&dec) {
            prop_assert!(matches!(result, Err(DysbiosisError::EmptyGroup(Group::Decreased))));
        } else {
            let result = result.unwrap();
            prop_assert_eq!(result.len(), case.n_samples);
            for col in 0..case.n_samples {
                let inc_sum = case.group_sum(&inc, col);
                let dec_sum = case.group_sum(&dec, col);
                let score = result[&format!("S{}", col)];
                if dec_sum == 0.0 {
                    prop_assert!(score.is_nan());
                } else {
                    prop_assert!(same_score(score, (inc_sum / dec_sum).ln()));
                }
            }
        }
    }

    /// Two calls with identical inputs agree as sets
    #[test]
    fn idempotent(case in arb_case(), inc in arb_members(), dec in arb_members()) {
        let table = case.sparse();
        match (scores(&table, &inc, &dec), scores(&table, &inc, &dec)) {
            (Ok(first), Ok(second)) => {
                prop_assert_eq!(first.len(), second.len());
                for (id, score) in &first {
                    prop_assert!(same_score(*score, second[id]));
                }
            }
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "calls disagreed on success"),
        }
    }

    /// Sparse and dense storage give the same scores
    #[test]
    fn storage_independent(case in arb_case(), inc in arb_members(), dec in arb_members()) {
        let sparse = scores(&case.sparse(), &inc, &dec);
        let dense = scores(&case.dense(), &inc, &dec);
        match (sparse, dense) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.len(), b.len());
                for (id, score) in &a {
                    prop_assert!(same_score(*score, b[id]));
                }
            }
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "storage layouts disagreed on success"),
        }
    }

    /// A key absent from the first observation always fails, whatever the sets
    #[test]
    fn missing_key_always_fails(case in arb_case(), inc in arb_members(), dec in arb_members()) {
        let table = case.sparse();
        let result = compute_index(&table, &inc, &dec, "foo");
        prop_assert!(matches!(result, Err(DysbiosisError::MissingKey(_))));
    }
}
