use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

use crate::domain::{common::entities::app_errors::CoreError, prakriti::ports::DoshaModel};

/// Marker for "no child" in the exported node arrays.
const LEAF: i64 = -1;

/// One exported decision tree, stored as parallel node arrays.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights, one row per node.
    pub value: Vec<Vec<f64>>,
}

/// A fitted random forest exported to JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RandomForest {
    #[serde(deserialize_with = "class_labels")]
    pub classes: Vec<String>,
    pub trees: Vec<DecisionTree>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn check_shape(&self, index: usize, class_count: usize) -> Result<(), CoreError> {
        let nodes = self.node_count();
        if nodes == 0 {
            return Err(malformed(index, "tree has no nodes"));
        }
        if self.children_right.len() != nodes
            || self.feature.len() != nodes
            || self.threshold.len() != nodes
            || self.value.len() != nodes
        {
            return Err(malformed(index, "node arrays have different lengths"));
        }
        if self.value.iter().any(|row| row.len() != class_count) {
            return Err(malformed(
                index,
                &format!("leaf values must have {} entries", class_count),
            ));
        }
        Ok(())
    }

    /// Walk from the root to a leaf and return the normalized class distribution.
    fn leaf_distribution(&self, index: usize, features: &[f64]) -> Result<Vec<f64>, CoreError> {
        let nodes = self.node_count();
        let mut node = 0usize;

        // A well-formed tree reaches a leaf in fewer steps than it has nodes.
        for _ in 0..=nodes {
            let left = self.children_left[node];
            let right = self.children_right[node];

            if left == LEAF && right == LEAF {
                return Ok(normalize(&self.value[node]));
            }

            let feature = usize::try_from(self.feature[node])
                .ok()
                .filter(|f| *f < features.len())
                .ok_or_else(|| {
                    malformed(
                        index,
                        &format!("node {} splits on unknown feature {}", node, self.feature[node]),
                    )
                })?;

            let next = if features[feature] <= self.threshold[node] {
                left
            } else {
                right
            };

            node = usize::try_from(next)
                .ok()
                .filter(|n| *n < nodes)
                .ok_or_else(|| {
                    malformed(index, &format!("node {} points at missing child {}", node, next))
                })?;
        }

        Err(malformed(index, "traversal did not reach a leaf"))
    }
}

impl RandomForest {
    /// Check the forest is internally consistent. Called once at load time.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.classes.is_empty() {
            return Err(CoreError::ClassifierError(
                "random forest has no classes".to_string(),
            ));
        }
        if self.trees.is_empty() {
            return Err(CoreError::ClassifierError(
                "random forest has no trees".to_string(),
            ));
        }
        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(index, tree)| tree.check_shape(index, self.classes.len()))
    }

    /// Mean of the per-tree leaf probabilities.
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, CoreError> {
        let mut totals = vec![0.0; self.classes.len()];

        for (index, tree) in self.trees.iter().enumerate() {
            tree.check_shape(index, self.classes.len())?;
            let distribution = tree.leaf_distribution(index, features)?;
            totals
                .iter_mut()
                .zip(distribution)
                .for_each(|(total, p)| *total += p);
        }

        let count = self.trees.len().max(1) as f64;
        Ok(totals.into_iter().map(|total| total / count).collect())
    }
}

impl DoshaModel for RandomForest {
    fn predict(&self, features: &[f64]) -> Result<String, CoreError> {
        let probabilities = self.predict_proba(features)?;

        // Ties resolve to the lowest class index.
        let best = probabilities
            .iter()
            .enumerate()
            .fold(None::<(usize, f64)>, |best, (idx, &p)| match best {
                Some((_, top)) if p <= top => best,
                _ => Some((idx, p)),
            })
            .map(|(idx, _)| idx)
            .ok_or_else(|| CoreError::ClassifierError("random forest has no classes".into()))?;

        Ok(self.classes[best].clone())
    }
}

fn normalize(row: &[f64]) -> Vec<f64> {
    let sum: f64 = row.iter().sum();
    if sum > 0.0 {
        row.iter().map(|v| v / sum).collect()
    } else {
        vec![0.0; row.len()]
    }
}

fn malformed(tree: usize, reason: &str) -> CoreError {
    CoreError::ClassifierError(format!("malformed tree {}: {}", tree, reason))
}

/// Class labels may be exported as strings or as integer ids.
fn class_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    values
        .into_iter()
        .map(|value| match value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(match n.as_f64() {
                Some(f) if f.fract() == 0.0 && n.as_i64().is_none() => format!("{}", f as i64),
                _ => n.to_string(),
            }),
            other => Err(D::Error::custom(format!("invalid class label: {}", other))),
        })
        .collect()
}
