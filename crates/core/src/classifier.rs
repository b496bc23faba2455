//! Text classifier loaded from a serialized model file.
//!
//! The shipped model is a one-vs-rest NB-SVM over TF-IDF features. Anything that can map a batch
//! of texts to multi-hot label vectors can stand in for it through the [`Classifier`] trait.

use crate::tokenizer::tokenize;
use crate::{DashboardError, DashboardResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A pre-trained multi-label text classifier.
pub trait Classifier: Send + Sync {
    /// Category names the label vectors are aligned to.
    fn labels(&self) -> &[String];

    /// Predict one multi-hot label vector per input text.
    fn predict(&self, texts: &[&str]) -> DashboardResult<Vec<Vec<u8>>>;
}

/// One binary estimator of the one-vs-rest model.
#[derive(Clone, Debug, Deserialize)]
pub struct NbSvmEstimator {
    /// Naive Bayes log-count ratios, one per vocabulary term.
    pub ratios: Vec<f64>,
    /// Linear model weights, one per vocabulary term.
    pub weights: Vec<f64>,
    pub intercept: f64,
}

fn default_ngram_max() -> usize {
    1
}

/// One-vs-rest NB-SVM classifier over TF-IDF features.
#[derive(Clone, Debug, Deserialize)]
pub struct NbSvmModel {
    labels: Vec<String>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default = "default_ngram_max")]
    ngram_max: usize,
    estimators: Vec<NbSvmEstimator>,
}

impl NbSvmModel {
    /// Build a model from its parts, checking that every dimension lines up.
    pub fn new(
        labels: Vec<String>,
        vocabulary: HashMap<String, usize>,
        idf: Vec<f64>,
        ngram_max: usize,
        estimators: Vec<NbSvmEstimator>,
    ) -> DashboardResult<Self> {
        let model = Self {
            labels,
            vocabulary,
            idf,
            ngram_max,
            estimators,
        };
        model.validate()?;
        Ok(model)
    }

    /// Load and validate a model from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not a valid model document, or its
    /// dimensions are inconsistent.
    pub fn load(path: &Path) -> DashboardResult<Self> {
        let file = File::open(path).map_err(DashboardError::ModelRead)?;
        let model: Self = serde_json::from_reader(BufReader::new(file))
            .map_err(DashboardError::ModelDeserialization)?;
        model.validate()?;

        tracing::debug!(
            "loaded model with {} labels and {} terms from {}",
            model.labels.len(),
            model.vocabulary.len(),
            path.display()
        );
        Ok(model)
    }

    fn validate(&self) -> DashboardResult<()> {
        let terms = self.vocabulary.len();

        if self.ngram_max == 0 {
            return Err(DashboardError::InvalidModel(
                "ngram_max must be at least 1".into(),
            ));
        }
        if self.labels.len() != self.estimators.len() {
            return Err(DashboardError::InvalidModel(format!(
                "{} labels but {} estimators",
                self.labels.len(),
                self.estimators.len()
            )));
        }
        if self.idf.len() != terms {
            return Err(DashboardError::InvalidModel(format!(
                "idf has {} entries for {} vocabulary terms",
                self.idf.len(),
                terms
            )));
        }
        if let Some((term, index)) = self.vocabulary.iter().find(|(_, index)| **index >= terms) {
            return Err(DashboardError::InvalidModel(format!(
                "vocabulary index {index} for {term:?} is out of range"
            )));
        }
        for (label, estimator) in self.labels.iter().zip(&self.estimators) {
            if estimator.ratios.len() != terms || estimator.weights.len() != terms {
                return Err(DashboardError::InvalidModel(format!(
                    "estimator for {label:?} does not span the vocabulary"
                )));
            }
        }

        Ok(())
    }

    /// L2-normalised TF-IDF vector of `text`, as sparse `(term index, weight)` pairs.
    fn features(&self, text: &str) -> Vec<(usize, f64)> {
        let tokens = tokenize(text);

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for n in 1..=self.ngram_max {
            for gram in tokens.windows(n) {
                if let Some(&index) = self.vocabulary.get(&gram.join(" ")) {
                    *counts.entry(index).or_default() += 1.0;
                }
            }
        }

        let mut features: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, count)| (index, count * self.idf[index]))
            .collect();
        features.sort_by_key(|(index, _)| *index);

        let norm = features.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut features {
                *w /= norm;
            }
        }
        features
    }

    fn predict_one(&self, text: &str) -> Vec<u8> {
        let features = self.features(text);
        self.estimators
            .iter()
            .map(|estimator| {
                let score = features.iter().fold(estimator.intercept, |acc, &(i, x)| {
                    acc + x * estimator.ratios[i] * estimator.weights[i]
                });
                u8::from(score > 0.0)
            })
            .collect()
    }
}

impl Classifier for NbSvmModel {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn predict(&self, texts: &[&str]) -> DashboardResult<Vec<Vec<u8>>> {
        Ok(texts.iter().map(|text| self.predict_one(text)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Two labels: `water` fires on "water", `food` fires on "food" or "hungry people".
    fn model_json() -> serde_json::Value {
        serde_json::json!({
            "labels": ["water", "food"],
            "vocabulary": {"water": 0, "food": 1, "hungry people": 2},
            "idf": [1.0, 1.0, 2.0],
            "ngram_max": 2,
            "estimators": [
                {"ratios": [1.0, 0.0, 0.0], "weights": [2.0, 0.0, 0.0], "intercept": -0.5},
                {"ratios": [0.0, 1.0, 1.0], "weights": [0.0, 2.0, 2.0], "intercept": -0.5}
            ]
        })
    }

    fn model() -> NbSvmModel {
        let model: NbSvmModel = serde_json::from_value(model_json()).unwrap();
        model.validate().unwrap();
        model
    }

    #[test]
    fn predicts_one_vector_per_input() {
        let model = model();
        let out = model
            .predict(&["We need WATER", "food!", "hungry people here", ""])
            .unwrap();
        assert_eq!(out, vec![vec![1, 0], vec![0, 1], vec![0, 1], vec![0, 0]]);
    }

    #[test]
    fn prediction_is_deterministic() {
        let model = model();
        let query = ["water and food for hungry people"];
        assert_eq!(model.predict(&query).unwrap(), model.predict(&query).unwrap());
    }

    #[test]
    fn load_reads_model_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(model_json().to_string().as_bytes()).unwrap();

        let model = NbSvmModel::load(file.path()).unwrap();
        assert_eq!(model.labels(), ["water", "food"]);
    }

    #[test]
    fn load_rejects_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let err = NbSvmModel::load(&dir.path().join("absent.json")).expect_err("missing file");
        assert!(matches!(err, DashboardError::ModelRead(_)));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        let err = NbSvmModel::load(file.path()).expect_err("malformed file");
        assert!(matches!(err, DashboardError::ModelDeserialization(_)));
    }

    #[test]
    fn validate_rejects_inconsistent_dimensions() {
        let mut json = model_json();
        json["idf"] = serde_json::json!([1.0]);
        let model: NbSvmModel = serde_json::from_value(json).unwrap();
        assert!(matches!(model.validate(), Err(DashboardError::InvalidModel(_))));

        let mut json = model_json();
        json["labels"] = serde_json::json!(["water"]);
        let model: NbSvmModel = serde_json::from_value(json).unwrap();
        assert!(matches!(model.validate(), Err(DashboardError::InvalidModel(_))));

        let mut json = model_json();
        json["vocabulary"]["flood"] = serde_json::json!(9);
        let model: NbSvmModel = serde_json::from_value(json).unwrap();
        assert!(matches!(model.validate(), Err(DashboardError::InvalidModel(_))));
    }

    #[test]
    fn ngram_max_defaults_to_unigrams() {
        let mut json = model_json();
        json.as_object_mut().unwrap().remove("ngram_max");
        let model: NbSvmModel = serde_json::from_value(json).unwrap();
        // "hungry people" is only reachable as a bigram.
        assert_eq!(model.predict(&["hungry people"]).unwrap(), vec![vec![0, 0]]);
    }
}
