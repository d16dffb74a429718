//! TF-IDF vectorization over normalized token strings.
//!
//! The vectorizer learns a vocabulary from the train partition only; the
//! resulting [`FittedTfidf`] transforms any partition against that shared
//! vocabulary, so train and test feature columns always align.

use std::collections::HashMap;

/// Learns a bounded vocabulary from a document collection, producing a
/// [`FittedTfidf`] for transforming partitions into feature matrices.
#[derive(Clone, Debug, Default)]
pub struct TfidfVectorizer {
    max_features: Option<usize>,
}

impl TfidfVectorizer {
    /// Vectorizer with an unbounded vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the vocabulary to the `max_features` terms with the highest
    /// corpus term counts (ties broken alphabetically).
    pub fn max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    /// Learn vocabulary and inverse document frequencies from `docs`.
    ///
    /// Documents are expected to be normalized token strings; tokens are
    /// whitespace-separated. Vocabulary columns are ordered alphabetically.
    pub fn fit<S: AsRef<str>>(&self, docs: &[S]) -> FittedTfidf {
        // term -> (corpus term count, document frequency)
        let mut stats: HashMap<String, (usize, usize)> = HashMap::new();
        for doc in docs {
            let mut doc_counts: HashMap<&str, usize> = HashMap::new();
            for token in doc.as_ref().split_whitespace() {
                *doc_counts.entry(token).or_insert(0) += 1;
            }
            for (token, count) in doc_counts {
                let entry = stats.entry(token.to_string()).or_insert((0, 0));
                entry.0 += count;
                entry.1 += 1;
            }
        }

        let mut terms: Vec<(String, usize, usize)> = stats
            .into_iter()
            .map(|(term, (count, df))| (term, count, df))
            .collect();
        if let Some(max_features) = self.max_features {
            if terms.len() > max_features {
                terms.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                terms.truncate(max_features);
            }
        }
        terms.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let n_docs = docs.len();
        let mut vocabulary = Vec::with_capacity(terms.len());
        let mut index = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (position, (term, _, df)) in terms.into_iter().enumerate() {
            index.insert(term.clone(), position);
            vocabulary.push(term);
            // Smoothed idf; the +1 terms act as one synthetic document
            // containing every vocabulary entry.
            idf.push(((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0);
        }

        FittedTfidf {
            vocabulary,
            index,
            idf,
        }
    }
}

/// A fitted vocabulary with per-term inverse document frequencies.
#[derive(Clone, Debug)]
pub struct FittedTfidf {
    vocabulary: Vec<String>,
    index: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl FittedTfidf {
    /// Vocabulary entries in column order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Number of feature columns produced per document.
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// Transform `docs` into a dense matrix with one row per document and one
    /// column per vocabulary entry. Rows are L2-normalized; out-of-vocabulary
    /// tokens are ignored and all-zero rows stay zero.
    pub fn transform<S: AsRef<str>>(&self, docs: &[S]) -> Vec<Vec<f64>> {
        docs.iter()
            .map(|doc| {
                let mut row = vec![0.0_f64; self.vocabulary.len()];
                for token in doc.as_ref().split_whitespace() {
                    if let Some(&position) = self.index.get(token) {
                        row[position] += 1.0;
                    }
                }
                for (value, idf) in row.iter_mut().zip(&self.idf) {
                    *value *= idf;
                }
                let norm = row.iter().map(|value| value * value).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for value in &mut row {
                        *value /= norm;
                    }
                }
                row
            })
            .collect()
    }
}
