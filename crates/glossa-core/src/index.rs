//! TF-IDF vector space over the source side of the corpus
//!
//! Weights follow the usual smoothed scheme: `idf(t) = ln((1 + n) / (1 + df(t))) + 1`,
//! raw term counts, l2-normalised rows. Cosine similarity is then a dot product,
//! computed through per-term posting lists.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Two or more word characters
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid token pattern"));

#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    /// term id -> (document id, weight), document ids ascending
    postings: Vec<Vec<(usize, f32)>>,
    documents: usize,
}

impl SimilarityIndex {
    /// Fit the vocabulary and idf weights on `sentences` and vectorise them
    pub fn build<S: AsRef<str>>(sentences: &[S]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_terms: Vec<Vec<(usize, u32)>> = Vec::with_capacity(sentences.len());
        let mut df: Vec<u32> = Vec::new();

        for sentence in sentences {
            let mut counts: HashMap<usize, u32> = HashMap::new();
            for term in analyze(sentence.as_ref()) {
                let next_id = vocabulary.len();
                let id = *vocabulary.entry(term).or_insert(next_id);
                if id == df.len() {
                    df.push(0);
                }
                *counts.entry(id).or_insert(0) += 1;
            }
            for id in counts.keys() {
                df[*id] += 1;
            }
            let mut counts: Vec<_> = counts.into_iter().collect();
            counts.sort_unstable_by_key(|(id, _)| *id);
            doc_terms.push(counts);
        }

        let n = sentences.len() as f32;
        let idf: Vec<f32> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f32)).ln() + 1.0)
            .collect();

        let mut postings = vec![Vec::new(); idf.len()];
        for (doc, terms) in doc_terms.into_iter().enumerate() {
            for (id, weight) in weigh(terms, &idf) {
                postings[id].push((doc, weight));
            }
        }

        tracing::info!(
            "Built similarity index: {} sentences, {} terms",
            sentences.len(),
            idf.len()
        );

        Self {
            vocabulary,
            idf,
            postings,
            documents: sentences.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.documents
    }

    pub fn is_empty(&self) -> bool {
        self.documents == 0
    }

    /// Cosine similarity of `text` against every indexed sentence
    pub fn scores(&self, text: &str) -> Vec<f32> {
        let mut scores = vec![0.0f32; self.documents];
        for (id, query_weight) in self.vectorize(text) {
            for &(doc, doc_weight) in &self.postings[id] {
                scores[doc] += query_weight * doc_weight;
            }
        }
        scores
    }

    /// Best-matching sentence index and its similarity
    ///
    /// Ties resolve to the lowest index. A query with no known terms scores 0
    /// everywhere and so returns index 0. `None` only when the index is empty.
    pub fn query(&self, text: &str) -> Option<(usize, f32)> {
        let scores = self.scores(text);

        let mut best: Option<(usize, f32)> = None;
        for (index, score) in scores.into_iter().enumerate() {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((index, score)),
            }
        }

        best.map(|(index, score)| (index, score.clamp(0.0, 1.0)))
    }

    /// Query vector under the fixed vocabulary, sorted by term id
    fn vectorize(&self, text: &str) -> Vec<(usize, f32)> {
        let mut counts: HashMap<usize, u32> = HashMap::new();
        for term in analyze(text) {
            if let Some(&id) = self.vocabulary.get(&term) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }

        let mut counts: Vec<_> = counts.into_iter().collect();
        counts.sort_unstable_by_key(|(id, _)| *id);
        weigh(counts, &self.idf)
    }
}

/// Fold, lowercase and split into terms
fn analyze(text: &str) -> Vec<String> {
    let folded: String = text.nfkc().collect::<String>().to_lowercase();
    TOKEN
        .find_iter(&folded)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// tf * idf, l2-normalised. All-zero input stays empty.
fn weigh(counts: Vec<(usize, u32)>, idf: &[f32]) -> Vec<(usize, f32)> {
    let weighted: Vec<(usize, f32)> = counts
        .into_iter()
        .map(|(id, count)| (id, count as f32 * idf[id]))
        .collect();

    let norm = weighted.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
    if norm == 0.0 {
        return Vec::new();
    }

    weighted.into_iter().map(|(id, w)| (id, w / norm)).collect()
}
