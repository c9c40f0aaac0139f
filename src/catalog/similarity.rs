use regex::Regex;
use std::collections::HashMap;

/// Bag-of-words index: each document becomes a sparse term-count vector and
/// documents are compared by cosine similarity.
#[derive(Debug, Clone, Default)]
pub struct SimilarityIndex {
    vectors: Vec<TermVector>,
}

#[derive(Debug, Clone, Default)]
struct TermVector {
    counts: HashMap<u32, u32>,
    norm: f64,
}

impl TermVector {
    fn dot(&self, other: &TermVector) -> f64 {
        let (small, large) = if self.counts.len() <= other.counts.len() {
            (&self.counts, &other.counts)
        } else {
            (&other.counts, &self.counts)
        };
        small
            .iter()
            .filter_map(|(term, a)| large.get(term).map(|b| (*a as f64) * (*b as f64)))
            .sum()
    }

    fn cosine(&self, other: &TermVector) -> f64 {
        if self.norm == 0.0 || other.norm == 0.0 {
            return 0.0;
        }
        self.dot(other) / (self.norm * other.norm)
    }
}

impl SimilarityIndex {
    pub fn build<'a>(documents: impl IntoIterator<Item = &'a str>) -> Self {
        // Tokens are runs of two or more word characters, lowercased.
        let token = Regex::new(r"\b\w\w+\b").expect("static token pattern");
        let mut vocabulary: HashMap<String, u32> = HashMap::new();

        let vectors = documents
            .into_iter()
            .map(|doc| {
                let lower = doc.to_lowercase();
                let mut counts: HashMap<u32, u32> = HashMap::new();
                for m in token.find_iter(&lower) {
                    let next_id = vocabulary.len() as u32;
                    let id = *vocabulary.entry(m.as_str().to_string()).or_insert(next_id);
                    *counts.entry(id).or_insert(0) += 1;
                }
                let norm = counts
                    .values()
                    .map(|c| (*c as f64) * (*c as f64))
                    .sum::<f64>()
                    .sqrt();
                TermVector { counts, norm }
            })
            .collect();

        Self { vectors }
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Cosine similarity of `row` against every document, in document order.
    pub fn scores(&self, row: usize) -> Vec<f64> {
        match self.vectors.get(row) {
            Some(target) => self.vectors.iter().map(|v| target.cosine(v)).collect(),
            None => Vec::new(),
        }
    }

    /// Documents ranked by similarity to `row`, best first. Ties keep
    /// document order. The top entry (normally `row` itself) is skipped.
    pub fn most_similar(&self, row: usize, limit: usize) -> Vec<usize> {
        let mut ranked: Vec<(usize, f64)> = self.scores(row).into_iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.into_iter().skip(1).take(limit).map(|(i, _)| i).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_documents_score_one() {
        let index = SimilarityIndex::build(["action hero explosion", "action hero explosion"]);
        let scores = index.scores(0);
        assert!((scores[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_character_tokens_ignored() {
        let index = SimilarityIndex::build(["a b c", "a b c"]);
        assert_eq!(index.scores(0), vec![0.0, 0.0]);
    }

    #[test]
    fn test_most_similar_ranks_and_skips_self() {
        let index = SimilarityIndex::build([
            "space opera jedi empire",
            "romance paris",
            "space opera empire rebels",
            "space station",
        ]);
        assert_eq!(index.most_similar(0, 10), vec![2, 3, 1]);
        assert_eq!(index.most_similar(0, 1), vec![2]);
    }

    #[test]
    fn test_ties_keep_document_order() {
        let index = SimilarityIndex::build(["drama", "comedy", "horror", "western"]);
        assert_eq!(index.most_similar(0, 10), vec![1, 2, 3]);
    }

    #[test]
    fn test_out_of_range_row() {
        let index = SimilarityIndex::build(["drama"]);
        assert!(index.scores(5).is_empty());
        assert!(index.most_similar(5, 3).is_empty());
    }
}
