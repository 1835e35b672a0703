//! Lexical chunk retrieval (BM25)

use super::corpus::Chunk;
use std::collections::HashMap;

const K1: f32 = 1.2;
const B: f32 = 0.75;

pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

pub struct ChunkIndex {
    chunks: Vec<Chunk>,
    tokens: Vec<Vec<String>>,
    doc_freq: HashMap<String, usize>,
    avg_len: f32,
}

impl ChunkIndex {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        let tokens: Vec<Vec<String>> = chunks.iter().map(|c| tokenize(&c.text)).collect();

        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for chunk_tokens in &tokens {
            let mut seen: Vec<&String> = chunk_tokens.iter().collect();
            seen.sort();
            seen.dedup();
            for token in seen {
                *doc_freq.entry(token.clone()).or_insert(0) += 1;
            }
        }

        let total_len: usize = tokens.iter().map(Vec::len).sum();
        let avg_len = if tokens.is_empty() {
            0.0
        } else {
            total_len as f32 / tokens.len() as f32
        };

        Self {
            chunks,
            tokens,
            doc_freq,
            avg_len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Up to `k` chunks with a positive score for `query`, best first.
    pub fn retrieve(&self, query: &str, k: usize) -> Vec<&Chunk> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() || k == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f32)> = self
            .tokens
            .iter()
            .enumerate()
            .map(|(i, doc)| (i, self.score(&query_tokens, doc)))
            .filter(|(_, score)| *score > 0.0)
            .collect();

        // ties keep corpus order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(k);

        scored.into_iter().map(|(i, _)| &self.chunks[i]).collect()
    }

    fn score(&self, query_tokens: &[String], doc_tokens: &[String]) -> f32 {
        if doc_tokens.is_empty() || self.avg_len <= f32::EPSILON {
            return 0.0;
        }

        let mut tf: HashMap<&str, usize> = HashMap::new();
        for token in doc_tokens {
            *tf.entry(token.as_str()).or_insert(0) += 1;
        }

        let total_docs = self.chunks.len() as f32;
        let doc_len = doc_tokens.len() as f32;

        let mut score = 0.0_f32;
        for token in query_tokens {
            let term_tf = tf.get(token.as_str()).copied().unwrap_or(0) as f32;
            if term_tf <= 0.0 {
                continue;
            }
            let df = self.doc_freq.get(token).copied().unwrap_or(0) as f32;
            let idf = (((total_docs - df + 0.5) / (df + 0.5)) + 1.0).ln();
            let denom = term_tf + K1 * (1.0 - B + B * (doc_len / self.avg_len));
            score += idf * ((term_tf * (K1 + 1.0)) / denom.max(f32::EPSILON));
        }
        score.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str) -> Chunk {
        Chunk {
            source: "policy.txt".to_string(),
            text: text.to_string(),
        }
    }

    fn sample_index() -> ChunkIndex {
        ChunkIndex::new(vec![
            chunk("We will expand public transport and build new railway lines."),
            chunk("Income taxes for ordinary workers shall be cut, funded by a wealth tax."),
            chunk("Kindergarten fees will be capped for all families."),
            chunk("Taxes on fuel are to be kept stable."),
        ])
    }

    #[test]
    fn test_tokenize_lowercases_and_strips_punctuation() {
        assert_eq!(
            tokenize("Taxes were cut by 10%."),
            vec!["taxes", "were", "cut", "by", "10"]
        );
    }

    #[test]
    fn test_best_match_first() {
        let index = sample_index();
        let hits = index.retrieve("Income taxes were cut", 7);
        assert!(!hits.is_empty());
        assert!(hits[0].text.starts_with("Income taxes"));
        assert!(hits.iter().all(|c| !c.text.contains("Kindergarten")));
    }

    #[test]
    fn test_respects_k() {
        let index = sample_index();
        assert_eq!(index.retrieve("taxes", 1).len(), 1);
        assert!(index.retrieve("taxes", 7).len() <= 7);
    }

    #[test]
    fn test_no_overlap_no_hits() {
        let index = sample_index();
        assert!(index.retrieve("submarines", 7).is_empty());
        assert!(index.retrieve("   ", 7).is_empty());
    }

    #[test]
    fn test_empty_index() {
        let index = ChunkIndex::new(Vec::new());
        assert!(index.is_empty());
        assert!(index.retrieve("taxes", 3).is_empty());
    }
}
