use std::collections::{BTreeMap, HashMap};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"\b\w\w+\b").unwrap();
}

/// Sparse TF-IDF matrix over a set of documents.
///
/// Follows the usual vectorizer defaults: lower-cased tokens of two or more
/// word characters, raw term counts, smoothed idf `ln((1 + n) / (1 + df)) + 1`
/// and L2-normalised rows.
#[derive(Debug, Default)]
pub struct TfIdf {
    /// sorted vocabulary, a term's position is its column
    pub vocabulary: Vec<String>,
    pub idf: Vec<f64>,
    /// one row per document, `(column, weight)` sorted by column
    pub rows: Vec<Vec<(usize, f64)>>,
}

fn tokenize(document: &str) -> impl Iterator<Item = String> + '_ {
    TOKEN.find_iter(document).map(|m| m.as_str().to_lowercase())
}

impl TfIdf {
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let counts: Vec<BTreeMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut terms = BTreeMap::new();
                for token in tokenize(doc.as_ref()) {
                    *terms.entry(token).or_insert(0) += 1;
                }
                terms
            })
            .collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for terms in &counts {
            for term in terms.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let vocabulary: Vec<String> = document_frequency.keys().map(|t| t.to_string()).collect();
        let idf: Vec<f64> = document_frequency
            .values()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
        let column: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();

        let rows = counts
            .iter()
            .map(|terms| {
                let mut row: Vec<(usize, f64)> = terms
                    .iter()
                    .map(|(term, &count)| {
                        let col = column[term.as_str()];
                        (col, count as f64 * idf[col])
                    })
                    .collect();
                let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row.iter_mut().for_each(|(_, w)| *w /= norm);
                }
                row.sort_by_key(|(col, _)| *col);
                row
            })
            .collect();

        TfIdf {
            vocabulary,
            idf,
            rows,
        }
    }

    /// Terms with the highest weight summed over all documents
    pub fn top_terms(&self, n: usize) -> Vec<(&str, f64)> {
        let mut totals = vec![0.0; self.vocabulary.len()];
        for row in &self.rows {
            for &(col, weight) in row {
                totals[col] += weight;
            }
        }
        let mut terms: Vec<(&str, f64)> = self
            .vocabulary
            .iter()
            .map(String::as_str)
            .zip(totals)
            .collect();
        terms.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms.truncate(n);
        terms
    }
}
