use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^a-zA-Z0-9\x{4e00}-\x{9fa5}]").unwrap();
    static ref WORD: Regex = Regex::new(r"\w[\w']+").unwrap();
    static ref STOPWORDS: HashSet<&'static str> = [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
        "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
        "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down",
        "during", "each", "else", "ever", "few", "for", "from", "further", "get", "had", "has",
        "have", "having", "he", "her", "here", "hers", "herself", "him", "himself", "his",
        "how", "however", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
        "more", "most", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only",
        "or", "other", "otherwise", "ought", "our", "ours", "ourselves", "out", "over", "own",
        "same", "shall", "she", "should", "so", "some", "such", "than", "that", "the",
        "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
        "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were",
        "what", "when", "where", "which", "while", "who", "whom", "why", "with", "would",
        "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect();
}

/// Keep only the words of at most `max_length` characters.
/// Everything but ASCII letters, digits and CJK ideographs separates words.
pub fn shorten_keywords(text: &str, max_length: usize) -> String {
    let cleaned = NON_WORD.replace_all(text, " ");
    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() <= max_length)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Word counts for a cloud, most frequent first, stopwords and plain
/// numbers removed. Case variants are counted together and shown in the form
/// seen first.
pub fn word_frequencies(text: &str) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, (String, usize)> = HashMap::new();
    for m in WORD.find_iter(text) {
        let word = m.as_str();
        let word = word
            .strip_suffix("'s")
            .or_else(|| word.strip_suffix("'S"))
            .unwrap_or(word);
        let key = word.to_lowercase();
        if word.chars().count() < 2
            || word.chars().all(|c| c.is_ascii_digit())
            || STOPWORDS.contains(key.as_str())
        {
            continue;
        }
        counts
            .entry(key)
            .or_insert_with(|| (word.to_owned(), 0))
            .1 += 1;
    }
    let mut frequencies: Vec<(String, usize)> = counts.into_values().collect();
    frequencies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    frequencies
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_shorten_keywords_drops_long_words() {
        let text = "Rust开发工程师（高级）, 5年经验! tokio";
        assert_eq!(shorten_keywords(text, 7), "高级 5年经验 tokio");
    }

    #[test]
    fn test_shorten_keywords_collapses_separators() {
        assert_eq!(shorten_keywords("  a--b\n\nc ", 7), "a b c");
        assert_eq!(shorten_keywords("!!!", 7), "");
    }

    #[test]
    fn test_word_frequencies() {
        let freqs = word_frequencies("Rust and rust and the Tokio tokio RUST serde's x");
        assert_eq!(
            freqs,
            vec![
                ("Rust".to_owned(), 3),
                ("Tokio".to_owned(), 2),
                ("serde".to_owned(), 1),
            ]
        );
    }

    #[test]
    fn test_word_frequencies_skips_numbers() {
        let freqs = word_frequencies("10 2023 10 Rust 5年 Go2");
        let words: Vec<&str> = freqs.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(words, vec!["5年", "Go2", "Rust"]);
    }

    #[test]
    fn test_word_frequencies_cjk() {
        let freqs = word_frequencies("熟悉 Linux 熟悉 数据库");
        assert_eq!(freqs[0], ("熟悉".to_owned(), 2));
        assert_eq!(freqs.len(), 3);
    }
}
