use std::collections::HashSet;

use serde::Serialize;

use super::{ranked_counts, Aggregate};
use crate::data::filter::FilteredView;

/// Common English words left out of the cloud.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "else",
    "ever", "few", "for", "from", "further", "get", "had", "has", "have", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "however", "if", "in", "into", "is",
    "it", "its", "itself", "just", "like", "me", "more", "most", "my", "myself", "no", "nor",
    "not", "of", "off", "on", "once", "only", "or", "other", "otherwise", "ought", "our", "ours",
    "ourselves", "out", "over", "own", "same", "shall", "she", "should", "since", "so", "some",
    "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "therefore", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "with", "would", "you", "your", "yours", "yourself", "yourselves",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    pub word: String,
    pub count: usize,
    /// `count` relative to the most frequent word, in `(0, 1]`.
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordCloud {
    /// Most frequent first.
    pub words: Vec<Keyword>,
}

/// Lowercase and replace every character that is neither an ASCII letter
/// nor whitespace with a space.
pub fn clean_description(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphabetic() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Word frequencies over the descriptions of `view`, for the keyword cloud.
///
/// "No data" when the view has no descriptions, or when cleaning leaves no
/// usable word.
pub fn keyword_cloud(view: &FilteredView<'_>, max_words: usize) -> Aggregate<KeywordCloud> {
    let text = view
        .iter()
        .filter_map(|l| l.description.as_deref())
        .map(clean_description)
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return Aggregate::NoData;
    }

    let stop: HashSet<&str> = STOP_WORDS.iter().copied().collect();
    let tokens = text
        .split_whitespace()
        .filter(|w| w.len() >= 2 && !stop.contains(w));

    let mut counts = ranked_counts(tokens);
    counts.truncate(max_words);

    let Some(top) = counts.first().map(|c| c.count) else {
        return Aggregate::NoData;
    };
    let words = counts
        .into_iter()
        .map(|c| Keyword {
            weight: c.count as f64 / top as f64,
            word: c.value,
            count: c.count,
        })
        .collect();
    Aggregate::Ready(KeywordCloud { words })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{JobDataset, Listing};
    use crate::data::test_support::listing;

    fn with_descriptions(descriptions: &[Option<&str>]) -> JobDataset {
        JobDataset::from_listings(
            descriptions
                .iter()
                .map(|d| {
                    let mut l: Listing = listing("2024-01-01", None, None, None, None, None);
                    l.description = d.map(String::from);
                    l
                })
                .collect(),
        )
    }

    #[test]
    fn test_clean_description_strips_non_ascii_letters() {
        assert_eq!(
            clean_description("Gaji Rp5.000.000!"),
            format!("gaji rp{}", " ".repeat(10))
        );
        assert_eq!(clean_description("Full-Time\tRémote"), "full time\tr mote");
        assert_eq!(clean_description("日本 Rust"), "   rust");
    }

    #[test]
    fn test_frequencies_and_weights() {
        let ds = with_descriptions(&[
            Some("Rust developer, Rust services."),
            None,
            Some("Senior developer for the rust team"),
        ]);
        let cloud = keyword_cloud(&FilteredView::all(&ds), 200);
        let cloud = cloud.as_ready().unwrap();

        assert_eq!(cloud.words[0].word, "rust");
        assert_eq!(cloud.words[0].count, 3);
        assert_eq!(cloud.words[0].weight, 1.0);
        assert_eq!(cloud.words[1].word, "developer");
        assert_eq!(cloud.words[1].count, 2);
        assert!(cloud.words.iter().all(|w| w.word != "the" && w.word != "for"));
    }

    #[test]
    fn test_max_words_truncates() {
        let ds = with_descriptions(&[Some("alpha beta gamma delta")]);
        let cloud = keyword_cloud(&FilteredView::all(&ds), 2);
        assert_eq!(cloud.as_ready().unwrap().words.len(), 2);
    }

    #[test]
    fn test_no_descriptions_is_no_data() {
        let ds = with_descriptions(&[None, None]);
        assert!(keyword_cloud(&FilteredView::all(&ds), 200).is_no_data());
        assert!(keyword_cloud(&FilteredView::default(), 200).is_no_data());
    }

    #[test]
    fn test_only_digits_and_punctuation_is_no_data() {
        let ds = with_descriptions(&[Some("123 - 456 !!"), Some("a")]);
        assert!(keyword_cloud(&FilteredView::all(&ds), 200).is_no_data());
    }
}
