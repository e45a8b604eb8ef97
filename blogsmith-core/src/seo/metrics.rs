//! Text metrics over markdown-flavored bodies
//!
//! All functions are pure and total. The metrics are deliberately simple
//! approximations, not NLP models.

use regex_utils::markdown::{PARAGRAPH_BREAK, SENTENCE_END};
use serde::{Deserialize, Serialize};

/// Keyword density range counted as optimal, in percent
pub const OPTIMAL_DENSITY: (f64, f64) = (1.0, 3.0);

/// Internal link count range counted as optimal
pub const OPTIMAL_LINKS: (usize, usize) = (1, 3);

/// Words at least this long count as complex
const COMPLEX_WORD_LEN: usize = 7;

/// Occurrence statistics for one keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordStats {
    pub keyword: String,
    pub count: usize,
    pub density: f64,
    pub optimal: bool,
}

/// Primary keyword plus related keywords ordered by count, highest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub primary: KeywordStats,
    pub related: Vec<KeywordStats>,
}

/// ATX heading counts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingStructure {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
    pub h4: usize,
    pub proper_structure: bool,
    /// H2 headings per H1 (H1 count floored at one)
    pub ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadabilityGrade {
    Excellent,
    Good,
    Fair,
    Difficult,
    #[serde(rename = "Very Difficult")]
    VeryDifficult,
}

impl ReadabilityGrade {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 70.0 {
            Self::Good
        } else if score >= 60.0 {
            Self::Fair
        } else if score >= 50.0 {
            Self::Difficult
        } else {
            Self::VeryDifficult
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Difficult => "Difficult",
            Self::VeryDifficult => "Very Difficult",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Readability {
    pub avg_words_per_sentence: f64,
    pub complex_words_percentage: f64,
    /// 0 to 100, higher is easier
    pub readability_score: f64,
    pub grade: ReadabilityGrade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalLinks {
    pub count: usize,
    pub optimal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentStructure {
    pub paragraphs: usize,
    pub list_items: usize,
    pub avg_paragraph_words: f64,
}

/// Whitespace-separated token count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count keyword matches, case-insensitively.
///
/// A single-word keyword matches every token that *contains* it, so
/// "developers" counts toward "developer". A keyword of `k` words matches at
/// every position where the next `k` tokens, joined by single spaces,
/// contain it.
pub fn count_keyword_occurrences(text: &str, keyword: &str) -> usize {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return 0;
    }
    let span = needle.split_whitespace().count();

    let tokens: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    if span <= 1 {
        return tokens.iter().filter(|t| t.contains(&needle)).count();
    }
    if tokens.len() < span {
        return 0;
    }

    tokens
        .windows(span)
        .filter(|window| window.join(" ").contains(&needle))
        .count()
}

/// Keyword occurrences per hundred words; zero for an empty text
pub fn keyword_density(text: &str, keyword: &str) -> f64 {
    let total = word_count(text);
    if total == 0 {
        return 0.0;
    }
    100.0 * count_keyword_occurrences(text, keyword) as f64 / total as f64
}

/// Count, density and optimality for one keyword
pub fn keyword_stats(text: &str, keyword: &str) -> KeywordStats {
    let density = keyword_density(text, keyword);
    KeywordStats {
        keyword: keyword.to_string(),
        count: count_keyword_occurrences(text, keyword),
        density,
        optimal: (OPTIMAL_DENSITY.0..=OPTIMAL_DENSITY.1).contains(&density),
    }
}

/// Primary keyword stats and related keywords sorted by count, highest first
pub fn keyword_analysis(text: &str, primary: &str, related: &[String]) -> KeywordAnalysis {
    let mut related: Vec<KeywordStats> = related
        .iter()
        .filter(|k| !k.eq_ignore_ascii_case(primary))
        .map(|k| keyword_stats(text, k))
        .collect();
    related.sort_by(|a, b| b.count.cmp(&a.count));

    KeywordAnalysis { primary: keyword_stats(text, primary), related }
}

/// Count `#` through `####` headings. Only a prefix followed by a space counts.
pub fn heading_counts(text: &str) -> HeadingStructure {
    let (mut h1, mut h2, mut h3, mut h4) = (0, 0, 0, 0);

    for line in text.lines() {
        let line = line.trim();
        if line.starts_with("# ") {
            h1 += 1;
        } else if line.starts_with("## ") {
            h2 += 1;
        } else if line.starts_with("### ") {
            h3 += 1;
        } else if line.starts_with("#### ") {
            h4 += 1;
        }
    }

    HeadingStructure {
        h1,
        h2,
        h3,
        h4,
        proper_structure: h1 == 1 && h2 >= 2,
        ratio: h2 as f64 / h1.max(1) as f64,
    }
}

/// Sentence length and long-word based readability
pub fn readability(text: &str) -> Readability {
    let sentences = SENTENCE_END.split(text).filter(|s| !s.trim().is_empty()).count();
    let words: Vec<&str> = text.split_whitespace().collect();

    let avg_words_per_sentence =
        if sentences == 0 { 0.0 } else { words.len() as f64 / sentences as f64 };

    let complex = words.iter().filter(|w| w.chars().count() >= COMPLEX_WORD_LEN).count();
    let complex_words_percentage =
        if words.is_empty() { 0.0 } else { 100.0 * complex as f64 / words.len() as f64 };

    let readability_score = (100.0 - avg_words_per_sentence - complex_words_percentage).max(0.0);

    Readability {
        avg_words_per_sentence,
        complex_words_percentage,
        readability_score,
        grade: ReadabilityGrade::from_score(readability_score),
    }
}

/// Literal occurrences of the site URL
pub fn internal_link_count(text: &str, site_url: &str) -> InternalLinks {
    let count = if site_url.is_empty() {
        0
    } else {
        // The URL is escaped, so compiling cannot fail
        regex::Regex::new(&regex::escape(site_url))
            .map(|re| re.find_iter(text).count())
            .unwrap_or(0)
    };

    InternalLinks { count, optimal: (OPTIMAL_LINKS.0..=OPTIMAL_LINKS.1).contains(&count) }
}

/// Paragraphs, list lines and average paragraph length
pub fn content_structure(text: &str) -> ContentStructure {
    let paragraphs: Vec<&str> =
        PARAGRAPH_BREAK.split(text).map(str::trim).filter(|p| !p.is_empty()).collect();

    let list_items = text
        .lines()
        .map(str::trim)
        .filter(|l| l.starts_with('*') || l.starts_with('-'))
        .count();

    let paragraph_words: usize = paragraphs.iter().map(|p| word_count(p)).sum();
    let avg_paragraph_words = if paragraphs.is_empty() {
        0.0
    } else {
        paragraph_words as f64 / paragraphs.len() as f64
    };

    ContentStructure { paragraphs: paragraphs.len(), list_items, avg_paragraph_words }
}
