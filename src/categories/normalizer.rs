//! Category normalization
//!
//! Raw group titles arrive in every spelling imaginable ("SPORT", " sports ",
//! "Spor  HD"). Normalization first canonicalizes casing and whitespace, then
//! consults the ordered mapping table: either by case-insensitive substring
//! (first key wins, declaration order) or by closest string similarity above a
//! threshold. A category that matches no key is returned canonicalized but
//! otherwise unchanged.

use crate::config::{CategoriesConfig, CategoryMapping, MatcherMode};

pub struct CategoryNormalizer {
    mapping: Vec<CategoryMapping>,
    matcher: MatcherMode,
    fuzzy_threshold: f64,
}

impl CategoryNormalizer {
    pub fn new(config: &CategoriesConfig) -> Self {
        Self {
            mapping: config.mapping.clone(),
            matcher: config.matcher,
            fuzzy_threshold: config.fuzzy_threshold,
        }
    }

    /// Canonicalize a raw category and apply the mapping table
    pub fn normalize(&self, raw: &str) -> String {
        let canonical = canonicalize(raw);

        match self.matcher {
            MatcherMode::Substring => self.substring_match(&canonical),
            MatcherMode::Fuzzy => self.fuzzy_match(&canonical),
        }
        .unwrap_or(canonical)
    }

    /// First mapping key occurring case-insensitively inside the category
    fn substring_match(&self, canonical: &str) -> Option<String> {
        let haystack = canonical.to_lowercase();
        self.mapping
            .iter()
            .find(|m| haystack.contains(&m.from.to_lowercase()))
            .map(|m| m.to.clone())
    }

    /// Closest mapping key by Levenshtein ratio, if above the threshold
    ///
    /// Strictly-greater comparison keeps ties deterministic: the earliest
    /// declared key wins.
    fn fuzzy_match(&self, canonical: &str) -> Option<String> {
        let mut best: Option<(&CategoryMapping, f64)> = None;

        for m in &self.mapping {
            let score = similarity(canonical, &m.from);
            if score >= self.fuzzy_threshold && best.map_or(true, |(_, s)| score > s) {
                best = Some((m, score));
            }
        }

        best.map(|(m, _)| m.to.clone())
    }
}

/// Trim, title-case each word and collapse whitespace runs
fn canonicalize(raw: &str) -> String {
    raw.split_whitespace()
        .map(title_case_word)
        .collect::<Vec<String>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Levenshtein ratio in [0.0, 1.0], case-insensitive
fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if a == b {
        return 1.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    1.0 - (levenshtein_distance(&a, &b) as f64 / max_len as f64)
}

fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, a_ch) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_ch) in b_chars.iter().enumerate() {
            let substitution = previous[j] + usize::from(a_ch != b_ch);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}
