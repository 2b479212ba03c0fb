use regex::Regex;
use std::sync::OnceLock;

/// Header/footer vocabulary: a line containing any of these words (case
/// insensitive) and no date column is noise, not a transaction.
const SKIP_WORDS: &[&str] = &[
    "details",
    "service",
    "fee",
    "debits",
    "credits",
    "date",
    "balance",
    "page",
    "statement no",
    "vat reg",
    "month-end balance",
];

fn skip_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let alternation = SKIP_WORDS.join("|");
        Regex::new(&format!("(?i){alternation}")).unwrap()
    })
}

/// True when `line` is empty or matches the header/footer vocabulary.
pub fn should_skip(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || skip_pattern().is_match(trimmed)
}
