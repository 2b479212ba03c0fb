use fin_core::{CompanyId, FinError, FinResult};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    Contains,
    StartsWith,
    EndsWith,
    Equals,
    Regex,
}

/// A rule as authored by a user: plain data, trivially serializable, not
/// yet validated against its own pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionMappingRule {
    pub id: u64,
    pub company_id: CompanyId,
    pub name: String,
    pub priority: i32,
    pub match_type: MatchType,
    pub pattern: String,
    pub account_code: String,
    pub active: bool,
}

/// A rule with its pattern compiled, ready for repeated matching. `Regex`
/// rules carry a compiled automaton; the other match types carry the raw
/// pattern and compare case-insensitively at match time.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub id: u64,
    pub company_id: CompanyId,
    pub priority: i32,
    pub account_code: String,
    match_type: MatchType,
    pattern: String,
    regex: Option<Regex>,
}

impl CompiledRule {
    pub fn compile(rule: TransactionMappingRule) -> FinResult<Self> {
        let regex = if rule.match_type == MatchType::Regex {
            // Anchored so a "match" means a full match of the whole
            // (uppercased) description, per the classification algorithm's
            // step 3 — not merely a substring hit.
            let anchored = format!("^(?:{})$", rule.pattern.to_uppercase());
            Some(Regex::new(&anchored).map_err(|source| {
                FinError::RegexInvalid(rule.pattern.clone(), source.to_string())
            })?)
        } else {
            None
        };
        Ok(CompiledRule {
            id: rule.id,
            company_id: rule.company_id,
            priority: rule.priority,
            account_code: rule.account_code,
            match_type: rule.match_type,
            pattern: rule.pattern,
            regex,
        })
    }

    pub fn matches(&self, description: &str) -> bool {
        let description = description.trim().to_uppercase();
        let pattern = self.pattern.trim().to_uppercase();
        match self.match_type {
            MatchType::Contains => description.contains(&pattern),
            MatchType::StartsWith => description.starts_with(&pattern),
            MatchType::EndsWith => description.ends_with(&pattern),
            MatchType::Equals => description == pattern,
            MatchType::Regex => self
                .regex
                .as_ref()
                .map(|re| re.is_match(&description))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: u64, priority: i32, match_type: MatchType, pattern: &str) -> TransactionMappingRule {
        TransactionMappingRule {
            id,
            company_id: CompanyId::from("acme"),
            name: "Test rule".to_string(),
            priority,
            match_type,
            pattern: pattern.to_string(),
            account_code: "5000".to_string(),
            active: true,
        }
    }

    #[test]
    fn contains_is_case_insensitive() {
        let compiled = CompiledRule::compile(rule(1, 0, MatchType::Contains, "SALARY")).unwrap();
        assert!(compiled.matches("monthly salary deposit"));
    }

    #[test]
    fn invalid_regex_is_rejected_at_compile_time() {
        let result = CompiledRule::compile(rule(1, 0, MatchType::Regex, "(unclosed"));
        assert!(matches!(result, Err(FinError::RegexInvalid(_, _))));
    }

    #[test]
    fn equals_requires_whole_string_match() {
        let compiled = CompiledRule::compile(rule(1, 0, MatchType::Equals, "Bank Fee")).unwrap();
        assert!(compiled.matches("bank fee"));
        assert!(!compiled.matches("bank fee reversal"));
    }
}
