use crate::rule::{CompiledRule, TransactionMappingRule};

/// Priority-ordered rule set for one company. Lower `priority` wins; ties
/// are broken by lower `id`, so classification is a pure function of the
/// rule set and the description — the same input always produces the same
/// account, regardless of insertion order.
#[derive(Debug, Default)]
pub struct ClassificationEngine {
    rules: Vec<CompiledRule>,
}

impl ClassificationEngine {
    pub fn new() -> Self {
        ClassificationEngine::default()
    }

    /// Keeps only active rules (step 1 of the classification algorithm)
    /// and compiles each pattern. A rule whose regex fails to compile is
    /// dropped with a warning rather than failing the whole load — per
    /// spec.md §7, `RegexInvalid` marks that one rule inactive, it does
    /// not abort loading the rest of the company's rule set.
    pub fn load(rules: Vec<TransactionMappingRule>) -> Self {
        let mut compiled: Vec<CompiledRule> = rules
            .into_iter()
            .filter(|rule| rule.active)
            .filter_map(|rule| match CompiledRule::compile(rule) {
                Ok(compiled) => Some(compiled),
                Err(error) => {
                    tracing::warn!("rule disabled, invalid pattern: {error}");
                    None
                }
            })
            .collect();
        compiled.sort_by_key(|rule| (rule.priority, rule.id));
        ClassificationEngine { rules: compiled }
    }

    /// Returns the account code of the first rule (in priority order) whose
    /// pattern matches `description`, or `None` if no rule matches.
    pub fn classify(&self, description: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(description))
            .map(|rule| rule.account_code.as_str())
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::MatchType;
    use fin_core::CompanyId;

    fn rule(id: u64, priority: i32, match_type: MatchType, pattern: &str, account_code: &str) -> TransactionMappingRule {
        TransactionMappingRule {
            id,
            company_id: CompanyId::from("acme"),
            name: format!("rule-{id}"),
            priority,
            match_type,
            pattern: pattern.to_string(),
            account_code: account_code.to_string(),
            active: true,
        }
    }

    #[test]
    fn lowest_priority_number_wins_on_overlap() {
        let engine = ClassificationEngine::load(vec![
            rule(1, 10, MatchType::Contains, "SARS", "2100"),
            rule(2, 1, MatchType::Contains, "SALARY", "6000"),
            rule(3, 5, MatchType::Contains, "SARS", "5200"),
        ]);
        assert_eq!(engine.classify("SARS PAYE PAYMENT SALARY RUN"), Some("6000"));
    }

    #[test]
    fn ties_on_priority_broken_by_lower_id() {
        let engine = ClassificationEngine::load(vec![
            rule(9, 5, MatchType::Contains, "FEE", "7000"),
            rule(2, 5, MatchType::Contains, "FEE", "7100"),
        ]);
        assert_eq!(engine.classify("MONTHLY SERVICE FEE"), Some("7100"));
    }

    #[test]
    fn no_matching_rule_returns_none() {
        let engine = ClassificationEngine::load(vec![rule(1, 0, MatchType::Equals, "RENT", "5300")]);
        assert_eq!(engine.classify("UNRELATED TRANSACTION"), None);
    }

    #[test]
    fn classification_is_deterministic_across_load_order() {
        let a = ClassificationEngine::load(vec![
            rule(1, 5, MatchType::Contains, "X", "1000"),
            rule(2, 1, MatchType::Contains, "X", "2000"),
        ]);
        let b = ClassificationEngine::load(vec![
            rule(2, 1, MatchType::Contains, "X", "2000"),
            rule(1, 5, MatchType::Contains, "X", "1000"),
        ]);
        assert_eq!(a.classify("X PAYMENT"), b.classify("X PAYMENT"));
    }

    #[test]
    fn inactive_rule_is_never_considered() {
        let mut inactive = rule(1, 0, MatchType::Contains, "FEE", "7000");
        inactive.active = false;
        let engine = ClassificationEngine::load(vec![inactive]);
        assert_eq!(engine.rule_count(), 0);
        assert_eq!(engine.classify("MONTHLY FEE"), None);
    }

    #[test]
    fn invalid_regex_is_dropped_rather_than_aborting_the_whole_load() {
        let mut bad = rule(1, 0, MatchType::Regex, "(unclosed", "9999");
        bad.id = 1;
        let good = rule(2, 1, MatchType::Contains, "SALARY", "5100");
        let engine = ClassificationEngine::load(vec![bad, good]);
        assert_eq!(engine.rule_count(), 1);
        assert_eq!(engine.classify("MONTHLY SALARY"), Some("5100"));
    }
}
