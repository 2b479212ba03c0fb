pub mod engine;
pub mod rule;
pub mod rules_csv;

pub use engine::ClassificationEngine;
pub use rule::{CompiledRule, MatchType, TransactionMappingRule};
pub use rules_csv::{load_rules_csv, RulesCsvError};
