use std::io::Read;

use fin_core::CompanyId;
use serde::Deserialize;
use thiserror::Error;

use crate::rule::{MatchType, TransactionMappingRule};

/// One row of the optional bulk rules file — spec.md §6's Inputs:
/// `ruleName,matchType,matchValue,accountCode,priority,active`. Kept as
/// its own row type (rather than deserializing straight into
/// [`TransactionMappingRule`]) because the CSV has no `id` or
/// `company_id` column; those are assigned by the loader.
#[derive(Debug, Deserialize)]
struct RuleRow {
    #[serde(rename = "ruleName")]
    rule_name: String,
    #[serde(rename = "matchType")]
    match_type: String,
    #[serde(rename = "matchValue")]
    match_value: String,
    #[serde(rename = "accountCode")]
    account_code: String,
    priority: i32,
    active: bool,
}

#[derive(Debug, Error)]
pub enum RulesCsvError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("unknown matchType '{0}' on row {1} (expected Contains, StartsWith, EndsWith, Equals, or Regex)")]
    UnknownMatchType(String, usize),
}

fn parse_match_type(value: &str, row_number: usize) -> Result<MatchType, RulesCsvError> {
    match value {
        "Contains" => Ok(MatchType::Contains),
        "StartsWith" => Ok(MatchType::StartsWith),
        "EndsWith" => Ok(MatchType::EndsWith),
        "Equals" => Ok(MatchType::Equals),
        "Regex" => Ok(MatchType::Regex),
        other => Err(RulesCsvError::UnknownMatchType(other.to_string(), row_number)),
    }
}

/// Parses a bulk rules CSV, assigning each row a 1-based `id` in file
/// order (so `rules import`'s tie-break-by-id behaviour is stable across
/// re-imports of the same file) and the given `company_id`. Replaces the
/// company's whole rule set — the caller is expected to discard any
/// previously loaded rules, per spec.md §6's `rules import` command.
pub fn load_rules_csv<R: Read>(reader: R, company_id: &CompanyId) -> Result<Vec<TransactionMappingRule>, RulesCsvError> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut rules = Vec::new();
    for (index, result) in csv_reader.deserialize::<RuleRow>().enumerate() {
        let row_number = index + 1;
        let row = result?;
        let match_type = parse_match_type(&row.match_type, row_number)?;
        rules.push(TransactionMappingRule {
            id: row_number as u64,
            company_id: company_id.clone(),
            name: row.rule_name,
            priority: row.priority,
            match_type,
            pattern: row.match_value,
            account_code: row.account_code,
            active: row.active,
        });
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_in_file_order_as_ids() {
        let csv = "ruleName,matchType,matchValue,accountCode,priority,active\n\
                   Salary,Contains,SALARY,5100,10,true\n\
                   SARS,Contains,SARS,5300,10,true\n";
        let company = CompanyId::new("acme");
        let rules = load_rules_csv(csv.as_bytes(), &company).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].id, 1);
        assert_eq!(rules[0].name, "Salary");
        assert_eq!(rules[1].id, 2);
        assert_eq!(rules[1].match_type, MatchType::Contains);
    }

    #[test]
    fn inactive_flag_is_carried_through() {
        let csv = "ruleName,matchType,matchValue,accountCode,priority,active\n\
                   Old Rule,Equals,RENT,5300,5,false\n";
        let company = CompanyId::new("acme");
        let rules = load_rules_csv(csv.as_bytes(), &company).unwrap();
        assert!(!rules[0].active);
    }

    #[test]
    fn unknown_match_type_is_rejected() {
        let csv = "ruleName,matchType,matchValue,accountCode,priority,active\n\
                   Weird,Fuzzy,X,5000,0,true\n";
        let company = CompanyId::new("acme");
        let result = load_rules_csv(csv.as_bytes(), &company);
        assert!(matches!(result, Err(RulesCsvError::UnknownMatchType(_, 1))));
    }
}
