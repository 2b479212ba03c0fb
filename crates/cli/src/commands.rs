use std::path::{Path, PathBuf};

use fin_classify::ClassificationEngine;
use fin_core::{BankTransactionId, CompanyId, FinError, FiscalPeriodId};
use fin_export::{ExportContext, ExportFormat};
use fin_parser::StatementParser;
use fin_posting::{BankTransaction, PostingConfig, PostingService};
use fin_report::ReportKind;

use crate::state::Snapshot;

/// The seeded cash/bank, bank-charges, and clearing accounts the posting
/// service always needs regardless of what the classification engine
/// resolves — fixed codes matching `accounts::seed_chart_of_accounts`.
fn posting_config() -> PostingConfig {
    PostingConfig {
        bank_account_code: "1100".to_string(),
        bank_charges_account_code: "5200".to_string(),
        unclassified_account_code: "9999".to_string(),
    }
}

/// Exit codes exactly as spec.md §6 prescribes for `import`, plus 1 for
/// any other configuration/IO failure (spec.md is silent on that case;
/// resolved as an Open Question in DESIGN.md).
pub const EXIT_OK: i32 = 0;
pub const EXIT_GENERAL_FAILURE: i32 = 1;
pub const EXIT_UNBALANCED: i32 = 2;
pub const EXIT_UNKNOWN_ACCOUNT: i32 = 3;
pub const EXIT_PERIOD_CLOSED: i32 = 4;

pub fn import(
    state_path: &Path,
    company: &str,
    period: &str,
    file: &Path,
    rules_file: Option<&Path>,
) -> anyhow::Result<i32> {
    let mut snapshot = Snapshot::load(state_path)?;
    let company_id = CompanyId::new(company);
    let period_id = FiscalPeriodId::new(period);

    let coa = snapshot.chart_of_accounts(&company_id);
    let fiscal_period = snapshot.fiscal_period(&company_id, &period_id)?;

    if let Some(rules_path) = rules_file {
        let reader = std::fs::File::open(rules_path)?;
        let rules = fin_classify::load_rules_csv(reader, &company_id)?;
        tracing::info!("loaded {} classification rules from {}", rules.len(), rules_path.display());
        snapshot.replace_rules(&company_id, rules);
    }
    let engine = ClassificationEngine::load(snapshot.rules_for(&company_id));

    let store = snapshot.journal_store();
    let config = posting_config();
    let posting_service = PostingService::new(&config);

    let text = std::fs::read_to_string(file)?;
    let parser = StatementParser::new(&text, fiscal_period.range.end());

    let mut posted = 0u32;
    let mut worst_exit = EXIT_OK;

    for parsed in parser {
        let parsed = match parsed {
            Ok(parsed) => parsed,
            Err(FinError::ParseNoAmount(line)) => {
                tracing::warn!("dropping line with no amount: {line}");
                continue;
            }
            Err(FinError::ParseMalformedDate(line)) => {
                tracing::warn!("dropping line with a malformed date: {line}");
                continue;
            }
            Err(other) => {
                tracing::warn!("dropping unparseable line: {other}");
                continue;
            }
        };

        let bank_transaction_id = BankTransactionId(snapshot.next_bank_transaction_id());
        let resolved_account = engine
            .classify(&parsed.description)
            .filter(|code| coa.get(code).is_some())
            .map(str::to_string);
        let account_name = match &resolved_account {
            Some(code) => coa.get(code).map(|a| a.name.clone()).unwrap_or_else(|| code.clone()),
            None => "Unclassified".to_string(),
        };

        let tx = BankTransaction::new(bank_transaction_id, company_id.clone(), period_id.clone(), parsed);
        let entry = match posting_service.build_entry(&tx, resolved_account.as_deref(), &account_name, "fin-cli") {
            Ok(entry) => entry,
            Err(error) => {
                tracing::warn!("refusing to build an invalid entry for {}: {error}", tx.reference());
                worst_exit = worst_exit.max(EXIT_UNBALANCED);
                continue;
            }
        };

        match store.post(&coa, &fiscal_period, entry) {
            Ok(posted_entry) => {
                posted += 1;
                tracing::info!("posted entry {} ({})", posted_entry.reference, posted_entry.id);
            }
            Err(FinError::PeriodClosed(name)) => {
                tracing::error!("fiscal period '{name}' is closed, aborting import");
                snapshot.persist_entries(&store);
                snapshot.save(state_path)?;
                return Ok(EXIT_PERIOD_CLOSED);
            }
            Err(error @ FinError::Unbalanced { .. }) => {
                tracing::warn!("skipping entry for {}: {error}", tx.reference());
                worst_exit = worst_exit.max(EXIT_UNBALANCED);
            }
            Err(error @ (FinError::UnknownAccount(_) | FinError::InactiveAccount(_))) => {
                tracing::warn!("skipping entry for {}: {error}", tx.reference());
                worst_exit = worst_exit.max(EXIT_UNKNOWN_ACCOUNT);
            }
            Err(error) => {
                tracing::warn!("skipping entry for {}: {error}", tx.reference());
                worst_exit = worst_exit.max(EXIT_GENERAL_FAILURE);
            }
        }
    }

    snapshot.persist_entries(&store);
    snapshot.save(state_path)?;
    tracing::info!("import complete: {posted} entries posted");
    Ok(worst_exit)
}

pub fn rules_import(state_path: &Path, company: &str, file: &Path) -> anyhow::Result<i32> {
    let mut snapshot = Snapshot::load(state_path)?;
    let company_id = CompanyId::new(company);
    let reader = std::fs::File::open(file)?;
    let rules = fin_classify::load_rules_csv(reader, &company_id)?;
    let count = rules.len();
    snapshot.replace_rules(&company_id, rules);
    snapshot.save(state_path)?;
    tracing::info!("replaced rule set for {company} with {count} rules from {}", file.display());
    Ok(EXIT_OK)
}

pub fn report(
    state_path: &Path,
    kind: &str,
    company: &str,
    period: &str,
    format: &str,
    out: Option<&PathBuf>,
) -> anyhow::Result<i32> {
    let mut snapshot = Snapshot::load(state_path)?;
    let company_id = CompanyId::new(company);
    let period_id = FiscalPeriodId::new(period);

    let coa = snapshot.chart_of_accounts(&company_id);
    let period_name = snapshot
        .periods
        .iter()
        .find(|p| p.company_id == company_id && p.id == period_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| period_id.to_string());

    let report_kind = ReportKind::parse(kind).ok_or_else(|| anyhow::anyhow!("unknown report kind '{kind}'"))?;
    let export_format = ExportFormat::parse(format).ok_or_else(|| anyhow::anyhow!("unknown export format '{format}'"))?;

    let store = snapshot.journal_store();
    let report = match fin_report::generate(report_kind, &store, &coa, &company_id, &period_id) {
        Ok(report) => report,
        Err(error @ FinError::TrialBalanceUnbalanced { .. }) => {
            tracing::error!("{error}");
            return Ok(EXIT_GENERAL_FAILURE);
        }
        Err(error) => return Err(error.into()),
    };

    let ctx = ExportContext::new(company, &period_name);
    let bytes = fin_export::render(&report, export_format, &ctx)?;

    match out {
        Some(path) => {
            std::fs::write(path, &bytes)?;
            tracing::info!("wrote {} to {}", report.title, path.display());
        }
        None => match export_format {
            ExportFormat::Text | ExportFormat::Csv => {
                print!("{}", String::from_utf8_lossy(&bytes));
            }
            ExportFormat::Pdf | ExportFormat::Xlsx => {
                anyhow::bail!("--out <path> is required for binary export formats (pdf, xlsx)");
            }
        },
    }

    Ok(EXIT_OK)
}
