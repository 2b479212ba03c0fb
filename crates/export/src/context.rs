/// The banner context every export format repeats on its title page/sheet/
/// header: company name and fiscal period name, per spec.md 4.H and §6's
/// PDF metadata fields (`title = "<Report> - <Company>"`,
/// `subject = "<Report> for <Period>"`).
#[derive(Debug, Clone)]
pub struct ExportContext {
    pub company_name: String,
    pub period_name: String,
}

impl ExportContext {
    pub fn new(company_name: impl Into<String>, period_name: impl Into<String>) -> Self {
        ExportContext { company_name: company_name.into(), period_name: period_name.into() }
    }
}

pub const SYSTEM_NAME: &str = "FIN Financial Management System";
