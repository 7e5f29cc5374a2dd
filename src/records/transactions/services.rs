use super::{dto::DashboardSummary, repo::TransactionRepository};
use crate::{
    auth::VerifiedIdentity,
    records::{categories::dto::CategoryKind, RecordError},
};

pub async fn dashboard_summary(
    repo: &dyn TransactionRepository,
    tenant: &VerifiedIdentity,
) -> Result<DashboardSummary, RecordError> {
    let sums = repo.summary_by_kind(tenant).await?;
    let total_income = sums.get(&CategoryKind::Income).copied().unwrap_or(0);
    let total_expense = sums.get(&CategoryKind::Expense).copied().unwrap_or(0);

    Ok(DashboardSummary {
        total_income,
        total_expense,
        net_balance: total_income.saturating_sub(total_expense),
    })
}
