//! Monthly summary
//!
//! Pure aggregation over the record store: filter each container down to a
//! selected month, then roll the matches up into totals. Nothing here
//! mutates the store, and identical inputs always produce identical totals.

use crate::models::{IncomeStream, Money, MonthKey, RecurringPayment, SavingsEntry, Transaction};
use crate::store::RecordStore;

/// Get the transactions dated inside the given month
pub fn transactions_in_month(store: &RecordStore, month: MonthKey) -> Vec<&Transaction> {
    store
        .transactions()
        .iter()
        .filter(|t| month.contains(t.date))
        .collect()
}

/// Get the income streams keyed to the given month
pub fn income_streams_in_month(store: &RecordStore, month: MonthKey) -> Vec<&IncomeStream> {
    store
        .income_streams()
        .iter()
        .filter(|s| s.month == month)
        .collect()
}

/// Get the recurring payments active in the given month
pub fn recurring_payments_active_in(
    store: &RecordStore,
    month: MonthKey,
) -> Vec<&RecurringPayment> {
    store
        .recurring_payments()
        .iter()
        .filter(|p| p.active_in(month))
        .collect()
}

/// Get the savings entry for the given month, if one exists
pub fn savings_for_month(store: &RecordStore, month: MonthKey) -> Option<&SavingsEntry> {
    store.savings().iter().find(|s| s.month == month)
}

/// Derived totals for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlySummary {
    /// The month the totals cover
    pub month: MonthKey,
    /// Sum of income stream amounts for the month
    pub total_income: Money,
    /// Sum of effective costs over the month's expense transactions
    pub total_expenses: Money,
    /// Sum of amounts over recurring payments active in the month
    pub recurring_expenses: Money,
    /// Amount set aside this month, zero if none recorded
    pub total_savings: Money,
    /// total_income - total_expenses - recurring_expenses - total_savings
    pub balance: Money,
}

impl MonthlySummary {
    /// Compute the totals for one month of store contents
    pub fn generate(store: &RecordStore, month: MonthKey) -> Self {
        let total_income: Money = income_streams_in_month(store, month)
            .into_iter()
            .map(|s| s.amount)
            .sum();

        // Income-typed transactions are listed for the month but feed no
        // total; only expense-typed ones count here.
        let total_expenses: Money = transactions_in_month(store, month)
            .into_iter()
            .filter(|t| t.is_expense())
            .map(|t| t.final_amount)
            .sum();

        // A payment active in the month contributes its full amount once,
        // whatever its frequency says about occurrences inside the month.
        let recurring_expenses: Money = recurring_payments_active_in(store, month)
            .into_iter()
            .map(|p| p.amount)
            .sum();

        let total_savings = savings_for_month(store, month)
            .map(|entry| entry.amount)
            .unwrap_or_else(Money::zero);

        let balance = total_income - total_expenses - recurring_expenses - total_savings;

        Self {
            month,
            total_income,
            total_expenses,
            recurring_expenses,
            total_savings,
            balance,
        }
    }
}
