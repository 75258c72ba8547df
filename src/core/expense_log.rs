use crate::domain::Expense;

/// Append-only record of submitted expenses, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseLog {
    entries: Vec<Expense>,
}

impl ExpenseLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, expense: Expense) {
        self.entries.push(expense);
    }

    pub fn entries(&self) -> &[Expense] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expense> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Expense> {
        self.entries.last()
    }

    pub fn total_amount(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |sum, expense| sum.saturating_add(expense.amount))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{ExpenseId, PaymentMethod};

    fn expense(id: u64, amount: u64) -> Expense {
        Expense {
            id: ExpenseId(id),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            main_category: "交通費".into(),
            sub_category: "電車".into(),
            amount,
            description: String::new(),
            payment_method: PaymentMethod::EMoney,
        }
    }

    #[test]
    fn totals_follow_appends() {
        let mut log = ExpenseLog::new();
        assert!(log.is_empty());
        assert_eq!(log.total_amount(), 0);

        log.append(expense(1, 210));
        log.append(expense(2, 390));

        assert_eq!(log.len(), 2);
        assert_eq!(log.total_amount(), 600);
        assert_eq!(log.last().map(|e| e.id), Some(ExpenseId(2)));
    }
}
