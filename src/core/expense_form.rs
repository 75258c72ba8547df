use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::core::clock::Clock;
use crate::domain::{Expense, ExpenseId, PaymentMethod, Taxonomy};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reasons a draft cannot be turned into an expense. Checked in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("a date is required")]
    MissingDate,
    #[error("a main category is required")]
    MissingMainCategory,
    #[error("a subcategory is required")]
    MissingSubCategory,
    #[error("amount `{0}` is not a whole non-negative number")]
    InvalidAmount(String),
}

/// Parses the leading base-10 integer of `raw`.
///
/// Leading whitespace and a single `+` are skipped; anything after the digit
/// run is ignored, so `"1500.9"` reads as 1500. Signed-negative or digitless
/// input yields `None`.
pub fn parse_amount(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Draft state of the expense entry form.
///
/// The subcategory only ever holds a member of the selected main category's
/// list; every operation that could break that pairing clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseForm {
    date: Option<NaiveDate>,
    main_category: Option<String>,
    sub_category: Option<String>,
    amount: String,
    description: String,
    payment_method: PaymentMethod,
}

impl ExpenseForm {
    pub fn new(clock: &dyn Clock) -> Self {
        Self {
            date: Some(clock.today()),
            main_category: None,
            sub_category: None,
            amount: String::new(),
            description: String::new(),
            payment_method: PaymentMethod::default(),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn main_category(&self) -> Option<&str> {
        self.main_category.as_deref()
    }

    pub fn sub_category(&self) -> Option<&str> {
        self.sub_category.as_deref()
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Picks the main category; an empty name unsets it. The subcategory is
    /// cleared whenever the selection is accepted.
    pub fn select_main(&mut self, taxonomy: &Taxonomy, name: &str) -> bool {
        if name.is_empty() {
            self.main_category = None;
        } else if taxonomy.find(name).is_some() {
            self.main_category = Some(name.to_string());
        } else {
            debug!(name, "main category not offered");
            return false;
        }
        self.sub_category = None;
        true
    }

    /// Picks a subcategory of the selected main; an empty name unsets it.
    pub fn select_sub(&mut self, taxonomy: &Taxonomy, name: &str) -> bool {
        if name.is_empty() {
            self.sub_category = None;
            return true;
        }
        if !self.available_subcategories(taxonomy).iter().any(|s| s == name) {
            debug!(name, main = ?self.main_category, "subcategory not offered");
            return false;
        }
        self.sub_category = Some(name.to_string());
        true
    }

    /// Choices the subcategory selector offers right now.
    pub fn available_subcategories<'a>(&self, taxonomy: &'a Taxonomy) -> &'a [String] {
        match &self.main_category {
            Some(main) => taxonomy.subcategories_of(main),
            None => &[],
        }
    }

    /// Sets the date from `YYYY-MM-DD`. Unparseable text leaves no date.
    pub fn set_date(&mut self, text: &str) -> bool {
        self.date = NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok();
        self.date.is_some()
    }

    pub fn set_amount(&mut self, text: impl Into<String>) {
        self.amount = text.into();
    }

    pub fn set_description(&mut self, text: impl Into<String>) {
        self.description = text.into();
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Drops selections the replacement taxonomy no longer offers. Returns
    /// whether anything was cleared.
    pub fn reconcile(&mut self, taxonomy: &Taxonomy) -> bool {
        let mut cleared = false;
        if let Some(main) = &self.main_category {
            if taxonomy.find(main).is_none() {
                debug!(main = main.as_str(), "selected main category disappeared");
                self.main_category = None;
                self.sub_category = None;
                cleared = true;
            }
        }
        if let Some(sub) = &self.sub_category {
            if !self.available_subcategories(taxonomy).contains(sub) {
                debug!(sub = sub.as_str(), "selected subcategory disappeared");
                self.sub_category = None;
                cleared = true;
            }
        }
        cleared
    }

    pub fn reset(&mut self, clock: &dyn Clock) {
        *self = Self::new(clock);
    }

    /// Validates the draft without consuming it. Returns the parsed amount.
    pub fn check(&self, taxonomy: &Taxonomy) -> Result<u64, DraftError> {
        if self.date.is_none() {
            return Err(DraftError::MissingDate);
        }
        let main = self
            .main_category
            .as_deref()
            .ok_or(DraftError::MissingMainCategory)?;
        match self.sub_category.as_deref() {
            Some(sub) if taxonomy.find(main).is_some_and(|c| c.contains_sub(sub)) => {}
            _ => return Err(DraftError::MissingSubCategory),
        }
        parse_amount(&self.amount).ok_or_else(|| DraftError::InvalidAmount(self.amount.clone()))
    }

    /// Builds the expense and resets the draft. On error the draft is kept.
    pub fn submit(
        &mut self,
        taxonomy: &Taxonomy,
        id: ExpenseId,
        clock: &dyn Clock,
    ) -> Result<Expense, DraftError> {
        let amount = self.check(taxonomy)?;
        let expense = Expense {
            id,
            date: self.date.ok_or(DraftError::MissingDate)?,
            main_category: self
                .main_category
                .clone()
                .ok_or(DraftError::MissingMainCategory)?,
            sub_category: self
                .sub_category
                .clone()
                .ok_or(DraftError::MissingSubCategory)?,
            amount,
            description: self.description.clone(),
            payment_method: self.payment_method,
        };
        self.reset(clock);
        Ok(expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn amount_parsing_reads_integer_prefix() {
        assert_eq!(parse_amount("1500"), Some(1500));
        assert_eq!(parse_amount("1500.9"), Some(1500));
        assert_eq!(parse_amount("+42yen"), Some(42));
        assert_eq!(parse_amount("  7"), Some(7));
        assert_eq!(parse_amount("0"), Some(0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("-5"), None);
        assert_eq!(parse_amount("+"), None);
    }

    #[test]
    fn new_draft_defaults_to_today_and_cash() {
        let clock = FixedClock::on(day(2024, 3, 9));
        let form = ExpenseForm::new(&clock);
        assert_eq!(form.date(), Some(day(2024, 3, 9)));
        assert_eq!(form.main_category(), None);
        assert_eq!(form.payment_method(), PaymentMethod::Cash);
        assert_eq!(form.amount(), "");
    }

    #[test]
    fn unknown_main_is_rejected() {
        let clock = FixedClock::on(day(2024, 1, 1));
        let taxonomy = Taxonomy::seeded();
        let mut form = ExpenseForm::new(&clock);
        form.select_main(&taxonomy, "食費");
        form.select_sub(&taxonomy, "外食");

        assert!(!form.select_main(&taxonomy, "雑費"));
        assert_eq!(form.main_category(), Some("食費"));
        assert_eq!(form.sub_category(), Some("外食"));

        assert!(form.select_main(&taxonomy, ""));
        assert_eq!(form.main_category(), None);
        assert_eq!(form.sub_category(), None);
    }

    #[test]
    fn sub_must_belong_to_selected_main() {
        let clock = FixedClock::on(day(2024, 1, 1));
        let taxonomy = Taxonomy::seeded();
        let mut form = ExpenseForm::new(&clock);

        assert!(!form.select_sub(&taxonomy, "外食"));
        form.select_main(&taxonomy, "交通費");
        assert!(!form.select_sub(&taxonomy, "外食"));
        assert!(form.select_sub(&taxonomy, "バス"));
        assert_eq!(
            form.available_subcategories(&taxonomy),
            ["電車", "バス", "タクシー"]
        );
    }

    #[test]
    fn bad_date_unsets_and_blocks_submit() {
        let clock = FixedClock::on(day(2024, 1, 1));
        let taxonomy = Taxonomy::seeded();
        let mut form = ExpenseForm::new(&clock);
        form.select_main(&taxonomy, "食費");
        form.select_sub(&taxonomy, "カフェ");
        form.set_amount("480");

        assert!(!form.set_date("2024-02-30"));
        assert_eq!(form.date(), None);
        let before = form.clone();
        assert_eq!(
            form.submit(&taxonomy, ExpenseId(1), &clock),
            Err(DraftError::MissingDate)
        );
        assert_eq!(form, before);
    }

    #[test]
    fn invalid_amount_is_reported_with_text() {
        let clock = FixedClock::on(day(2024, 1, 1));
        let taxonomy = Taxonomy::seeded();
        let mut form = ExpenseForm::new(&clock);
        form.select_main(&taxonomy, "食費");
        form.select_sub(&taxonomy, "カフェ");
        form.set_amount("-300");

        assert_eq!(
            form.check(&taxonomy),
            Err(DraftError::InvalidAmount("-300".into()))
        );
    }

    #[test]
    fn reconcile_clears_vanished_selections() {
        let clock = FixedClock::on(day(2024, 1, 1));
        let mut taxonomy = Taxonomy::seeded();
        let mut form = ExpenseForm::new(&clock);
        form.select_main(&taxonomy, "住居費");
        form.select_sub(&taxonomy, "家賃");

        taxonomy.rename_sub(1, 0, "賃料");
        assert!(form.reconcile(&taxonomy));
        assert_eq!(form.main_category(), Some("住居費"));
        assert_eq!(form.sub_category(), None);

        taxonomy.remove_main(1);
        assert!(form.reconcile(&taxonomy));
        assert_eq!(form.main_category(), None);
        assert!(!form.reconcile(&taxonomy));
    }

    #[test]
    fn submit_resets_to_fresh_today() {
        let clock = FixedClock::on(day(2024, 1, 1));
        let taxonomy = Taxonomy::seeded();
        let mut form = ExpenseForm::new(&clock);
        form.select_main(&taxonomy, "娯楽費");
        form.select_sub(&taxonomy, "映画");
        form.set_amount("1800");
        form.set_description("レイトショー");
        form.set_payment_method(PaymentMethod::CreditCard);

        clock.set(chrono::Utc::now());
        let expense = form.submit(&taxonomy, ExpenseId(7), &clock).unwrap();

        assert_eq!(expense.date, day(2024, 1, 1));
        assert_eq!(expense.amount, 1800);
        assert_eq!(expense.payment_method, PaymentMethod::CreditCard);
        assert_eq!(form, ExpenseForm::new(&clock));
    }
}
