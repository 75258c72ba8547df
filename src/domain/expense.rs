//! Finalized expense records and the fixed set of payment methods.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::Displayable;

/// Session-unique expense identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(pub u64);

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How an expense was paid. Labels are the fixed display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "現金")]
    Cash,
    #[serde(rename = "クレジットカード")]
    CreditCard,
    #[serde(rename = "デビットカード")]
    DebitCard,
    #[serde(rename = "電子マネー")]
    EMoney,
    #[serde(rename = "QRコード決済")]
    QrCode,
    #[serde(rename = "その他")]
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 6] = [
        PaymentMethod::Cash,
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::EMoney,
        PaymentMethod::QrCode,
        PaymentMethod::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "現金",
            PaymentMethod::CreditCard => "クレジットカード",
            PaymentMethod::DebitCard => "デビットカード",
            PaymentMethod::EMoney => "電子マネー",
            PaymentMethod::QrCode => "QRコード決済",
            PaymentMethod::Other => "その他",
        }
    }

    /// ASCII alias accepted on the command line.
    pub fn key(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::CreditCard => "credit-card",
            PaymentMethod::DebitCard => "debit-card",
            PaymentMethod::EMoney => "e-money",
            PaymentMethod::QrCode => "qr",
            PaymentMethod::Other => "other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment method `{0}`")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let lowered = trimmed.to_ascii_lowercase();
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.label() == trimmed || method.key() == lowered)
            .ok_or_else(|| UnknownPaymentMethod(trimmed.to_string()))
    }
}

/// A recorded expense. Never mutated after it enters the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub date: NaiveDate,
    pub main_category: String,
    pub sub_category: String,
    pub amount: u64,
    #[serde(default)]
    pub description: String,
    pub payment_method: PaymentMethod,
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!(
            "{} {} / {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.main_category,
            self.sub_category,
            self.amount,
            self.payment_method
        )
    }
}
