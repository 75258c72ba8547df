//! Step-by-step expense entry over the session's draft.
//!
//! The wizard edits the live draft field by field, so `expense show` reflects
//! whatever was entered before a cancel. Choice lists are recomputed on every
//! step, which keeps the subcategory options tied to the chosen main category.

use dialoguer::theme::ColorfulTheme;

use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::ui::prompts::{
    resolve_choice, select_choice, text_input, ChoicePromptResult, TextPromptResult,
};
use crate::core::{parse_amount, DraftError, Session};
use crate::currency::{format_amount, format_date};
use crate::domain::{Expense, PaymentMethod};

/// High-level lifecycle states emitted by the form runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormResult<T> {
    Completed(T),
    Cancelled,
}

/// Describes how prompts can be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// User supplied a concrete value.
    Value(String),
    /// User chose to keep the current value.
    Keep,
    /// Abort the wizard; the draft keeps what was entered so far.
    Cancel,
    /// Go back to the previous field.
    Back,
    /// Show guidance for the current field.
    Help,
}

/// Responses accepted when confirming the collected data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResponse {
    Confirm,
    Back,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseField {
    Date,
    MainCategory,
    SubCategory,
    PaymentMethod,
    Amount,
    Memo,
}

impl ExpenseField {
    pub const ORDER: [ExpenseField; 6] = [
        ExpenseField::Date,
        ExpenseField::MainCategory,
        ExpenseField::SubCategory,
        ExpenseField::PaymentMethod,
        ExpenseField::Amount,
        ExpenseField::Memo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExpenseField::Date => "日付",
            ExpenseField::MainCategory => "大分類",
            ExpenseField::SubCategory => "中分類",
            ExpenseField::PaymentMethod => "支払方法",
            ExpenseField::Amount => "金額",
            ExpenseField::Memo => "メモ",
        }
    }

    fn help(self) -> &'static str {
        match self {
            ExpenseField::Date => "Date of the expense in YYYY-MM-DD form.",
            ExpenseField::MainCategory => "Pick a main category by name or number.",
            ExpenseField::SubCategory => "Pick one of the listed subcategories.",
            ExpenseField::PaymentMethod => "How the expense was paid.",
            ExpenseField::Amount => "Whole amount; anything after the leading digits is ignored.",
            ExpenseField::Memo => "Optional note. Leave blank to skip.",
        }
    }

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }

    fn for_error(error: &DraftError) -> Self {
        match error {
            DraftError::MissingDate => ExpenseField::Date,
            DraftError::MissingMainCategory => ExpenseField::MainCategory,
            DraftError::MissingSubCategory => ExpenseField::SubCategory,
            DraftError::InvalidAmount(_) => ExpenseField::Amount,
        }
    }
}

/// What the interaction layer needs to render one step.
pub struct PromptContext<'a> {
    pub field: ExpenseField,
    pub default: Option<&'a str>,
    pub choices: &'a [String],
    pub index: usize,
    pub total: usize,
}

impl PromptContext<'_> {
    fn title(&self) -> String {
        format!(
            "Step {} / {} - {}",
            self.index + 1,
            self.total,
            self.field.label()
        )
    }
}

pub trait FormInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse;

    fn confirm(&mut self, lines: &[String]) -> ConfirmationResponse;
}

/// Terminal implementation: arrow-key menus for choices, raw-mode text entry
/// otherwise. Both honour the scripted answer queue.
pub struct WizardInteraction<'a> {
    theme: &'a ColorfulTheme,
}

impl<'a> WizardInteraction<'a> {
    pub fn new(theme: &'a ColorfulTheme) -> Self {
        Self { theme }
    }
}

impl FormInteraction for WizardInteraction<'_> {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        let title = context.title();
        if !context.choices.is_empty() {
            return match select_choice(self.theme, &title, context.choices, context.default) {
                Ok(ChoicePromptResult::Value(value)) => PromptResponse::Value(value),
                Ok(ChoicePromptResult::Cancel) if context.index > 0 => PromptResponse::Back,
                _ => PromptResponse::Cancel,
            };
        }

        output_section(&title);
        if let Some(default) = context.default {
            io::print_hint(format!("Current: {} (Enter keeps it)", default));
        }
        match text_input(context.field.label(), context.default) {
            Ok(TextPromptResult::Value(value)) => PromptResponse::Value(value),
            Ok(TextPromptResult::Keep) => PromptResponse::Keep,
            Ok(TextPromptResult::Back) => PromptResponse::Back,
            Ok(TextPromptResult::Help) => PromptResponse::Help,
            Ok(TextPromptResult::Cancel) | Err(_) => PromptResponse::Cancel,
        }
    }

    fn confirm(&mut self, lines: &[String]) -> ConfirmationResponse {
        output_section("Review expense");
        for line in lines {
            io::print_info(line);
        }
        let options = vec![
            "Save".to_string(),
            "Edit previous field".to_string(),
            "Cancel".to_string(),
        ];
        match select_choice(self.theme, "Save this expense?", &options, Some("Save")) {
            Ok(ChoicePromptResult::Value(choice)) if choice == options[0] => {
                ConfirmationResponse::Confirm
            }
            Ok(ChoicePromptResult::Value(choice)) if choice == options[1] => {
                ConfirmationResponse::Back
            }
            _ => ConfirmationResponse::Cancel,
        }
    }
}

pub struct ExpenseWizard;

impl ExpenseWizard {
    /// Walks the draft field by field. `symbol` is the configured currency
    /// symbol shown on the review screen.
    pub fn run<I: FormInteraction>(
        session: &mut Session,
        symbol: &str,
        interaction: &mut I,
    ) -> FormResult<Expense> {
        let total = ExpenseField::ORDER.len();
        let mut index = 0;

        loop {
            if index >= total {
                match interaction.confirm(&summary_lines(session, symbol)) {
                    ConfirmationResponse::Confirm => match session.submit_expense() {
                        Ok(expense) => return FormResult::Completed(expense),
                        Err(err) => {
                            io::print_warning(&err);
                            index = ExpenseField::for_error(&err).position();
                        }
                    },
                    ConfirmationResponse::Back => index = total - 1,
                    ConfirmationResponse::Cancel => return FormResult::Cancelled,
                }
                continue;
            }

            let field = ExpenseField::ORDER[index];
            let choices = choices_for(session, field);
            if field == ExpenseField::SubCategory && choices.is_empty() {
                io::print_warning(
                    "The selected main category has no subcategories. Add one with `category add-sub` or pick another.",
                );
                index -= 1;
                continue;
            }
            let current = current_value(session, field);
            let response = interaction.prompt_field(&PromptContext {
                field,
                default: current.as_deref(),
                choices: &choices,
                index,
                total,
            });

            match response {
                PromptResponse::Cancel => return FormResult::Cancelled,
                PromptResponse::Back => index = index.saturating_sub(1),
                PromptResponse::Help => io::print_info(field.help()),
                PromptResponse::Keep => {
                    if current.is_some() || field == ExpenseField::Memo {
                        index += 1;
                    } else {
                        io::print_warning(format!("{} is required.", field.label()));
                    }
                }
                PromptResponse::Value(value) => match apply(session, field, &choices, &value) {
                    Ok(()) => index += 1,
                    Err(message) => io::print_warning(message),
                },
            }
        }
    }
}

fn choices_for(session: &Session, field: ExpenseField) -> Vec<String> {
    match field {
        ExpenseField::MainCategory => session
            .categories()
            .main_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        ExpenseField::SubCategory => session.available_subcategories().to_vec(),
        ExpenseField::PaymentMethod => PaymentMethod::ALL
            .iter()
            .map(|method| method.label().to_string())
            .collect(),
        _ => Vec::new(),
    }
}

fn current_value(session: &Session, field: ExpenseField) -> Option<String> {
    let form = session.form();
    match field {
        ExpenseField::Date => form.date().map(format_date),
        ExpenseField::MainCategory => form.main_category().map(str::to_string),
        ExpenseField::SubCategory => form.sub_category().map(str::to_string),
        ExpenseField::PaymentMethod => Some(form.payment_method().label().to_string()),
        ExpenseField::Amount => Some(form.amount().to_string()).filter(|text| !text.is_empty()),
        ExpenseField::Memo => {
            Some(form.description().to_string()).filter(|text| !text.is_empty())
        }
    }
}

fn apply(
    session: &mut Session,
    field: ExpenseField,
    choices: &[String],
    value: &str,
) -> Result<(), String> {
    match field {
        ExpenseField::Date => {
            if session.set_date(value) {
                Ok(())
            } else {
                Err("Use YYYY-MM-DD format.".into())
            }
        }
        ExpenseField::MainCategory => {
            let name = resolve_choice(choices, value)
                .ok_or_else(|| format!("`{}` is not one of the main categories.", value))?;
            if session.form().main_category() != Some(name.as_str()) {
                session.select_main(&name);
            }
            Ok(())
        }
        ExpenseField::SubCategory => {
            let name = resolve_choice(choices, value)
                .ok_or_else(|| format!("`{}` is not offered here.", value))?;
            session.select_sub(&name);
            Ok(())
        }
        ExpenseField::PaymentMethod => {
            let method = resolve_choice(choices, value)
                .as_deref()
                .unwrap_or(value)
                .parse::<PaymentMethod>()
                .map_err(|err| err.to_string())?;
            session.set_payment_method(method);
            Ok(())
        }
        ExpenseField::Amount => {
            if parse_amount(value).is_none() {
                return Err("Enter a whole, non-negative amount.".into());
            }
            session.set_amount(value.trim());
            Ok(())
        }
        ExpenseField::Memo => {
            session.set_description(value);
            Ok(())
        }
    }
}

/// `label: value` lines describing the current draft.
pub fn summary_lines(session: &Session, symbol: &str) -> Vec<String> {
    let form = session.form();
    let unset = || "(未選択)".to_string();
    let amount = match parse_amount(form.amount()) {
        Some(value) => format_amount(value, symbol),
        None if form.amount().is_empty() => unset(),
        None => format!("{} (invalid)", form.amount()),
    };
    vec![
        format!("{}: {}", ExpenseField::Date.label(), form.date().map(format_date).unwrap_or_else(unset)),
        format!(
            "{}: {}",
            ExpenseField::MainCategory.label(),
            form.main_category().map(str::to_string).unwrap_or_else(unset)
        ),
        format!(
            "{}: {}",
            ExpenseField::SubCategory.label(),
            form.sub_category().map(str::to_string).unwrap_or_else(unset)
        ),
        format!("{}: {}", ExpenseField::PaymentMethod.label(), form.payment_method()),
        format!("{}: {}", ExpenseField::Amount.label(), amount),
        format!("{}: {}", ExpenseField::Memo.label(), form.description()),
    ]
}
