use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::forms::{summary_lines, ExpenseWizard, FormResult, WizardInteraction};
use crate::cli::io;
use crate::cli::output::{current_preferences, section as output_section};
use crate::cli::ui::table_renderer::{Alignment, Table, TableColumn};
use crate::cli::ui::test_mode;
use crate::core::parse_amount;
use crate::currency::{format_amount, format_date, spoken_amount};
use crate::domain::{Displayable, PaymentMethod};

use super::CommandDefinition;

const USAGE: &str = "expense show
expense set <date|main|sub|amount|memo|payment> <value>
expense options
expense submit
expense reset
expense add
expense list
expense export";

const SUBCOMMANDS: &[&str] = &[
    "show", "set", "options", "submit", "reset", "add", "list", "export",
];

pub(crate) const FIELDS: [&str; 6] = ["date", "main", "sub", "amount", "memo", "payment"];

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "expense",
        "Fill in the expense draft and review the log",
        USAGE,
        cmd_expense,
    )
    .with_subcommands(SUBCOMMANDS)]
}

pub(crate) fn payment_keys() -> Vec<&'static str> {
    PaymentMethod::ALL.iter().map(|method| method.key()).collect()
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(action) = args.first() else {
        return Err(CommandError::InvalidArguments(
            format!("usage: expense <{}>", SUBCOMMANDS.join("|")),
        ));
    };
    let rest = &args[1..];

    match action.to_lowercase().as_str() {
        "show" | "draft" => show_draft(context),
        "set" => set_field(context, rest),
        "options" => show_options(context),
        "submit" => submit(context),
        "reset" => {
            context.session.reset_form();
            io::print_info("Draft cleared.");
            Ok(())
        }
        "add" => run_wizard(context),
        "list" => list_expenses(context),
        "export" => export(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown expense subcommand `{}`",
            other
        ))),
    }
}

fn show_draft(context: &ShellContext) -> CommandResult {
    output_section("Expense draft");
    for line in summary_lines(&context.session, &context.config.currency_symbol) {
        io::print_info(format!("  {}", line));
    }
    Ok(())
}

fn set_field(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [field, value @ ..] = args else {
        return Err(CommandError::InvalidArguments(format!(
            "usage: expense set <{}> <value>",
            FIELDS.join("|")
        )));
    };
    let value = value.join(" ");
    let session = &mut context.session;

    match field.to_lowercase().as_str() {
        "date" => {
            if session.set_date(&value) {
                io::print_success(format!("日付 = {}", value.trim()));
            } else {
                io::print_warning(format!(
                    "`{}` is not a YYYY-MM-DD date; the date was cleared.",
                    value
                ));
            }
        }
        "main" => {
            if !session.select_main(&value) {
                return Err(CommandError::InvalidArguments(format!(
                    "`{}` is not a main category",
                    value
                )));
            }
            match session.form().main_category() {
                Some(main) => io::print_success(format!("大分類 = {}", main)),
                None => io::print_info("大分類 cleared."),
            }
        }
        "sub" => {
            if !session.select_sub(&value) {
                return Err(CommandError::InvalidArguments(format!(
                    "`{}` is not a subcategory of the selected main category",
                    value
                )));
            }
            match session.form().sub_category() {
                Some(sub) => io::print_success(format!("中分類 = {}", sub)),
                None => io::print_info("中分類 cleared."),
            }
        }
        "amount" => {
            session.set_amount(value.trim());
            match parse_amount(&value) {
                Some(amount) => io::print_success(format!(
                    "金額 = {}",
                    format_amount(amount, &context.config.currency_symbol)
                )),
                None => io::print_warning(format!(
                    "`{}` is not a valid amount; submit will be refused until it is fixed.",
                    value
                )),
            }
        }
        "memo" | "description" => {
            session.set_description(value.as_str());
            io::print_success("メモ updated.");
        }
        "payment" => {
            let method = value
                .parse::<PaymentMethod>()
                .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
            session.set_payment_method(method);
            io::print_success(format!("支払方法 = {}", method));
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown field `{}`",
                other
            )))
        }
    }
    Ok(())
}

fn show_options(context: &ShellContext) -> CommandResult {
    let session = &context.session;
    output_section("Main categories");
    for category in session.categories().iter() {
        io::print_info(format!("  {}", category.display_label()));
    }

    match session.form().main_category() {
        Some(main) => {
            output_section(format!("Subcategories of {}", main));
            let subs = session.available_subcategories();
            if subs.is_empty() {
                io::print_info("  (none)");
            }
            for sub in subs {
                io::print_info(format!("  {}", sub));
            }
        }
        None => io::print_hint("Select a main category to see its subcategories."),
    }

    output_section("Payment methods");
    for method in PaymentMethod::ALL {
        io::print_info(format!("  {} ({})", method.label(), method.key()));
    }
    Ok(())
}

fn submit(context: &mut ShellContext) -> CommandResult {
    let expense = context
        .session
        .submit_expense()
        .map_err(|err| CommandError::Message(format!("Cannot submit expense: {}", err)))?;
    io::print_success(format!(
        "Recorded {} {} / {} {}.",
        format_date(expense.date),
        expense.main_category,
        expense.sub_category,
        format_amount(expense.amount, &context.config.currency_symbol)
    ));
    Ok(())
}

fn run_wizard(context: &mut ShellContext) -> CommandResult {
    if context.mode() == CliMode::Script && !test_mode::text_inputs_enabled() {
        return Err(CommandError::Message(
            "`expense add` needs a terminal; use `expense set` and `expense submit` in scripts."
                .into(),
        ));
    }

    let mut interaction = WizardInteraction::new(&context.theme);
    let symbol = &context.config.currency_symbol;
    match ExpenseWizard::run(&mut context.session, symbol, &mut interaction) {
        FormResult::Completed(expense) => {
            io::print_success(format!(
                "Recorded {} {} / {} {}.",
                format_date(expense.date),
                expense.main_category,
                expense.sub_category,
                format_amount(expense.amount, &context.config.currency_symbol)
            ));
        }
        FormResult::Cancelled => {
            io::print_info("Expense entry cancelled. The draft keeps what you entered.");
        }
    }
    Ok(())
}

fn list_expenses(context: &ShellContext) -> CommandResult {
    let log = context.session.log();
    if log.is_empty() {
        io::print_info("支出データがありません");
        return Ok(());
    }

    let spoken = current_preferences().screen_reader_mode;
    let symbol = &context.config.currency_symbol;
    let amount = |value: u64| {
        if spoken {
            spoken_amount(value)
        } else {
            format_amount(value, symbol)
        }
    };

    let rows = log
        .iter()
        .map(|expense| {
            vec![
                format_date(expense.date),
                format!("{} / {}", expense.main_category, expense.sub_category),
                expense.payment_method.label().to_string(),
                amount(expense.amount),
                expense.description.clone(),
            ]
        })
        .collect();
    let table = Table::new(
        vec![
            TableColumn::new("日付", Alignment::Left),
            TableColumn::new("カテゴリー", Alignment::Left).with_max_width(24),
            TableColumn::new("支払方法", Alignment::Left),
            TableColumn::new("金額", Alignment::Right),
            TableColumn::new("メモ", Alignment::Left).with_max_width(30),
        ],
        rows,
    );

    output_section("Expenses");
    println!("{}", table.render());
    io::print_info(format!(
        "{} entries, total {}",
        log.len(),
        amount(log.total_amount())
    ));
    Ok(())
}

fn export(context: &ShellContext) -> CommandResult {
    let json = serde_json::to_string_pretty(context.session.expenses())?;
    println!("{}", json);
    Ok(())
}
