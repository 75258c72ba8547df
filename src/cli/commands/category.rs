use dialoguer::theme::ColorfulTheme;

use crate::cli::core::{parse_position, CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::ui::prompts::{inline_edit, TextPromptResult};
use crate::cli::ui::test_mode;
use crate::core::services::{ConfirmGate, ServiceError, ServiceResult};
use crate::core::EditTarget;
use crate::errors::KakeiboError;

use super::CommandDefinition;

const USAGE: &str = "category list
category add <name>
category add-sub <main#> <name>
category edit <main#> [sub#]
category input <text>
category commit | blur | cancel
category delete <main#> [sub#]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "category",
        "Manage main categories and subcategories",
        USAGE,
        cmd_category,
    )
    .with_subcommands(&[
        "list", "add", "add-sub", "edit", "input", "commit", "blur", "cancel", "delete",
    ])]
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(action) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: category <list|add|add-sub|edit|input|commit|blur|cancel|delete>".into(),
        ));
    };
    let rest = &args[1..];

    match action.to_lowercase().as_str() {
        "list" | "show" => list_categories(context),
        "add" => add_main(context, rest),
        "add-sub" => add_sub(context, rest),
        "edit" => begin_edit(context, rest),
        "input" => set_input(context, rest),
        "commit" => finish_edit(context, false),
        "blur" => finish_edit(context, true),
        "cancel" => cancel_edit(context),
        "delete" | "remove" => delete(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown category subcommand `{}`",
            other
        ))),
    }
}

fn list_categories(context: &mut ShellContext) -> CommandResult {
    output_section("Categories");
    let session = &context.session;
    let taxonomy = session.categories();
    if taxonomy.is_empty() {
        io::print_info("No categories yet. Use `category add <name>` to create one.");
        return Ok(());
    }

    let target = session.edit_target();
    let buffer = session.editor().buffer();
    let marker = |hit: bool| {
        if hit {
            format!("  <- editing: `{}`", buffer)
        } else {
            String::new()
        }
    };

    for (i, category) in taxonomy.iter().enumerate() {
        io::print_info(format!(
            "{:>3}. {}{}",
            i + 1,
            category.main_category,
            marker(target == EditTarget::EditingMain(i))
        ));
        for (j, sub) in category.sub_categories.iter().enumerate() {
            io::print_info(format!(
                "     {}.{} {}{}",
                i + 1,
                j + 1,
                sub,
                marker(target == EditTarget::EditingSub(i, j))
            ));
        }
    }
    Ok(())
}

fn joined(args: &[&str]) -> String {
    args.join(" ")
}

fn add_main(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = joined(args);
    if !context.session.add_main_category(&name) {
        return Err(CommandError::InvalidArguments(
            "usage: category add <name> (name cannot be blank)".into(),
        ));
    }
    io::print_success(format!("Added main category `{}`.", name.trim()));
    Ok(())
}

fn add_sub(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [main, name @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: category add-sub <main#> <name>".into(),
        ));
    };
    let index = parse_position(main, "main category number")?;
    let name = joined(name);
    let parent = context
        .session
        .categories()
        .get(index)
        .map(|category| category.main_category.clone())
        .ok_or_else(|| missing_main(index))?;
    if !context.session.add_subcategory(index, &name) {
        return Err(CommandError::InvalidArguments(
            "usage: category add-sub <main#> <name> (name cannot be blank or repeat a sibling)".into(),
        ));
    }
    io::print_success(format!(
        "Added subcategory `{}` under `{}`.",
        name.trim(),
        parent
    ));
    Ok(())
}

fn begin_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [main] => {
            let index = parse_position(main, "main category number")?;
            if !context.session.begin_edit_main(index) {
                return Err(missing_main(index));
            }
        }
        [main, sub] => {
            let i = parse_position(main, "main category number")?;
            let j = parse_position(sub, "subcategory number")?;
            if !context.session.begin_edit_sub(i, j) {
                return Err(missing_sub(i, j));
            }
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: category edit <main#> [sub#]".into(),
            ))
        }
    }

    let current = context.session.editor().buffer().to_string();
    if context.mode() == CliMode::Script {
        io::print_info(format!(
            "Editing `{}`. Use `category input <text>` then `category commit`.",
            current
        ));
        return Ok(());
    }

    io::print_hint("Enter saves, Esc cancels.");
    match inline_edit("Rename", &current)? {
        TextPromptResult::Value(text) => {
            context.session.set_edit_buffer(text);
            finish_edit(context, false)
        }
        TextPromptResult::Keep => finish_edit(context, false),
        TextPromptResult::Back | TextPromptResult::Help | TextPromptResult::Cancel => {
            cancel_edit(context)
        }
    }
}

fn set_input(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !context.session.set_edit_buffer(joined(args)) {
        return Err(CommandError::InvalidArguments(
            "no edit in progress; start one with `category edit <main#> [sub#]`".into(),
        ));
    }
    Ok(())
}

fn finish_edit(context: &mut ShellContext, blurred: bool) -> CommandResult {
    let target = context.session.edit_target();
    if target == EditTarget::Idle {
        io::print_warning("No edit in progress.");
        return Ok(());
    }
    let before = current_label(context, target);
    let changed = if blurred {
        context.session.blur_edit()
    } else {
        context.session.commit_edit()
    };
    if changed {
        let after = current_label(context, target).unwrap_or_default();
        io::print_success(format!(
            "Renamed `{}` to `{}`.",
            before.unwrap_or_default(),
            after
        ));
    } else {
        io::print_info("Name unchanged.");
    }
    Ok(())
}

fn current_label(context: &ShellContext, target: EditTarget) -> Option<String> {
    let taxonomy = context.session.categories();
    match target {
        EditTarget::Idle => None,
        EditTarget::EditingMain(i) => taxonomy.get(i).map(|c| c.main_category.clone()),
        EditTarget::EditingSub(i, j) => taxonomy.sub(i, j).map(str::to_string),
    }
}

fn cancel_edit(context: &mut ShellContext) -> CommandResult {
    if context.session.cancel_edit() {
        io::print_info("Edit discarded.");
    } else {
        io::print_warning("No edit in progress.");
    }
    Ok(())
}

fn delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if context.session.edit_target() != EditTarget::Idle {
        finish_edit(context, true)?;
    }
    let mut gate = ShellGate {
        mode: context.mode,
        theme: &context.theme,
    };
    match args {
        [main] => {
            let index = parse_position(main, "main category number")?;
            let Some(name) = context
                .session
                .categories()
                .get(index)
                .map(|category| category.main_category.clone())
            else {
                return Err(missing_main(index));
            };
            report_deletion(
                context.session.delete_main_category(index, &mut gate)?,
                format!("「{}」", name),
            );
        }
        [main, sub] => {
            let i = parse_position(main, "main category number")?;
            let j = parse_position(sub, "subcategory number")?;
            let Some(name) = context.session.categories().sub(i, j).map(str::to_string) else {
                return Err(missing_sub(i, j));
            };
            report_deletion(
                context.session.delete_subcategory(i, j, &mut gate)?,
                format!("「{}」", name),
            );
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: category delete <main#> [sub#]".into(),
            ))
        }
    }
    Ok(())
}

fn report_deletion(removed: bool, label: String) {
    if removed {
        io::print_success(format!("Deleted {}.", label));
    } else {
        io::print_info("Deletion cancelled.");
    }
}

fn missing_main(index: usize) -> CommandError {
    CommandError::InvalidArguments(format!("no main category #{}", index + 1))
}

fn missing_sub(main: usize, sub: usize) -> CommandError {
    CommandError::InvalidArguments(format!("no subcategory #{}.{}", main + 1, sub + 1))
}

/// Asks the person at the terminal, or reads scripted answers. Script mode
/// without scripted answers declines.
struct ShellGate<'a> {
    mode: CliMode,
    theme: &'a ColorfulTheme,
}

impl ConfirmGate for ShellGate<'_> {
    fn confirm(&mut self, prompt: &str) -> ServiceResult<bool> {
        if let Some(answer) = test_mode::next_confirmation(prompt) {
            io::print_info(format!("{} {}", prompt, if answer { "yes" } else { "no" }));
            return Ok(answer);
        }
        if self.mode == CliMode::Script {
            io::print_info(format!("{} no", prompt));
            return Ok(false);
        }
        io::confirm_action(self.theme, prompt, false)
            .map_err(|err| ServiceError::Core(KakeiboError::Prompt(err.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::core::process_script;
    use crate::core::EditTarget;

    #[test]
    fn add_and_add_sub_extend_the_taxonomy() {
        let app = process_script(&["category add 医療費", "category add-sub 5 薬局"]);
        let taxonomy = app.session.categories();
        assert_eq!(taxonomy.len(), 5);
        assert_eq!(taxonomy.sub(4, 0), Some("薬局"));
    }

    #[test]
    fn scripted_rename_flows_through_commit() {
        let app = process_script(&[
            "category edit 1 2",
            "category input ランチ",
            "category commit",
        ]);
        assert_eq!(app.session.categories().sub(0, 1), Some("ランチ"));
        assert_eq!(app.session.edit_target(), EditTarget::Idle);
    }

    #[test]
    fn retargeting_discards_pending_text() {
        let app = process_script(&[
            "category edit 1 2",
            "category input ランチ",
            "category edit 1",
            "category blur",
        ]);
        assert_eq!(app.session.categories().sub(0, 1), Some("外食"));
        assert_eq!(
            app.session.categories().get(0).map(|c| c.main_category.as_str()),
            Some("食費")
        );
    }

    #[test]
    fn duplicate_subcategory_is_refused() {
        let app = process_script(&[
            "category add-sub 1 外食",
            "category edit 1 1",
            "category input カフェ",
            "category commit",
        ]);
        assert_eq!(
            app.session.categories().subcategories_of("食費"),
            &["食料品".to_string(), "外食".into(), "カフェ".into()]
        );
    }

    #[test]
    fn delete_saves_pending_rename_first() {
        let app = process_script(&[
            "category edit 4",
            "category input レジャー",
            "category delete 1",
        ]);
        assert_eq!(
            app.session.categories().main_names(),
            vec!["食費", "住居費", "交通費", "レジャー"]
        );
        assert_eq!(app.session.edit_target(), EditTarget::Idle);
    }

    #[test]
    fn delete_without_scripted_answer_declines() {
        let app = process_script(&["category delete 1"]);
        assert_eq!(app.session.categories().len(), 4);
    }
}
