use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::config::CONFIG_KEYS;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "View and change display preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )
    .with_subcommands(&["show", "set"])]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return show_config(context);
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    CONFIG_KEYS.join("|")
                )));
            }
            let key = args[1].to_lowercase();
            let value = args[2..].join(" ");
            set_config_value(context, &key, value.trim())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config subcommand `{}`",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output_section("Configuration");
    for (key, value) in context.config.entries() {
        io::print_info(format!("  {:<20} {}", key, value));
    }
    io::print_hint(format!("Stored at {}", context.config_manager.path().display()));
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated
        .set_value(key, value)
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
    context.config = updated;
    context.persist_config()?;
    io::apply_config(&context.config);
    io::print_success(format!("Set {} = {}.", key, value));
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::core::process_script;

    #[test]
    fn set_updates_and_persists() {
        let app = process_script(&["config set currency_symbol 円", "config set quiet_mode on"]);
        assert_eq!(app.config.currency_symbol, "円");
        assert!(app.config.quiet_mode);
        let reloaded = app.config_manager.load().unwrap();
        assert_eq!(reloaded, app.config);
    }

    #[test]
    fn rejected_values_leave_config_untouched() {
        let app = process_script(&["config set screen_reader_mode maybe", "config set colour red"]);
        assert!(!app.config.screen_reader_mode);
        assert_eq!(app.config.currency_symbol, "¥");
    }
}
