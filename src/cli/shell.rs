use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::commands::{argument_candidates, value_candidates, CommandRegistry};
use crate::cli::core::{CliError, CliMode, LoopControl, ShellContext};
use crate::cli::output::info as output_info;
use crate::core::EditTarget;

/// Runs the shell. Set `KAKEIBO_CLI_SCRIPT` to read commands from stdin
/// without prompts.
pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os("KAKEIBO_CLI_SCRIPT").is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    tracing::debug!(?mode, config = %context.config_manager.path().display(), "shell starting");

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::from_registry(&context.registry)));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    output_info("Kakeibo expense tracker. Type `help` for commands.");

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                execute(context, trimmed)?;
            }
            // Ctrl-C acts as Escape while a name is being edited.
            Err(ReadlineError::Interrupted)
                if context.session.edit_target() != EditTarget::Idle =>
            {
                context.session.cancel_edit();
                output_info("Edit cancelled.");
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        execute(context, &line?)?;
    }
    Ok(())
}

fn execute(context: &mut ShellContext, line: &str) -> Result<(), CliError> {
    match context.process_line(line) {
        Ok(LoopControl::Continue | LoopControl::Exit) => Ok(()),
        Err(err) => context.report_error(err),
    }
}

/// Tab completion over the command tree: command names, then each
/// command's subcommands, then field names and the values they accept.
struct CommandHelper {
    commands: Vec<(&'static str, &'static [&'static str])>,
}

impl CommandHelper {
    fn from_registry(registry: &CommandRegistry) -> Self {
        let mut commands: Vec<_> = registry
            .iter()
            .map(|definition| (definition.name, definition.subcommands))
            .collect();
        commands.sort_by_key(|(name, _)| *name);
        Self { commands }
    }

    fn candidates(&self, words: &[String]) -> Vec<&'static str> {
        match words {
            [] => self.command_names(),
            [command] if command == "help" => self.command_names(),
            [command] => self
                .commands
                .iter()
                .find(|(name, _)| name == command)
                .map(|(_, subcommands)| subcommands.to_vec())
                .unwrap_or_default(),
            [command, subcommand] => argument_candidates(command, subcommand),
            [command, subcommand, field] => value_candidates(command, subcommand, field),
            _ => Vec::new(),
        }
    }

    fn command_names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|(name, _)| *name).collect()
    }
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let words: Vec<String> = prefix[..start]
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        let needle = prefix[start..].to_lowercase();
        let candidates = self
            .candidates(&words)
            .into_iter()
            .filter(|candidate| candidate.starts_with(&needle))
            .map(|candidate| Pair {
                display: candidate.to_string(),
                replacement: candidate.to_string(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Helper for CommandHelper {}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

#[derive(Debug, thiserror::Error)]
#[error("could not read command line: {0}")]
pub(crate) struct ParseError(#[from] shell_words::ParseError);

/// Splits a line into words with shell quoting; `#` starts a comment.
pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    Ok(shell_words::split(input)?)
}

#[cfg(test)]
mod tests {
    use crate::cli::commands::{all_definitions, CommandRegistry};

    use super::*;

    fn complete(line: &str) -> (usize, Vec<String>) {
        let helper = CommandHelper::from_registry(&CommandRegistry::new(all_definitions()));
        let history = DefaultHistory::new();
        let ctx = ReadlineContext::new(&history);
        let (start, candidates) = helper.complete(line, line.len(), &ctx).unwrap();
        (
            start,
            candidates.into_iter().map(|pair| pair.replacement).collect(),
        )
    }

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens = parse_command_line("category add \"日用品 雑貨\"").unwrap();
        assert_eq!(tokens, vec!["category", "add", "日用品 雑貨"]);
    }

    #[test]
    fn comment_lines_yield_no_words() {
        assert!(parse_command_line("# monthly fixtures").unwrap().is_empty());
    }

    #[test]
    fn unbalanced_quotes_are_reported() {
        assert!(parse_command_line("expense set memo \"open").is_err());
    }

    #[test]
    fn first_word_completes_command_names() {
        assert_eq!(complete("ex"), (0, vec!["exit".into(), "expense".into()]));
        assert_eq!(complete("help ca"), (5, vec!["category".into()]));
    }

    #[test]
    fn second_word_completes_subcommands() {
        assert_eq!(complete("category ed"), (9, vec!["edit".into()]));
        assert_eq!(
            complete("Expense s"),
            (8, vec!["show".into(), "set".into(), "submit".into()])
        );
        assert!(complete("version x").1.is_empty());
    }

    #[test]
    fn set_completes_fields_and_values() {
        assert_eq!(complete("expense set pa"), (12, vec!["payment".into()]));
        assert_eq!(complete("config set qu"), (11, vec!["quiet_mode".into()]));
        assert_eq!(
            complete("expense set payment cr"),
            (20, vec!["credit-card".into()])
        );
        assert_eq!(
            complete("config set quiet_mode o").1,
            vec!["on".to_string(), "off".to_string()]
        );
        assert!(complete("expense set memo ラ").1.is_empty());
    }
}
