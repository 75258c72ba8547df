use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{self, ClearType},
    ExecutableCommand,
};
use dialoguer::{theme::ColorfulTheme, Select};

use crate::cli::ui::test_mode::{self, TextTestInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPromptResult {
    Value(String),
    Keep,
    Back,
    Help,
    Cancel,
}

impl From<TextTestInput> for TextPromptResult {
    fn from(scripted: TextTestInput) -> Self {
        match scripted {
            TextTestInput::Value(value) => TextPromptResult::Value(value),
            TextTestInput::Keep => TextPromptResult::Keep,
            TextTestInput::Back => TextPromptResult::Back,
            TextTestInput::Help => TextPromptResult::Help,
            TextTestInput::Cancel => TextPromptResult::Cancel,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoicePromptResult {
    Value(String),
    Cancel,
}

/// Reads one line in raw mode. Enter submits, Esc or Ctrl-C cancels.
///
/// An empty answer means "keep" when a default is on offer.
pub fn text_input(label: &str, default: Option<&str>) -> io::Result<TextPromptResult> {
    if let Some(scripted) = test_mode::next_text_input(label) {
        return Ok(scripted.into());
    }

    match read_line(label, "")? {
        Some(buffer) => Ok(interpret_buffer(&buffer, default)),
        None => Ok(TextPromptResult::Cancel),
    }
}

/// Inline rename field preloaded with the current text. Enter returns the
/// buffer as typed, Esc cancels.
pub fn inline_edit(label: &str, initial: &str) -> io::Result<TextPromptResult> {
    if let Some(scripted) = test_mode::next_text_input(label) {
        return Ok(scripted.into());
    }

    Ok(match read_line(label, initial)? {
        Some(buffer) => TextPromptResult::Value(buffer),
        None => TextPromptResult::Cancel,
    })
}

/// Arrow-key selection over `options`. Scripted answers may name the option
/// or give its 1-based position.
pub fn select_choice(
    theme: &ColorfulTheme,
    title: &str,
    options: &[String],
    default: Option<&str>,
) -> io::Result<ChoicePromptResult> {
    if options.is_empty() {
        return Ok(ChoicePromptResult::Cancel);
    }

    if let Some(scripted) = test_mode::next_text_input(title) {
        return Ok(match scripted {
            TextTestInput::Value(value) => resolve_choice(options, &value)
                .map(ChoicePromptResult::Value)
                .unwrap_or(ChoicePromptResult::Cancel),
            TextTestInput::Keep => default
                .map(|value| ChoicePromptResult::Value(value.to_string()))
                .unwrap_or(ChoicePromptResult::Cancel),
            _ => ChoicePromptResult::Cancel,
        });
    }

    let initial = default
        .and_then(|value| options.iter().position(|option| option == value))
        .unwrap_or(0);
    let picked = Select::with_theme(theme)
        .with_prompt(title)
        .items(options)
        .default(initial)
        .interact_opt()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
    Ok(match picked {
        Some(index) => ChoicePromptResult::Value(options[index].clone()),
        None => ChoicePromptResult::Cancel,
    })
}

/// Matches `input` against `options` by exact label or 1-based index.
pub fn resolve_choice(options: &[String], input: &str) -> Option<String> {
    let trimmed = input.trim();
    if let Some(found) = options.iter().find(|option| option.as_str() == trimmed) {
        return Some(found.clone());
    }
    trimmed
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|index| options.get(index))
        .cloned()
}

fn read_line(label: &str, initial: &str) -> io::Result<Option<String>> {
    let mut stdout = io::stdout();
    let mut guard = RawModeGuard::activate()?;
    let mut buffer = initial.to_string();
    redraw_input(&mut stdout, label, &buffer)?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => {
                    guard.deactivate();
                    println!();
                    return Ok(None);
                }
                KeyCode::Char('u') | KeyCode::Char('U') => {
                    buffer.clear();
                    redraw_input(&mut stdout, label, &buffer)?;
                    continue;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc => {
                guard.deactivate();
                println!();
                return Ok(None);
            }
            KeyCode::Enter => {
                guard.deactivate();
                println!();
                return Ok(Some(buffer));
            }
            KeyCode::Backspace => {
                buffer.pop();
                redraw_input(&mut stdout, label, &buffer)?;
            }
            KeyCode::Char(ch) => {
                buffer.push(ch);
                redraw_input(&mut stdout, label, &buffer)?;
            }
            _ => {}
        }
    }
}

fn redraw_input(stdout: &mut Stdout, label: &str, buffer: &str) -> io::Result<()> {
    stdout.execute(cursor::MoveToColumn(0))?;
    stdout.execute(terminal::Clear(ClearType::CurrentLine))?;
    write!(stdout, "{label} > {buffer}")?;
    stdout.flush()
}

fn interpret_buffer(buffer: &str, default: Option<&str>) -> TextPromptResult {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return if default.is_some() {
            TextPromptResult::Keep
        } else {
            TextPromptResult::Value(String::new())
        };
    }

    match trimmed.to_ascii_lowercase().as_str() {
        ":cancel" => TextPromptResult::Cancel,
        ":back" => TextPromptResult::Back,
        ":help" => TextPromptResult::Help,
        ":clear" => TextPromptResult::Value(String::new()),
        _ => TextPromptResult::Value(buffer.to_string()),
    }
}

struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    fn activate() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { active: true })
    }

    fn deactivate(&mut self) {
        if self.active {
            let _ = terminal::disable_raw_mode();
            self.active = false;
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.deactivate();
    }
}
