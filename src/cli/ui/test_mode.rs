//! Scripted answers for prompts, so shell sessions can run unattended.
//!
//! Each queue is enabled either from its environment variable (values split
//! on `|`) or programmatically through the `install_*` functions. A disabled
//! queue returns `None` and the caller falls back to the real terminal.

use once_cell::sync::Lazy;
use std::{collections::VecDeque, env, sync::Mutex};

pub const CONFIRMATIONS_ENV: &str = "KAKEIBO_TEST_CONFIRMATIONS";
pub const TEXT_INPUTS_ENV: &str = "KAKEIBO_TEST_TEXT_INPUTS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTestInput {
    Value(String),
    Keep,
    Back,
    Help,
    Cancel,
}

struct Queue<T> {
    enabled: bool,
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    fn from_env(var: &str, parse: fn(&str) -> T) -> Self {
        match env::var(var) {
            Ok(raw) => Self {
                enabled: true,
                items: split_segments(&raw).map(parse).collect(),
            },
            Err(_) => Self::disabled(),
        }
    }

    fn disabled() -> Self {
        Self {
            enabled: false,
            items: VecDeque::new(),
        }
    }

    fn install(&mut self, items: Vec<T>) {
        self.enabled = true;
        self.items = items.into();
    }

    fn reset(&mut self) {
        self.enabled = false;
        self.items.clear();
    }
}

static CONFIRMATIONS: Lazy<Mutex<Queue<bool>>> =
    Lazy::new(|| Mutex::new(Queue::from_env(CONFIRMATIONS_ENV, parse_confirmation)));

static TEXT_INPUTS: Lazy<Mutex<Queue<TextTestInput>>> =
    Lazy::new(|| Mutex::new(Queue::from_env(TEXT_INPUTS_ENV, parse_text_input)));

pub fn text_inputs_enabled() -> bool {
    TEXT_INPUTS
        .lock()
        .expect("text input queue poisoned")
        .enabled
}

/// Next scripted yes/no answer. An enabled but exhausted queue declines.
pub fn next_confirmation(prompt: &str) -> Option<bool> {
    let mut guard = CONFIRMATIONS.lock().expect("confirmation queue poisoned");
    if !guard.enabled {
        return None;
    }
    let answer = guard.items.pop_front().unwrap_or(false);
    tracing::debug!(prompt, answer, "scripted confirmation");
    Some(answer)
}

/// Next scripted text answer. An enabled but exhausted queue cancels.
pub fn next_text_input(label: &str) -> Option<TextTestInput> {
    let mut guard = TEXT_INPUTS.lock().expect("text input queue poisoned");
    if !guard.enabled {
        return None;
    }
    let input = guard.items.pop_front().unwrap_or(TextTestInput::Cancel);
    tracing::debug!(label, ?input, "scripted text input");
    Some(input)
}

fn split_segments(raw: &str) -> impl Iterator<Item = &str> {
    raw.split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

fn parse_confirmation(token: &str) -> bool {
    matches!(
        token.to_ascii_lowercase().as_str(),
        "y" | "yes" | "true" | "1" | "ok"
    )
}

fn parse_text_input(token: &str) -> TextTestInput {
    match token.to_ascii_uppercase().as_str() {
        "<ESC>" | "<CANCEL>" => TextTestInput::Cancel,
        "<BACK>" => TextTestInput::Back,
        "<HELP>" => TextTestInput::Help,
        "<KEEP>" => TextTestInput::Keep,
        "<BLANK>" | "<EMPTY>" => TextTestInput::Value(String::new()),
        _ => TextTestInput::Value(token.to_string()),
    }
}

pub fn install_confirmations(answers: Vec<bool>) {
    CONFIRMATIONS
        .lock()
        .expect("confirmation queue poisoned")
        .install(answers);
}

pub fn reset_confirmations() {
    CONFIRMATIONS
        .lock()
        .expect("confirmation queue poisoned")
        .reset();
}

pub fn install_text_inputs(inputs: Vec<TextTestInput>) {
    TEXT_INPUTS
        .lock()
        .expect("text input queue poisoned")
        .install(inputs);
}

pub fn reset_text_inputs() {
    TEXT_INPUTS
        .lock()
        .expect("text input queue poisoned")
        .reset();
}
