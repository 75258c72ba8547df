use std::sync::{Mutex, MutexGuard};

use dialoguer::theme::ColorfulTheme;
use kakeibo::cli::ui::prompts::{
    inline_edit, select_choice, text_input, ChoicePromptResult, TextPromptResult,
};
use kakeibo::cli::ui::test_mode::{self, TextTestInput};
use once_cell::sync::Lazy;

static QUEUE_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Installs scripted answers for the duration of one test.
struct ScriptedInputs {
    _lock: MutexGuard<'static, ()>,
}

impl ScriptedInputs {
    fn install(texts: Vec<TextTestInput>, confirmations: Vec<bool>) -> Self {
        let lock = QUEUE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        test_mode::install_text_inputs(texts);
        test_mode::install_confirmations(confirmations);
        Self { _lock: lock }
    }
}

impl Drop for ScriptedInputs {
    fn drop(&mut self) {
        test_mode::reset_text_inputs();
        test_mode::reset_confirmations();
    }
}

fn value(text: &str) -> TextTestInput {
    TextTestInput::Value(text.into())
}

fn options() -> Vec<String> {
    vec!["現金".into(), "クレジットカード".into(), "電子マネー".into()]
}

#[test]
fn choices_accept_labels_positions_and_keep() {
    let _inputs = ScriptedInputs::install(
        vec![value("電子マネー"), value("2"), TextTestInput::Keep, value("小切手")],
        vec![],
    );
    let theme = ColorfulTheme::default();

    let pick = |default| select_choice(&theme, "支払方法", &options(), default).unwrap();
    assert_eq!(pick(None), ChoicePromptResult::Value("電子マネー".into()));
    assert_eq!(pick(None), ChoicePromptResult::Value("クレジットカード".into()));
    assert_eq!(pick(Some("現金")), ChoicePromptResult::Value("現金".into()));
    assert_eq!(pick(None), ChoicePromptResult::Cancel);
}

#[test]
fn exhausted_text_queue_cancels() {
    let _inputs = ScriptedInputs::install(vec![value("ランチ")], vec![]);

    assert_eq!(
        inline_edit("Rename", "外食").unwrap(),
        TextPromptResult::Value("ランチ".into())
    );
    assert_eq!(text_input("メモ", None).unwrap(), TextPromptResult::Cancel);
}

#[test]
fn exhausted_confirmations_decline() {
    let _inputs = ScriptedInputs::install(vec![], vec![true]);

    assert_eq!(test_mode::next_confirmation("delete?"), Some(true));
    assert_eq!(test_mode::next_confirmation("delete?"), Some(false));
}

#[test]
fn queues_are_disabled_after_reset() {
    {
        let _inputs = ScriptedInputs::install(vec![TextTestInput::Back], vec![]);
        assert!(test_mode::text_inputs_enabled());
    }
    let _lock = QUEUE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if std::env::var_os(test_mode::TEXT_INPUTS_ENV).is_none() {
        assert!(!test_mode::text_inputs_enabled());
        assert_eq!(test_mode::next_text_input("日付"), None);
    }
}
