use crate::core::services::{CategoryService, ConfirmGate, Deletion, ServiceError, ServiceResult};
use crate::domain::{Category, Taxonomy};
use crate::errors::KakeiboError;

struct RecordingGate {
    answer: bool,
    prompts: Vec<String>,
}

impl RecordingGate {
    fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Vec::new(),
        }
    }
}

impl ConfirmGate for RecordingGate {
    fn confirm(&mut self, prompt: &str) -> ServiceResult<bool> {
        self.prompts.push(prompt.to_string());
        Ok(self.answer)
    }
}

struct BrokenGate;

impl ConfirmGate for BrokenGate {
    fn confirm(&mut self, _prompt: &str) -> ServiceResult<bool> {
        Err(ServiceError::Core(KakeiboError::Prompt("terminal closed".into())))
    }
}

#[test]
fn main_prompt_warns_about_subcategories() {
    let mut taxonomy = Taxonomy::seeded();
    taxonomy.add_main("雑費");

    let with_children = CategoryService::main_deletion_prompt(&taxonomy, 0).unwrap();
    assert_eq!(
        with_children,
        "「食費」とそのすべての中分類を削除してもよろしいですか？"
    );
    let without_children = CategoryService::main_deletion_prompt(&taxonomy, 4).unwrap();
    assert_eq!(without_children, "「雑費」を削除してもよろしいですか？");
}

#[test]
fn sub_prompt_names_parent_and_child() {
    let taxonomy = Taxonomy::seeded();
    let prompt = CategoryService::sub_deletion_prompt(&taxonomy, 2, 1).unwrap();
    assert_eq!(prompt, "「交通費」の「バス」を削除してもよろしいですか？");
}

#[test]
fn declined_main_deletion_leaves_snapshot_equal() {
    let taxonomy = Taxonomy::seeded();
    let before = taxonomy.clone();
    let mut gate = RecordingGate::answering(false);

    let outcome = CategoryService::delete_main(&taxonomy, 1, &mut gate).unwrap();

    assert_eq!(outcome, Deletion::Declined);
    assert_eq!(taxonomy, before);
    assert_eq!(gate.prompts.len(), 1);
}

#[test]
fn confirmed_main_deletion_returns_shifted_snapshot() {
    let taxonomy = Taxonomy::seeded();
    let mut gate = RecordingGate::answering(true);

    let Deletion::Removed(next) = CategoryService::delete_main(&taxonomy, 1, &mut gate).unwrap()
    else {
        panic!("expected removal");
    };

    assert_eq!(next.len(), 3);
    assert_eq!(next.main_names(), vec!["食費", "交通費", "娯楽費"]);
    assert_eq!(taxonomy.len(), 4, "input snapshot is never aliased");
}

#[test]
fn confirmed_sub_deletion_only_touches_parent() {
    let taxonomy = Taxonomy::seeded();
    let mut gate = |_: &str| true;

    let outcome = CategoryService::delete_sub(&taxonomy, 0, 1, &mut gate).unwrap();

    let Deletion::Removed(next) = outcome else {
        panic!("expected removal");
    };
    assert_eq!(next.get(0), Some(&Category::with_subcategories("食費", ["食料品", "カフェ"])));
    assert_eq!(next.get(1), taxonomy.get(1));
}

#[test]
fn missing_targets_never_reach_the_gate() {
    let taxonomy = Taxonomy::seeded();
    let mut gate = RecordingGate::answering(true);

    assert_eq!(
        CategoryService::delete_main(&taxonomy, 9, &mut gate).unwrap(),
        Deletion::Missing
    );
    assert_eq!(
        CategoryService::delete_sub(&taxonomy, 0, 9, &mut gate).unwrap(),
        Deletion::Missing
    );
    assert!(gate.prompts.is_empty());
}

#[test]
fn gate_failures_propagate() {
    let taxonomy = Taxonomy::seeded();
    let err = CategoryService::delete_main(&taxonomy, 0, &mut BrokenGate).unwrap_err();
    assert!(matches!(err, ServiceError::Core(KakeiboError::Prompt(_))));
}
