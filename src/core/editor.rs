//! Rename/delete state machine behind the category manager panel.
//!
//! At most one entry is under edit at a time. Every method that changes the
//! taxonomy returns a complete replacement snapshot instead of mutating the
//! caller's copy; `None` means nothing changed.

use tracing::debug;

use crate::core::services::{CategoryService, ConfirmGate, Deletion, ServiceResult};
use crate::domain::Taxonomy;

/// Which entry, if any, is being renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditTarget {
    #[default]
    Idle,
    EditingMain(usize),
    EditingSub(usize, usize),
}

#[derive(Debug, Clone, Default)]
pub struct CategoryEditor {
    target: EditTarget,
    buffer: String,
}

impl CategoryEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> EditTarget {
        self.target
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_editing(&self) -> bool {
        self.target != EditTarget::Idle
    }

    /// Starts renaming a main category. A pending edit elsewhere is dropped.
    pub fn begin_edit_main(&mut self, taxonomy: &Taxonomy, index: usize) -> bool {
        let Some(category) = taxonomy.get(index) else {
            return false;
        };
        self.enter(EditTarget::EditingMain(index), category.main_category.clone());
        true
    }

    /// Starts renaming a subcategory. A pending edit elsewhere is dropped.
    pub fn begin_edit_sub(&mut self, taxonomy: &Taxonomy, main_index: usize, sub_index: usize) -> bool {
        let Some(current) = taxonomy.sub(main_index, sub_index) else {
            return false;
        };
        self.enter(
            EditTarget::EditingSub(main_index, sub_index),
            current.to_string(),
        );
        true
    }

    fn enter(&mut self, target: EditTarget, text: String) {
        if self.is_editing() && self.target != target {
            debug!(previous = ?self.target, "discarding uncommitted edit");
        }
        debug!(?target, "edit started");
        self.target = target;
        self.buffer = text;
    }

    /// Replaces the pending text. Ignored while idle.
    pub fn set_buffer(&mut self, text: impl Into<String>) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.buffer = text.into();
        true
    }

    /// Writes the pending text back (Enter). Blank text leaves the entry as is.
    pub fn commit(&mut self, taxonomy: &Taxonomy) -> Option<Taxonomy> {
        let target = std::mem::take(&mut self.target);
        let buffer = std::mem::take(&mut self.buffer);

        let mut next = taxonomy.clone();
        let changed = match target {
            EditTarget::Idle => false,
            EditTarget::EditingMain(index) => next.rename_main(index, &buffer),
            EditTarget::EditingSub(main_index, sub_index) => {
                next.rename_sub(main_index, sub_index, &buffer)
            }
        };
        debug!(?target, changed, "edit committed");
        changed.then_some(next)
    }

    /// Focus left the edit field; same effect as an explicit commit.
    pub fn blur(&mut self, taxonomy: &Taxonomy) -> Option<Taxonomy> {
        self.commit(taxonomy)
    }

    /// Drops the pending edit (Escape). Returns whether an edit was pending.
    pub fn cancel(&mut self) -> bool {
        let was_editing = self.is_editing();
        if was_editing {
            debug!(target = ?self.target, "edit cancelled");
        }
        self.target = EditTarget::Idle;
        self.buffer.clear();
        was_editing
    }

    pub fn add_main(&self, taxonomy: &Taxonomy, name: &str) -> Option<Taxonomy> {
        let mut next = taxonomy.clone();
        next.add_main(name).then_some(next)
    }

    pub fn add_sub(&self, taxonomy: &Taxonomy, main_index: usize, name: &str) -> Option<Taxonomy> {
        let mut next = taxonomy.clone();
        next.add_sub(main_index, name).then_some(next)
    }

    pub fn delete_main(
        &mut self,
        taxonomy: &Taxonomy,
        index: usize,
        gate: &mut dyn ConfirmGate,
    ) -> ServiceResult<Option<Taxonomy>> {
        let outcome = CategoryService::delete_main(taxonomy, index, gate)?;
        Ok(self.settle(outcome))
    }

    pub fn delete_sub(
        &mut self,
        taxonomy: &Taxonomy,
        main_index: usize,
        sub_index: usize,
        gate: &mut dyn ConfirmGate,
    ) -> ServiceResult<Option<Taxonomy>> {
        let outcome = CategoryService::delete_sub(taxonomy, main_index, sub_index, gate)?;
        Ok(self.settle(outcome))
    }

    // Removal shifts positions, so a pending edit could now point elsewhere.
    fn settle(&mut self, outcome: Deletion) -> Option<Taxonomy> {
        match outcome {
            Deletion::Removed(next) => {
                self.cancel();
                Some(next)
            }
            Deletion::Declined | Deletion::Missing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_edit_loads_current_text() {
        let taxonomy = Taxonomy::seeded();
        let mut editor = CategoryEditor::new();

        assert!(editor.begin_edit_sub(&taxonomy, 1, 2));
        assert_eq!(editor.target(), EditTarget::EditingSub(1, 2));
        assert_eq!(editor.buffer(), "通信費");

        assert!(!editor.begin_edit_main(&taxonomy, 42));
        assert_eq!(editor.target(), EditTarget::EditingSub(1, 2));
    }

    #[test]
    fn commit_trims_and_returns_to_idle() {
        let taxonomy = Taxonomy::seeded();
        let mut editor = CategoryEditor::new();
        editor.begin_edit_main(&taxonomy, 0);
        editor.set_buffer("  Food ");

        let next = editor.commit(&taxonomy).expect("renamed");
        assert_eq!(next.get(0).map(|c| c.main_category.as_str()), Some("Food"));
        assert_eq!(editor.target(), EditTarget::Idle);
        assert_eq!(editor.buffer(), "");
    }

    #[test]
    fn blank_commit_is_a_noop() {
        let taxonomy = Taxonomy::seeded();
        let mut editor = CategoryEditor::new();
        editor.begin_edit_sub(&taxonomy, 0, 0);
        editor.set_buffer("   ");

        assert!(editor.commit(&taxonomy).is_none());
        assert!(!editor.is_editing());
    }

    #[test]
    fn cancel_discards_buffer() {
        let taxonomy = Taxonomy::seeded();
        let mut editor = CategoryEditor::new();
        editor.begin_edit_main(&taxonomy, 3);
        editor.set_buffer("Leisure");

        assert!(editor.cancel());
        assert!(!editor.cancel());
        assert!(editor.commit(&taxonomy).is_none());
    }

    #[test]
    fn set_buffer_requires_active_edit() {
        let mut editor = CategoryEditor::new();
        assert!(!editor.set_buffer("ignored"));
        assert_eq!(editor.buffer(), "");
    }

    #[test]
    fn switching_targets_drops_previous_edit() {
        let taxonomy = Taxonomy::seeded();
        let mut editor = CategoryEditor::new();
        editor.begin_edit_sub(&taxonomy, 0, 1);
        editor.set_buffer("ランチ");

        editor.begin_edit_main(&taxonomy, 0);
        assert_eq!(editor.buffer(), "食費");
        let next = editor.commit(&taxonomy).expect("same text still replaces");
        assert_eq!(next.sub(0, 1), Some("外食"));
    }

    #[test]
    fn confirmed_delete_resets_pending_edit() {
        let taxonomy = Taxonomy::seeded();
        let mut editor = CategoryEditor::new();
        editor.begin_edit_main(&taxonomy, 2);

        let mut yes = |_: &str| true;
        let next = editor.delete_main(&taxonomy, 0, &mut yes).unwrap();
        assert_eq!(next.map(|t| t.len()), Some(3));
        assert_eq!(editor.target(), EditTarget::Idle);
    }

    #[test]
    fn declined_delete_keeps_pending_edit() {
        let taxonomy = Taxonomy::seeded();
        let mut editor = CategoryEditor::new();
        editor.begin_edit_main(&taxonomy, 2);

        let mut no = |_: &str| false;
        assert!(editor.delete_sub(&taxonomy, 0, 0, &mut no).unwrap().is_none());
        assert_eq!(editor.target(), EditTarget::EditingMain(2));
    }

    #[test]
    fn add_helpers_ignore_blank_names() {
        let taxonomy = Taxonomy::seeded();
        let editor = CategoryEditor::new();
        assert!(editor.add_main(&taxonomy, " ").is_none());
        assert!(editor.add_sub(&taxonomy, 0, "").is_none());
        let next = editor.add_sub(&taxonomy, 3, "ゲーム").expect("added");
        assert_eq!(next.sub(3, 3), Some("ゲーム"));
    }
}
