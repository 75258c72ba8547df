//! Root coordinator owning the category taxonomy, the expense log, and the
//! two pieces of interaction state that read them.
//!
//! Components never mutate the taxonomy in place. They hand back replacement
//! snapshots which the session installs through [`Session::update_categories`],
//! after which the expense draft is reconciled against the new list.

use tracing::{debug, info};

use crate::core::clock::{Clock, SystemClock};
use crate::core::editor::{CategoryEditor, EditTarget};
use crate::core::expense_form::{DraftError, ExpenseForm};
use crate::core::expense_log::ExpenseLog;
use crate::core::ids::ExpenseIdGenerator;
use crate::core::services::{ConfirmGate, ServiceResult};
use crate::domain::{Displayable, Expense, PaymentMethod, Taxonomy};

pub struct Session {
    categories: Taxonomy,
    expenses: ExpenseLog,
    form: ExpenseForm,
    editor: CategoryEditor,
    ids: ExpenseIdGenerator,
    clock: Box<dyn Clock>,
}

impl Session {
    /// Session with the seeded taxonomy on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self::with_taxonomy(Taxonomy::seeded(), clock)
    }

    pub fn with_taxonomy(categories: Taxonomy, clock: Box<dyn Clock>) -> Self {
        let form = ExpenseForm::new(clock.as_ref());
        Self {
            categories,
            expenses: ExpenseLog::new(),
            form,
            editor: CategoryEditor::new(),
            ids: ExpenseIdGenerator::new(),
            clock,
        }
    }

    pub fn categories(&self) -> &Taxonomy {
        &self.categories
    }

    pub fn expenses(&self) -> &[Expense] {
        self.expenses.entries()
    }

    pub fn log(&self) -> &ExpenseLog {
        &self.expenses
    }

    pub fn form(&self) -> &ExpenseForm {
        &self.form
    }

    pub fn editor(&self) -> &CategoryEditor {
        &self.editor
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Installs a replacement taxonomy wholesale and drops draft selections
    /// it no longer offers.
    pub fn update_categories(&mut self, next: Taxonomy) {
        info!(
            before = self.categories.len(),
            after = next.len(),
            "category list replaced"
        );
        self.categories = next;
        if self.form.reconcile(&self.categories) {
            debug!("expense draft reconciled with new categories");
        }
    }

    fn install(&mut self, next: Option<Taxonomy>) -> bool {
        match next {
            Some(taxonomy) => {
                self.update_categories(taxonomy);
                true
            }
            None => false,
        }
    }

    // Category manager

    pub fn add_main_category(&mut self, name: &str) -> bool {
        let next = self.editor.add_main(&self.categories, name);
        self.install(next)
    }

    pub fn add_subcategory(&mut self, main_index: usize, name: &str) -> bool {
        let next = self.editor.add_sub(&self.categories, main_index, name);
        self.install(next)
    }

    pub fn begin_edit_main(&mut self, index: usize) -> bool {
        self.editor.begin_edit_main(&self.categories, index)
    }

    pub fn begin_edit_sub(&mut self, main_index: usize, sub_index: usize) -> bool {
        self.editor.begin_edit_sub(&self.categories, main_index, sub_index)
    }

    pub fn edit_target(&self) -> EditTarget {
        self.editor.target()
    }

    pub fn set_edit_buffer(&mut self, text: impl Into<String>) -> bool {
        self.editor.set_buffer(text)
    }

    pub fn commit_edit(&mut self) -> bool {
        let next = self.editor.commit(&self.categories);
        self.install(next)
    }

    pub fn blur_edit(&mut self) -> bool {
        let next = self.editor.blur(&self.categories);
        self.install(next)
    }

    pub fn cancel_edit(&mut self) -> bool {
        self.editor.cancel()
    }

    /// Pressing delete takes focus from the rename field, so a pending edit
    /// is written back before the confirmation is asked. Returns whether the
    /// entry was removed.
    pub fn delete_main_category(
        &mut self,
        index: usize,
        gate: &mut dyn ConfirmGate,
    ) -> ServiceResult<bool> {
        self.blur_edit();
        let next = self.editor.delete_main(&self.categories, index, gate)?;
        Ok(self.install(next))
    }

    pub fn delete_subcategory(
        &mut self,
        main_index: usize,
        sub_index: usize,
        gate: &mut dyn ConfirmGate,
    ) -> ServiceResult<bool> {
        self.blur_edit();
        let next = self
            .editor
            .delete_sub(&self.categories, main_index, sub_index, gate)?;
        Ok(self.install(next))
    }

    // Expense form

    pub fn select_main(&mut self, name: &str) -> bool {
        self.form.select_main(&self.categories, name)
    }

    pub fn select_sub(&mut self, name: &str) -> bool {
        self.form.select_sub(&self.categories, name)
    }

    pub fn available_subcategories(&self) -> &[String] {
        self.form.available_subcategories(&self.categories)
    }

    pub fn set_date(&mut self, text: &str) -> bool {
        self.form.set_date(text)
    }

    pub fn set_amount(&mut self, text: impl Into<String>) {
        self.form.set_amount(text);
    }

    pub fn set_description(&mut self, text: impl Into<String>) {
        self.form.set_description(text);
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.form.set_payment_method(method);
    }

    pub fn reset_form(&mut self) {
        self.form.reset(self.clock.as_ref());
    }

    /// Turns the draft into a logged expense. The draft is left untouched and
    /// no identifier is consumed when validation fails.
    pub fn submit_expense(&mut self) -> Result<Expense, DraftError> {
        self.form.check(&self.categories)?;
        let id = self.ids.next_id(self.clock.as_ref());
        let expense = self
            .form
            .submit(&self.categories, id, self.clock.as_ref())?;
        info!(id = %expense.id, expense = %expense.display_label(), "expense recorded");
        self.expenses.append(expense.clone());
        Ok(expense)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
