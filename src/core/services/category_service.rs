use tracing::debug;

use crate::domain::Taxonomy;

use super::{ServiceError, ServiceResult};

/// Synchronous yes/no decision consulted before a destructive change.
///
/// The caller blocks until the gate answers; a `false` answer is a normal
/// outcome, not an error.
pub trait ConfirmGate {
    fn confirm(&mut self, prompt: &str) -> ServiceResult<bool>;
}

impl<F> ConfirmGate for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> ServiceResult<bool> {
        Ok(self(prompt))
    }
}

/// Outcome of a gated deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion {
    /// The entry was removed; carries the replacement snapshot.
    Removed(Taxonomy),
    /// The gate declined; nothing changed.
    Declined,
    /// No entry lives at the requested position.
    Missing,
}

pub struct CategoryService;

impl CategoryService {
    /// Confirmation text for removing a main category; warns about children.
    pub fn main_deletion_prompt(taxonomy: &Taxonomy, index: usize) -> Option<String> {
        let category = taxonomy.get(index)?;
        Some(if category.has_subcategories() {
            format!(
                "「{}」とそのすべての中分類を削除してもよろしいですか？",
                category.main_category
            )
        } else {
            format!("「{}」を削除してもよろしいですか？", category.main_category)
        })
    }

    pub fn sub_deletion_prompt(
        taxonomy: &Taxonomy,
        main_index: usize,
        sub_index: usize,
    ) -> Option<String> {
        let category = taxonomy.get(main_index)?;
        let sub = category.sub_categories.get(sub_index)?;
        Some(format!(
            "「{}」の「{}」を削除してもよろしいですか？",
            category.main_category, sub
        ))
    }

    pub fn delete_main(
        taxonomy: &Taxonomy,
        index: usize,
        gate: &mut dyn ConfirmGate,
    ) -> ServiceResult<Deletion> {
        let Some(prompt) = Self::main_deletion_prompt(taxonomy, index) else {
            return Ok(Deletion::Missing);
        };
        if !gate.confirm(&prompt)? {
            debug!(index, "main category deletion declined");
            return Ok(Deletion::Declined);
        }
        let mut next = taxonomy.clone();
        next.remove_main(index)
            .ok_or_else(|| ServiceError::Invalid(format!("category #{index} vanished")))?;
        Ok(Deletion::Removed(next))
    }

    pub fn delete_sub(
        taxonomy: &Taxonomy,
        main_index: usize,
        sub_index: usize,
        gate: &mut dyn ConfirmGate,
    ) -> ServiceResult<Deletion> {
        let Some(prompt) = Self::sub_deletion_prompt(taxonomy, main_index, sub_index) else {
            return Ok(Deletion::Missing);
        };
        if !gate.confirm(&prompt)? {
            debug!(main_index, sub_index, "subcategory deletion declined");
            return Ok(Deletion::Declined);
        }
        let mut next = taxonomy.clone();
        next.remove_sub(main_index, sub_index).ok_or_else(|| {
            ServiceError::Invalid(format!("subcategory #{main_index}.{sub_index} vanished"))
        })?;
        Ok(Deletion::Removed(next))
    }
}
