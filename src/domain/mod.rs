pub mod category;
pub mod common;
pub mod expense;

pub use category::{Category, Taxonomy};
pub use common::{Displayable, NamedEntity};
pub use expense::{Expense, ExpenseId, PaymentMethod};
