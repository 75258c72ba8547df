pub mod clock;
pub mod editor;
pub mod expense_form;
pub mod expense_log;
pub mod ids;
pub mod services;
pub mod session;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use editor::{CategoryEditor, EditTarget};
pub use expense_form::{parse_amount, DraftError, ExpenseForm};
pub use expense_log::ExpenseLog;
pub use ids::ExpenseIdGenerator;
pub use session::Session;
