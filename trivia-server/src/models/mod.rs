//! Domain models shared by the store and the HTTP layer

pub mod category;
pub mod pagination;
pub mod question;

pub use category::{stored_category_id, Category};
pub use pagination::{Pagination, QUESTIONS_PER_PAGE};
pub use question::{lenient_int, NewQuestion, Question};
