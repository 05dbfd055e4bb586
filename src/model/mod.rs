//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - Backend records and the loan period rule
//! - Query keys, filters, pagination and mutations
//! - `ModalStack` and the notification/loading context

pub mod entity;
pub mod loan;
pub mod modal;
pub mod mutation;
pub mod notification;
pub mod query;
pub mod ui;

// Re-export commonly used types
pub use entity::{Author, Category, Client, Game, Loan, Named, Page, Resource};
pub use loan::{LoanDraft, DATE_RANGE_MESSAGE};
pub use mutation::Mutation;
pub use notification::{UiContext, GENERIC_ERROR_MESSAGE};
pub use query::{GameFilter, LoanFilter, LoanQuery, PageRequest, QueryData, QueryKey};
pub use ui::Tab;
