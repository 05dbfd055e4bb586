//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod authors;
pub mod catalog;
pub mod confirm_dialog;
pub mod filter_dialog;
pub mod form;
pub mod game_dialog;
pub mod games;
pub mod help_dialog;
pub mod layout;
pub mod loan_dialog;
pub mod loans;
pub mod name_dialog;
pub mod quit_dialog;
pub mod shell;
pub mod table;
pub mod view;

pub use authors::AuthorsView;
pub use catalog::CatalogView;
pub use confirm_dialog::ConfirmDialog;
pub use filter_dialog::{GameFilterDialog, LoanFilterDialog};
pub use game_dialog::GameDialog;
pub use games::GamesView;
pub use help_dialog::HelpDialog;
pub use layout::centered_popup;
pub use loan_dialog::LoanDialog;
pub use loans::LoansView;
pub use name_dialog::NameDialog;
pub use quit_dialog::QuitDialog;
pub use shell::{draw_shell, ShellComponent, ShellRenderContext};
pub use view::ResourceView;
