//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::{Game, GameFilter, Loan, LoanFilter, Resource};
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick: drain finished requests, dispatch fetches, expire notifications
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next row
    NextItem,
    /// Move to previous row
    PrevItem,
    /// Jump to first row
    FirstItem,
    /// Jump to last row
    LastItem,
    /// Move to next tab
    NextTab,
    /// Move to previous tab
    PrevTab,

    // ─────────────────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────────────────
    NextPage,
    PrevPage,
    /// Cycle through the offered page sizes
    CyclePageSize,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Records
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the creation dialog of the active view
    OpenCreate,
    /// Open the edit dialog for the selected row
    OpenEdit,
    /// Ask for confirmation before deleting the selected row
    OpenDelete,
    /// Delete the record named by the confirmation dialog
    ConfirmDelete,
    SaveLoan(Loan),
    SaveGame(Game),
    /// Save a name-only record (category, author or client)
    SaveNamed {
        resource: Resource,
        id: String,
        name: String,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Filters
    // ─────────────────────────────────────────────────────────────────────────
    OpenFilter,
    /// Reset every filter of the active view ("Limpiar")
    ClearFilters,
    ApplyLoanFilter(LoanFilter),
    ApplyGameFilter(GameFilter),

    // ─────────────────────────────────────────────────────────────────────────
    // Misc
    // ─────────────────────────────────────────────────────────────────────────
    /// Drop the notification currently on screen
    DismissNotification,
    /// Invalidate everything the active view reads
    Refresh,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::NextTab => write!(f, "NextTab"),
            Action::PrevTab => write!(f, "PrevTab"),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::CyclePageSize => write!(f, "CyclePageSize"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::OpenCreate => write!(f, "OpenCreate"),
            Action::OpenEdit => write!(f, "OpenEdit"),
            Action::OpenDelete => write!(f, "OpenDelete"),
            Action::ConfirmDelete => write!(f, "ConfirmDelete"),
            Action::SaveLoan(loan) => write!(f, "SaveLoan({})", loan.id),
            Action::SaveGame(game) => write!(f, "SaveGame({})", game.title),
            Action::SaveNamed { resource, id, name } => {
                write!(f, "SaveNamed({}, {:?}, {})", resource, id, name)
            }
            Action::OpenFilter => write!(f, "OpenFilter"),
            Action::ClearFilters => write!(f, "ClearFilters"),
            Action::ApplyLoanFilter(_) => write!(f, "ApplyLoanFilter"),
            Action::ApplyGameFilter(_) => write!(f, "ApplyGameFilter"),
            Action::DismissNotification => write!(f, "DismissNotification"),
            Action::Refresh => write!(f, "Refresh"),
        }
    }
}
