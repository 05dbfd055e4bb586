//! Modal stack for managing overlays
//!
//! Only the top modal receives input events; the page view underneath keeps
//! rendering.

use super::entity::Resource;

/// Represents a modal overlay that can be displayed on top of the main UI
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Help dialog showing all keyboard shortcuts
    Help { scroll_offset: usize },
    /// Delete confirmation for one record
    ConfirmDelete { resource: Resource, id: String },
    /// Loan list filters
    LoanFilter,
    /// Game list filters
    GameFilter,
    /// Loan creation dialog
    LoanForm,
    /// Game create/edit dialog
    GameForm,
    /// Create/edit dialog for name-only records (categories, authors, clients)
    NameForm { resource: Resource },
}

/// A stack of modal overlays
///
/// Modals are rendered from bottom to top, with only the top modal
/// receiving input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    /// Create a new empty modal stack
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Push a modal onto the stack
    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    /// Pop the top modal from the stack
    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    /// Get a reference to the top modal without removing it
    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    /// Get a mutable reference to the top modal
    pub fn top_mut(&mut self) -> Option<&mut Modal> {
        self.stack.last_mut()
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::QuitConfirm);
        assert!(stack.top().is_some());

        stack.push(Modal::LoanForm);

        let top = stack.pop();
        assert_eq!(top, Some(Modal::LoanForm));

        let top = stack.pop();
        assert_eq!(top, Some(Modal::QuitConfirm));
        assert!(stack.top().is_none());
    }

    #[test]
    fn test_modal_stack_top_mut() {
        let mut stack = ModalStack::new();
        stack.push(Modal::Help { scroll_offset: 0 });

        if let Some(Modal::Help { scroll_offset }) = stack.top_mut() {
            *scroll_offset = 2;
        }

        assert_eq!(stack.top(), Some(&Modal::Help { scroll_offset: 2 }));
    }

    #[test]
    fn test_confirm_delete_carries_target() {
        let mut stack = ModalStack::new();
        stack.push(Modal::ConfirmDelete {
            resource: Resource::Loan,
            id: "3".to_string(),
        });
        assert!(matches!(
            stack.top(),
            Some(Modal::ConfirmDelete { resource: Resource::Loan, id }) if id == "3"
        ));
    }
}
