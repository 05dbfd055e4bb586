//! App - Root component that coordinates the page views and the backend
//!
//! The App owns the query cache, the request runner and the UI context.
//! Views only describe what they read; the App dispatches those reads,
//! routes finished requests into the cache and turns outcomes into
//! notifications.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_shell, AuthorsView, CatalogView, ConfirmDialog, GameDialog, GameFilterDialog, GamesView,
    HelpDialog, LoanDialog, LoanFilterDialog, LoansView, NameDialog, QuitDialog, ResourceView,
    ShellComponent, ShellRenderContext,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::{
    Author, Category, Client, Mutation, QueryKey, Resource, Tab, UiContext, GENERIC_ERROR_MESSAGE,
};
use crate::services::{LudotecaApi, QueryCache, RequestMessage, RequestRunner};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Instant;

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Cached backend reads
    pub cache: QueryCache,

    /// Background request runner
    pub runner: RequestRunner,

    /// Loading flag and notification queue
    pub ui: UiContext,

    /// Modal overlay stack
    pub modals: ModalStack,

    // ─────────────────────────────────────────────────────────────────────────
    // Page Views
    // ─────────────────────────────────────────────────────────────────────────
    pub shell: ShellComponent,
    pub games: GamesView,
    pub categories: CatalogView<Category>,
    pub authors: AuthorsView,
    pub clients: CatalogView<Client>,
    pub loans: LoansView,

    // ─────────────────────────────────────────────────────────────────────────
    // Dialogs
    // ─────────────────────────────────────────────────────────────────────────
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
    pub confirm_dialog: ConfirmDialog,
    pub loan_filter_dialog: LoanFilterDialog,
    pub game_filter_dialog: GameFilterDialog,
    pub loan_dialog: LoanDialog,
    pub game_dialog: GameDialog,
    pub name_dialog: NameDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    pub fn new(config: &Config, api: Arc<dyn LudotecaApi>) -> App {
        let page_size = config.page_size();
        App {
            should_quit: false,
            cache: QueryCache::new(config.cache_keep_unused()),
            runner: RequestRunner::new(api),
            ui: UiContext::new(config.notification_ttl()),
            modals: ModalStack::new(),
            shell: ShellComponent::new(),
            games: GamesView::new(),
            categories: CatalogView::categories(),
            authors: AuthorsView::new(page_size),
            clients: CatalogView::clients(),
            loans: LoansView::new(page_size),
            quit_dialog: QuitDialog::default(),
            help_dialog: HelpDialog::default(),
            confirm_dialog: ConfirmDialog::default(),
            loan_filter_dialog: LoanFilterDialog::new(),
            game_filter_dialog: GameFilterDialog::new(),
            loan_dialog: LoanDialog::new(),
            game_dialog: GameDialog::new(),
            name_dialog: NameDialog::default(),
        }
    }

    fn active_view(&self) -> &dyn ResourceView {
        match self.shell.active_tab {
            Tab::Games => &self.games,
            Tab::Categories => &self.categories,
            Tab::Authors => &self.authors,
            Tab::Clients => &self.clients,
            Tab::Loans => &self.loans,
        }
    }

    fn active_view_mut(&mut self) -> &mut dyn ResourceView {
        match self.shell.active_tab {
            Tab::Games => &mut self.games,
            Tab::Categories => &mut self.categories,
            Tab::Authors => &mut self.authors,
            Tab::Clients => &mut self.clients,
            Tab::Loans => &mut self.loans,
        }
    }

    /// One pass of the data loop: drain finished requests, dispatch the
    /// reads the active view is missing, refresh the view and dialogs and
    /// recompute the loading flag.
    pub fn sync_queries(&mut self, now: Instant) {
        for message in self.runner.poll() {
            self.handle_message(message, now);
        }

        let subscriptions = self.active_view().subscriptions();
        for key in &subscriptions {
            if self.cache.needs_fetch(key) {
                let generation = self.cache.generation(key.tag());
                self.runner.spawn_query(key.clone(), generation);
            }
        }
        self.cache.touch(&subscriptions, now);
        let subscribed: HashSet<QueryKey> = subscriptions.iter().cloned().collect();
        self.cache.evict_unused(&subscribed, now);

        let cache = &self.cache;
        match self.shell.active_tab {
            Tab::Games => self.games.sync(cache),
            Tab::Categories => self.categories.sync(cache),
            Tab::Authors => self.authors.sync(cache),
            Tab::Clients => self.clients.sync(cache),
            Tab::Loans => self.loans.sync(cache),
        }
        self.refresh_dialog_options();

        let loading = self.runner.is_mutating()
            || subscriptions.iter().any(|key| self.runner.is_fetching(key));
        self.ui.show_loading(loading);
        self.ui.notifications.expire(now);
    }

    fn handle_message(&mut self, message: RequestMessage, now: Instant) {
        match message {
            RequestMessage::Query {
                key,
                generation,
                result,
            } => {
                if result.is_err() {
                    self.notify_error(GENERIC_ERROR_MESSAGE.to_string());
                }
                self.cache.store(key, generation, result, now);
            }
            RequestMessage::Mutation { mutation, result } => match result {
                Ok(()) => {
                    self.cache.invalidate(&mutation.invalidates());
                    self.ui.notifications.push_ok(mutation.success_message());
                }
                Err(e) => self.notify_error(e.user_message()),
            },
        }
    }

    /// Queue an error unless the same text is already waiting last in line
    fn notify_error(&mut self, text: String) {
        if self.ui.notifications.texts().last() != Some(&text.as_str()) {
            self.ui.notifications.push_error(text);
        }
    }

    /// Keep open dialogs in step with lookup lists that arrive late
    fn refresh_dialog_options(&mut self) {
        match self.modals.top() {
            Some(Modal::LoanForm) => self
                .loan_dialog
                .set_options(self.loans.games().to_vec(), self.loans.clients().to_vec()),
            Some(Modal::LoanFilter) => self
                .loan_filter_dialog
                .set_options(self.loans.games().to_vec(), self.loans.clients().to_vec()),
            Some(Modal::GameForm) => self
                .game_dialog
                .set_options(self.games.categories().to_vec(), self.games.authors().to_vec()),
            Some(Modal::GameFilter) => {
                self.game_filter_dialog.set_options(self.games.categories().to_vec())
            }
            _ => {}
        }
    }

    fn open_create(&mut self) {
        match self.shell.active_tab {
            Tab::Games => {
                self.game_dialog.open(
                    None,
                    self.games.categories().to_vec(),
                    self.games.authors().to_vec(),
                );
                self.modals.push(Modal::GameForm);
            }
            Tab::Loans => {
                self.loan_dialog
                    .open(None, self.loans.games().to_vec(), self.loans.clients().to_vec());
                self.modals.push(Modal::LoanForm);
            }
            tab => {
                let resource = tab.resource();
                self.name_dialog.open(resource, "", "");
                self.modals.push(Modal::NameForm { resource });
            }
        }
    }

    /// Loans have no edit dialog
    fn open_edit(&mut self) {
        let named = match self.shell.active_tab {
            Tab::Games => {
                if let Some(game) = self.games.selected_game().cloned() {
                    self.game_dialog.open(
                        Some(&game),
                        self.games.categories().to_vec(),
                        self.games.authors().to_vec(),
                    );
                    self.modals.push(Modal::GameForm);
                }
                return;
            }
            Tab::Loans => return,
            Tab::Categories => self.categories.selected().map(|c| (c.id.clone(), c.name.clone())),
            Tab::Authors => self.authors.selected_author().map(|a| (a.id.clone(), a.name.clone())),
            Tab::Clients => self.clients.selected().map(|c| (c.id.clone(), c.name.clone())),
        };
        if let Some((id, name)) = named {
            let resource = self.shell.active_tab.resource();
            self.name_dialog.open(resource, &id, &name);
            self.modals.push(Modal::NameForm { resource });
        }
    }

    fn open_delete(&mut self) {
        let view = self.active_view();
        let resource = view.resource();
        if let Some(id) = view.selected_id() {
            self.confirm_dialog.open(resource, &id);
            self.modals.push(Modal::ConfirmDelete { resource, id });
        }
    }

    fn open_filter(&mut self) {
        match self.shell.active_tab {
            Tab::Loans => {
                self.loan_filter_dialog.open(
                    self.loans.filter(),
                    self.loans.games().to_vec(),
                    self.loans.clients().to_vec(),
                );
                self.modals.push(Modal::LoanFilter);
            }
            Tab::Games => {
                self.game_filter_dialog
                    .open(self.games.filter(), self.games.categories().to_vec());
                self.modals.push(Modal::GameFilter);
            }
            _ => {}
        }
    }

    /// Close the dialog that produced a save and send the mutation
    fn submit(&mut self, mutation: Mutation) {
        self.modals.pop();
        self.runner.spawn_mutation(mutation);
    }

    /// Invalidate every tag the active view reads
    fn refresh(&mut self) {
        let tags: BTreeSet<Resource> = self
            .active_view()
            .subscriptions()
            .iter()
            .map(QueryKey::tag)
            .collect();
        let tags: Vec<Resource> = tags.into_iter().collect();
        tracing::info!(?tags, "manual refresh");
        self.cache.invalidate(&tags);
    }
}

/// Save mutation for a name-only record
fn named_mutation(resource: Resource, id: String, name: String) -> Option<Mutation> {
    match resource {
        Resource::Category => Some(Mutation::SaveCategory(Category { id, name })),
        Resource::Author => Some(Mutation::SaveAuthor(Author { id, name })),
        Resource::Client => Some(Mutation::SaveClient(Client { id, name })),
        Resource::Game | Resource::Loan => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.sync_queries(Instant::now());
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Ctrl-C quits from anywhere, dialogs included
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }
        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else {
            self.shell.handle_key_event(key)
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                self.shell.update(Action::Tick)?;
                self.sync_queries(Instant::now());
            }
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Navigation & Pagination
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem
            | Action::PrevItem
            | Action::FirstItem
            | Action::LastItem
            | Action::NextPage
            | Action::PrevPage
            | Action::CyclePageSize => {
                self.active_view_mut().update(action)?;
            }
            Action::NextTab | Action::PrevTab => {
                self.shell.update(action)?;
                self.sync_queries(Instant::now());
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.quit_dialog.open(self.runner.is_mutating());
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help { scroll_offset: 0 });
            }
            Action::CloseModal => {
                self.modals.pop();
            }

            // ─────────────────────────────────────────────────────────────────
            // Records
            // ─────────────────────────────────────────────────────────────────
            Action::OpenCreate => self.open_create(),
            Action::OpenEdit => self.open_edit(),
            Action::OpenDelete => self.open_delete(),
            Action::ConfirmDelete => {
                if let Some(Modal::ConfirmDelete { resource, id }) = self.modals.pop() {
                    self.runner.spawn_mutation(Mutation::Delete { resource, id });
                }
            }
            Action::SaveLoan(loan) => self.submit(Mutation::SaveLoan(loan)),
            Action::SaveGame(game) => self.submit(Mutation::SaveGame(game)),
            Action::SaveNamed { resource, id, name } => {
                if let Some(mutation) = named_mutation(resource, id, name) {
                    self.submit(mutation);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Filters
            // ─────────────────────────────────────────────────────────────────
            Action::OpenFilter => self.open_filter(),
            Action::ClearFilters => {
                self.active_view_mut().update(Action::ClearFilters)?;
            }
            Action::ApplyLoanFilter(_) => {
                self.modals.pop();
                self.loans.update(action)?;
            }
            Action::ApplyGameFilter(_) => {
                self.modals.pop();
                self.games.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Misc
            // ─────────────────────────────────────────────────────────────────
            Action::DismissNotification => self.ui.notifications.dismiss(),
            Action::Refresh => self.refresh(),
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let ctx = ShellRenderContext {
            ui: &self.ui,
            paginated: self.active_view().is_paginated(),
            filterable: self.active_view().has_filters(),
            has_rows: self.active_view().row_count() > 0,
        };
        let layout = draw_shell(frame, area, &self.shell, &ctx);
        self.active_view_mut().draw(frame, layout.content)?;

        // Draw modal overlay if active
        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help { .. } => {
                let action = self.help_dialog.handle_key_event(key)?;
                if let Some(Modal::Help { scroll_offset }) = self.modals.top_mut() {
                    *scroll_offset = self.help_dialog.scroll_offset;
                }
                Ok(action)
            }
            Modal::ConfirmDelete { .. } => self.confirm_dialog.handle_key_event(key),
            Modal::LoanFilter => self.loan_filter_dialog.handle_key_event(key),
            Modal::GameFilter => self.game_filter_dialog.handle_key_event(key),
            Modal::LoanForm => self.loan_dialog.handle_key_event(key),
            Modal::GameForm => self.game_dialog.handle_key_event(key),
            Modal::NameForm { .. } => self.name_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::Help { .. } => self.help_dialog.draw(frame, area)?,
            Modal::ConfirmDelete { .. } => self.confirm_dialog.draw(frame, area)?,
            Modal::LoanFilter => self.loan_filter_dialog.draw(frame, area)?,
            Modal::GameFilter => self.game_filter_dialog.draw(frame, area)?,
            Modal::LoanForm => self.loan_dialog.draw(frame, area)?,
            Modal::GameForm => self.game_dialog.draw(frame, area)?,
            Modal::NameForm { .. } => self.name_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}
