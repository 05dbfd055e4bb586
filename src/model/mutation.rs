//! Write operations against the backend and the cache tags they invalidate

use super::entity::{Author, Category, Client, Game, Loan, Resource};

/// Whether a save creates a new record or updates an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

/// A create, update or delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    SaveCategory(Category),
    SaveAuthor(Author),
    SaveGame(Game),
    SaveClient(Client),
    SaveLoan(Loan),
    Delete { resource: Resource, id: String },
}

impl Mutation {
    pub fn resource(&self) -> Resource {
        match self {
            Mutation::SaveCategory(_) => Resource::Category,
            Mutation::SaveAuthor(_) => Resource::Author,
            Mutation::SaveGame(_) => Resource::Game,
            Mutation::SaveClient(_) => Resource::Client,
            Mutation::SaveLoan(_) => Resource::Loan,
            Mutation::Delete { resource, .. } => *resource,
        }
    }

    /// Id of the affected record (empty for creates)
    pub fn record_id(&self) -> &str {
        match self {
            Mutation::SaveCategory(c) => &c.id,
            Mutation::SaveAuthor(a) => &a.id,
            Mutation::SaveGame(g) => &g.id,
            Mutation::SaveClient(c) => &c.id,
            Mutation::SaveLoan(l) => &l.id,
            Mutation::Delete { id, .. } => id,
        }
    }

    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Delete { .. } => MutationKind::Delete,
            _ if self.record_id().is_empty() => MutationKind::Create,
            _ => MutationKind::Update,
        }
    }

    /// Cache tags whose entries must be refetched after this mutation succeeds
    pub fn invalidates(&self) -> Vec<Resource> {
        match (self, self.kind()) {
            // Games embed their author, so renaming one refreshes game lists too
            (Mutation::SaveAuthor(_), MutationKind::Update) => vec![Resource::Author, Resource::Game],
            _ => vec![self.resource()],
        }
    }

    /// Notification text shown once the mutation succeeds
    pub fn success_message(&self) -> String {
        let resource = self.resource();
        let stem = match self.kind() {
            MutationKind::Create => "cread",
            MutationKind::Update => "actualizad",
            MutationKind::Delete => "eliminad",
        };
        let ending = if resource.is_feminine() { "a" } else { "o" };
        format!("{} {}{} correctamente", resource.singular(), stem, ending)
    }
}
