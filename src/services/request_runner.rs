//! Background request runner
//!
//! Every backend call runs on its own thread and reports back through a
//! channel that the app drains on each tick, so the UI thread never blocks
//! on the network.

use crate::error::ApiError;
use crate::model::{Mutation, QueryData, QueryKey};
use crate::services::api::LudotecaApi;
use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

/// Outcome of a finished request
#[derive(Debug)]
pub enum RequestMessage {
    Query {
        key: QueryKey,
        /// Tag generation at dispatch time
        generation: u64,
        result: Result<QueryData, ApiError>,
    },
    Mutation {
        mutation: Mutation,
        result: Result<(), ApiError>,
    },
}

pub struct RequestRunner {
    api: Arc<dyn LudotecaApi>,
    sender: Sender<RequestMessage>,
    receiver: Receiver<RequestMessage>,
    queries_in_flight: HashSet<QueryKey>,
    mutations_in_flight: usize,
}

impl RequestRunner {
    pub fn new(api: Arc<dyn LudotecaApi>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            api,
            sender,
            receiver,
            queries_in_flight: HashSet::new(),
            mutations_in_flight: 0,
        }
    }

    /// Start a read unless the same key is already in flight.
    /// Returns whether a request was dispatched.
    pub fn spawn_query(&mut self, key: QueryKey, generation: u64) -> bool {
        if !self.queries_in_flight.insert(key.clone()) {
            return false;
        }
        tracing::debug!(?key, generation, "dispatching query");

        let api = Arc::clone(&self.api);
        let tx = self.sender.clone();
        thread::spawn(move || {
            let result = api.fetch(&key);
            let _ = tx.send(RequestMessage::Query {
                key,
                generation,
                result,
            });
        });
        true
    }

    pub fn spawn_mutation(&mut self, mutation: Mutation) {
        self.mutations_in_flight += 1;
        tracing::info!(
            resource = %mutation.resource(),
            kind = ?mutation.kind(),
            id = mutation.record_id(),
            "dispatching mutation"
        );

        let api = Arc::clone(&self.api);
        let tx = self.sender.clone();
        thread::spawn(move || {
            let result = api.mutate(&mutation);
            let _ = tx.send(RequestMessage::Mutation { mutation, result });
        });
    }

    /// Drain finished requests without blocking
    pub fn poll(&mut self) -> Vec<RequestMessage> {
        let mut messages = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(message) => {
                    self.complete(&message);
                    messages.push(message);
                }
                // The runner holds its own sender, so the channel never disconnects
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        messages
    }

    fn complete(&mut self, message: &RequestMessage) {
        match message {
            RequestMessage::Query { key, result, .. } => {
                self.queries_in_flight.remove(key);
                match result {
                    Ok(data) => tracing::debug!(?key, rows = data.len(), "query completed"),
                    Err(e) => tracing::warn!(?key, error = %e, "query failed"),
                }
            }
            RequestMessage::Mutation { mutation, result } => {
                self.mutations_in_flight = self.mutations_in_flight.saturating_sub(1);
                match result {
                    Ok(()) => tracing::info!(resource = %mutation.resource(), "mutation succeeded"),
                    Err(e) => tracing::warn!(resource = %mutation.resource(), error = %e, "mutation failed"),
                }
            }
        }
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.queries_in_flight.contains(key)
    }

    pub fn is_mutating(&self) -> bool {
        self.mutations_in_flight > 0
    }

    /// Whether any request at all is outstanding
    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        !self.queries_in_flight.is_empty() || self.is_mutating()
    }

    /// Block until one message arrives or the timeout elapses
    #[cfg(test)]
    pub fn wait(&mut self, timeout: std::time::Duration) -> Option<RequestMessage> {
        let message = self.receiver.recv_timeout(timeout).ok()?;
        self.complete(&message);
        Some(message)
    }
}
