/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Single-node in-memory route store.

use crate::control_plane::route_table::RouteTable;
use crate::control_plane::topic_trie::TopicTrie;
use crate::destination::Destination;
use crate::observability::events;
use crate::route::Route;
use crate::store::{RouteStats, RouteStore, StoreTransaction, TransactionAborted, TransactionWork};
use crate::topic;
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

const COMPONENT: &str = "memory_route_store";
const DEFAULT_SCOPE_STRIPES: usize = 64;

#[derive(Default)]
struct RouteState {
    table: RouteTable,
    trie: TopicTrie,
}

enum PendingWrite {
    Write(Route),
    Delete(Route),
    InsertFilter(String),
    RemoveFilter(String),
}

impl RouteState {
    fn apply(&mut self, pending: Vec<PendingWrite>) {
        for write in pending {
            match write {
                PendingWrite::Write(route) => {
                    self.table.add(route);
                }
                PendingWrite::Delete(route) => {
                    self.table.delete(&route);
                }
                PendingWrite::InsertFilter(filter) => {
                    self.trie.insert(&filter);
                }
                PendingWrite::RemoveFilter(filter) => {
                    self.trie.remove(&filter);
                }
            }
        }
    }
}

struct MemoryTransaction<'a> {
    state: &'a RwLock<RouteState>,
    pending: Vec<PendingWrite>,
}

impl StoreTransaction for MemoryTransaction<'_> {
    fn read(&self, topic: &str) -> Vec<Route> {
        let mut routes = read_state(self.state).table.get(topic);
        for write in &self.pending {
            match write {
                PendingWrite::Write(route) if route.topic == topic => {
                    if !routes.contains(route) {
                        routes.push(route.clone());
                    }
                }
                PendingWrite::Delete(route) if route.topic == topic => {
                    routes.retain(|existing| existing != route);
                }
                _ => {}
            }
        }
        routes
    }

    fn write(&mut self, route: Route) {
        self.pending.push(PendingWrite::Write(route));
    }

    fn delete(&mut self, route: &Route) {
        self.pending.push(PendingWrite::Delete(route.clone()));
    }

    fn insert_filter(&mut self, filter: &str) {
        self.pending
            .push(PendingWrite::InsertFilter(filter.to_string()));
    }

    fn remove_filter(&mut self, filter: &str) {
        self.pending
            .push(PendingWrite::RemoveFilter(filter.to_string()));
    }
}

fn read_state(state: &RwLock<RouteState>) -> RwLockReadGuard<'_, RouteState> {
    state.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_state(state: &RwLock<RouteState>) -> RwLockWriteGuard<'_, RouteState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

/// Route store keeping the route table and topic trie in process memory.
///
/// Transactions buffer their writes and apply them under one write lock at commit,
/// so readers see either none or all of a transaction. Transactions are serialized
/// per scope through a fixed set of striped locks; transactions on unrelated topics
/// only contend for the brief commit.
pub struct MemoryRouteStore {
    state: RwLock<RouteState>,
    scope_locks: Vec<Mutex<()>>,
}

impl Default for MemoryRouteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRouteStore {
    pub fn new() -> Self {
        Self::with_scope_stripes(DEFAULT_SCOPE_STRIPES)
    }

    /// Creates a store with `stripes` scope locks (at least one).
    pub fn with_scope_stripes(stripes: usize) -> Self {
        Self {
            state: RwLock::new(RouteState::default()),
            scope_locks: (0..stripes.max(1)).map(|_| Mutex::new(())).collect(),
        }
    }
}

impl RouteStore for MemoryRouteStore {
    fn transaction(&self, scope: &str, work: TransactionWork<'_>) -> Result<(), TransactionAborted> {
        let stripe = topic::shard_index(scope, self.scope_locks.len());
        let _scope_guard = self.scope_locks[stripe]
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut txn = MemoryTransaction {
            state: &self.state,
            pending: Vec::new(),
        };

        if let Err(aborted) = work(&mut txn) {
            debug!(
                event = events::TRANSACTION_ABORTED,
                component = COMPONENT,
                scope,
                reason = aborted.reason.as_str(),
                discarded = txn.pending.len(),
                "transaction aborted"
            );
            return Err(aborted);
        }

        let pending = txn.pending;
        let writes = pending.len();
        write_state(&self.state).apply(pending);
        debug!(
            event = events::TRANSACTION_COMMITTED,
            component = COMPONENT,
            scope,
            writes,
            "transaction committed"
        );
        Ok(())
    }

    fn dirty_write(&self, route: Route) {
        write_state(&self.state).table.add(route);
    }

    fn dirty_delete(&self, route: &Route) {
        write_state(&self.state).table.delete(route);
    }

    fn contains(&self, route: &Route) -> bool {
        read_state(&self.state).table.contains(route)
    }

    fn read(&self, topic: &str) -> Vec<Route> {
        read_state(&self.state).table.get(topic)
    }

    fn has(&self, topic: &str) -> bool {
        read_state(&self.state).table.has(topic)
    }

    fn topics(&self) -> Vec<String> {
        read_state(&self.state).table.topics()
    }

    fn match_filters(&self, topic: &str) -> Vec<String> {
        read_state(&self.state).trie.matches(topic)
    }

    fn has_filter(&self, filter: &str) -> bool {
        read_state(&self.state).trie.contains(filter)
    }

    fn routes_to(&self, destination: &Destination) -> Vec<Route> {
        read_state(&self.state).table.routes_to(destination)
    }

    fn stats(&self) -> RouteStats {
        let state = read_state(&self.state);
        RouteStats {
            topics: state.table.topic_count(),
            routes: state.table.route_count(),
            wildcard_filters: state.trie.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryRouteStore;
    use crate::store::{RouteStore, StoreTransaction, TransactionAborted};
    use crate::{Destination, Route};
    use std::sync::Arc;
    use std::thread;

    fn route(topic: &str, node: &str) -> Route {
        Route::new(topic, Destination::node(node))
    }

    #[test]
    fn transaction_reads_its_own_pending_writes() {
        let store = MemoryRouteStore::new();
        store.dirty_write(route("a/+", "node1"));

        store
            .transaction("a/+", &mut |txn: &mut dyn StoreTransaction| {
                txn.write(route("a/+", "node2"));
                txn.delete(&route("a/+", "node1"));
                let seen = txn.read("a/+");
                assert_eq!(seen, vec![route("a/+", "node2")]);
                Ok(())
            })
            .expect("transaction should commit");

        assert_eq!(store.read("a/+"), vec![route("a/+", "node2")]);
    }

    #[test]
    fn aborted_transaction_leaves_no_trace() {
        let store = MemoryRouteStore::new();

        let result = store.transaction("a/#", &mut |txn: &mut dyn StoreTransaction| {
            txn.insert_filter("a/#");
            txn.write(route("a/#", "node1"));
            Err(TransactionAborted::new("test abort"))
        });

        assert_eq!(result, Err(TransactionAborted::new("test abort")));
        assert!(!store.has("a/#"));
        assert!(!store.has_filter("a/#"));
        assert_eq!(store.stats().routes, 0);
    }

    #[test]
    fn committed_transaction_updates_table_and_trie_together() {
        let store = MemoryRouteStore::new();

        store
            .transaction("a/+/c", &mut |txn: &mut dyn StoreTransaction| {
                txn.insert_filter("a/+/c");
                txn.write(route("a/+/c", "node1"));
                Ok(())
            })
            .expect("transaction should commit");

        let stats = store.stats();
        assert_eq!(stats.topics, 1);
        assert_eq!(stats.routes, 1);
        assert_eq!(stats.wildcard_filters, 1);
        assert_eq!(store.match_filters("a/b/c"), vec!["a/+/c".to_string()]);
    }

    #[test]
    fn same_scope_transactions_never_interleave() {
        let store = Arc::new(MemoryRouteStore::with_scope_stripes(4));
        let workers: Vec<_> = (0..8)
            .map(|index| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..200 {
                        store
                            .transaction("x/#", &mut |txn: &mut dyn StoreTransaction| {
                                let node = format!("node{index}");
                                let candidate = route("x/#", &node);
                                if txn.read("x/#").is_empty() {
                                    txn.insert_filter("x/#");
                                    txn.write(candidate);
                                } else if txn.read("x/#") == vec![candidate.clone()] {
                                    txn.delete(&candidate);
                                    txn.remove_filter("x/#");
                                }
                                Ok(())
                            })
                            .expect("transaction should commit");
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().expect("worker thread should finish");
        }

        assert_eq!(store.has("x/#"), store.has_filter("x/#"));
    }
}
