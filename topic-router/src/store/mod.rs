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

//! Backing-store layer.
//!
//! The route table and the topic trie live together in a transactional key-value
//! store. Reads are served straight from committed state; compound mutations run as
//! a closure against a [`StoreTransaction`] and either commit as a whole or abort
//! with no effect. A single-node deployment uses [`MemoryRouteStore`]; a clustered
//! deployment supplies its own [`RouteStore`] backed by a replicated log.
//!
//! ```
//! use topic_router::store::{MemoryRouteStore, RouteStore, StoreTransaction, TransactionAborted};
//! use topic_router::{Destination, Route};
//!
//! let store = MemoryRouteStore::new();
//! let route = Route::new("a/+", Destination::node("node1"));
//!
//! store
//!     .transaction("a/+", &mut |txn: &mut dyn StoreTransaction| {
//!         txn.insert_filter("a/+");
//!         txn.write(route.clone());
//!         Ok(())
//!     })
//!     .unwrap();
//! assert_eq!(store.match_filters("a/b"), vec!["a/+".to_string()]);
//!
//! let aborted = store.transaction("a/+", &mut |txn: &mut dyn StoreTransaction| {
//!     txn.remove_filter("a/+");
//!     Err(TransactionAborted::new("changed my mind"))
//! });
//! assert!(aborted.is_err());
//! assert!(store.has_filter("a/+"));
//! ```

mod memory;
pub use memory::MemoryRouteStore;

use crate::destination::Destination;
use crate::route::Route;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A transaction could not commit; none of its writes took effect.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransactionAborted {
    pub reason: String,
}

impl TransactionAborted {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Display for TransactionAborted {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "transaction aborted: {}", self.reason)
    }
}

impl Error for TransactionAborted {}

/// Operations available inside one store transaction.
///
/// Reads observe committed state plus this transaction's own pending writes.
pub trait StoreTransaction {
    fn read(&self, topic: &str) -> Vec<Route>;
    fn write(&mut self, route: Route);
    fn delete(&mut self, route: &Route);
    fn insert_filter(&mut self, filter: &str);
    fn remove_filter(&mut self, filter: &str);
}

/// Body of a transaction. Returning `Err` aborts it.
pub type TransactionWork<'a> =
    &'a mut dyn FnMut(&mut dyn StoreTransaction) -> Result<(), TransactionAborted>;

/// Cardinalities of the routing state.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RouteStats {
    pub topics: usize,
    pub routes: usize,
    pub wildcard_filters: usize,
}

/// Transactional, concurrently readable home of the route table and topic trie.
pub trait RouteStore: Send + Sync {
    /// Runs `work` atomically. `scope` is the topic whose routes the body inspects;
    /// transactions on the same scope never interleave.
    fn transaction(&self, scope: &str, work: TransactionWork<'_>) -> Result<(), TransactionAborted>;

    /// Writes a route outside any transaction.
    fn dirty_write(&self, route: Route);

    /// Deletes a route outside any transaction.
    fn dirty_delete(&self, route: &Route);

    fn contains(&self, route: &Route) -> bool;

    fn read(&self, topic: &str) -> Vec<Route>;

    fn has(&self, topic: &str) -> bool;

    fn topics(&self) -> Vec<String>;

    /// Filters in the trie matching the concrete `topic`.
    fn match_filters(&self, topic: &str) -> Vec<String>;

    fn has_filter(&self, filter: &str) -> bool;

    fn routes_to(&self, destination: &Destination) -> Vec<Route>;

    fn stats(&self) -> RouteStats;
}
