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

//! Route mutation transactor keeping the route table and topic trie consistent.

use crate::monitor::DestinationMonitor;
use crate::observability::events;
use crate::route::Route;
use crate::route_error::RouteError;
use crate::store::{RouteStore, StoreTransaction};
use crate::topic;
use std::sync::Arc;
use tracing::{debug, warn};

const COMPONENT: &str = "route_lifecycle";

/// Applies one route insert or removal as a single atomic unit.
///
/// A wildcard topic is present in the trie exactly while the table holds at least
/// one route for it. Only the first add and the last delete for a wildcard topic
/// touch the trie; both run inside a store transaction scoped to that topic so two
/// mutators can never both act on a stale "no routes yet" or "last route" reading.
/// Exact topics bypass the trie and the transaction.
pub(crate) struct RouteLifecycle {
    store: Arc<dyn RouteStore>,
    monitor: Arc<dyn DestinationMonitor>,
}

impl RouteLifecycle {
    /// Creates a lifecycle coordinator over existing collaborators.
    pub(crate) fn new(store: Arc<dyn RouteStore>, monitor: Arc<dyn DestinationMonitor>) -> Self {
        Self { store, monitor }
    }

    pub(crate) fn store(&self) -> &Arc<dyn RouteStore> {
        &self.store
    }

    /// Inserts `route`; succeeds without effect when it already exists.
    pub(crate) fn add_route(&self, route: &Route) -> Result<(), RouteError> {
        topic::validate_filter(&route.topic)?;

        if self.store.contains(route) {
            debug!(
                event = events::ROUTE_ADD_EXISTS,
                component = COMPONENT,
                topic = route.topic.as_str(),
                destination = %route.destination,
                "route already present"
            );
            return Ok(());
        }

        debug!(
            event = events::DESTINATION_WATCH,
            component = COMPONENT,
            destination = %route.destination,
            "watching destination"
        );
        self.monitor.watch(&route.destination);

        if !route.is_wildcard() {
            self.store.dirty_write(route.clone());
            debug!(
                event = events::ROUTE_ADD_OK,
                component = COMPONENT,
                topic = route.topic.as_str(),
                destination = %route.destination,
                "exact route added"
            );
            return Ok(());
        }

        let mut created_filter = false;
        let result = self.store.transaction(
            &route.topic,
            &mut |txn: &mut dyn StoreTransaction| {
                created_filter = txn.read(&route.topic).is_empty();
                if created_filter {
                    txn.insert_filter(&route.topic);
                }
                txn.write(route.clone());
                Ok(())
            },
        );

        match result {
            Ok(()) => {
                if created_filter {
                    debug!(
                        event = events::TRIE_FILTER_INSERT,
                        component = COMPONENT,
                        topic = route.topic.as_str(),
                        "wildcard filter indexed"
                    );
                }
                debug!(
                    event = events::ROUTE_ADD_OK,
                    component = COMPONENT,
                    topic = route.topic.as_str(),
                    destination = %route.destination,
                    "wildcard route added"
                );
                Ok(())
            }
            Err(aborted) => {
                warn!(
                    event = events::ROUTE_ADD_FAILED,
                    component = COMPONENT,
                    topic = route.topic.as_str(),
                    destination = %route.destination,
                    reason = aborted.reason.as_str(),
                    "route add aborted"
                );
                Err(aborted.into())
            }
        }
    }

    /// Removes `route`; succeeds without effect when it does not exist.
    pub(crate) fn delete_route(&self, route: &Route) -> Result<(), RouteError> {
        topic::validate_filter(&route.topic)?;

        if !route.is_wildcard() {
            self.store.dirty_delete(route);
            debug!(
                event = events::ROUTE_DELETE_OK,
                component = COMPONENT,
                topic = route.topic.as_str(),
                destination = %route.destination,
                "exact route deleted"
            );
            return Ok(());
        }

        let mut outcome = DeleteOutcome::Absent;
        let result = self.store.transaction(
            &route.topic,
            &mut |txn: &mut dyn StoreTransaction| {
                let routes = txn.read(&route.topic);
                outcome = match routes.as_slice() {
                    [only] if only == route => {
                        txn.delete(route);
                        txn.remove_filter(&route.topic);
                        DeleteOutcome::LastRoute
                    }
                    _ if routes.contains(route) => {
                        txn.delete(route);
                        DeleteOutcome::Removed
                    }
                    _ => DeleteOutcome::Absent,
                };
                Ok(())
            },
        );

        match result {
            Ok(()) => {
                match outcome {
                    DeleteOutcome::LastRoute => debug!(
                        event = events::TRIE_FILTER_REMOVE,
                        component = COMPONENT,
                        topic = route.topic.as_str(),
                        "last route gone, wildcard filter unindexed"
                    ),
                    DeleteOutcome::Absent => debug!(
                        event = events::ROUTE_DELETE_ABSENT,
                        component = COMPONENT,
                        topic = route.topic.as_str(),
                        destination = %route.destination,
                        "route not present"
                    ),
                    DeleteOutcome::Removed => {}
                }
                debug!(
                    event = events::ROUTE_DELETE_OK,
                    component = COMPONENT,
                    topic = route.topic.as_str(),
                    destination = %route.destination,
                    "wildcard route deleted"
                );
                Ok(())
            }
            Err(aborted) => {
                warn!(
                    event = events::ROUTE_DELETE_FAILED,
                    component = COMPONENT,
                    topic = route.topic.as_str(),
                    destination = %route.destination,
                    reason = aborted.reason.as_str(),
                    "route delete aborted"
                );
                Err(aborted.into())
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum DeleteOutcome {
    Absent,
    Removed,
    LastRoute,
}

#[cfg(test)]
mod tests {
    use super::RouteLifecycle;
    use crate::monitor::DestinationMonitor;
    use crate::route_error::RouteError;
    use crate::store::{MemoryRouteStore, RouteStore};
    use crate::topic::TopicError;
    use crate::{Destination, Route};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingMonitor {
        watches: AtomicUsize,
    }

    impl DestinationMonitor for CountingMonitor {
        fn watch(&self, _destination: &Destination) {
            self.watches.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn lifecycle() -> (RouteLifecycle, Arc<MemoryRouteStore>, Arc<CountingMonitor>) {
        let store = Arc::new(MemoryRouteStore::new());
        let monitor = Arc::new(CountingMonitor::default());
        (
            RouteLifecycle::new(store.clone(), monitor.clone()),
            store,
            monitor,
        )
    }

    fn route(topic: &str, node: &str) -> Route {
        Route::new(topic, Destination::node(node))
    }

    #[test]
    fn first_wildcard_route_indexes_filter_and_duplicates_are_absorbed() {
        let (lifecycle, store, monitor) = lifecycle();

        lifecycle.add_route(&route("a/+", "n1")).expect("add");
        lifecycle.add_route(&route("a/+", "n1")).expect("duplicate add");

        assert!(store.has_filter("a/+"));
        assert_eq!(store.read("a/+").len(), 1);
        assert_eq!(monitor.watches.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn filter_outlives_non_last_route_removal() {
        let (lifecycle, store, _) = lifecycle();
        lifecycle.add_route(&route("a/#", "n1")).expect("add n1");
        lifecycle.add_route(&route("a/#", "n2")).expect("add n2");

        lifecycle.delete_route(&route("a/#", "n1")).expect("delete n1");
        assert!(store.has_filter("a/#"));
        assert!(store.has("a/#"));

        lifecycle.delete_route(&route("a/#", "n2")).expect("delete n2");
        assert!(!store.has_filter("a/#"));
        assert!(!store.has("a/#"));
    }

    #[test]
    fn deleting_unknown_destination_keeps_existing_routes() {
        let (lifecycle, store, _) = lifecycle();
        lifecycle.add_route(&route("a/+", "n1")).expect("add");

        lifecycle
            .delete_route(&route("a/+", "n9"))
            .expect("absent delete is a success");
        lifecycle
            .delete_route(&route("b/+", "n1"))
            .expect("delete on empty topic is a success");

        assert!(store.has_filter("a/+"));
        assert_eq!(store.read("a/+"), vec![route("a/+", "n1")]);
    }

    #[test]
    fn exact_topics_never_reach_the_trie() {
        let (lifecycle, store, _) = lifecycle();

        lifecycle.add_route(&route("a/b/c", "n1")).expect("add");

        assert!(store.has("a/b/c"));
        assert!(!store.has_filter("a/b/c"));
        assert_eq!(store.stats().wildcard_filters, 0);

        lifecycle.delete_route(&route("a/b/c", "n1")).expect("delete");
        assert!(!store.has("a/b/c"));
    }

    #[test]
    fn malformed_topics_are_rejected_before_the_store() {
        let (lifecycle, store, monitor) = lifecycle();

        let result = lifecycle.add_route(&route("a/#/c", "n1"));

        assert_eq!(
            result,
            Err(RouteError::MalformedTopic(
                TopicError::MultiLevelWildcardNotLast { position: 1 }
            ))
        );
        assert_eq!(store.stats().topics, 0);
        assert_eq!(monitor.watches.load(Ordering::Relaxed), 0);
        assert!(lifecycle.delete_route(&route("a+", "n1")).is_err());
    }
}
