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

//! Route-table data model: a keyed multiset from topic to destinations.

use crate::destination::Destination;
use crate::route::Route;
use std::collections::{HashMap, HashSet};

/// Multimap from topic (exact or filter) to the destinations subscribed to it.
///
/// A topic with no destinations is removed rather than kept empty. The table knows
/// nothing about wildcards.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    routes: HashMap<String, HashSet<Destination>>,
    route_count: usize,
}

impl RouteTable {
    /// Creates an empty route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a route. Returns `true` only when first inserted.
    pub fn add(&mut self, route: Route) -> bool {
        let Route { topic, destination } = route;
        let inserted = self.routes.entry(topic).or_default().insert(destination);
        if inserted {
            self.route_count += 1;
        }
        inserted
    }

    /// Removes a route. Returns `true` only when the route existed.
    pub fn delete(&mut self, route: &Route) -> bool {
        let Some(destinations) = self.routes.get_mut(&route.topic) else {
            return false;
        };
        let removed = destinations.remove(&route.destination);
        if destinations.is_empty() {
            self.routes.remove(&route.topic);
        }
        if removed {
            self.route_count -= 1;
        }
        removed
    }

    pub fn contains(&self, route: &Route) -> bool {
        self.routes
            .get(&route.topic)
            .is_some_and(|destinations| destinations.contains(&route.destination))
    }

    /// All routes keyed exactly by `topic`.
    pub fn get(&self, topic: &str) -> Vec<Route> {
        self.routes
            .get(topic)
            .map(|destinations| {
                destinations
                    .iter()
                    .map(|destination| Route::new(topic, destination.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has(&self, topic: &str) -> bool {
        self.routes.contains_key(topic)
    }

    /// Number of destinations currently routed for `topic`.
    pub fn count(&self, topic: &str) -> usize {
        self.routes.get(topic).map_or(0, HashSet::len)
    }

    /// Every distinct topic key, exact and wildcard.
    pub fn topics(&self) -> Vec<String> {
        self.routes.keys().cloned().collect()
    }

    /// Every route whose destination is `destination`.
    pub fn routes_to(&self, destination: &Destination) -> Vec<Route> {
        self.routes
            .iter()
            .filter(|(_, destinations)| destinations.contains(destination))
            .map(|(topic, _)| Route::new(topic, destination.clone()))
            .collect()
    }

    pub fn topic_count(&self) -> usize {
        self.routes.len()
    }

    pub fn route_count(&self) -> usize {
        self.route_count
    }
}

#[cfg(test)]
mod tests {
    use super::RouteTable;
    use crate::{Destination, Route};

    fn route(topic: &str, node: &str) -> Route {
        Route::new(topic, Destination::node(node))
    }

    #[test]
    fn route_table_add_and_delete_are_idempotent() {
        let mut route_table = RouteTable::new();
        let route = route("a/b", "node1");

        assert!(route_table.add(route.clone()));
        assert!(!route_table.add(route.clone()));
        assert_eq!(route_table.route_count(), 1);

        assert!(route_table.delete(&route));
        assert!(!route_table.delete(&route));
        assert_eq!(route_table.route_count(), 0);
    }

    #[test]
    fn topic_key_is_dropped_with_its_last_destination() {
        let mut route_table = RouteTable::new();
        route_table.add(route("a/+", "node1"));
        route_table.add(route("a/+", "node2"));

        route_table.delete(&route("a/+", "node1"));
        assert!(route_table.has("a/+"));
        assert_eq!(route_table.count("a/+"), 1);

        route_table.delete(&route("a/+", "node2"));
        assert!(!route_table.has("a/+"));
        assert!(route_table.topics().is_empty());
    }

    #[test]
    fn grouped_destination_is_a_separate_route() {
        let mut route_table = RouteTable::new();
        route_table.add(route("t", "node1"));
        route_table.add(Route::new("t", Destination::group("g", "node1")));

        assert_eq!(route_table.get("t").len(), 2);
        assert_eq!(route_table.topic_count(), 1);
        assert_eq!(route_table.route_count(), 2);
    }

    #[test]
    fn routes_to_lists_every_topic_for_a_destination() {
        let mut route_table = RouteTable::new();
        route_table.add(route("a", "node1"));
        route_table.add(route("b/#", "node1"));
        route_table.add(route("b/#", "node2"));

        let mut topics: Vec<String> = route_table
            .routes_to(&Destination::node("node1"))
            .into_iter()
            .map(|route| route.topic)
            .collect();
        topics.sort();

        assert_eq!(topics, vec!["a".to_string(), "b/#".to_string()]);
    }

    #[test]
    fn get_of_unknown_topic_is_empty() {
        let route_table = RouteTable::new();

        assert!(route_table.get("missing").is_empty());
        assert!(!route_table.has("missing"));
    }
}
