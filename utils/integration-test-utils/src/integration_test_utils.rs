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

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use topic_router::store::{
    MemoryRouteStore, RouteStats, RouteStore, StoreTransaction, TransactionAborted,
    TransactionWork,
};
use topic_router::{Destination, DestinationMonitor, Route, Router};
use tracing::debug;

/// Installs a `fmt` subscriber once per test process; later calls are no-ops.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Sorted `(topic, destination)` pairs for every topic in `router`.
pub fn route_snapshot(router: &Router) -> Vec<Route> {
    let mut routes: Vec<Route> = router
        .all_topics()
        .iter()
        .flat_map(|topic| router.get_routes(topic))
        .collect();
    routes.sort();
    routes
}

/// Destination monitor remembering every `watch` call in order.
#[derive(Default)]
pub struct RecordingMonitor {
    watched: Mutex<Vec<Destination>>,
}

impl RecordingMonitor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn watched(&self) -> Vec<Destination> {
        self.watched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DestinationMonitor for RecordingMonitor {
    fn watch(&self, destination: &Destination) {
        debug!("RecordingMonitor: watching {destination}");
        self.watched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(destination.clone());
    }
}

/// Memory store whose transactions abort with `reason` while armed, after running
/// their body. Dirty writes and reads always pass through.
pub struct AbortingStore {
    inner: MemoryRouteStore,
    reason: String,
    armed: AtomicBool,
}

impl AbortingStore {
    /// A store that aborts every transaction from the start.
    pub fn new(reason: &str) -> Arc<Self> {
        Self::build(reason, true)
    }

    /// A store that commits normally until [`AbortingStore::arm`] is called.
    pub fn disarmed(reason: &str) -> Arc<Self> {
        Self::build(reason, false)
    }

    fn build(reason: &str, armed: bool) -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryRouteStore::new(),
            reason: reason.to_string(),
            armed: AtomicBool::new(armed),
        })
    }

    pub fn arm(&self) {
        self.armed.store(true, Ordering::Release);
    }
}

impl RouteStore for AbortingStore {
    fn transaction(&self, scope: &str, work: TransactionWork<'_>) -> Result<(), TransactionAborted> {
        if !self.armed.load(Ordering::Acquire) {
            return self.inner.transaction(scope, work);
        }
        let reason = self.reason.clone();
        self.inner
            .transaction(scope, &mut |txn: &mut dyn StoreTransaction| {
                work(txn)?;
                Err(TransactionAborted::new(reason.clone()))
            })
    }

    fn dirty_write(&self, route: Route) {
        self.inner.dirty_write(route)
    }

    fn dirty_delete(&self, route: &Route) {
        self.inner.dirty_delete(route)
    }

    fn contains(&self, route: &Route) -> bool {
        self.inner.contains(route)
    }

    fn read(&self, topic: &str) -> Vec<Route> {
        self.inner.read(topic)
    }

    fn has(&self, topic: &str) -> bool {
        self.inner.has(topic)
    }

    fn topics(&self) -> Vec<String> {
        self.inner.topics()
    }

    fn match_filters(&self, topic: &str) -> Vec<String> {
        self.inner.match_filters(topic)
    }

    fn has_filter(&self, filter: &str) -> bool {
        self.inner.has_filter(filter)
    }

    fn routes_to(&self, destination: &Destination) -> Vec<Route> {
        self.inner.routes_to(destination)
    }

    fn stats(&self) -> RouteStats {
        self.inner.stats()
    }
}
