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

//! Fixed-size pool of shard workers addressed by topic hash.

use crate::control_plane::route_lifecycle::RouteLifecycle;
use crate::observability::events;
use crate::route_error::RouteError;
use crate::shard_plane::shard_worker::ShardWorker;
use crate::shard_plane::{ShardEnvelope, ShardReply, ShardRequest};
use crate::topic;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

const COMPONENT: &str = "shard_pool";

/// Routes requests to the worker owning their topic and waits for the reply.
///
/// Calls wait without a timeout: workers only ever block on the route store, so a
/// reply always arrives unless the worker thread is gone.
pub(crate) struct ShardPool {
    workers: Vec<ShardWorker>,
}

impl ShardPool {
    /// Spawns `pool_size` workers sharing one route lifecycle.
    pub(crate) fn start(
        name: &str,
        pool_size: usize,
        mailbox_size: usize,
        lifecycle: Arc<RouteLifecycle>,
    ) -> Result<Self, RouteError> {
        let workers = (0..pool_size)
            .map(|shard| ShardWorker::spawn(shard, mailbox_size, lifecycle.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        for worker in &workers {
            debug!(
                event = events::SHARD_POOL_START,
                component = COMPONENT,
                pool = name,
                shard = worker.shard(),
                worker_id = worker.worker_id(),
                worker_thread = worker.runtime_thread(),
                "shard worker started"
            );
        }
        info!(
            event = events::SHARD_POOL_START,
            component = COMPONENT,
            pool = name,
            pool_size,
            mailbox_size,
            "shard pool started"
        );

        Ok(Self { workers })
    }

    pub(crate) fn size(&self) -> usize {
        self.workers.len()
    }

    /// The worker index owning `topic`.
    pub(crate) fn shard_for(&self, topic: &str) -> usize {
        topic::shard_index(topic, self.workers.len())
    }

    /// Sends `request` to its worker and waits for the reply.
    pub(crate) async fn call(&self, request: ShardRequest) -> Result<ShardReply, RouteError> {
        let shard = self.shard_for(request.topic());
        let (reply_tx, reply_rx) = oneshot::channel();

        self.enqueue(
            shard,
            ShardEnvelope {
                request,
                reply: Some(reply_tx),
            },
        )
        .await?;

        reply_rx.await.map_err(|_| {
            warn!(
                event = events::SHARD_DISPATCH_FAILED,
                component = COMPONENT,
                shard,
                "worker dropped the reply channel"
            );
            RouteError::ShardUnavailable(shard)
        })
    }

    /// Sends `request` to its worker without waiting for the outcome.
    pub(crate) async fn cast(&self, request: ShardRequest) -> Result<(), RouteError> {
        let shard = self.shard_for(request.topic());
        self.enqueue(
            shard,
            ShardEnvelope {
                request,
                reply: None,
            },
        )
        .await
    }

    /// Requests taken off mailboxes across all workers.
    pub(crate) fn requests_observed(&self) -> u64 {
        self.workers.iter().map(ShardWorker::observed).sum()
    }

    async fn enqueue(&self, shard: usize, envelope: ShardEnvelope) -> Result<(), RouteError> {
        self.workers[shard]
            .sender()
            .send(envelope)
            .await
            .map_err(|_| {
                warn!(
                    event = events::SHARD_DISPATCH_FAILED,
                    component = COMPONENT,
                    shard,
                    "worker mailbox closed"
                );
                RouteError::ShardUnavailable(shard)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::ShardPool;
    use crate::control_plane::route_lifecycle::RouteLifecycle;
    use crate::monitor::NoopDestinationMonitor;
    use crate::route_error::RouteError;
    use crate::shard_plane::{ShardReply, ShardRequest};
    use crate::store::{MemoryRouteStore, RouteStore};
    use crate::{Destination, Route};
    use std::sync::Arc;

    fn pool(pool_size: usize) -> (ShardPool, Arc<MemoryRouteStore>) {
        let store = Arc::new(MemoryRouteStore::new());
        let lifecycle = Arc::new(RouteLifecycle::new(
            store.clone(),
            Arc::new(NoopDestinationMonitor),
        ));
        let pool = ShardPool::start("test-pool", pool_size, 8, lifecycle).expect("pool starts");
        (pool, store)
    }

    #[tokio::test]
    async fn call_applies_request_on_owning_worker() {
        let (pool, store) = pool(4);
        let route = Route::new("a/+/c", Destination::node("n1"));

        let reply = pool
            .call(ShardRequest::AddRoute(route.clone()))
            .await
            .expect("worker replies");

        assert_eq!(reply, ShardReply::Applied);
        assert!(store.contains(&route));
        assert_eq!(pool.requests_observed(), 1);
    }

    #[tokio::test]
    async fn same_topic_always_maps_to_same_shard() {
        let (pool, _) = pool(5);

        for topic in ["a", "a/+", "sensors/#", ""] {
            let shard = pool.shard_for(topic);
            assert!(shard < pool.size());
            assert_eq!(shard, pool.shard_for(topic));
        }
    }

    #[tokio::test]
    async fn failed_mutation_is_returned_to_the_caller() {
        let (pool, _) = pool(2);

        let reply = pool
            .call(ShardRequest::AddRoute(Route::new(
                "a/#/b",
                Destination::node("n1"),
            )))
            .await
            .expect("worker replies");

        assert!(matches!(
            reply,
            ShardReply::Failed(RouteError::MalformedTopic(_))
        ));
    }

    #[tokio::test]
    async fn unrecognized_cast_is_dropped_and_call_is_ignored() {
        let (pool, _) = pool(1);
        let custom = ShardRequest::Custom {
            kind: "rebalance".to_string(),
            topic: "t".to_string(),
        };

        pool.cast(custom.clone()).await.expect("cast is accepted");
        let reply = pool.call(custom.clone()).await.expect("worker replies");

        assert_eq!(reply, ShardReply::Ignored);
        assert_eq!(
            reply.into_result(custom.kind()),
            Err(RouteError::UnrecognizedRequest("rebalance".to_string()))
        );
        assert_eq!(pool.requests_observed(), 2);
    }
}
