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

//! Shard worker that applies route mutations for its slice of the topic space.

use crate::control_plane::route_lifecycle::RouteLifecycle;
use crate::observability::{
    events,
    fields::{self, WorkerContext},
};
use crate::route_error::RouteError;
use crate::runtime::worker_runtime::{
    spawn_request_loop, RequestLoopHandle, DEFAULT_SHARD_RUNTIME_THREAD_NAME,
};
use crate::shard_plane::{ShardEnvelope, ShardReply, ShardRequest};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, info, warn};
use uuid::Uuid;

const SHARD_RUNTIME_THREAD_NAME_PREFIX: &str = "route-shard-";
const SHARD_RUNTIME_THREAD_NAME_MAX_LEN: usize = 15;
const COMPONENT: &str = "shard_worker";

/// One serialized mutation lane: a mailbox plus the thread draining it.
pub(crate) struct ShardWorker {
    shard: usize,
    worker_id: String,
    sender: Sender<ShardEnvelope>,
    observed: Arc<AtomicU64>,
    loop_handle: RequestLoopHandle,
}

impl ShardWorker {
    /// Spawns a dedicated runtime thread draining this shard's mailbox.
    pub(crate) fn spawn(
        shard: usize,
        mailbox_size: usize,
        lifecycle: Arc<RouteLifecycle>,
    ) -> Result<Self, RouteError> {
        let (sender, receiver) = mpsc::channel(mailbox_size);
        let worker_id = Uuid::new_v4().hyphenated().to_string();
        let observed = Arc::new(AtomicU64::new(0));

        let worker_id_for_loop = worker_id.clone();
        let observed_for_loop = observed.clone();
        let loop_handle = spawn_request_loop(
            Self::build_runtime_thread_name(shard),
            receiver,
            move |receiver| async move {
                let context = WorkerContext::with_current_thread(worker_id_for_loop, shard);
                Self::request_loop(context, lifecycle, receiver, observed_for_loop).await;
            },
        )
        .map_err(|err| {
            RouteError::InvalidConfig(format!("unable to spawn shard worker {shard}: {err}"))
        })?;

        Ok(Self {
            shard,
            worker_id,
            sender,
            observed,
            loop_handle,
        })
    }

    pub(crate) fn shard(&self) -> usize {
        self.shard
    }

    /// Returns the unique worker identifier for correlation logs.
    pub(crate) fn worker_id(&self) -> &str {
        &self.worker_id
    }

    /// Returns the worker runtime thread label for diagnostics.
    pub(crate) fn runtime_thread(&self) -> &str {
        self.loop_handle.worker_thread()
    }

    pub(crate) fn sender(&self) -> &Sender<ShardEnvelope> {
        &self.sender
    }

    /// Requests this worker has taken off its mailbox.
    pub(crate) fn observed(&self) -> u64 {
        self.observed.load(Ordering::Acquire)
    }

    fn build_runtime_thread_name(shard: usize) -> String {
        let name = format!("{SHARD_RUNTIME_THREAD_NAME_PREFIX}{shard}");
        if name.len() <= SHARD_RUNTIME_THREAD_NAME_MAX_LEN {
            name
        } else {
            DEFAULT_SHARD_RUNTIME_THREAD_NAME.to_string()
        }
    }

    /// Applies a single request against the route lifecycle.
    pub(crate) fn handle(lifecycle: &RouteLifecycle, request: &ShardRequest) -> ShardReply {
        let result = match request {
            ShardRequest::AddRoute(route) => lifecycle.add_route(route),
            ShardRequest::DeleteRoute(route) => lifecycle.delete_route(route),
            ShardRequest::Custom { .. } => return ShardReply::Ignored,
        };
        match result {
            Ok(()) => ShardReply::Applied,
            Err(err) => ShardReply::Failed(err),
        }
    }

    /// Drains the mailbox one request at a time until every sender is gone.
    pub(crate) async fn request_loop(
        context: WorkerContext,
        lifecycle: Arc<RouteLifecycle>,
        mut receiver: Receiver<ShardEnvelope>,
        observed: Arc<AtomicU64>,
    ) {
        while let Some(envelope) = receiver.recv().await {
            observed.fetch_add(1, Ordering::AcqRel);
            let ShardEnvelope { request, reply } = envelope;

            debug!(
                event = events::SHARD_REQUEST_RECEIVED,
                component = COMPONENT,
                worker_id = context.worker_id.as_str(),
                worker_thread = context.worker_thread.as_str(),
                shard = context.shard,
                request = request.kind(),
                topic = request.topic(),
                "processing shard request"
            );

            let outcome = Self::handle(&lifecycle, &request);
            if outcome == ShardReply::Ignored {
                warn!(
                    event = events::SHARD_REQUEST_IGNORED,
                    component = COMPONENT,
                    worker_id = context.worker_id.as_str(),
                    shard = context.shard,
                    request = request.kind(),
                    "unrecognized request ignored"
                );
            }

            if let Some(reply) = reply {
                if reply.send(outcome).is_err() {
                    debug!(
                        event = events::SHARD_REPLY_DROPPED,
                        component = COMPONENT,
                        worker_id = context.worker_id.as_str(),
                        shard = context.shard,
                        reason = fields::REASON_CALLER_GONE,
                        "caller stopped waiting for reply"
                    );
                }
            }
        }

        info!(
            event = events::SHARD_WORKER_STOPPED,
            component = COMPONENT,
            worker_id = context.worker_id.as_str(),
            worker_thread = context.worker_thread.as_str(),
            shard = context.shard,
            reason = fields::REASON_MAILBOX_CLOSED,
            "mailbox closed; stopping request loop"
        );
    }
}
