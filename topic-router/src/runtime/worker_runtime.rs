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

//! Runtime helper for spawning shard request loops on dedicated threads.

use crate::observability::events;
use std::future::Future;
use std::io;
use std::thread;
use tokio::runtime::Builder;
use tracing::{debug, error};

pub(crate) const DEFAULT_SHARD_RUNTIME_THREAD_NAME: &str = "route-shard";
const COMPONENT: &str = "worker_runtime";

/// Owns the thread running one request loop.
pub(crate) struct RequestLoopHandle {
    worker_thread: String,
    _join_handle: thread::JoinHandle<()>,
}

impl RequestLoopHandle {
    pub(crate) fn worker_thread(&self) -> &str {
        &self.worker_thread
    }
}

/// Spawns `run_loop(mailbox)` on a named thread driving its own current-thread
/// Tokio runtime. The loop ends, and the thread with it, once the future resolves.
pub(crate) fn spawn_request_loop<M, F, Fut>(
    thread_name: String,
    mailbox: M,
    run_loop: F,
) -> io::Result<RequestLoopHandle>
where
    M: Send + 'static,
    F: FnOnce(M) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let worker_thread = thread_name.clone();
    let join_handle = thread::Builder::new().name(thread_name).spawn(move || {
        let runtime = match Builder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(err) => {
                error!(
                    event = events::RUNTIME_SPAWN_FAILED,
                    component = COMPONENT,
                    err = %err,
                    "failed to build shard runtime; mailbox will close"
                );
                return;
            }
        };
        runtime.block_on(run_loop(mailbox));
    })?;

    debug!(
        event = events::RUNTIME_SPAWN_OK,
        component = COMPONENT,
        worker_thread = worker_thread.as_str(),
        "spawned request loop thread"
    );

    Ok(RequestLoopHandle {
        worker_thread,
        _join_handle: join_handle,
    })
}
