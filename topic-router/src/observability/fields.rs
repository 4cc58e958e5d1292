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

//! Canonical structured field values and value-format helpers.

use crate::route::Route;

pub const REASON_MAILBOX_CLOSED: &str = "mailbox_closed";
pub const REASON_CALLER_GONE: &str = "caller_gone";
pub const DEFAULT_WORKER_THREAD: &str = "unknown-thread";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WorkerContext {
    pub worker_id: String,
    pub worker_thread: String,
    pub shard: usize,
}

impl WorkerContext {
    pub fn new(worker_id: impl Into<String>, worker_thread: Option<&str>, shard: usize) -> Self {
        Self {
            worker_id: worker_id.into(),
            worker_thread: thread_name_or_default(worker_thread),
            shard,
        }
    }

    pub fn with_current_thread(worker_id: impl Into<String>, shard: usize) -> Self {
        Self {
            worker_id: worker_id.into(),
            worker_thread: current_thread_name_or_default(),
            shard,
        }
    }
}

pub fn thread_name_or_default(thread_name: Option<&str>) -> String {
    thread_name.unwrap_or(DEFAULT_WORKER_THREAD).to_string()
}

pub fn current_thread_name_or_default() -> String {
    thread_name_or_default(std::thread::current().name())
}

/// Renders a route list as `topic -> destination` entries separated by `, `.
pub fn format_routes(routes: &[Route]) -> String {
    routes
        .iter()
        .map(Route::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::{
        format_routes, thread_name_or_default, WorkerContext, DEFAULT_WORKER_THREAD,
        REASON_CALLER_GONE, REASON_MAILBOX_CLOSED,
    };

    #[test]
    fn reason_values_are_distinct_snake_case() {
        assert_ne!(REASON_CALLER_GONE, REASON_MAILBOX_CLOSED);
        for reason in [REASON_CALLER_GONE, REASON_MAILBOX_CLOSED] {
            assert!(reason.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }
    use crate::{Destination, Route};

    #[test]
    fn thread_name_or_default_falls_back_when_absent() {
        assert_eq!(thread_name_or_default(None), DEFAULT_WORKER_THREAD);
        assert_eq!(thread_name_or_default(Some("named-thread")), "named-thread");
    }

    #[test]
    fn worker_context_keeps_shard_index() {
        let context = WorkerContext::new("w-1", Some("route-shard-3"), 3);

        assert_eq!(context.shard, 3);
        assert_eq!(context.worker_thread, "route-shard-3");
    }

    #[test]
    fn format_routes_is_stable_for_known_order() {
        let routes = vec![
            Route::new("a/#", Destination::node("n1")),
            Route::new("a/b", Destination::group("g", "n2")),
        ];

        assert_eq!(format_routes(&routes), "a/# -> n1, a/b -> g@n2");
        assert_eq!(format_routes(&[]), "");
    }
}
