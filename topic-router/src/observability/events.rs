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

//! Canonical structured event names used across `topic-router`.

// Route lifecycle events.
pub const ROUTE_ADD_START: &str = "route_add_start";
pub const ROUTE_ADD_OK: &str = "route_add_ok";
pub const ROUTE_ADD_EXISTS: &str = "route_add_exists";
pub const ROUTE_ADD_FAILED: &str = "route_add_failed";
pub const ROUTE_DELETE_START: &str = "route_delete_start";
pub const ROUTE_DELETE_OK: &str = "route_delete_ok";
pub const ROUTE_DELETE_ABSENT: &str = "route_delete_absent";
pub const ROUTE_DELETE_FAILED: &str = "route_delete_failed";
pub const TRIE_FILTER_INSERT: &str = "trie_filter_insert";
pub const TRIE_FILTER_REMOVE: &str = "trie_filter_remove";
pub const DESTINATION_WATCH: &str = "destination_watch";
pub const DESTINATION_PURGE: &str = "destination_purge";

// Store events.
pub const TRANSACTION_COMMITTED: &str = "transaction_committed";
pub const TRANSACTION_ABORTED: &str = "transaction_aborted";

// Shard pool and worker events.
pub const SHARD_POOL_START: &str = "shard_pool_start";
pub const SHARD_DISPATCH_PROTECTED: &str = "shard_dispatch_protected";
pub const SHARD_DISPATCH_FAILED: &str = "shard_dispatch_failed";
pub const SHARD_REQUEST_RECEIVED: &str = "shard_request_received";
pub const SHARD_REQUEST_IGNORED: &str = "shard_request_ignored";
pub const SHARD_REPLY_DROPPED: &str = "shard_reply_dropped";
pub const SHARD_WORKER_STOPPED: &str = "shard_worker_stopped";

// Runtime events.
pub const RUNTIME_SPAWN_OK: &str = "runtime_spawn_ok";
pub const RUNTIME_SPAWN_FAILED: &str = "runtime_spawn_failed";
