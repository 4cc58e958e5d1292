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

//! Shard-plane layer.
//!
//! Owns the fixed pool of shard workers. Every mutation for a topic goes to the
//! worker chosen by hashing that topic, so racing mutations on one topic are
//! serialized while different topics proceed in parallel.

pub(crate) mod shard_pool;
pub(crate) mod shard_worker;

use crate::route::Route;
use crate::route_error::RouteError;
use tokio::sync::oneshot;

/// A request addressed to the shard worker owning its topic.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ShardRequest {
    AddRoute(Route),
    DeleteRoute(Route),
    /// A request kind the built-in workers do not handle; it is logged and
    /// answered with [`ShardReply::Ignored`].
    Custom { kind: String, topic: String },
}

impl ShardRequest {
    /// Topic that selects the owning shard.
    pub fn topic(&self) -> &str {
        match self {
            ShardRequest::AddRoute(route) | ShardRequest::DeleteRoute(route) => &route.topic,
            ShardRequest::Custom { topic, .. } => topic,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            ShardRequest::AddRoute(_) => "add_route",
            ShardRequest::DeleteRoute(_) => "delete_route",
            ShardRequest::Custom { kind, .. } => kind,
        }
    }
}

/// A shard worker's answer to a request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ShardReply {
    Applied,
    Ignored,
    Failed(RouteError),
}

impl ShardReply {
    /// Folds the reply into a result; `kind` names the request it answers.
    pub fn into_result(self, kind: &str) -> Result<(), RouteError> {
        match self {
            ShardReply::Applied => Ok(()),
            ShardReply::Ignored => Err(RouteError::UnrecognizedRequest(kind.to_string())),
            ShardReply::Failed(err) => Err(err),
        }
    }
}

/// Mailbox entry; `reply` is `None` for one-way notifications.
pub(crate) struct ShardEnvelope {
    pub(crate) request: ShardRequest,
    pub(crate) reply: Option<oneshot::Sender<ShardReply>>,
}
