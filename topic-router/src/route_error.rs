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

use crate::store::TransactionAborted;
use crate::topic::TopicError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failures surfaced by route mutations. Each is scoped to the single request.
///
/// Adding a route that already exists and deleting one that does not are
/// successes, not errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RouteError {
    /// The topic was rejected before any store interaction.
    MalformedTopic(TopicError),
    /// The backing store could not commit; the mutation had no effect.
    TransactionAborted(TransactionAborted),
    /// A shard worker did not understand the request and ignored it.
    UnrecognizedRequest(String),
    /// The shard worker's mailbox is closed.
    ShardUnavailable(usize),
    InvalidConfig(String),
}

impl Display for RouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteError::MalformedTopic(err) => write!(f, "malformed topic: {err}"),
            RouteError::TransactionAborted(err) => write!(f, "{err}"),
            RouteError::UnrecognizedRequest(kind) => {
                write!(f, "request '{kind}' was not recognized and was ignored")
            }
            RouteError::ShardUnavailable(shard) => {
                write!(f, "shard worker {shard} is no longer accepting requests")
            }
            RouteError::InvalidConfig(reason) => write!(f, "invalid router config: {reason}"),
        }
    }
}

impl Error for RouteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RouteError::MalformedTopic(err) => Some(err),
            RouteError::TransactionAborted(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TopicError> for RouteError {
    fn from(err: TopicError) -> Self {
        RouteError::MalformedTopic(err)
    }
}

impl From<TransactionAborted> for RouteError {
    fn from(err: TransactionAborted) -> Self {
        RouteError::TransactionAborted(err)
    }
}
