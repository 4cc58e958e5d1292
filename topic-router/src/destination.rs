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

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

///
/// [`Destination`] is a cluster node, or a node inside a shared-subscription group,
/// that is eligible to receive messages for a matched topic.
///
/// # Examples
///
/// ```
/// use topic_router::Destination;
///
/// let node = Destination::node("node1@host-a");
/// let grouped = Destination::group("telemetry", "node2@host-b");
///
/// assert_eq!(node.node_name(), "node1@host-a");
/// assert_eq!(grouped.to_string(), "telemetry@node2@host-b");
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Destination {
    Node(String),
    Group { group: String, node: String },
}

impl Destination {
    pub fn node(node: &str) -> Self {
        Destination::Node(node.to_string())
    }

    pub fn group(group: &str, node: &str) -> Self {
        Destination::Group {
            group: group.to_string(),
            node: node.to_string(),
        }
    }

    /// The node that ultimately receives the message, with or without a group.
    pub fn node_name(&self) -> &str {
        match self {
            Destination::Node(node) => node,
            Destination::Group { node, .. } => node,
        }
    }

    pub fn group_name(&self) -> Option<&str> {
        match self {
            Destination::Node(_) => None,
            Destination::Group { group, .. } => Some(group),
        }
    }
}

impl Display for Destination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Node(node) => write!(f, "{node}"),
            Destination::Group { group, node } => write!(f, "{group}@{node}"),
        }
    }
}
