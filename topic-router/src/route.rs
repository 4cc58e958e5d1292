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

use crate::destination::Destination;
use crate::topic;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A registered `(topic, destination)` binding.
///
/// `topic` is either an exact topic or a topic filter. Two routes are the same route
/// only when both halves are equal.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Route {
    pub topic: String,
    pub destination: Destination,
}

impl Route {
    pub fn new(topic: &str, destination: Destination) -> Self {
        Self {
            topic: topic.to_string(),
            destination,
        }
    }

    /// Whether this route is indexed by the topic trie.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        topic::is_wildcard(&self.topic)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.topic, self.destination)
    }
}
