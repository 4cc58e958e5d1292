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

use crate::route_error::RouteError;
use serde::{Deserialize, Serialize};

const DEFAULT_POOL_SIZE: usize = 8;
const DEFAULT_MAILBOX_SIZE: usize = 64;

fn default_pool_size() -> usize {
    DEFAULT_POOL_SIZE
}

fn default_mailbox_size() -> usize {
    DEFAULT_MAILBOX_SIZE
}

/// Router construction settings.
#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Node name used as the destination of `add_local_route` / `delete_local_route`.
    pub local_node: String,
    /// Number of shard workers.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// Queued requests per shard worker before callers wait for space.
    #[serde(default = "default_mailbox_size")]
    pub mailbox_size: usize,
}

impl RouterConfig {
    pub fn new(local_node: &str) -> Self {
        Self {
            local_node: local_node.to_string(),
            pool_size: DEFAULT_POOL_SIZE,
            mailbox_size: DEFAULT_MAILBOX_SIZE,
        }
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn with_mailbox_size(mut self, mailbox_size: usize) -> Self {
        self.mailbox_size = mailbox_size;
        self
    }

    pub fn validate(&self) -> Result<(), RouteError> {
        if self.local_node.is_empty() {
            return Err(RouteError::InvalidConfig(
                "local_node must not be empty".to_string(),
            ));
        }
        if self.pool_size == 0 {
            return Err(RouteError::InvalidConfig(
                "pool_size must be at least 1".to_string(),
            ));
        }
        if self.mailbox_size == 0 {
            return Err(RouteError::InvalidConfig(
                "mailbox_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RouterConfig;

    #[test]
    fn missing_sizes_take_defaults() {
        let config: RouterConfig =
            serde_json::from_str(r#"{"local_node":"node1"}"#).expect("config should parse");

        assert_eq!(config, RouterConfig::new("node1"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed = serde_json::from_str::<RouterConfig>(r#"{"local_node":"n","shards":4}"#);

        assert!(parsed.is_err());
    }

    #[test]
    fn zero_sized_pool_and_mailbox_are_invalid() {
        assert!(RouterConfig::new("n").with_pool_size(0).validate().is_err());
        assert!(RouterConfig::new("n").with_mailbox_size(0).validate().is_err());
        assert!(RouterConfig::new("").validate().is_err());
    }
}
