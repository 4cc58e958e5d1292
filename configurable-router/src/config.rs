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
use topic_router::{topic, Destination, RouteError, RouterConfig};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub(crate) router: RouterConfig,
    #[serde(default)]
    pub(crate) routes: Vec<RouteConfig>,
    #[serde(default)]
    pub(crate) probes: Vec<String>,
}

impl Config {
    /// Rejects settings the router would refuse later, before any route is loaded.
    pub(crate) fn validate(&self) -> Result<(), RouteError> {
        self.router.validate()?;
        for route in &self.routes {
            topic::validate_filter(&route.topic).map_err(|e| {
                RouteError::InvalidConfig(format!("route topic '{}': {e}", route.topic))
            })?;
        }
        for probe in &self.probes {
            topic::validate_topic(probe)
                .map_err(|e| RouteError::InvalidConfig(format!("probe '{probe}': {e}")))?;
        }
        Ok(())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    pub(crate) topic: String,
    /// Omitted means the router's own node.
    #[serde(default)]
    pub(crate) destination: Option<Destination>,
}
