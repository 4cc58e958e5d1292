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

mod config;

use crate::config::Config;
use clap::Parser;
use std::fs::File;
use std::io::Read;
use topic_router::{RouteContext, RouteError, Router};
use tracing::info;

#[derive(Parser)]
#[command()]
struct RouterArgs {
    #[arg(short, long, value_name = "FILE")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), RouteError> {
    let _ = tracing_subscriber::fmt::try_init();

    info!("Started configurable-router");

    // Get the config file.
    let args = RouterArgs::parse();
    let mut file = File::open(&args.config)
        .map_err(|e| RouteError::InvalidConfig(format!("File not found: {e:?}")))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| RouteError::InvalidConfig(format!("Unable to read config file: {e:?}")))?;

    let config: Config = json5::from_str(&contents)
        .map_err(|e| RouteError::InvalidConfig(format!("Unable to parse config file: {e:?}")))?;

    config.validate()?;

    let router = Router::new("configurable-router", config.router)?;

    // Bulk-load the configured routes inline, bypassing the shard pool.
    let loader = RouteContext::protected();
    for route in &config.routes {
        let destination = route
            .destination
            .clone()
            .unwrap_or_else(|| router.local_node().clone());
        router.add_route(&loader, &route.topic, destination).await?;
    }

    let stats = router.stats();
    info!(
        topics = stats.topics,
        routes = stats.routes,
        wildcard_filters = stats.wildcard_filters,
        "routes loaded"
    );

    for probe in &config.probes {
        router
            .print_routes(probe)
            .map_err(|e| RouteError::InvalidConfig(format!("Unable to print routes: {e:?}")))?;
    }

    Ok(())
}
