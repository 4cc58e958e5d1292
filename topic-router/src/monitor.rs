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

//! Destination-liveness collaborator.

use crate::destination::Destination;

/// Watches destinations for failure.
///
/// The route lifecycle calls [`DestinationMonitor::watch`] for every route it newly
/// adds, so implementations must tolerate repeated calls for one destination. When
/// a destination becomes unreachable the monitor is expected to remove its routes,
/// typically through `Router::delete_destination_routes`.
///
/// `watch` runs on a shard worker and must not block.
pub trait DestinationMonitor: Send + Sync {
    fn watch(&self, destination: &Destination);
}

/// Monitor for deployments without liveness tracking.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopDestinationMonitor;

impl DestinationMonitor for NoopDestinationMonitor {
    fn watch(&self, _destination: &Destination) {}
}
