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

use topic_router::{Destination, RouteContext, Router, RouterConfig};

pub(crate) const LOCAL_NODE: &str = "node0@local";

pub(crate) fn make_router(name: &str, pool_size: usize) -> Router {
    Router::new(name, RouterConfig::new(LOCAL_NODE).with_pool_size(pool_size))
        .expect("router creation should succeed")
}

#[allow(dead_code)]
pub(crate) async fn assert_add_route_ok(
    router: &Router,
    ctx: &RouteContext,
    topic: &str,
    destination: &Destination,
) {
    assert!(router
        .add_route(ctx, topic, destination.clone())
        .await
        .is_ok());
}

#[allow(dead_code)]
pub(crate) async fn assert_delete_route_ok(
    router: &Router,
    ctx: &RouteContext,
    topic: &str,
    destination: &Destination,
) {
    assert!(router
        .delete_route(ctx, topic, destination.clone())
        .await
        .is_ok());
}

/// Sorted topic keys of the routes `match_routes` returns for `topic`.
#[allow(dead_code)]
pub(crate) fn matched_topics(router: &Router, topic: &str) -> Vec<String> {
    let mut topics: Vec<String> = router
        .match_routes(topic)
        .into_iter()
        .map(|route| route.topic)
        .collect();
    topics.sort();
    topics
}
