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

use crate::config::RouterConfig;
use crate::control_plane::route_lifecycle::RouteLifecycle;
use crate::destination::Destination;
use crate::mode::{Mode, RouteContext};
use crate::monitor::{DestinationMonitor, NoopDestinationMonitor};
use crate::observability::{events, fields};
use crate::route::Route;
use crate::route_error::RouteError;
use crate::shard_plane::shard_pool::ShardPool;
use crate::shard_plane::shard_worker::ShardWorker;
use crate::shard_plane::ShardRequest;
use crate::store::{MemoryRouteStore, RouteStats, RouteStore};
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{debug, info};

const ROUTER_TAG: &str = "Router:";
const COMPONENT: &str = "router";

///
/// [`Router`] is the topic-routing core: it records which destinations subscribed
/// to which topics or topic filters, and answers which destinations must receive a
/// message published to a concrete topic.
///
/// Mutations run under a caller-owned [`RouteContext`]. In [`Mode::Normal`] they are
/// serialized through the shard worker owning the topic; in [`Mode::Protected`] they
/// run inline in the caller's task. Reads never go through the shard pool.
///
/// # Examples
///
/// ```
/// use topic_router::{Destination, RouteContext, Router, RouterConfig};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let router = Router::new("doc-router", RouterConfig::new("node1")).unwrap();
/// let ctx = RouteContext::new();
///
/// router.add_route(&ctx, "a/b/c", Destination::node("node1")).await.unwrap();
/// router.add_route(&ctx, "a/+/c", Destination::node("node2")).await.unwrap();
/// router.add_local_route(&ctx, "a/#").await.unwrap();
///
/// let mut topics: Vec<String> = router
///     .match_routes("a/b/c")
///     .into_iter()
///     .map(|route| route.topic)
///     .collect();
/// topics.sort();
/// assert_eq!(topics, vec!["a/#", "a/+/c", "a/b/c"]);
///
/// router.delete_route(&ctx, "a/+/c", Destination::node("node2")).await.unwrap();
/// assert!(!router.has_filter("a/+/c"));
/// # });
/// ```
pub struct Router {
    name: String,
    local_node: Destination,
    lifecycle: Arc<RouteLifecycle>,
    shard_pool: ShardPool,
}

impl Router {
    /// Creates a single-node router over an in-memory store with no liveness tracking.
    pub fn new(name: &str, config: RouterConfig) -> Result<Self, RouteError> {
        Self::with_collaborators(
            name,
            config,
            Arc::new(MemoryRouteStore::new()),
            Arc::new(NoopDestinationMonitor),
        )
    }

    /// Creates a router over the given store and destination monitor.
    pub fn with_collaborators(
        name: &str,
        config: RouterConfig,
        store: Arc<dyn RouteStore>,
        monitor: Arc<dyn DestinationMonitor>,
    ) -> Result<Self, RouteError> {
        config.validate()?;

        let name = format!("{ROUTER_TAG}{name}");
        let lifecycle = Arc::new(RouteLifecycle::new(store, monitor));
        let shard_pool = ShardPool::start(
            &name,
            config.pool_size,
            config.mailbox_size,
            lifecycle.clone(),
        )?;

        info!(
            component = COMPONENT,
            router = name.as_str(),
            local_node = config.local_node.as_str(),
            "router started"
        );

        Ok(Self {
            name,
            local_node: Destination::Node(config.local_node),
            lifecycle,
            shard_pool,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of shard workers serializing mutations.
    pub fn pool_size(&self) -> usize {
        self.shard_pool.size()
    }

    /// Destination used by the `*_local_route` operations.
    pub fn local_node(&self) -> &Destination {
        &self.local_node
    }

    /// Adds a route from `topic` to this node.
    pub async fn add_local_route(&self, ctx: &RouteContext, topic: &str) -> Result<(), RouteError> {
        self.add_route(ctx, topic, self.local_node.clone()).await
    }

    /// Adds a route from `topic` to `destination`. Adding an existing route succeeds.
    pub async fn add_route(
        &self,
        ctx: &RouteContext,
        topic: &str,
        destination: Destination,
    ) -> Result<(), RouteError> {
        debug!(
            event = events::ROUTE_ADD_START,
            component = COMPONENT,
            topic,
            destination = %destination,
            mode = %ctx.mode(),
            "adding route"
        );
        self.mutate(ctx, ShardRequest::AddRoute(Route::new(topic, destination)))
            .await
    }

    /// Deletes the route from `topic` to this node.
    pub async fn delete_local_route(
        &self,
        ctx: &RouteContext,
        topic: &str,
    ) -> Result<(), RouteError> {
        self.delete_route(ctx, topic, self.local_node.clone()).await
    }

    /// Deletes the route from `topic` to `destination`. Deleting an absent route succeeds.
    pub async fn delete_route(
        &self,
        ctx: &RouteContext,
        topic: &str,
        destination: Destination,
    ) -> Result<(), RouteError> {
        debug!(
            event = events::ROUTE_DELETE_START,
            component = COMPONENT,
            topic,
            destination = %destination,
            mode = %ctx.mode(),
            "deleting route"
        );
        self.mutate(ctx, ShardRequest::DeleteRoute(Route::new(topic, destination)))
            .await
    }

    /// Deletes every route to `destination`, one delete per route, and returns how
    /// many routes were targeted. Stops at the first failure.
    pub async fn delete_destination_routes(
        &self,
        ctx: &RouteContext,
        destination: &Destination,
    ) -> Result<usize, RouteError> {
        let routes = self.lifecycle.store().routes_to(destination);
        let count = routes.len();

        info!(
            event = events::DESTINATION_PURGE,
            component = COMPONENT,
            destination = %destination,
            routes = count,
            "removing all routes for destination"
        );
        debug!(
            event = events::DESTINATION_PURGE,
            component = COMPONENT,
            targets = fields::format_routes(&routes).as_str(),
            "purge targets"
        );
        for route in routes {
            self.mutate(ctx, ShardRequest::DeleteRoute(route)).await?;
        }
        Ok(count)
    }

    /// Sends an arbitrary request to the shard worker owning its topic and waits
    /// for the outcome.
    pub async fn submit(&self, request: ShardRequest) -> Result<(), RouteError> {
        let kind = request.kind().to_string();
        self.shard_pool.call(request).await?.into_result(&kind)
    }

    /// Sends a one-way request to the shard worker owning its topic.
    pub async fn notify(&self, request: ShardRequest) -> Result<(), RouteError> {
        self.shard_pool.cast(request).await
    }

    async fn mutate(&self, ctx: &RouteContext, request: ShardRequest) -> Result<(), RouteError> {
        let kind = request.kind().to_string();
        let reply = match ctx.mode() {
            Mode::Protected => {
                debug!(
                    event = events::SHARD_DISPATCH_PROTECTED,
                    component = COMPONENT,
                    topic = request.topic(),
                    "applying mutation inline"
                );
                ShardWorker::handle(&self.lifecycle, &request)
            }
            Mode::Normal => self.shard_pool.call(request).await?,
        };
        reply.into_result(&kind)
    }

    /// Routes keyed exactly by `topic`.
    pub fn get_routes(&self, topic: &str) -> Vec<Route> {
        self.lifecycle.store().read(topic)
    }

    pub fn has_routes(&self, topic: &str) -> bool {
        self.lifecycle.store().has(topic)
    }

    /// Routes for the concrete `topic` itself plus routes for every wildcard filter
    /// matching it. A destination reached through several filters appears once per
    /// filter.
    ///
    /// `topic` must not contain wildcards.
    pub fn match_routes(&self, topic: &str) -> Vec<Route> {
        let store = self.lifecycle.store();
        let mut routes = store.read(topic);
        for filter in store.match_filters(topic) {
            routes.extend(store.read(&filter));
        }
        routes
    }

    /// Like [`Router::match_routes`], but rejects a malformed or wildcard `topic`
    /// instead of asserting. Use this for topics that come from user input.
    pub fn try_match_routes(&self, topic: &str) -> Result<Vec<Route>, RouteError> {
        crate::topic::validate_topic(topic)?;
        Ok(self.match_routes(topic))
    }

    /// Every topic key with at least one route, exact and wildcard.
    pub fn all_topics(&self) -> Vec<String> {
        self.lifecycle.store().topics()
    }

    /// Whether the topic trie currently indexes `filter`.
    pub fn has_filter(&self, filter: &str) -> bool {
        self.lifecycle.store().has_filter(filter)
    }

    pub fn stats(&self) -> RouteStats {
        self.lifecycle.store().stats()
    }

    /// Writes `match_routes(topic)` to `writer`, one `topic -> destination` per line.
    ///
    /// A malformed or wildcard `topic` fails with [`io::ErrorKind::InvalidInput`].
    pub fn write_routes<W: Write>(&self, topic: &str, writer: &mut W) -> io::Result<()> {
        let routes = self
            .try_match_routes(topic)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
        writeln!(writer, "Route dump for {topic}: {} route(s)", routes.len())?;
        for route in routes {
            writeln!(writer, "{route}")?;
        }
        Ok(())
    }

    /// Dumps `match_routes(topic)` to stdout.
    pub fn print_routes(&self, topic: &str) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_routes(topic, &mut handle)
    }
}

#[cfg(test)]
mod tests {
    use super::Router;
    use crate::route_error::RouteError;
    use crate::shard_plane::ShardRequest;
    use crate::topic::TopicError;
    use crate::{Destination, Mode, RouteContext, RouterConfig};

    fn router() -> Router {
        Router::new("unit", RouterConfig::new("local").with_pool_size(4)).expect("router starts")
    }

    #[tokio::test]
    async fn protected_mode_bypasses_shard_pool() {
        let router = router();
        let mut ctx = RouteContext::new();
        ctx.set_mode(Mode::Protected);

        router.add_local_route(&ctx, "a/+").await.expect("add");
        router.delete_local_route(&ctx, "a/+").await.expect("delete");
        router.add_local_route(&ctx, "b").await.expect("add exact");

        assert_eq!(router.shard_pool.requests_observed(), 0);
        assert!(router.has_routes("b"));
    }

    #[tokio::test]
    async fn normal_mode_goes_through_shard_pool() {
        let router = router();
        let ctx = RouteContext::new();

        router.add_local_route(&ctx, "a/+").await.expect("add");

        assert_eq!(router.shard_pool.requests_observed(), 1);
        assert!(router.has_filter("a/+"));
    }

    #[tokio::test]
    async fn local_routes_use_configured_node() {
        let router = router();
        let ctx = RouteContext::new();

        router.add_local_route(&ctx, "t").await.expect("add");

        assert_eq!(router.local_node(), &Destination::node("local"));
        assert_eq!(router.get_routes("t")[0].destination, Destination::node("local"));
    }

    #[tokio::test]
    async fn submit_surfaces_unrecognized_requests() {
        let router = router();

        let result = router
            .submit(ShardRequest::Custom {
                kind: "snapshot".to_string(),
                topic: "t".to_string(),
            })
            .await;

        assert_eq!(
            result,
            Err(RouteError::UnrecognizedRequest("snapshot".to_string()))
        );
    }

    #[tokio::test]
    async fn write_routes_renders_header_and_lines() {
        let router = router();
        let ctx = RouteContext::protected();
        router
            .add_route(&ctx, "a/#", Destination::group("g", "n2"))
            .await
            .expect("add");

        let mut out = Vec::new();
        router.write_routes("a/b", &mut out).expect("write");

        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "Route dump for a/b: 1 route(s)\na/# -> g@n2\n"
        );
    }

    #[tokio::test]
    async fn wildcard_match_topic_is_an_error_not_a_panic() {
        let router = router();

        assert_eq!(
            router.try_match_routes("fleet/#"),
            Err(RouteError::MalformedTopic(TopicError::WildcardInTopic {
                position: 1
            }))
        );

        let mut out = Vec::new();
        let err = router
            .write_routes("fleet/+/status", &mut out)
            .expect_err("wildcard dump topic");
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
        assert!(out.is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = Router::new("bad", RouterConfig::new("n").with_pool_size(0));

        assert!(matches!(result, Err(RouteError::InvalidConfig(_))));
    }
}
