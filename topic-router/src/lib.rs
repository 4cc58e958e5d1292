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

//! # topic-router
//!
//! `topic-router` is the topic-routing core of a publish/subscribe broker. Given the
//! concrete topic a publisher sends to, it returns every destination (a cluster
//! node, or a node within a shared-subscription group) subscribed through the exact
//! topic or through a matching wildcard filter.
//!
//! Filters use the single-level wildcard `+` and the trailing multi-level wildcard
//! `#`. Wildcard filters are indexed by a segment trie that is kept in lock-step
//! with the route table: a filter is in the trie exactly while at least one route
//! uses it.
//!
//! ```
//! use topic_router::{Destination, RouteContext, Router, RouterConfig};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let router = Router::new("quick-start", RouterConfig::new("node1")).unwrap();
//! let ctx = RouteContext::new();
//!
//! router.add_route(&ctx, "sensors/+/temp", Destination::node("node2")).await.unwrap();
//! router.add_route(&ctx, "sensors/#", Destination::group("audit", "node3")).await.unwrap();
//!
//! assert_eq!(router.match_routes("sensors/kitchen/temp").len(), 2);
//! assert_eq!(router.match_routes("sensors/kitchen/humidity").len(), 1);
//! assert!(router.match_routes("actuators/fan").is_empty());
//! # });
//! ```
//!
//! ## Mutation contract
//!
//! Adding a route twice and deleting a route that is not present both succeed.
//! Malformed topics are rejected before touching the store, and an aborted store
//! transaction leaves no partial effect.
//!
//! ```
//! use topic_router::{Destination, RouteContext, RouteError, Router, RouterConfig};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let router = Router::new("contract", RouterConfig::new("node1")).unwrap();
//! let ctx = RouteContext::new();
//! let node2 = Destination::node("node2");
//!
//! assert!(router.add_route(&ctx, "a/+", node2.clone()).await.is_ok());
//! assert!(router.add_route(&ctx, "a/+", node2.clone()).await.is_ok());
//! assert_eq!(router.get_routes("a/+").len(), 1);
//!
//! assert!(router.delete_route(&ctx, "a/+", node2.clone()).await.is_ok());
//! assert!(router.delete_route(&ctx, "a/+", node2.clone()).await.is_ok());
//! assert!(!router.has_routes("a/+"));
//!
//! assert!(matches!(
//!     router.add_route(&ctx, "a/#/b", node2).await,
//!     Err(RouteError::MalformedTopic(_))
//! ));
//! # });
//! ```
//!
//! ## Internal architecture map
//!
//! - API facade: outward `Router` surface and `RouteContext` dispatch mode
//! - Control plane: topic trie, route table, and the route lifecycle mutating both
//! - Store: transactional home of routing state, in-memory or replicated
//! - Shard plane: fixed pool of workers serializing mutations per topic hash
//! - Runtime: dedicated-thread runtime boundaries for shard workers
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events.
//! Library code emits events/spans and does not unconditionally initialize a global
//! subscriber. Binaries and tests are responsible for one-time
//! `tracing_subscriber` initialization at process boundaries.

mod config;
pub use config::RouterConfig;

pub mod control_plane;

mod destination;
pub use destination::Destination;

mod mode;
pub use mode::{Mode, RouteContext};

mod monitor;
pub use monitor::{DestinationMonitor, NoopDestinationMonitor};

#[doc(hidden)]
pub mod observability;

mod route;
pub use route::Route;

mod route_error;
pub use route_error::RouteError;

mod router;
pub use router::Router;

mod runtime;

mod shard_plane;
pub use shard_plane::{ShardReply, ShardRequest};

pub mod store;
pub use store::RouteStats;

pub mod topic;
pub use topic::TopicError;
