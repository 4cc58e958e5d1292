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

//! Dispatch mode carried on a request-scoped context.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// How a route mutation reaches the route store.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Mutate inline in the caller's context, bypassing the shard pool. Only sound
    /// while the caller guarantees no concurrent mutator targets the same topic,
    /// e.g. single-node operation or a bulk load under an external lock.
    Protected,
    /// Serialize through the shard worker owning the topic.
    #[default]
    Normal,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Protected => write!(f, "protected"),
            Mode::Normal => write!(f, "normal"),
        }
    }
}

///
/// [`RouteContext`] is the explicit per-caller scope a route mutation runs under.
///
/// Each caller owns its context, so switching one caller to [`Mode::Protected`]
/// never changes how other callers are dispatched. An unset mode reads as
/// [`Mode::Normal`].
///
/// # Examples
///
/// ```
/// use topic_router::{Mode, RouteContext};
///
/// let mut bulk_loader = RouteContext::new();
/// assert_eq!(bulk_loader.mode(), Mode::Normal);
///
/// bulk_loader.set_mode(Mode::Protected);
/// assert_eq!(bulk_loader.mode(), Mode::Protected);
/// assert_eq!(RouteContext::default().mode(), Mode::Normal);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RouteContext {
    mode: Option<Mode>,
}

impl RouteContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: Mode) -> Self {
        Self { mode: Some(mode) }
    }

    pub fn protected() -> Self {
        Self::with_mode(Mode::Protected)
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = Some(mode);
    }

    pub fn mode(&self) -> Mode {
        self.mode.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{Mode, RouteContext};

    #[test]
    fn contexts_do_not_share_mode() {
        let mut first = RouteContext::new();
        let second = first.clone();

        first.set_mode(Mode::Protected);

        assert_eq!(first.mode(), Mode::Protected);
        assert_eq!(second.mode(), Mode::Normal);
    }

    #[test]
    fn mode_can_be_switched_back() {
        let mut context = RouteContext::protected();
        context.set_mode(Mode::Normal);

        assert_eq!(context, RouteContext::with_mode(Mode::Normal));
    }
}
