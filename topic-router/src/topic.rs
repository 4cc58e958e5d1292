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

//! Topic and topic-filter syntax.
//!
//! Topics are `/`-delimited. Segments are case-sensitive and empty segments are
//! kept as distinct literals, so `a//b` has three segments and the empty topic has
//! exactly one. Filters may additionally use the single-level wildcard `+` and the
//! multi-level wildcard `#`; both must occupy a whole segment and `#` must be last.

use std::collections::hash_map::DefaultHasher;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

pub const TOPIC_SEPARATOR: char = '/';
pub const SINGLE_LEVEL_WILDCARD: &str = "+";
pub const MULTI_LEVEL_WILDCARD: &str = "#";

/// Longest topic accepted, in bytes.
pub const MAX_TOPIC_LEN: usize = 65_535;

/// Reasons a topic or filter is rejected before touching the route store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TopicError {
    /// A `+` or `#` shares its segment with other characters, e.g. `a/b+/c`.
    WildcardNotWholeSegment { segment: String, position: usize },
    /// `#` appears before the final segment, e.g. `a/#/c`.
    MultiLevelWildcardNotLast { position: usize },
    NullCharacter,
    TooLong { len: usize },
    /// A concrete topic, e.g. one being matched, carries a wildcard segment.
    WildcardInTopic { position: usize },
}

impl Display for TopicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TopicError::WildcardNotWholeSegment { segment, position } => write!(
                f,
                "wildcard must occupy a whole segment, found '{segment}' at segment {position}"
            ),
            TopicError::MultiLevelWildcardNotLast { position } => write!(
                f,
                "multi-level wildcard '#' must be the last segment, found at segment {position}"
            ),
            TopicError::NullCharacter => write!(f, "topic must not contain U+0000"),
            TopicError::TooLong { len } => {
                write!(f, "topic is {len} bytes, limit is {MAX_TOPIC_LEN}")
            }
            TopicError::WildcardInTopic { position } => write!(
                f,
                "concrete topic must not contain wildcards, found one at segment {position}"
            ),
        }
    }
}

impl Error for TopicError {}

/// Returns `true` when `topic` contains a wildcard character anywhere.
///
/// This is the classification used to decide whether a route participates in the
/// topic trie. It is purely lexical; call [`validate_filter`] first to reject
/// misplaced wildcards.
#[inline]
pub fn is_wildcard(topic: &str) -> bool {
    topic.contains(|c: char| c == '+' || c == '#')
}

/// Splits a topic into its segments without collapsing empty ones.
#[inline]
pub fn segments(topic: &str) -> impl Iterator<Item = &str> {
    topic.split(TOPIC_SEPARATOR)
}

/// Deterministically maps `topic` onto one of `buckets` slots.
///
/// The mapping is process-local: `DefaultHasher` may change between Rust releases,
/// so it must not be persisted or compared across nodes.
pub(crate) fn shard_index(topic: &str, buckets: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    topic.hash(&mut hasher);
    (hasher.finish() % buckets.max(1) as u64) as usize
}

/// Checks that `filter` is a well-formed topic or topic filter.
pub fn validate_filter(filter: &str) -> Result<(), TopicError> {
    if filter.len() > MAX_TOPIC_LEN {
        return Err(TopicError::TooLong { len: filter.len() });
    }
    if filter.contains('\u{0}') {
        return Err(TopicError::NullCharacter);
    }

    let mut iter = segments(filter).enumerate().peekable();
    while let Some((position, segment)) = iter.next() {
        if segment == MULTI_LEVEL_WILDCARD {
            if iter.peek().is_some() {
                return Err(TopicError::MultiLevelWildcardNotLast { position });
            }
            continue;
        }
        if segment != SINGLE_LEVEL_WILDCARD && is_wildcard(segment) {
            return Err(TopicError::WildcardNotWholeSegment {
                segment: segment.to_string(),
                position,
            });
        }
    }
    Ok(())
}

/// Checks that `topic` is a well-formed concrete topic: a valid filter with no
/// wildcard segments.
pub fn validate_topic(topic: &str) -> Result<(), TopicError> {
    validate_filter(topic)?;
    match segments(topic)
        .position(|segment| segment == SINGLE_LEVEL_WILDCARD || segment == MULTI_LEVEL_WILDCARD)
    {
        Some(position) => Err(TopicError::WildcardInTopic { position }),
        None => Ok(()),
    }
}
