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

//! Segment-indexed trie over wildcard topic filters.

use crate::topic::{self, MULTI_LEVEL_WILDCARD, SINGLE_LEVEL_WILDCARD};
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
struct TrieNode {
    /// The registered filter ending at this node, if any.
    terminal: Option<String>,
    /// Children keyed by literal segment; `+` and `#` children use their own token.
    children: HashMap<String, TrieNode>,
}

impl TrieNode {
    fn is_empty(&self) -> bool {
        self.terminal.is_none() && self.children.is_empty()
    }

    fn count_nodes(&self) -> usize {
        1 + self
            .children
            .values()
            .map(TrieNode::count_nodes)
            .sum::<usize>()
    }

    /// Clears the terminal for `path` and prunes nodes left empty.
    /// Returns `(removed, now_empty)`.
    fn remove_path(&mut self, path: &[&str]) -> (bool, bool) {
        let removed = match path {
            [] => self.terminal.take().is_some(),
            [segment, rest @ ..] => {
                let Some(child) = self.children.get_mut(*segment) else {
                    return (false, false);
                };
                let (removed, child_empty) = child.remove_path(rest);
                if child_empty {
                    self.children.remove(*segment);
                }
                removed
            }
        };
        (removed, self.is_empty())
    }
}

/// Index answering "which registered filters match this concrete topic?".
///
/// Only filters are stored; exact topics are served by the route table alone.
#[derive(Clone, Debug, Default)]
pub struct TopicTrie {
    root: TrieNode,
    filters: usize,
}

impl TopicTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `filter`. Returns `false` when it was already present.
    pub fn insert(&mut self, filter: &str) -> bool {
        let mut node = &mut self.root;
        for segment in topic::segments(filter) {
            node = node.children.entry(segment.to_string()).or_default();
        }
        if node.terminal.is_some() {
            return false;
        }
        node.terminal = Some(filter.to_string());
        self.filters += 1;
        true
    }

    /// Unregisters `filter`. Returns `false` when it was not present.
    pub fn remove(&mut self, filter: &str) -> bool {
        let path: Vec<&str> = topic::segments(filter).collect();
        let (removed, _) = self.root.remove_path(&path);
        if removed {
            self.filters -= 1;
        }
        removed
    }

    pub fn contains(&self, filter: &str) -> bool {
        let mut node = &self.root;
        for segment in topic::segments(filter) {
            match node.children.get(segment) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.terminal.is_some()
    }

    /// Every registered filter matching the concrete `topic`, in no particular order.
    ///
    /// The walk explores the literal child, the `+` child and the `#` child of each
    /// visited node, so overlapping filters such as `a/+/c`, `a/#` and `#` are all
    /// reported for `a/b/c`. A `#` child matches zero or more trailing segments.
    /// `topic` must not contain wildcards.
    pub fn matches(&self, topic: &str) -> Vec<String> {
        debug_assert!(
            !topic::is_wildcard(topic),
            "topic '{topic}' passed to match contains a wildcard"
        );

        let segments: Vec<&str> = topic::segments(topic).collect();
        let mut matched = Vec::new();
        let mut work: Vec<(&TrieNode, usize)> = vec![(&self.root, 0)];

        while let Some((node, depth)) = work.pop() {
            if let Some(filter) = node
                .children
                .get(MULTI_LEVEL_WILDCARD)
                .and_then(|hash| hash.terminal.as_ref())
            {
                matched.push(filter.clone());
            }

            let Some(segment) = segments.get(depth) else {
                if let Some(filter) = node.terminal.as_ref() {
                    matched.push(filter.clone());
                }
                continue;
            };

            if let Some(child) = node.children.get(*segment) {
                work.push((child, depth + 1));
            }
            if *segment != SINGLE_LEVEL_WILDCARD {
                if let Some(child) = node.children.get(SINGLE_LEVEL_WILDCARD) {
                    work.push((child, depth + 1));
                }
            }
        }

        matched
    }

    /// Number of registered filters.
    pub fn len(&self) -> usize {
        self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters == 0
    }

    /// Number of nodes below the root; zero exactly when no filter is registered.
    pub fn node_count(&self) -> usize {
        self.root.count_nodes() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::TopicTrie;

    fn sorted(mut filters: Vec<String>) -> Vec<String> {
        filters.sort();
        filters
    }

    #[test]
    fn insert_is_idempotent() {
        let mut trie = TopicTrie::new();

        assert!(trie.insert("a/+/c"));
        assert!(!trie.insert("a/+/c"));
        assert_eq!(trie.len(), 1);
        assert!(trie.contains("a/+/c"));
    }

    #[test]
    fn remove_of_absent_filter_is_a_no_op() {
        let mut trie = TopicTrie::new();
        trie.insert("a/#");

        assert!(!trie.remove("a/+"));
        assert!(!trie.remove("a"));
        assert!(trie.contains("a/#"));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn remove_prunes_unshared_nodes_only() {
        let mut trie = TopicTrie::new();
        trie.insert("a/+/c");
        trie.insert("a/+/d");
        let shared = trie.node_count();

        assert!(trie.remove("a/+/d"));
        assert_eq!(trie.node_count(), shared - 1);
        assert!(trie.contains("a/+/c"));

        assert!(trie.remove("a/+/c"));
        assert_eq!(trie.node_count(), 0);
        assert!(trie.is_empty());
    }

    #[test]
    fn prefix_filter_survives_removal_of_longer_filter() {
        let mut trie = TopicTrie::new();
        trie.insert("a/+");
        trie.insert("a/+/#");

        assert!(trie.remove("a/+/#"));
        assert!(trie.contains("a/+"));
        assert_eq!(trie.matches("a/b"), vec!["a/+".to_string()]);
    }

    #[test]
    fn overlapping_filters_all_match() {
        let mut trie = TopicTrie::new();
        trie.insert("a/+/c");
        trie.insert("a/#");
        trie.insert("#");
        trie.insert("+/b/+");
        trie.insert("a/b/d");

        assert_eq!(
            sorted(trie.matches("a/b/c")),
            vec!["#", "+/b/+", "a/#", "a/+/c"]
        );
    }

    #[test]
    fn single_level_wildcard_does_not_span_extra_segments() {
        let mut trie = TopicTrie::new();
        trie.insert("a/+/c");
        trie.insert("a/#");

        assert_eq!(trie.matches("a/b/c/d"), vec!["a/#".to_string()]);
        assert!(trie.matches("a/b").iter().all(|f| f == "a/#"));
    }

    #[test]
    fn multi_level_wildcard_matches_parent_level() {
        let mut trie = TopicTrie::new();
        trie.insert("a/#");

        assert_eq!(trie.matches("a"), vec!["a/#".to_string()]);
        assert!(trie.matches("b").is_empty());
    }

    #[test]
    fn root_multi_level_wildcard_matches_everything() {
        let mut trie = TopicTrie::new();
        trie.insert("#");

        for topic in ["", "a", "a/b/c", "/", "x//y"] {
            assert_eq!(trie.matches(topic), vec!["#".to_string()], "{topic}");
        }
    }

    #[test]
    fn empty_segments_are_literal() {
        let mut trie = TopicTrie::new();
        trie.insert("a/+/b");
        trie.insert("+");

        assert_eq!(trie.matches("a//b"), vec!["a/+/b".to_string()]);
        assert_eq!(trie.matches(""), vec!["+".to_string()]);
        assert!(trie.matches("a/b").is_empty());
    }

    #[test]
    fn segments_are_case_sensitive() {
        let mut trie = TopicTrie::new();
        trie.insert("Sensors/+");

        assert!(trie.matches("sensors/t1").is_empty());
        assert_eq!(trie.matches("Sensors/t1"), vec!["Sensors/+".to_string()]);
    }
}
