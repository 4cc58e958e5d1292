//! Control-plane layer.
//!
//! Owns the routing data model: the topic trie over wildcard filters, the
//! route-table multimap, and the route lifecycle that mutates both as one unit.

pub(crate) mod route_lifecycle;
pub mod route_table;
pub mod topic_trie;
