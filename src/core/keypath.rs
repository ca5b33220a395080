//! Dotted key paths: flattening nested locale trees and setting values by path
//!
//! A flat key such as `greeting.hello` addresses the leaf at
//! `tree["greeting"]["hello"]`. The dot is the only delimiter, so segments
//! may not themselves contain a dot and may not be empty.

use crate::error::{LocaleError, LocaleResult};
use crate::types::{FlatMap, Leaf, LocaleNode, LocaleTree};
use tracing::warn;

pub const KEY_SEPARATOR: char = '.';

/// Flatten a locale tree into `dotted.key → leaf` pairs, depth-first in insertion order.
///
/// Every leaf produces exactly one entry. Empty nested groups produce none.
pub fn flatten(tree: &LocaleTree, prefix: Option<&str>) -> LocaleResult<FlatMap> {
    let mut result = FlatMap::new();
    let prefix = prefix.filter(|p| !p.is_empty());
    flatten_recursive(tree, prefix, &mut result)?;
    Ok(result)
}

fn flatten_recursive(
    tree: &LocaleTree,
    prefix: Option<&str>,
    result: &mut FlatMap,
) -> LocaleResult<()> {
    for (segment, node) in &tree.entries {
        let key = match prefix {
            Some(p) => format!("{}{}{}", p, KEY_SEPARATOR, segment),
            None => segment.clone(),
        };
        validate_segment(segment, &key)?;

        match node {
            LocaleNode::Leaf(leaf) => {
                result.insert(key, leaf.clone());
            }
            LocaleNode::Node(child) => flatten_recursive(child, Some(&key), result)?,
        }
    }
    Ok(())
}

fn validate_segment(segment: &str, key: &str) -> LocaleResult<()> {
    if segment.is_empty() {
        return Err(LocaleError::invalid_key(key, "empty path segment"));
    }
    if segment.contains(KEY_SEPARATOR) {
        return Err(LocaleError::invalid_key(
            key,
            format!("segment '{}' contains a literal '.'", segment),
        ));
    }
    Ok(())
}

/// Split a flat key into its segments, rejecting empty ones (`a..b`, `.a`, `a.`)
pub fn split_key(key: &str) -> LocaleResult<Vec<&str>> {
    if key.is_empty() {
        return Err(LocaleError::invalid_key(key, "key is empty"));
    }
    let segments: Vec<&str> = key.split(KEY_SEPARATOR).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(LocaleError::invalid_key(key, "empty path segment"));
    }
    Ok(segments)
}

/// Set `leaf` at `key`, creating intermediate groups as needed.
///
/// The last write wins: an existing value at the final segment is overwritten, and an
/// intermediate leaf in the way is replaced by a group.
pub fn set_path(tree: &mut LocaleTree, key: &str, leaf: Leaf) -> LocaleResult<()> {
    let segments = split_key(key)?;
    set_recursive(tree, key, &segments, leaf);
    Ok(())
}

fn set_recursive(tree: &mut LocaleTree, key: &str, segments: &[&str], leaf: Leaf) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };

    if rest.is_empty() {
        if let Some(LocaleNode::Node(group)) = tree.entries.get(*head) {
            warn!(
                key,
                dropped = group.leaf_count(),
                "nested group replaced by a plain value"
            );
        }
        tree.entries.insert(head.to_string(), LocaleNode::Leaf(leaf));
        return;
    }

    let entry = tree
        .entries
        .entry(head.to_string())
        .or_insert_with(|| LocaleNode::Node(LocaleTree::new()));

    if let LocaleNode::Leaf(previous) = entry {
        warn!(
            key,
            segment = *head,
            previous = %previous,
            "plain value replaced by a nested group"
        );
        *entry = LocaleNode::Node(LocaleTree::new());
    }

    if let LocaleNode::Node(child) = entry {
        set_recursive(child, key, rest, leaf);
    }
}

/// Rebuild a nested tree from flat pairs
pub fn unflatten(flat: &FlatMap) -> LocaleResult<LocaleTree> {
    flat.iter()
        .try_fold(LocaleTree::new(), |mut tree, (key, leaf)| {
            set_path(&mut tree, key, leaf.clone())?;
            Ok::<_, LocaleError>(tree)
        })
}
