//! Effective style resolution.
//!
//! A node's effective styles are its parent's effective styles plus its own
//! tokens, minus anything its own tokens negate:
//!
//! - `-name` removes `name` (and `-name` itself), whether it was inherited or
//!   listed locally on the same node.
//! - `-*` drops everything inherited from the ancestors.
//! - A `hyperlink` node never inherits, so link text is not colored by its
//!   surroundings. Its own tokens, `hyperlink` included, still apply and are
//!   passed on to its children.

use std::collections::BTreeSet;

use crate::tree::{NodeId, NodeRef, StyledText};
use crate::INHERIT_NONE;

impl StyledText {
    /// Effective style set of the node with the given id.
    ///
    /// Returns an empty set for an id that does not belong to this tree.
    pub fn effective_styles(&self, id: NodeId) -> BTreeSet<String> {
        self.get(id)
            .map(|node| node.effective_styles())
            .unwrap_or_default()
    }
}

impl NodeRef<'_> {
    /// True if this node starts from an empty set instead of its parent's styles.
    pub fn blocks_inheritance(&self) -> bool {
        self.is_hyperlink() || self.styles().iter().any(|s| s == INHERIT_NONE)
    }

    /// Computes this node's effective style set.
    ///
    /// Leaves carry no tokens of their own, so a leaf resolves to the same set
    /// as the styled node that contains it.
    pub fn effective_styles(&self) -> BTreeSet<String> {
        // Collect the ancestry up to the nearest inheritance barrier, then fold
        // from the outermost contributor down.
        let mut chain = vec![*self];
        let mut node = *self;
        while !node.blocks_inheritance() {
            match node.parent() {
                Some(parent) => {
                    chain.push(parent);
                    node = parent;
                }
                None => break,
            }
        }

        let mut styles = BTreeSet::new();
        for node in chain.iter().rev() {
            apply_own_tokens(&mut styles, node.styles());
        }
        styles
    }
}

/// Adds a node's tokens to `styles`, then removes everything they negate.
fn apply_own_tokens(styles: &mut BTreeSet<String>, own: &[String]) {
    styles.extend(own.iter().cloned());
    for token in own {
        if let Some(negated) = token.strip_prefix('-') {
            styles.remove(token.as_str());
            styles.remove(negated);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use std::collections::BTreeSet;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Effective styles of the first leaf, which shares its container's styles.
    fn leaf_styles(input: &str) -> BTreeSet<String> {
        let tree = parse(input).unwrap();
        let leaf = tree.leaves().next().unwrap();
        leaf.effective_styles()
    }

    #[test]
    fn root_has_no_styles() {
        let tree = parse("plain").unwrap();
        assert!(tree.root().effective_styles().is_empty());
    }

    #[test]
    fn nested_styles_accumulate() {
        assert_eq!(
            leaf_styles("<+bt bold><+bt red>X<-bt><-bt>"),
            set(&["bold", "red"])
        );
    }

    #[test]
    fn negation_removes_inherited_style() {
        assert_eq!(leaf_styles("<+bt bold red><+bt -red>X<-bt><-bt>"), set(&["bold"]));
    }

    #[test]
    fn negation_overrides_local_positive() {
        assert_eq!(leaf_styles("<+bt red -red bold>X<-bt>"), set(&["bold"]));
    }

    #[test]
    fn inherit_none_drops_ancestors() {
        assert_eq!(
            leaf_styles("<+bt bold red><+bt -* italic>X<-bt><-bt>"),
            set(&["italic"])
        );
    }

    #[test]
    fn inherit_none_does_not_leak_to_set() {
        let styles = leaf_styles("<+bt bold><+bt -*>X<-bt><-bt>");
        assert!(styles.is_empty());
    }

    #[test]
    fn hyperlink_blocks_ancestors_but_keeps_itself() {
        let tree = parse("<+bt bold><+bt hyperlink blue><+bt underline>X<-bt><-bt><-bt>").unwrap();
        let link = tree
            .nodes()
            .find(|n| n.is_hyperlink())
            .expect("hyperlink node");
        assert_eq!(link.effective_styles(), set(&["blue", "hyperlink"]));

        let child = link.children().next().unwrap();
        assert_eq!(
            child.effective_styles(),
            set(&["blue", "hyperlink", "underline"])
        );
        assert!(!child.effective_styles().contains("bold"));
    }

    #[test]
    fn siblings_do_not_affect_each_other() {
        let tree = parse("<+bt bold>a<-bt><+bt red>b<-bt>").unwrap();
        let styles: Vec<_> = tree.leaves().map(|l| l.effective_styles()).collect();
        assert_eq!(styles, vec![set(&["bold"]), set(&["red"])]);
    }

    #[test]
    fn lookup_by_id_matches_handle() {
        let tree = parse("<+bt bold>a<-bt>").unwrap();
        let leaf = tree.leaves().next().unwrap();
        assert_eq!(tree.effective_styles(leaf.id()), leaf.effective_styles());
    }
}
