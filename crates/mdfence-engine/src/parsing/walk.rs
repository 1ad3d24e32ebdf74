use super::node::Node;

/// Pre-order, document-order iterator over a node tree.
///
/// Driven by an explicit stack so deeply nested documents cannot blow the
/// call stack. Holds no state beyond the tree borrow: walking the same tree
/// again yields the same sequence.
pub struct Nodes<'a> {
    stack: Vec<&'a Node>,
}

pub fn walk(root: &Node) -> Nodes<'_> {
    Nodes { stack: vec![root] }
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
