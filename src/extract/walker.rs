//! Pre-order traversal of object nodes in a JSON tree.

use serde_json::{Map, Value};

/// Keys and array indices leading from the root to a node.
pub type JsonPath = Vec<String>;

/// Lazy pre-order iterator over every object node of a JSON value.
///
/// Uses an explicit stack, so nesting depth is bounded only by heap memory.
pub struct ObjectNodes<'a> {
    stack: Vec<(&'a Value, JsonPath)>,
}

/// Iterate every object node under `root` (including `root` itself) together
/// with its path. Array indices appear in the path as decimal strings.
pub fn object_nodes(root: &Value) -> ObjectNodes<'_> {
    ObjectNodes {
        stack: vec![(root, Vec::new())],
    }
}

impl<'a> ObjectNodes<'a> {
    fn push_child(&mut self, parent: &JsonPath, segment: String, child: &'a Value) {
        // Scalars never yield anything
        if !(child.is_object() || child.is_array()) {
            return;
        }
        let mut path = Vec::with_capacity(parent.len() + 1);
        path.extend_from_slice(parent);
        path.push(segment);
        self.stack.push((child, path));
    }
}

impl<'a> Iterator for ObjectNodes<'a> {
    type Item = (&'a Map<String, Value>, JsonPath);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, path)) = self.stack.pop() {
            match node {
                Value::Object(map) => {
                    // Reverse push keeps document order on pop
                    for (key, child) in map.iter().rev() {
                        self.push_child(&path, key.clone(), child);
                    }
                    return Some((map, path));
                }
                Value::Array(items) => {
                    for (idx, child) in items.iter().enumerate().rev() {
                        self.push_child(&path, idx.to_string(), child);
                    }
                }
                _ => {}
            }
        }
        None
    }
}
