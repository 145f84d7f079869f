use serde::{Deserialize, Serialize};

use orrery_common::Transform;

/// One node of a loaded model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: Option<String>,
    /// Local transform relative to the parent node.
    pub transform: Transform,
    pub children: Vec<usize>,
    pub mesh: Option<usize>,
}

/// The node graph of one loaded model.
///
/// Geometry stays with the renderer; the core only needs names and
/// transforms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSubgraph {
    pub nodes: Vec<SceneNode>,
    /// Indices of the nodes at the top of the active scene.
    pub roots: Vec<usize>,
    pub mesh_count: usize,
}

impl SceneSubgraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, index: usize) -> Option<&SceneNode> {
        self.nodes.get(index)
    }

    /// First node carrying `name`, searched depth-first from the roots.
    pub fn find_by_name(&self, name: &str) -> Option<&SceneNode> {
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        let mut visited = vec![false; self.nodes.len()];
        while let Some(index) = stack.pop() {
            let Some(node) = self.nodes.get(index) else {
                continue;
            };
            if std::mem::replace(&mut visited[index], true) {
                continue;
            }
            if node.name.as_deref() == Some(name) {
                return Some(node);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn node(name: &str, x: f32, children: Vec<usize>) -> SceneNode {
        SceneNode {
            name: Some(name.into()),
            transform: Transform {
                position: Vec3::new(x, 0.0, 0.0),
                ..Transform::default()
            },
            children,
            mesh: None,
        }
    }

    #[test]
    fn finds_nested_node() {
        let graph = SceneSubgraph {
            nodes: vec![
                node("Scene", 0.0, vec![1, 2]),
                node("sun", 0.0, vec![]),
                node("orbit_group", 0.0, vec![3]),
                node("mars_BezierCircle_14", 9.0, vec![]),
            ],
            roots: vec![0],
            mesh_count: 0,
        };
        let mars = graph.find_by_name("mars_BezierCircle_14").unwrap();
        assert_eq!(mars.transform.position.x, 9.0);
        assert!(graph.find_by_name("pluto").is_none());
    }

    #[test]
    fn nodes_outside_active_scene_are_not_found() {
        let graph = SceneSubgraph {
            nodes: vec![node("root", 0.0, vec![]), node("orphan", 1.0, vec![])],
            roots: vec![0],
            mesh_count: 0,
        };
        assert!(graph.find_by_name("orphan").is_none());
    }

    #[test]
    fn cyclic_children_terminate() {
        let graph = SceneSubgraph {
            nodes: vec![node("a", 0.0, vec![1]), node("b", 0.0, vec![0])],
            roots: vec![0],
            mesh_count: 0,
        };
        assert!(graph.find_by_name("c").is_none());
    }
}
