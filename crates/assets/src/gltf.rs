//! glTF 2.0 node-graph import.
//!
//! Reads `.gltf` JSON documents and the JSON chunk of `.glb` containers.
//! Only the node hierarchy, names and transforms are kept; buffers,
//! accessors and materials are left to the renderer.

use glam::{Mat4, Quat, Vec3};
use serde::Deserialize;

use orrery_common::Transform;

use crate::subgraph::{SceneNode, SceneSubgraph};
use crate::AssetError;

const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;
const CHUNK_JSON: u32 = 0x4E4F_534A;

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    scene: Option<usize>,
    #[serde(default)]
    scenes: Vec<Scene>,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    meshes: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Scene {
    #[serde(default)]
    nodes: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct Node {
    name: Option<String>,
    #[serde(default)]
    children: Vec<usize>,
    mesh: Option<usize>,
    matrix: Option<[f32; 16]>,
    translation: Option<[f32; 3]>,
    rotation: Option<[f32; 4]>,
    scale: Option<[f32; 3]>,
}

impl Node {
    fn transform(&self) -> Transform {
        if let Some(m) = self.matrix {
            let (scale, rotation, position) = Mat4::from_cols_array(&m).to_scale_rotation_translation();
            return Transform {
                position,
                rotation,
                scale,
            };
        }
        Transform {
            position: self.translation.map(Vec3::from_array).unwrap_or(Vec3::ZERO),
            rotation: self
                .rotation
                .map(|q| Quat::from_array(q).normalize())
                .unwrap_or(Quat::IDENTITY),
            scale: self.scale.map(Vec3::from_array).unwrap_or(Vec3::ONE),
        }
    }
}

/// Parse either a binary `.glb` container or a `.gltf` JSON document.
pub fn parse(bytes: &[u8]) -> Result<SceneSubgraph, AssetError> {
    if bytes.starts_with(GLB_MAGIC) {
        parse_json(glb_json_chunk(bytes)?)
    } else {
        parse_json(bytes)
    }
}

/// Parse a `.gltf` JSON document.
pub fn parse_json(json: &[u8]) -> Result<SceneSubgraph, AssetError> {
    let doc: Document = serde_json::from_slice(json)?;

    for (i, node) in doc.nodes.iter().enumerate() {
        if let Some(&child) = node.children.iter().find(|&&c| c >= doc.nodes.len()) {
            return Err(AssetError::Gltf(format!(
                "node {i} references missing child {child}"
            )));
        }
    }

    let roots = match doc.scenes.get(doc.scene.unwrap_or(0)) {
        Some(scene) => scene.nodes.clone(),
        None => parentless(&doc.nodes),
    };
    if let Some(&bad) = roots.iter().find(|&&r| r >= doc.nodes.len()) {
        return Err(AssetError::Gltf(format!("scene references missing node {bad}")));
    }

    let nodes = doc
        .nodes
        .iter()
        .map(|n| SceneNode {
            name: n.name.clone(),
            transform: n.transform(),
            children: n.children.clone(),
            mesh: n.mesh,
        })
        .collect();

    Ok(SceneSubgraph {
        nodes,
        roots,
        mesh_count: doc.meshes.len(),
    })
}

/// Nodes that nobody lists as a child, for documents without scenes.
fn parentless(nodes: &[Node]) -> Vec<usize> {
    let mut has_parent = vec![false; nodes.len()];
    for node in nodes {
        for &c in &node.children {
            if let Some(flag) = has_parent.get_mut(c) {
                *flag = true;
            }
        }
    }
    (0..nodes.len()).filter(|&i| !has_parent[i]).collect()
}

/// Slice out the JSON chunk of a GLB container.
fn glb_json_chunk(bytes: &[u8]) -> Result<&[u8], AssetError> {
    let word = |at: usize| -> Result<u32, AssetError> {
        bytes
            .get(at..at + 4)
            .and_then(|b| b.try_into().ok())
            .map(u32::from_le_bytes)
            .ok_or_else(|| AssetError::Glb(format!("truncated at byte {at}")))
    };

    let version = word(4)?;
    if version != 2 {
        return Err(AssetError::Glb(format!("unsupported container version {version}")));
    }
    let total = word(8)? as usize;
    if total > bytes.len() {
        return Err(AssetError::Glb(format!(
            "declared length {total} exceeds {} available bytes",
            bytes.len()
        )));
    }

    let chunk_len = word(GLB_HEADER_LEN)? as usize;
    let chunk_type = word(GLB_HEADER_LEN + 4)?;
    if chunk_type != CHUNK_JSON {
        return Err(AssetError::Glb(format!(
            "first chunk has type {chunk_type:#x}, expected JSON"
        )));
    }
    let start = GLB_HEADER_LEN + CHUNK_HEADER_LEN;
    bytes
        .get(start..start + chunk_len)
        .ok_or_else(|| AssetError::Glb("JSON chunk runs past end of file".into()))
}
