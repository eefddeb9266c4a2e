use std::collections::hash_map::Entry;
use std::collections::HashMap;

use cgmath::Zero;

use crate::mesh::{DrawCommand, Primitive, Vertex};
use crate::objects::{FaceIndex, Object, Vec3};

/// Deduplicated vertex and index buffers plus the draw commands over them.
///
/// Built once from an [`Object`] and independent of it afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub commands: Vec<DrawCommand>,
    /// Largest absolute position coordinate among `vertices`; `0` when empty.
    pub scale: f32,
}

impl RenderMesh {
    pub fn new() -> Self {
        return RenderMesh::default();
    }

    pub fn is_empty(&self) -> bool {
        return self.vertices.is_empty() && self.indices.is_empty();
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        return bytemuck::cast_slice(&self.vertices);
    }

    pub fn index_bytes(&self) -> &[u8] {
        return bytemuck::cast_slice(&self.indices);
    }

    /// The part of the index list drawn by `command`.
    ///
    /// # Panics
    /// If `command` does not lie within this mesh's index list.
    pub fn command_indices(&self, command: &DrawCommand) -> &[u32] {
        return &self.indices[command.range()];
    }
}

fn attribute(list: &[Vec3], slot: Option<usize>, kind: &str, reference: &FaceIndex) -> Vec3 {
    let Some(slot) = slot else {
        return Vec3::zero();
    };

    return list.get(slot).copied().unwrap_or_else(|| {
        panic!(
            "{} reference of {:?} is out of range ({} parsed)",
            kind,
            reference,
            list.len()
        )
    });
}

fn resolve(object: &Object, reference: &FaceIndex) -> Vertex {
    assert!(
        reference.position().is_some(),
        "face corner {:?} has no position reference",
        reference
    );

    let position = attribute(&object.vertices, reference.position(), "position", reference);
    let normal = attribute(&object.normals, reference.normal(), "normal", reference);
    let texture = attribute(&object.textures, reference.texture(), "texture", reference);

    return Vertex::new(position, normal, texture);
}

/// Convert an object into render buffers in a single pass.
///
/// Equal [`FaceIndex`] corners share one vertex across the whole object.
/// Every group yields one [`DrawCommand`], empty groups included. With
/// `split_into_triangles`, each face of `k` corners becomes `k - 2` fan
/// triangles (`1 2 3 4` gives `1 2 3` and `1 3 4`) and every command is
/// [`Primitive::Triangles`]. Otherwise faces keep their corners and a group
/// whose last face is not a triangle is drawn as [`Primitive::Fan`].
///
/// # Panics
/// If a face references an attribute beyond the parsed lists, which is
/// exactly when [`validate`](crate::objects::validate) returns `false`.
pub fn build_render_mesh(object: &Object, split_into_triangles: bool) -> RenderMesh {
    let mut mesh = RenderMesh::new();
    let mut slots: HashMap<FaceIndex, u32> = HashMap::new();

    for group in &object.groups {
        let start = mesh.indices.len() as u32;
        let primitive = if split_into_triangles || group.arity == 3 {
            Primitive::Triangles
        } else {
            Primitive::Fan
        };

        for face in &group.faces {
            for (corner, reference) in face.iter().enumerate() {
                if split_into_triangles && corner >= 3 {
                    // 1 2 3 4 -> (1 2 3) (1 3 4)
                    let len = mesh.indices.len();
                    let first = mesh.indices[len - 3];
                    let last = mesh.indices[len - 1];

                    mesh.indices.push(first);
                    mesh.indices.push(last);
                }

                let slot = match slots.entry(*reference) {
                    Entry::Occupied(entry) => *entry.get(),
                    Entry::Vacant(entry) => {
                        let vertex = resolve(object, reference);
                        let slot = mesh.vertices.len() as u32;

                        mesh.scale = mesh.scale.max(vertex.extent());
                        mesh.vertices.push(vertex);

                        *entry.insert(slot)
                    }
                };

                mesh.indices.push(slot);
            }
        }

        let count = mesh.indices.len() as u32 - start;
        mesh.commands.push(DrawCommand::new(primitive, start, count));
    }

    log::info!(
        "Built render mesh: {} vertices, {} indices, {} commands, scale {}",
        mesh.vertices.len(),
        mesh.indices.len(),
        mesh.commands.len(),
        mesh.scale
    );

    return mesh;
}
