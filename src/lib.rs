//! Load Wavefront-style `.obj` text into an in-memory object, and turn that
//! object into deduplicated, interleaved vertex and index buffers grouped
//! into draw commands.

pub mod mesh;
pub mod objects;

pub use mesh::{build_render_mesh, DrawCommand, Primitive, RenderMesh, Vertex, VertexAttribute};
pub use objects::{
    find_invalid_reference, load_from_path, load_from_stream, validate, Face, FaceIndex, Group,
    InvalidReference, ObjError, Object, Result, Vec3,
};
