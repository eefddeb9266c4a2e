use std::mem;

use crate::objects::Vec3;

/// Interleaved vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texture: [f32; 3],
}

/// One attribute of the interleaved layout: shader location, byte offset
/// inside a [`Vertex`] and number of `f32` components.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    pub offset: u32,
    pub components: u32,
}

impl Vertex {
    pub const STRIDE: u32 = mem::size_of::<Vertex>() as u32;

    pub fn new(position: Vec3, normal: Vec3, texture: Vec3) -> Self {
        return Vertex {
            position: position.into(),
            normal: normal.into(),
            texture: texture.into(),
        };
    }

    /// Largest absolute coordinate of the position.
    pub fn extent(&self) -> f32 {
        return self
            .position
            .iter()
            .fold(0.0f32, |max, coordinate| max.max(coordinate.abs()));
    }

    pub fn attributes() -> [VertexAttribute; 3] {
        let position_attribute = VertexAttribute {
            location: 0,
            offset: mem::offset_of!(Vertex, position) as u32,
            components: 3,
        };

        let normal_attribute = VertexAttribute {
            location: 1,
            offset: mem::offset_of!(Vertex, normal) as u32,
            components: 3,
        };

        let texture_attribute = VertexAttribute {
            location: 2,
            offset: mem::offset_of!(Vertex, texture) as u32,
            components: 3,
        };

        return [position_attribute, normal_attribute, texture_attribute];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_tightly_packed() {
        assert_eq!(Vertex::STRIDE, 36);

        let offsets: Vec<u32> = Vertex::attributes().iter().map(|a| a.offset).collect();
        assert_eq!(offsets, [0, 12, 24]);
    }

    #[test]
    fn extent_uses_magnitude() {
        let vertex = Vertex::new(
            Vec3::new(1.0, -4.5, 2.0),
            Vec3::new(0.0, 0.0, 9.0),
            Vec3::new(0.0, 0.0, 0.0),
        );
        assert_eq!(vertex.extent(), 4.5);
        assert_eq!(Vertex::default().extent(), 0.0);
    }
}
