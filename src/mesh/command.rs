use std::ops::Range;

/// How a draw command's index run is assembled into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Every three indices form a triangle.
    Triangles,
    /// The run is one polygon drawn as a fan around its first index.
    Fan,
}

/// One group's contiguous run of the index list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    pub primitive: Primitive,
    pub start: u32,
    pub count: u32,
}

impl DrawCommand {
    pub fn new(primitive: Primitive, start: u32, count: u32) -> Self {
        return DrawCommand {
            primitive,
            start,
            count,
        };
    }

    /// First index past the end of this command.
    pub fn end(&self) -> u32 {
        return self.start + self.count;
    }

    pub fn range(&self) -> Range<usize> {
        return self.start as usize..self.end() as usize;
    }

    pub fn is_empty(&self) -> bool {
        return self.count == 0;
    }
}
