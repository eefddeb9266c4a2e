use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use cgmath::Vector3;

use crate::mesh::{build_render_mesh, RenderMesh};
use crate::objects::error::{ObjError, Result};
use crate::objects::lexer::{Keyword, Lexer, Line};
use crate::objects::validate::find_invalid_reference;

pub type Vec3 = Vector3<f32>;

const SEPARATOR: char = '/';

/// The attribute references of one polygon corner.
///
/// References are 1-based into the object's lists; `0` means the attribute
/// was not given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FaceIndex {
    pub vertex: i32,
    pub texture: i32,
    pub normal: i32,
}

impl FaceIndex {
    pub fn new(vertex: i32, texture: i32, normal: i32) -> Self {
        return FaceIndex {
            vertex,
            texture,
            normal,
        };
    }

    /// Zero-based position slot, if the reference is set.
    pub fn position(&self) -> Option<usize> {
        return slot(self.vertex);
    }

    pub fn texture(&self) -> Option<usize> {
        return slot(self.texture);
    }

    pub fn normal(&self) -> Option<usize> {
        return slot(self.normal);
    }
}

fn slot(reference: i32) -> Option<usize> {
    if reference > 0 {
        return Some(reference as usize - 1);
    }

    return None;
}

pub type Face = Vec<FaceIndex>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub name: String,
    pub faces: Vec<Face>,
    /// Corner count of the most recently added face.
    ///
    /// Faces of one group are not checked against each other, so a group
    /// mixing triangles and quads reports whichever came last.
    pub arity: usize,
}

impl Group {
    pub fn new() -> Self {
        return Group::default();
    }

    pub fn named(name: &str) -> Self {
        return Group {
            name: name.to_string(),
            ..Group::default()
        };
    }

    pub fn push(&mut self, face: Face) {
        self.arity = face.len();
        self.faces.push(face);
    }

    pub fn face_count(&self) -> usize {
        return self.faces.len();
    }

    pub fn arity(&self) -> usize {
        return self.arity;
    }

    pub fn is_empty(&self) -> bool {
        return self.faces.is_empty();
    }
}

/// A parsed object file: flat attribute lists and the face groups indexing
/// into them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    pub vertices: Vec<Vec3>,
    pub textures: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub groups: Vec<Group>,
}

impl Object {
    pub fn new() -> Self {
        return Object::default();
    }

    pub fn is_empty(&self) -> bool {
        return self.vertices.is_empty()
            && self.textures.is_empty()
            && self.normals.is_empty()
            && self.groups.is_empty();
    }

    /// Open and parse the object file at `path`.
    ///
    /// # Errors
    /// [`ObjError::Open`] when the file cannot be opened, [`ObjError::Io`]
    /// when reading it fails part way.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Object> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ObjError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Parsing {}", path.display());

        return Object::from_reader(BufReader::new(file));
    }

    pub fn parse_str(text: &str) -> Object {
        // Reading from memory cannot fail.
        return Object::from_reader(Cursor::new(text)).unwrap_or_default();
    }

    /// Parse an object from an open stream.
    ///
    /// Malformed or unknown lines never fail the load; they are skipped, and
    /// missing or unreadable coordinates become `0.0`.
    ///
    /// # Panics
    /// When a face corner carries a normal slot (`i/j/k`) whose normal
    /// reference is not a positive integer.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Object> {
        let mut lexer = Lexer::new(reader);
        let mut object = Object::new();

        while let Some(line) = lexer.next_line()? {
            object.apply(&line);
        }

        log::info!(
            "Parsed object: {} vertices, {} texture coordinates, {} normals, {} groups",
            object.vertices.len(),
            object.textures.len(),
            object.normals.len(),
            object.groups.len()
        );

        return Ok(object);
    }

    fn apply(&mut self, line: &Line) {
        let arguments = line.arguments();

        match line.keyword() {
            Some(Keyword::Vertice) => {
                self.vertices.push(parse_vec3(arguments, line.row));
            }

            Some(Keyword::Texture) => {
                self.textures.push(parse_vec3(arguments, line.row));
            }

            Some(Keyword::Normal) => {
                self.normals.push(parse_vec3(arguments, line.row));
            }

            Some(Keyword::Group) => {
                self.groups.push(Group::named(&arguments.join(" ")));
            }

            Some(Keyword::Face) => {
                let face = parse_face(arguments, line.row);

                if self.groups.is_empty() {
                    self.groups.push(Group::new());
                }

                if let Some(group) = self.groups.last_mut() {
                    group.push(face);
                }
            }

            Some(Keyword::Identifier(name)) => {
                log::debug!("Line {}: ignoring unsupported keyword {:?}", line.row, name);
            }

            None => {}
        }
    }

    /// Build a fresh render mesh from this object.
    ///
    /// # Panics
    /// See [`build_render_mesh`].
    pub fn render_mesh(&self, split_into_triangles: bool) -> RenderMesh {
        return build_render_mesh(self, split_into_triangles);
    }

    /// Validate, then build a render mesh.
    ///
    /// # Errors
    /// [`ObjError::InvalidIndex`] naming the first reference outside the
    /// parsed attribute lists.
    pub fn try_render_mesh(&self, split_into_triangles: bool) -> Result<RenderMesh> {
        if let Some(invalid) = find_invalid_reference(self) {
            log::warn!(
                "Object failed validation at group {}, face {}: {:?}",
                invalid.group,
                invalid.face,
                invalid.reference
            );
            return Err(invalid.into());
        }

        return Ok(build_render_mesh(self, split_into_triangles));
    }
}

pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Object> {
    return Object::parse(path);
}

pub fn load_from_stream<R: BufRead>(reader: R) -> Result<Object> {
    return Object::from_reader(reader);
}

fn parse_vec3(arguments: &[String], row: usize) -> Vec3 {
    let mut coordinates = [0.0f32; 3];

    for (coordinate, token) in coordinates.iter_mut().zip(arguments) {
        match token.parse::<f32>() {
            Ok(n) => *coordinate = n,
            Err(e) => {
                log::debug!("Line {}: bad coordinate {:?} ({}), using 0", row, token, e);
            }
        }
    }

    return Vec3::from(coordinates);
}

fn parse_face(arguments: &[String], row: usize) -> Face {
    let mut face = Face::with_capacity(arguments.len());

    for token in arguments {
        match parse_face_index(token) {
            Some(index) => face.push(index),
            None => {
                log::debug!("Line {}: dropping face corner {:?}", row, token);
            }
        }
    }

    return face;
}

/// Parse an `i`, `i/j`, `i//k` or `i/j/k` corner.
///
/// A corner whose position reference is not positive yields `None`. A
/// non-positive texture reference is left unset.
fn parse_face_index(token: &str) -> Option<FaceIndex> {
    let (vertex, mut rest) = leading_integer(token);

    if vertex <= 0 {
        return None;
    }

    let mut index = FaceIndex::new(vertex, 0, 0);

    if let Some(after) = rest.strip_prefix(SEPARATOR) {
        let (texture, after) = leading_integer(after);
        if texture > 0 {
            index.texture = texture;
        }
        rest = after;

        if let Some(after) = rest.strip_prefix(SEPARATOR) {
            let (normal, _) = leading_integer(after);
            assert!(
                normal > 0,
                "face corner {:?} has a non-positive normal reference",
                token
            );
            index.normal = normal;
        }
    }

    return Some(index);
}

/// Read an optionally signed decimal integer from the front of `text`.
///
/// Returns `0` and the untouched input when no digits are found. Values
/// beyond `i32` saturate.
fn leading_integer(text: &str) -> (i32, &str) {
    let unsigned = text.strip_prefix(&['+', '-'][..]).unwrap_or(text);
    let negative = text.starts_with('-');

    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    if digits == 0 {
        return (0, text);
    }

    let magnitude = unsigned[..digits].parse::<i32>().unwrap_or(i32::MAX);
    let value = if negative { -magnitude } else { magnitude };

    return (value, &unsigned[digits..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_forms() {
        assert_eq!(parse_face_index("7"), Some(FaceIndex::new(7, 0, 0)));
        assert_eq!(parse_face_index("7/3"), Some(FaceIndex::new(7, 3, 0)));
        assert_eq!(parse_face_index("7//2"), Some(FaceIndex::new(7, 0, 2)));
        assert_eq!(parse_face_index("7/3/2"), Some(FaceIndex::new(7, 3, 2)));
        assert_eq!(parse_face_index("7/0/2"), Some(FaceIndex::new(7, 0, 2)));
        assert_eq!(parse_face_index("7/-1"), Some(FaceIndex::new(7, 0, 0)));
    }

    #[test]
    fn non_positive_positions_are_dropped() {
        assert_eq!(parse_face_index("0"), None);
        assert_eq!(parse_face_index("-1/2/3"), None);
        assert_eq!(parse_face_index("x/2/3"), None);
        assert_eq!(parse_face_index("/2/3"), None);
    }

    #[test]
    #[should_panic(expected = "non-positive normal reference")]
    fn zero_normal_after_slash_panics() {
        parse_face_index("1/2/0");
    }

    #[test]
    #[should_panic(expected = "non-positive normal reference")]
    fn missing_normal_after_slash_panics() {
        parse_face_index("1/2/");
    }

    #[test]
    fn leading_integers() {
        assert_eq!(leading_integer("42/1"), (42, "/1"));
        assert_eq!(leading_integer("-3"), (-3, ""));
        assert_eq!(leading_integer("+5x"), (5, "x"));
        assert_eq!(leading_integer("/7"), (0, "/7"));
        assert_eq!(leading_integer("99999999999"), (i32::MAX, ""));
    }

    #[test]
    fn coordinates_default_to_zero() {
        let object = Object::parse_str("v 1.5\nvt 0.25 0.75\nvn 0 oops 1\nv");

        assert_eq!(object.vertices, vec![Vec3::new(1.5, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0)]);
        assert_eq!(object.textures, vec![Vec3::new(0.25, 0.75, 0.0)]);
        assert_eq!(object.normals, vec![Vec3::new(0.0, 0.0, 1.0)]);
    }

    #[test]
    fn extra_coordinates_are_ignored() {
        let object = Object::parse_str("v 1 2 3 4");
        assert_eq!(object.vertices, vec![Vec3::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn group_names_join_tokens() {
        let object = Object::parse_str("g Ducky  Body\tBill\ng\ng Ducky Body Bill\n");

        let names: Vec<&str> = object.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Ducky Body Bill", "", "Ducky Body Bill"]);
        assert!(object.groups.iter().all(Group::is_empty));
    }

    #[test]
    fn faces_open_an_unnamed_group() {
        let object = Object::parse_str("f 1/1/1 2/2/1 3/3/1\nf 3/3/1 2/2/1 4/4/1\n");

        assert_eq!(object.groups.len(), 1);
        assert!(object.groups[0].name.is_empty());
        assert_eq!(object.groups[0].face_count(), 2);
        assert_eq!(object.groups[0].arity(), 3);
        assert_eq!(object.groups[0].faces[1][2], FaceIndex::new(4, 4, 1));
    }

    #[test]
    fn faces_join_the_latest_group() {
        let object = Object::parse_str("g a\nf 1 2 3\ng b\nf 1 2 3 4\ng a\n");

        assert_eq!(object.groups.len(), 3);
        assert_eq!(object.groups[0].face_count(), 1);
        assert_eq!(object.groups[1].face_count(), 1);
        assert_eq!(object.groups[1].arity(), 4);
        assert!(object.groups[2].is_empty());
    }

    #[test]
    fn arity_follows_the_last_face() {
        let object = Object::parse_str("f 1 2 3 4\nf 1 2 3\n");
        assert_eq!(object.groups[0].arity(), 3);

        let object = Object::parse_str("f 1 2 3\nf 1 2 3 4\n");
        assert_eq!(object.groups[0].arity(), 4);
    }

    #[test]
    fn dropped_corners_shrink_the_face() {
        let object = Object::parse_str("f 1 0 2 -3 3\n");
        assert_eq!(
            object.groups[0].faces[0],
            vec![FaceIndex::new(1, 0, 0), FaceIndex::new(2, 0, 0), FaceIndex::new(3, 0, 0)]
        );
    }

    #[test]
    fn unknown_keywords_are_ignored() {
        let object = Object::parse_str("mtllib cube.mtl\nusemtl red\ns off\no thing\nv 1 2 3\n");

        assert_eq!(object.vertices.len(), 1);
        assert!(object.groups.is_empty());
    }

    #[test]
    fn comments_only_is_empty() {
        let object = Object::parse_str("#line1 \n #line2 \n #line3 \n #line3 \n #line4 \n #line5");
        assert!(object.is_empty());
    }

    #[test]
    fn empty_stream_is_empty() {
        assert!(Object::parse_str("").is_empty());
    }

    #[test]
    fn missing_file_fails() {
        let result = Object::parse("does/not/exist.obj");
        assert!(matches!(result, Err(ObjError::Open { .. })));
    }
}
