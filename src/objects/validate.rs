use crate::objects::error::ObjError;
use crate::objects::object::{FaceIndex, Object};

/// Location of a face corner referencing past the end of an attribute list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidReference {
    pub group: usize,
    pub face: usize,
    pub reference: FaceIndex,
}

impl From<InvalidReference> for ObjError {
    fn from(invalid: InvalidReference) -> Self {
        return ObjError::InvalidIndex {
            group: invalid.group,
            face: invalid.face,
            reference: invalid.reference,
        };
    }
}

fn in_range(reference: i32, len: usize) -> bool {
    return reference.unsigned_abs() as usize <= len;
}

/// Find the first corner, in group then face order, whose position, texture
/// or normal reference exceeds the matching list. Unset (`0`) references
/// always pass.
pub fn find_invalid_reference(object: &Object) -> Option<InvalidReference> {
    for (g, group) in object.groups.iter().enumerate() {
        for (f, face) in group.faces.iter().enumerate() {
            let bad = face.iter().find(|reference| {
                !in_range(reference.vertex, object.vertices.len())
                    || !in_range(reference.texture, object.textures.len())
                    || !in_range(reference.normal, object.normals.len())
            });

            if let Some(reference) = bad {
                return Some(InvalidReference {
                    group: g,
                    face: f,
                    reference: *reference,
                });
            }
        }
    }

    return None;
}

/// Whether every face reference stays within the parsed attribute lists.
pub fn validate(object: &Object) -> bool {
    return find_invalid_reference(object).is_none();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::Vec3;

    #[test]
    fn faces_without_attributes_are_invalid() {
        let object = Object::parse_str("f 1/1/1 2/2/1 3/3/1\nf 3/3/1 2/2/1 4/4/1\n");

        assert!(!validate(&object));
        assert_eq!(
            find_invalid_reference(&object),
            Some(InvalidReference {
                group: 0,
                face: 0,
                reference: FaceIndex::new(1, 1, 1),
            })
        );
    }

    #[test]
    fn no_faces_is_valid() {
        assert!(validate(&Object::new()));
        assert!(validate(&Object::parse_str("v 1 2 3\ng empty\n")));
    }

    #[test]
    fn unset_references_pass() {
        let object = Object::parse_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert!(validate(&object));
    }

    #[test]
    fn reports_first_offender() {
        let object = Object::parse_str(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\n\
             g good\nf 1/1/1 2/1/1 3/1/1\n\
             g bad\nf 1 2 3\nf 1/2 2 3\nf 1//2 2 3\n",
        );

        let invalid = find_invalid_reference(&object).unwrap();
        assert_eq!(invalid.group, 1);
        assert_eq!(invalid.face, 1);
        assert_eq!(invalid.reference, FaceIndex::new(1, 2, 0));
    }

    #[test]
    fn negative_references_use_magnitude() {
        let mut object = Object::parse_str("v 0 0 0\nv 1 0 0\nf 1 2\n");
        object.groups[0].faces[0][0].normal = -1;
        assert!(!validate(&object));

        object.normals.push(Vec3::new(0.0, 0.0, 1.0));
        assert!(validate(&object));
    }
}
