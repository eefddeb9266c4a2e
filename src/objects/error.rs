use std::io;
use std::path::PathBuf;

use crate::objects::FaceIndex;

pub type Result<T> = std::result::Result<T, ObjError>;

#[derive(Debug, thiserror::Error)]
pub enum ObjError {
    #[error("Failed to open {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error while reading object: {0}")]
    Io(#[from] io::Error),

    #[error("Face {face} of group {group} references an attribute out of range: {reference:?}")]
    InvalidIndex {
        group: usize,
        face: usize,
        reference: FaceIndex,
    },
}
