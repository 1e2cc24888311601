use crate::mesh::Attributes;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid file signature: expected {expected:?}, found {found:?}")]
    InvalidSignature { expected: &'static str, found: String },

    #[error("invalid file version: expected {expected}, found {found}")]
    InvalidVersion { expected: u32, found: u32 },

    #[error("index width mismatch: expected {expected} bytes, found {found} bytes")]
    IndexWidthMismatch { expected: u8, found: u8 },

    #[error("invalid end of file signature")]
    InvalidEndOfFile,

    #[error("attributes of all meshes must be the same: {expected:?} vs {found:?}")]
    AttributeMismatch { expected: Attributes, found: Attributes },

    #[error("no matching generator found to convert {from:?} to {to:?}")]
    NoMatchingGenerator { from: Attributes, to: Attributes },

    #[error("vertex generator produced invalid output: {0}")]
    InvalidGeneratorOutput(&'static str),

    #[error("{operation} only works if a single shape is present in the mesh (found {count})")]
    ExpectedSingleShape { operation: &'static str, count: usize },

    #[error("vertex {vertex} has a non-finite position")]
    NonFinitePosition { vertex: usize },

    #[error("positions are required to calculate bounding volumes")]
    MissingPosition,

    #[error("index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("index {index} does not fit into a {bits}-bit index buffer")]
    IndexOverflow { index: u32, bits: u32 },

    #[error("no triangle left whose indices fit into 16 bits")]
    IndexPartition,

    #[error("{reason}{}", shape_suffix(.shape))]
    Verify { reason: &'static str, shape: Option<usize> },
}

impl Error {
    pub(crate) fn verify(reason: &'static str) -> Self {
        Error::Verify { reason, shape: None }
    }
}

fn shape_suffix(shape: &Option<usize>) -> String {
    match shape {
        Some(shape) => format!(" for shape {}", shape),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_message_names_the_shape() {
        let err = Error::Verify { reason: "shape zero index count", shape: Some(3) };
        assert_eq!(err.to_string(), "shape zero index count for shape 3");
        assert_eq!(Error::verify("no shapes").to_string(), "no shapes");
    }
}
