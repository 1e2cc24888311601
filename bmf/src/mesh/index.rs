use std::fmt::Debug;
use std::hash::Hash;

mod private {
    pub trait Sealed {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// Integer type of an index buffer. Implemented for `u16` and `u32` only.
pub trait IndexType: private::Sealed + Copy + Default + Debug + Eq + Ord + Hash + Send + Sync + 'static {
    const BITS: u32;
    const BYTES: u8;
    /// File signature of meshes with this index width.
    const SIGNATURE: &'static str;

    fn to_u32(self) -> u32;

    /// `None` if the value does not fit.
    fn from_u32(value: u32) -> Option<Self>;

    fn write_le(self, out: &mut Vec<u8>);
    fn read_le(bytes: &[u8]) -> Self;

    fn to_usize(self) -> usize {
        self.to_u32() as usize
    }
}

impl IndexType for u16 {
    const BITS: u32 = 16;
    const BYTES: u8 = 2;
    const SIGNATURE: &'static str = "BMF16";

    fn to_u32(self) -> u32 {
        self as u32
    }

    fn from_u32(value: u32) -> Option<Self> {
        u16::try_from(value).ok()
    }

    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Self {
        u16::from_le_bytes([bytes[0], bytes[1]])
    }
}

impl IndexType for u32 {
    const BITS: u32 = 32;
    const BYTES: u8 = 4;
    const SIGNATURE: &'static str = "BMF32";

    fn to_u32(self) -> u32 {
        self
    }

    fn from_u32(value: u32) -> Option<Self> {
        Some(value)
    }

    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Self {
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

/// Converts an index, failing with `Error::IndexOverflow` when it does not fit.
pub(crate) fn convert_index<I: IndexType>(value: u32) -> crate::Result<I> {
    I::from_u32(value).ok_or(crate::Error::IndexOverflow { index: value, bits: I::BITS })
}
