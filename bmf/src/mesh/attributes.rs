use bitflags::bitflags;

bitflags! {
    /// Per-vertex attributes. Within a vertex, attributes are laid out in
    /// ascending flag order; every element is an `f32`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Attributes: u32 {
        /// float3
        const POSITION = 1;
        /// float3
        const NORMAL = 1 << 1;
        /// float2
        const TEXCOORD0 = 1 << 2;
        /// float3
        const TANGENT = 1 << 3;
        /// float3
        const BITANGENT = 1 << 4;
        /// float4
        const COLOR = 1 << 5;
        /// float2
        const TEXCOORD1 = 1 << 6;
        /// float2
        const TEXCOORD2 = 1 << 7;
        /// float2
        const TEXCOORD3 = 1 << 8;
        /// float, billboard extent
        const WIDTH = 1 << 9;
        /// float, billboard extent
        const HEIGHT = 1 << 10;
        /// float, billboard extent
        const DEPTH = 1 << 11;
        /// u32 stored bit-for-bit in a float slot
        const MATERIAL = 1 << 12;
    }
}

pub const ATTRIBUTE_COUNT: usize = 13;

const ELEMENT_COUNTS: [usize; ATTRIBUTE_COUNT] = [3, 3, 2, 3, 3, 4, 2, 2, 2, 1, 1, 1, 1];

const STRIDE_TABLE_SIZE: usize = 1 << ATTRIBUTE_COUNT;

// Stride of every possible mask, evaluated at compile time.
static STRIDE_TABLE: [u8; STRIDE_TABLE_SIZE] = build_stride_table();

const fn build_stride_table() -> [u8; STRIDE_TABLE_SIZE] {
    let mut table = [0u8; STRIDE_TABLE_SIZE];
    let mut mask = 0;
    while mask < STRIDE_TABLE_SIZE {
        let mut stride = 0;
        let mut bit = 0;
        while bit < ATTRIBUTE_COUNT {
            if mask & (1 << bit) != 0 {
                stride += ELEMENT_COUNTS[bit];
            }
            bit += 1;
        }
        table[mask] = stride as u8;
        mask += 1;
    }
    table
}

/// Number of floats of the widest possible vertex.
pub const MAX_STRIDE: usize = {
    let mut stride = 0;
    let mut bit = 0;
    while bit < ATTRIBUTE_COUNT {
        stride += ELEMENT_COUNTS[bit];
        bit += 1;
    }
    stride
};

/// Number of floats used by a single attribute. Zero for anything that is not exactly one known flag.
pub const fn element_count(attr: Attributes) -> usize {
    let bits = attr.bits();
    if bits.count_ones() != 1 {
        return 0;
    }
    let bit = bits.trailing_zeros() as usize;
    if bit < ATTRIBUTE_COUNT { ELEMENT_COUNTS[bit] } else { 0 }
}

pub const fn byte_count(attr: Attributes) -> usize {
    element_count(attr) * size_of::<f32>()
}

/// Number of floats of one vertex with the given attributes. Unknown bits are ignored.
pub fn stride(attributes: Attributes) -> usize {
    STRIDE_TABLE[(attributes.bits() & Attributes::all().bits()) as usize] as usize
}

pub fn byte_stride(attributes: Attributes) -> usize {
    stride(attributes) * size_of::<f32>()
}

/// Number of floats in front of `attr` within a vertex with the given attributes.
pub fn element_offset(attributes: Attributes, attr: Attributes) -> usize {
    let lower = attributes.bits() & attr.bits().wrapping_sub(1);
    stride(Attributes::from_bits_retain(lower))
}

pub fn byte_offset(attributes: Attributes, attr: Attributes) -> usize {
    element_offset(attributes, attr) * size_of::<f32>()
}

/// Reinterprets an integer (e.g. a material id) as a float slot value.
pub fn as_float(value: u32) -> f32 {
    bytemuck::cast(value)
}

/// Reads back an integer stored with `as_float`.
pub fn as_int(value: f32) -> u32 {
    bytemuck::cast(value)
}

impl Default for Attributes {
    fn default() -> Self {
        Attributes::empty()
    }
}

impl Attributes {
    pub const BILLBOARD: Attributes =
        Attributes::WIDTH.union(Attributes::HEIGHT).union(Attributes::DEPTH);

    pub fn stride(self) -> usize {
        stride(self)
    }

    pub fn offset_of(self, attr: Attributes) -> usize {
        element_offset(self, attr)
    }

    /// True if no bit outside the known attribute range is set.
    pub fn is_valid(self) -> bool {
        self.bits() & !Attributes::all().bits() == 0
    }

    /// Single flags of this mask in ascending order (layout order).
    pub fn singles(self) -> impl Iterator<Item = Attributes> {
        (0..ATTRIBUTE_COUNT as u32)
            .map(|bit| Attributes::from_bits_retain(1 << bit))
            .filter(move |a| self.contains(*a))
    }

    /// Parses a lowercase or uppercase attribute name such as `texcoord0`.
    pub fn parse_name(name: &str) -> Option<Attributes> {
        Attributes::from_name(&name.trim().to_ascii_uppercase())
    }
}
