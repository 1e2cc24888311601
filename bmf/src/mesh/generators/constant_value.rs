use crate::mesh::*;

/// Writes the same value into every vertex.
pub struct ConstantValueGenerator {
    value: OwnedVertex,
}

impl ConstantValueGenerator {
    /// All attributes of `value` are generated.
    pub fn new(value: OwnedVertex) -> Self {
        Self { value }
    }
}

impl VertexGenerator for ConstantValueGenerator {
    fn required_attributes(&self) -> Attributes {
        Attributes::empty()
    }

    fn output_attributes(&self, input: Attributes) -> Attributes {
        input | self.value.attributes()
    }
}

impl SingleVertexGenerator for ConstantValueGenerator {
    fn generate(&self, vertex: &mut VertexRefMut<'_>) {
        self.value.copy_attributes_to(vertex);
    }
}
