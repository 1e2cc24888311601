use super::attributes::Attributes;
use super::triangle::Triangle;
use super::vertex::{OwnedVertex, VertexRefMut};
use crate::{Error, Result};
use log::trace;

/// Produces attributes that a mesh does not have yet.
pub trait VertexGenerator: Send + Sync {
    /// Attributes that must be present before the generator can run.
    fn required_attributes(&self) -> Attributes;

    /// Attributes of the generated vertices when fed vertices with `input`.
    fn output_attributes(&self, input: Attributes) -> Attributes;
}

/// Fills new attributes of each vertex on its own. Vertex count and topology stay the same.
pub trait SingleVertexGenerator: VertexGenerator {
    /// `vertex` already has the output layout, with all previously present attributes copied in.
    fn generate(&self, vertex: &mut VertexRefMut<'_>);
}

/// Generates vertices from the triangle neighborhood of one input vertex.
pub trait MultiVertexGenerator: VertexGenerator {
    /// `triangles` are all triangles referencing the input vertex, rotated so
    /// that it is vertex 0 of each. Emits at least one vertex into
    /// `out_vertices` and, unless exactly one vertex was emitted, one index
    /// into `out_vertices` per triangle.
    fn generate(&self, triangles: &[Triangle<'_>], out_vertices: &mut Vec<OwnedVertex>, out_indices: &mut Vec<u32>);
}

pub enum Generator {
    Single(Box<dyn SingleVertexGenerator>),
    Multi(Box<dyn MultiVertexGenerator>),
}

impl Generator {
    pub fn single<G: SingleVertexGenerator + 'static>(generator: G) -> Self {
        Generator::Single(Box::new(generator))
    }

    pub fn multi<G: MultiVertexGenerator + 'static>(generator: G) -> Self {
        Generator::Multi(Box::new(generator))
    }

    pub fn required_attributes(&self) -> Attributes {
        match self {
            Generator::Single(g) => g.required_attributes(),
            Generator::Multi(g) => g.required_attributes(),
        }
    }

    pub fn output_attributes(&self, input: Attributes) -> Attributes {
        match self {
            Generator::Single(g) => g.output_attributes(input),
            Generator::Multi(g) => g.output_attributes(input),
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Generator::Single(_))
    }

    /// True if the generator can run on `current` and brings it closer to `target`.
    pub fn advances(&self, current: Attributes, target: Attributes) -> bool {
        if !current.contains(self.required_attributes()) {
            return false;
        }
        let present = current & target;
        let produced = self.output_attributes(current) & target;
        produced.contains(present) && produced != present
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_single() { "Single" } else { "Multi" };
        f.debug_struct(kind)
            .field("required", &self.required_attributes())
            .field("output", &self.output_attributes(Attributes::empty()))
            .finish()
    }
}

/// First generator in list order that advances `current` towards `target`.
pub(crate) fn select_generator(
    generators: &[Generator],
    current: Attributes,
    target: Attributes,
    allow_multi: bool,
) -> Result<&Generator> {
    let found = generators
        .iter()
        .filter(|g| allow_multi || g.is_single())
        .find(|g| g.advances(current, target));

    match found {
        Some(generator) => {
            trace!("selected {:?} to go from {:?} to {:?}", generator, current, target);
            Ok(generator)
        }
        None => Err(Error::NoMatchingGenerator { from: current, to: target }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::generators::*;
    use crate::mesh::vertex::OwnedVertex;

    fn constant(attributes: Attributes) -> Generator {
        Generator::single(ConstantValueGenerator::new(OwnedVertex::new(attributes)))
    }

    #[test]
    fn first_match_wins() {
        let generators = vec![
            constant(Attributes::COLOR),
            constant(Attributes::NORMAL),
            constant(Attributes::NORMAL | Attributes::COLOR),
        ];
        let target = Attributes::POSITION | Attributes::NORMAL;
        let selected = select_generator(&generators, Attributes::POSITION, target, true).unwrap();
        assert_eq!(selected.output_attributes(Attributes::empty()), Attributes::NORMAL);
    }

    #[test]
    fn required_attributes_are_respected() {
        let generators = vec![Generator::multi(FlatNormalGenerator)];
        let target = Attributes::TEXCOORD0 | Attributes::NORMAL;
        assert!(matches!(
            select_generator(&generators, Attributes::TEXCOORD0, target, true),
            Err(Error::NoMatchingGenerator { .. })
        ));
    }

    #[test]
    fn multi_vertex_generators_can_be_excluded() {
        let generators = vec![Generator::multi(FlatNormalGenerator), constant(Attributes::NORMAL)];
        let target = Attributes::POSITION | Attributes::NORMAL;

        let any = select_generator(&generators, Attributes::POSITION, target, true).unwrap();
        assert!(!any.is_single());
        let single = select_generator(&generators, Attributes::POSITION, target, false).unwrap();
        assert!(single.is_single());
    }

    #[test]
    fn useless_generator_does_not_qualify() {
        let generators = vec![constant(Attributes::COLOR)];
        let target = Attributes::POSITION | Attributes::NORMAL;
        assert!(select_generator(&generators, Attributes::POSITION, target, true).is_err());
    }
}
