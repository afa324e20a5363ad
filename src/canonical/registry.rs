use std::collections::BTreeMap;

use super::{CanonicalizeError, Canonicalizer, MorganCanonicalizer, StereoCanonicalizer};
use crate::mol::Mol;
use crate::traits::{StereoAtom, StereoBond};

pub type CanonicalizerFactory<A, B> = Box<dyn Fn() -> Box<dyn Canonicalizer<A, B>>>;

/// Canonicalization strategies selectable by name.
///
/// The registry is an ordinary value: build one, register strategies, and
/// hand it to whatever needs to pick a numbering.
///
/// ```
/// use stereocrab::{Atom, Bond, CanonicalizerRegistry, Mol};
///
/// let registry = CanonicalizerRegistry::<Atom, Bond>::with_builtin();
/// assert_eq!(registry.default_name(), Some("morgan-stereo"));
///
/// let mut mol = Mol::new();
/// let c = mol.add_atom(Atom::new(6));
/// registry.canonicalize(&mut mol, Some("morgan")).unwrap();
/// assert_eq!(mol.atom(c).canonical_index, Some(0));
/// ```
pub struct CanonicalizerRegistry<A, B> {
    factories: BTreeMap<String, CanonicalizerFactory<A, B>>,
    default: Option<String>,
}

impl<A, B> CanonicalizerRegistry<A, B> {
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
            default: None,
        }
    }

    /// Registers `factory` under `name`, replacing any earlier entry. The
    /// first registration, or one with `as_default`, becomes the default.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F, as_default: bool)
    where
        F: Fn() -> Box<dyn Canonicalizer<A, B>> + 'static,
    {
        let name = name.into();
        if as_default || self.default.is_none() {
            self.default = Some(name.clone());
        }
        self.factories.insert(name, Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.factories.keys().map(String::as_str)
    }

    pub fn default_name(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Builds the strategy registered under `name`.
    pub fn get(&self, name: &str) -> Result<Box<dyn Canonicalizer<A, B>>, CanonicalizeError> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| CanonicalizeError::UnknownStrategy {
                name: name.to_string(),
            })
    }

    /// Canonicalizes `mol` with the named strategy, or the default one.
    pub fn canonicalize(
        &self,
        mol: &mut Mol<A, B>,
        name: Option<&str>,
    ) -> Result<(), CanonicalizeError> {
        let name = match name {
            Some(name) => name,
            None => self
                .default
                .as_deref()
                .ok_or(CanonicalizeError::NoDefaultStrategy)?,
        };
        self.get(name)?.canonicalize(mol)
    }
}

impl<A, B> CanonicalizerRegistry<A, B>
where
    A: StereoAtom + 'static,
    B: StereoBond + 'static,
{
    /// Registry holding `"morgan"` and `"morgan-stereo"`, the latter as
    /// default.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            MorganCanonicalizer::NAME,
            || Box::new(MorganCanonicalizer),
            false,
        );
        registry.register(
            StereoCanonicalizer::<MorganCanonicalizer>::NAME,
            || Box::new(StereoCanonicalizer::morgan()),
            true,
        );
        registry
    }
}

impl<A, B> Default for CanonicalizerRegistry<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::atom::Atom;
    use crate::bond::Bond;

    struct Constant(usize);

    impl Canonicalizer<Atom, Bond> for Constant {
        fn canonicalize(&self, mol: &mut Mol<Atom, Bond>) -> Result<(), CanonicalizeError> {
            for atom in mol.atoms().collect::<Vec<_>>() {
                mol.set_canonical_index(atom, Some(self.0));
            }
            Ok(())
        }
    }

    fn one_atom() -> Mol<Atom, Bond> {
        let mut mol = Mol::new();
        mol.add_atom(Atom::new(6));
        mol
    }

    #[test]
    fn builtin_strategies() {
        let registry = CanonicalizerRegistry::<Atom, Bond>::with_builtin();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["morgan", "morgan-stereo"]
        );
        assert_eq!(registry.default_name(), Some("morgan-stereo"));
        let mut mol = one_atom();
        registry.canonicalize(&mut mol, None).unwrap();
        assert_eq!(mol.atom(petgraph::graph::NodeIndex::new(0)).canonical_index, Some(0));
    }

    #[test]
    fn unknown_and_missing_default() {
        let registry = CanonicalizerRegistry::<Atom, Bond>::new();
        let mut mol = one_atom();
        assert_eq!(
            registry.canonicalize(&mut mol, None),
            Err(CanonicalizeError::NoDefaultStrategy)
        );
        assert_eq!(
            registry.canonicalize(&mut mol, Some("inchi")),
            Err(CanonicalizeError::UnknownStrategy {
                name: "inchi".to_string()
            })
        );
    }

    #[test]
    fn custom_strategy_can_take_over_the_default() {
        let built = Rc::new(Cell::new(0));
        let counter = built.clone();
        let mut registry = CanonicalizerRegistry::<Atom, Bond>::with_builtin();
        registry.register(
            "constant",
            move || {
                counter.set(counter.get() + 1);
                Box::new(Constant(7))
            },
            true,
        );
        assert!(registry.contains("constant"));

        let mut mol = one_atom();
        registry.canonicalize(&mut mol, None).unwrap();
        assert_eq!(mol.atom(petgraph::graph::NodeIndex::new(0)).canonical_index, Some(7));

        registry.canonicalize(&mut mol, Some("morgan")).unwrap();
        assert_eq!(mol.atom(petgraph::graph::NodeIndex::new(0)).canonical_index, Some(0));
        assert_eq!(built.get(), 1);
    }

    #[test]
    fn first_registration_becomes_default() {
        let mut registry = CanonicalizerRegistry::<Atom, Bond>::new();
        registry.register("a", || Box::new(Constant(1)), false);
        registry.register("b", || Box::new(Constant(2)), false);
        assert_eq!(registry.default_name(), Some("a"));
    }
}
