//! Coding paths: the trail of keys and indices leading to a node.
//!
//! Paths are used for diagnostics only and never influence control flow.
//! Each engine frame owns its own path, so a nested frame extends a copy and
//! siblings always observe their parent's path unchanged.

use std::fmt;

/// One step of a [`CodingPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathComponent {
    /// An object key, as it appears on the wire.
    Key(String),
    /// A position inside an array.
    Index(usize),
}

impl fmt::Display for PathComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathComponent::Key(key) => write!(f, ".{key}"),
            PathComponent::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Ordered sequence of [`PathComponent`]s from the document root.
///
/// Renders as `$` for the root, `$.user.first_name`, `$.items[2]`.
#[derive(Debug, Clone, Default)]
pub struct CodingPath {
    components: Vec<PathComponent>,
    detached: bool,
}

impl CodingPath {
    /// The empty path (document root).
    pub fn root() -> Self {
        Self::default()
    }

    /// Placeholder for errors raised before the engine knows where they are.
    pub(crate) fn detached() -> Self {
        Self {
            components: Vec::new(),
            detached: true,
        }
    }

    pub(crate) fn is_detached(&self) -> bool {
        self.detached
    }

    /// A new path with `component` appended.
    pub fn appending(&self, component: PathComponent) -> Self {
        let mut components = Vec::with_capacity(self.components.len() + 1);
        components.extend_from_slice(&self.components);
        components.push(component);
        Self {
            components,
            detached: false,
        }
    }

    pub fn appending_key(&self, key: impl Into<String>) -> Self {
        self.appending(PathComponent::Key(key.into()))
    }

    pub fn appending_index(&self, index: usize) -> Self {
        self.appending(PathComponent::Index(index))
    }

    pub fn components(&self) -> &[PathComponent] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl PartialEq for CodingPath {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for CodingPath {}

impl From<Vec<PathComponent>> for CodingPath {
    fn from(components: Vec<PathComponent>) -> Self {
        Self {
            components,
            detached: false,
        }
    }
}

impl FromIterator<PathComponent> for CodingPath {
    fn from_iter<I: IntoIterator<Item = PathComponent>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl fmt::Display for CodingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for component in &self.components {
            write!(f, "{component}")?;
        }
        Ok(())
    }
}
