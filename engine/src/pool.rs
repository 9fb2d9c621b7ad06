use indexmap::IndexSet;

/// Catalog of attribute names characters sample their traits from.
///
/// Owned by whoever runs the session; share it behind a `Mutex` if several
/// threads register attributes or generate characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributePool {
    names: IndexSet<String>,
}

impl AttributePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut pool = Self::new();
        for name in names {
            pool.register(name);
        }
        pool
    }

    /// Returns false if `name` was already registered.
    pub fn register(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        let added = self.names.insert(name.clone());
        if added {
            tracing::trace!(attribute = %name, "registered attribute");
        }
        added
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
