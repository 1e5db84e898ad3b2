//! Registration of test cases and groups.
//!
//! A [`Registry`] is an ordered, append only list of [`TestNode`]s. Each node
//! is either a [`TestCase`] or a [`TestGroup`] holding another registry, so
//! registries nest arbitrarily deep.
//!
//! Most programs build one registry and hand it to
//! [`TestRunner::run`](crate::runner::TestRunner::run). For small setups the
//! crate also keeps a process wide default registry, filled by [`test`](crate::test())
//! and run by [`run_tests`](crate::run_tests).

use std::{
    borrow::Cow,
    mem,
    sync::{LazyLock, Mutex, MutexGuard, PoisonError},
};

use crate::test::{TestCase, TestFn, TestFnHandle};

#[derive(Debug)]
pub enum TestNode {
    Case(TestCase),
    Group(TestGroup),
}

impl TestNode {
    pub fn name(&self) -> &str {
        match self {
            TestNode::Case(case) => &case.name,
            TestNode::Group(group) => &group.name,
        }
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub struct TestGroup {
    pub name: Cow<'static, str>,
    pub children: Registry,
}

/// What can be registered under a name: an action or a nested registry.
#[derive(Debug)]
pub enum Entry {
    Action(TestFnHandle),
    Group(Registry),
}

impl From<TestFnHandle> for Entry {
    fn from(value: TestFnHandle) -> Self {
        Entry::Action(value)
    }
}

impl From<Registry> for Entry {
    fn from(value: Registry) -> Self {
        Entry::Group(value)
    }
}

impl<F> From<F> for Entry
where
    F: TestFn + Send + Sync + 'static,
{
    fn from(value: F) -> Self {
        Entry::Action(TestFnHandle::Owned(Box::new(value)))
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    nodes: Vec<TestNode>,
}

impl Registry {
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Append one node named `name`.
    ///
    /// An action becomes a case, a registry becomes a group. Names are not
    /// validated, empty and duplicate names are fine.
    ///
    /// ```
    /// use nestest::{Registry, assert::assert};
    ///
    /// let mut group = Registry::new();
    /// group.add("inner", || assert(true, ""));
    ///
    /// let mut registry = Registry::new();
    /// registry.add("plain", || ());
    /// registry.add("group", group);
    /// assert_eq!(registry.len(), 2);
    /// assert_eq!(registry.leaf_count(), 2);
    /// ```
    pub fn add(&mut self, name: impl Into<Cow<'static, str>>, entry: impl Into<Entry>) -> &mut Self {
        let name = name.into();
        let node = match entry.into() {
            Entry::Action(function) => TestNode::Case(TestCase::new(name, function)),
            Entry::Group(children) => TestNode::Group(TestGroup { name, children }),
        };
        self.nodes.push(node);
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestNode> {
        self.nodes.iter()
    }

    /// Number of cases in the whole tree, groups excluded.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| match node {
                TestNode::Case(_) => 1,
                TestNode::Group(group) => group.children.leaf_count(),
            })
            .sum()
    }
}

impl<'r> IntoIterator for &'r Registry {
    type Item = &'r TestNode;
    type IntoIter = std::slice::Iter<'r, TestNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<(Cow<'static, str>, Entry)> for Registry {
    fn extend<T: IntoIterator<Item = (Cow<'static, str>, Entry)>>(&mut self, iter: T) {
        for (name, entry) in iter {
            self.add(name, entry);
        }
    }
}

static DEFAULT_REGISTRY: LazyLock<Mutex<Registry>> = LazyLock::new(|| Mutex::new(Registry::new()));

/// Lock the process wide default registry.
///
/// A panic while the lock was held does not leave the registry in a broken
/// state, since every mutation is a single push, so poisoning is ignored.
pub fn default_registry() -> MutexGuard<'static, Registry> {
    DEFAULT_REGISTRY
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Move the default registry out so it can be run without holding the lock.
pub(crate) fn take_default_registry() -> Registry {
    mem::take(&mut *default_registry())
}

/// Put a registry taken with [`take_default_registry`] back.
///
/// Nodes added to the default registry in the meantime are kept after the
/// restored ones.
pub(crate) fn restore_default_registry(registry: Registry) {
    let mut guard = default_registry();
    let added = mem::replace(&mut *guard, registry);
    guard.nodes.extend(added.nodes);
}
