use crate::error::LoaderError;
use futures::future::BoxFuture;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A loaded optional module: its name plus whatever the source produced for it.
///
/// Cloning shares the same exports.
#[derive(Clone)]
pub struct Module {
    name: Arc<str>,
    exports: Arc<dyn Any + Send + Sync>,
}

impl Module {
    pub fn new<T>(name: impl Into<Arc<str>>, exports: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self { name: name.into(), exports: Arc::new(exports) }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Typed view of the exports, `None` when `T` is not what the source produced.
    #[must_use]
    pub fn exports<T: Any>(&self) -> Option<&T> {
        self.exports.downcast_ref::<T>()
    }

    /// `true` when both handles point at the same load.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.exports, &other.exports)
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Where modules come from: a bundler chunk, a plugin registry, a test double.
///
/// The returned future must not borrow `self`; the loader may poll it after the call returns.
pub trait ModuleSource: Send + Sync {
    fn fetch(&self, name: &str) -> BoxFuture<'static, Result<Module, LoaderError>>;
}

impl<S: ModuleSource + ?Sized> ModuleSource for Arc<S> {
    fn fetch(&self, name: &str) -> BoxFuture<'static, Result<Module, LoaderError>> {
        (**self).fetch(name)
    }
}
