use folio_loader::{LoaderError, Module, ModuleSource};
use futures::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// What every test module exports.
#[derive(Debug, PartialEq, Eq)]
pub struct Exports {
    pub name: String,
}

/// Records every fetch; optionally fails some names or holds fetches until released.
#[derive(Debug, Clone, Default)]
pub struct CountingSource {
    fetched: Arc<Mutex<Vec<String>>>,
    failing: Arc<Vec<String>>,
    gate: Option<Arc<Semaphore>>,
}

impl CountingSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing(names: &[&str]) -> Self {
        let failing = names.iter().map(|&n| n.to_owned()).collect();
        Self { failing: Arc::new(failing), ..Self::default() }
    }

    /// Fetches stay pending until [`CountingSource::release`] is called.
    #[must_use]
    pub fn gated() -> Self {
        Self { gate: Some(Arc::new(Semaphore::new(0))), ..Self::default() }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1024);
        }
    }

    #[must_use]
    pub fn fetches(&self, name: &str) -> usize {
        self.fetched.lock().iter().filter(|n| *n == name).count()
    }

    #[must_use]
    pub fn order(&self) -> Vec<String> {
        self.fetched.lock().clone()
    }
}

impl ModuleSource for CountingSource {
    fn fetch(&self, name: &str) -> BoxFuture<'static, Result<Module, LoaderError>> {
        self.fetched.lock().push(name.to_owned());

        let fail = self.failing.iter().any(|n| n == name);
        let gate = self.gate.clone();
        let name = name.to_owned();

        async move {
            if let Some(gate) = gate {
                gate.acquire().await.expect("gate is never closed").forget();
            }
            if fail {
                Err(LoaderError::fetch(name, "chunk responded 404"))
            } else {
                Ok(Module::new(name.clone(), Exports { name }))
            }
        }
        .boxed()
    }
}
