use crate::error::LoaderError;
use folio_domain::config::ModuleSpec;
use fxhash::FxHashMap;

/// Validated prerequisite graph: module name to the modules it requires.
#[derive(Debug, Clone, Default)]
pub(crate) struct Manifest {
    requires: FxHashMap<String, Vec<String>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

impl Manifest {
    /// Rejects duplicate names, unknown prerequisites and prerequisite cycles.
    pub(crate) fn new(modules: &[ModuleSpec]) -> Result<Self, LoaderError> {
        let mut requires = FxHashMap::default();
        for spec in modules {
            if requires.insert(spec.name.clone(), spec.requires.clone()).is_some() {
                return Err(invalid(format!("module '{}' is declared twice", spec.name)));
            }
        }

        for (name, deps) in &requires {
            if let Some(unknown) = deps.iter().find(|dep| !requires.contains_key(*dep)) {
                return Err(invalid(format!("module '{name}' requires unknown module '{unknown}'")));
            }
        }

        let manifest = Self { requires };
        manifest.check_acyclic()?;
        Ok(manifest)
    }

    /// Prerequisites of `name`; modules missing from the manifest have none.
    pub(crate) fn requires(&self, name: &str) -> &[String] {
        self.requires.get(name).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.requires.keys().map(String::as_str)
    }

    fn check_acyclic(&self) -> Result<(), LoaderError> {
        let mut marks = FxHashMap::default();
        for name in self.requires.keys() {
            self.visit(name, &mut marks, &mut Vec::new())?;
        }
        Ok(())
    }

    fn visit<'a>(
        &'a self,
        name: &'a str,
        marks: &mut FxHashMap<&'a str, Mark>,
        path: &mut Vec<&'a str>,
    ) -> Result<(), LoaderError> {
        match marks.get(name) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                path.push(name);
                return Err(invalid(format!("prerequisite cycle: {}", path.join(" -> "))));
            },
            None => {},
        }

        marks.insert(name, Mark::Visiting);
        path.push(name);
        for dep in self.requires(name) {
            self.visit(dep, marks, path)?;
        }
        path.pop();
        marks.insert(name, Mark::Done);

        Ok(())
    }
}

fn invalid(message: String) -> LoaderError {
    LoaderError::InvalidManifest { message: message.into(), context: None }
}
