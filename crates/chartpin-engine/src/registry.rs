//! Functions backed by external services

use std::sync::Arc;

use chartpin_stream::CatalogClient;
use minijinja::Environment;

use crate::functions::VersionStreamFn;

/// Template functions that need a live catalog
///
/// Built once per command and handed to every render, so all templates of a
/// run share the same (lazily opened) version stream.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    version_stream: VersionStreamFn,
}

impl FunctionRegistry {
    pub fn new(catalog: Arc<dyn CatalogClient>) -> Self {
        Self {
            version_stream: VersionStreamFn::new(catalog),
        }
    }

    /// Add `versionStream` (and its `version_stream` alias) to `env`
    pub fn register(&self, env: &mut Environment<'static>) {
        for name in ["versionStream", "version_stream"] {
            let function = self.version_stream.clone();
            env.add_function(name, move |kind: String, pin: String| {
                function.call(&kind, &pin)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartpin_stream::{StaticCatalog, VersionKind};

    #[test]
    fn test_registers_both_spellings() {
        let catalog = StaticCatalog::new().with_version(VersionKind::Package, "jx", "2.1.155");
        let registry = FunctionRegistry::new(Arc::new(catalog));

        let mut env = Environment::new();
        registry.register(&mut env);

        let rendered = env
            .render_str(
                r#"{{ versionStream("package", "jx") }}/{{ version_stream("packages", "jx") }}"#,
                (),
            )
            .unwrap();
        assert_eq!(rendered, "2.1.155/2.1.155");
    }
}
