//! Template engine based on MiniJinja

use chartpin_core::PipelineConfig;
use minijinja::Environment;
use serde_json::Value as JsonValue;

use crate::error::{Result, TemplateError};
use crate::filters;
use crate::functions;
use crate::registry::FunctionRegistry;

/// Everything a value override template can see
#[derive(Debug, Clone, Default)]
pub struct RenderParams {
    /// The chart's base values (`values`)
    pub values: JsonValue,

    /// The pipeline configuration (`requirements`)
    pub requirements: PipelineConfig,

    /// The cluster provider (`provider`)
    pub provider: String,
}

/// The template engine
///
/// Undefined variables are always an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Self
    }

    fn create_environment(&self, registry: &FunctionRegistry) -> Environment<'static> {
        let mut env = Environment::new();

        env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);

        env.add_filter("toyaml", filters::toyaml);
        env.add_filter("tojson", filters::tojson);
        env.add_filter("quote", filters::quote);
        env.add_filter("squote", filters::squote);
        env.add_filter("indent", filters::indent);
        env.add_filter("nindent", filters::nindent);
        env.add_filter("b64encode", filters::b64encode);
        env.add_filter("required", filters::required);
        env.add_filter("camelcase", filters::camelcase);

        env.add_function("fail", functions::fail);
        env.add_function("dict", functions::dict);
        env.add_function("list", functions::list);
        env.add_function("get", functions::get);
        env.add_function("coalesce", functions::coalesce);
        env.add_function("ternary", functions::ternary);

        registry.register(&mut env);
        env
    }

    /// Render one template
    pub fn render_str(
        &self,
        source: &str,
        name: &str,
        params: &RenderParams,
        registry: &FunctionRegistry,
    ) -> Result<String> {
        let mut env = self.create_environment(registry);

        env.add_template_owned(name.to_string(), source.to_string())
            .map_err(|e| TemplateError::from_minijinja(e, name, source))?;
        let template = env
            .get_template(name)
            .map_err(|e| TemplateError::from_minijinja(e, name, source))?;

        let ctx = minijinja::context! {
            values => &params.values,
            requirements => &params.requirements,
            provider => &params.provider,
        };

        tracing::debug!("rendering template {}", name);
        template
            .render(ctx)
            .map_err(|e| TemplateError::from_minijinja(e, name, source).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplateErrorKind;
    use chartpin_stream::{StaticCatalog, VersionKind};
    use std::sync::Arc;

    fn registry() -> FunctionRegistry {
        let catalog = StaticCatalog::new().with_version(VersionKind::Docker, "nginx", "1.25.3");
        FunctionRegistry::new(Arc::new(catalog))
    }

    fn params() -> RenderParams {
        RenderParams {
            values: serde_json::json!({"image": {"repository": "nginx"}}),
            requirements: PipelineConfig::from_yaml(
                "cluster:\n  provider: gke\n  namespace: jx-staging\n",
            )
            .unwrap(),
            provider: "gke".to_string(),
        }
    }

    #[test]
    fn test_render_context() {
        let source = "repo: {{ values.image.repository }}\n\
                      ns: {{ requirements.cluster.namespace }}\n\
                      provider: {{ provider | quote }}\n";

        let out = Engine::default()
            .render_str(source, "values.tmpl.yaml", &params(), &registry())
            .unwrap();

        assert_eq!(out, "repo: nginx\nns: jx-staging\nprovider: \"gke\"\n");
    }

    #[test]
    fn test_render_version_stream() {
        let out = Engine::default()
            .render_str(
                r#"tag: {{ versionStream("docker", "nginx") }}"#,
                "values.tmpl.yaml",
                &params(),
                &registry(),
            )
            .unwrap();

        assert_eq!(out, "tag: 1.25.3");
    }

    #[test]
    fn test_strict_undefined() {
        let err = Engine::default()
            .render_str("x: {{ missing.key }}", "t.yaml", &params(), &registry())
            .unwrap_err();

        let template = err.template_error().unwrap();
        assert_eq!(template.kind(), TemplateErrorKind::UndefinedVariable);
    }

    #[test]
    fn test_missing_value_key_is_an_error() {
        let err = Engine::new()
            .render_str("x: {{ values.nothing }}", "t.yaml", &params(), &registry())
            .unwrap_err();

        assert_eq!(
            err.template_error().unwrap().kind(),
            TemplateErrorKind::UndefinedVariable
        );
    }

    #[test]
    fn test_unknown_function_suggestion() {
        let err = Engine::default()
            .render_str(
                "tag: {{ versionStrem(\"docker\", \"nginx\") }}",
                "t.yaml",
                &params(),
                &registry(),
            )
            .unwrap_err();

        let template = err.template_error().unwrap();
        assert_eq!(template.kind(), TemplateErrorKind::UnknownFunction);
        assert!(
            template
                .suggestion
                .as_deref()
                .unwrap()
                .contains("versionStream")
        );
    }
}
