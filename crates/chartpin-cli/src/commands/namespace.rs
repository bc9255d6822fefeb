//! Namespace-values command - print namespace override pairs

use chartpin_core::namespace_overrides;

use crate::context::RunContext;
use crate::error::{CliError, Result};

pub fn run(namespace: Option<&str>, yaml: bool, ctx: &RunContext) -> Result<()> {
    let namespace = match namespace {
        Some(ns) => ns,
        None if !ctx.config.cluster.namespace.is_empty() => ctx.config.cluster.namespace.as_str(),
        None => {
            return Err(CliError::Config {
                message: "no namespace given".to_string(),
                help: Some(
                    "Pass a NAMESPACE argument or set cluster.namespace in chartpin.yml"
                        .to_string(),
                ),
            });
        }
    };

    let overrides = namespace_overrides(namespace);
    if yaml {
        print!("{}", overrides.to_values()?.to_yaml()?);
    } else {
        for pair in overrides.pairs() {
            println!("{}", pair);
        }
    }
    Ok(())
}
