use std::sync::Arc;

use anyhow::anyhow;
use jsonschema::{JSONSchema, SchemaResolver, SchemaResolverError};
use log::debug;
use serde_json::Value;
use url::Url;

/// Root configuration schema, references the other embedded schemas by file name
static CONFIG_SCHEMA: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/schema/config.json"));

/// Schemas that can be referenced from the root schema
static EMBEDDED: &[(&str, &str)] = &[
    ("bundle.json", include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/schema/bundle.json"))),
    ("options.json", include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/schema/options.json"))),
];

/// Compile the embedded configuration schema
///
/// The schema ships with the binary, so failing to parse or compile it is a build defect rather
/// than a user error.
pub fn load_schema() -> Result<JSONSchema, anyhow::Error> {
    let schema: Value = serde_json::from_str(CONFIG_SCHEMA)?;
    compile_schema(&schema)
}

fn compile_schema(schema: &Value) -> Result<JSONSchema, anyhow::Error> {
    JSONSchema::options()
        .with_resolver(EmbeddedResolver)
        .compile(schema)
        .map_err(|err| anyhow!("invalid configuration schema: {}", err))
}

/*
Set up a resolver for the schemas compiled into the binary
The root schema has relative references ("bundle.json") that resolve against the default
json-schema:/// base URL
*/
struct EmbeddedResolver;

impl SchemaResolver for EmbeddedResolver {
    fn resolve(&self, _root_schema: &Value, url: &Url, original_reference: &str) -> Result<Arc<Value>, SchemaResolverError> {
        match url.scheme() {
            "json-schema" => {
                let name = original_reference.trim_start_matches("./");
                debug!("Resolving embedded schema {}", name);
                let (_, content) = EMBEDDED
                    .iter()
                    .find(|(file, _)| *file == name)
                    .ok_or_else(|| anyhow!("no embedded schema named {}", name))?;
                Ok(Arc::new(serde_json::from_str(content)?))
            }
            _ => Err(anyhow!("scheme is not supported"))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_embedded_schema_compiles() {
        assert!(load_schema().is_ok());
    }

    #[test]
    fn test_bundle_reference_resolves() {
        let schema = load_schema().unwrap();
        let missing_dbsnp = json!({
            "gatk": {
                "gatk": "gatk",
                "bundle": {
                    "hapmap": "h", "omni": "o", "1000G": "g",
                    "mills": "m", "1000G_known_indel": "k"
                }
            },
            "resources": {"reference": "ref.fa"}
        });
        assert!(!schema.is_valid(&missing_dbsnp));
    }

    #[test]
    fn test_options_must_be_strings() {
        let schema = load_schema().unwrap();
        let numeric_options = json!({
            "gatk": {
                "gatk": "gatk",
                "vqsr_options": [1, 2],
                "bundle": {
                    "hapmap": "h", "omni": "o", "1000G": "g",
                    "mills": "m", "1000G_known_indel": "k", "dbsnp": "d"
                }
            },
            "resources": {"reference": "ref.fa"}
        });
        assert!(!schema.is_valid(&numeric_options));
    }
}
