use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::path::Path;

/// Load the render context from a data file.
///
/// `.toml` files are read as TOML, anything else as JSON. The top level must
/// be a mapping of variable names to values.
pub fn load_data<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file `{}`", path.display()))?;

    let is_toml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);
    let data: Value = if is_toml {
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML in `{}`", path.display()))?
    } else {
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON in `{}`", path.display()))?
    };

    if !data.is_object() {
        return Err(anyhow!(
            "Data file `{}` must contain a mapping of names to values at the top level",
            path.display()
        ));
    }
    Ok(data)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn loads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, r#"{"name": "Alice", "items": [1, 2]}"#).unwrap();

        assert_eq!(
            load_data(&path).unwrap(),
            json!({"name": "Alice", "items": [1, 2]})
        );
    }

    #[test]
    fn loads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.toml");
        std::fs::write(&path, "name = \"Alice\"\n\n[address]\ncity = \"Regina\"\n").unwrap();

        assert_eq!(
            load_data(&path).unwrap(),
            json!({"name": "Alice", "address": {"city": "Regina"}})
        );
    }

    #[test]
    fn rejects_non_mappings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(load_data(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_data(dir.path().join("missing.json")).is_err());
    }
}
