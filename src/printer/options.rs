use crate::error::{Error, Result};
use headless_chrome::protocol::cdp::Page;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named options for the browser's `Page.printToPDF` command.
///
/// Keys use the protocol's camelCase names (`landscape`, `displayHeaderFooter`,
/// `paperWidth`, `pageRanges`, ...). A fresh set of defaults is built every
/// time [`PrintOptions::default`] is called; entries layered on top with
/// [`PrintOptions::merge`] override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrintOptions(Map<String, Value>);

impl Default for PrintOptions {
    fn default() -> Self {
        let mut options = Map::new();
        options.insert("landscape".to_string(), Value::Bool(false));
        options.insert("displayHeaderFooter".to_string(), Value::Bool(false));
        options.insert("printBackground".to_string(), Value::Bool(true));
        options.insert("preferCSSPageSize".to_string(), Value::Bool(true));
        PrintOptions(options)
    }
}

impl PrintOptions {
    /// An empty set of options, without any defaults.
    pub fn empty() -> PrintOptions {
        PrintOptions(Map::new())
    }

    pub fn set<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Layer `overrides` on top of these options; entries in `overrides` win.
    pub fn merge(mut self, overrides: &PrintOptions) -> PrintOptions {
        for (key, value) in overrides.0.iter() {
            self.0.insert(key.clone(), value.clone());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Validate the options into a `Page.printToPDF` command.
    ///
    /// Values of the wrong type fail here, before any browser is started.
    /// Names the protocol doesn't know about are dropped with a warning.
    pub fn to_command(&self) -> Result<Page::PrintToPDF> {
        let command: Page::PrintToPDF = serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| Error::print("invalid print options", e))?;

        if let Ok(Value::Object(known)) = serde_json::to_value(&command) {
            for (key, value) in self.0.iter() {
                if !value.is_null() && !known.contains_key(key) {
                    log::warn!("ignoring unknown print option `{key}`");
                }
            }
        }

        Ok(command)
    }
}

impl From<Map<String, Value>> for PrintOptions {
    fn from(options: Map<String, Value>) -> Self {
        PrintOptions(options)
    }
}

impl FromIterator<(String, Value)> for PrintOptions {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        PrintOptions(iter.into_iter().collect())
    }
}

/// Parse a `KEY=VALUE` option. The value is read as JSON when it parses as
/// such (`true`, `0.8`, `"text"`), otherwise it's taken as a plain string.
pub fn parse_option(option: &str) -> Result<(String, Value), String> {
    let (key, value) = option
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{option}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing option name in `{option}`"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_are_fresh_per_call() {
        let mut first = PrintOptions::default();
        first.set("landscape", true);

        let second = PrintOptions::default();
        assert_eq!(second.get("landscape"), Some(&json!(false)));
    }

    #[test]
    fn overrides_win_over_defaults() {
        let mut overrides = PrintOptions::empty();
        overrides.set("landscape", true).set("scale", 0.5);

        let merged = PrintOptions::default().merge(&overrides);
        assert_eq!(merged.get("landscape"), Some(&json!(true)));
        assert_eq!(merged.get("scale"), Some(&json!(0.5)));
        assert_eq!(merged.get("printBackground"), Some(&json!(true)));
        assert_eq!(merged.get("preferCSSPageSize"), Some(&json!(true)));
        assert_eq!(merged.get("displayHeaderFooter"), Some(&json!(false)));
    }

    #[test]
    fn builds_print_command() {
        let mut overrides = PrintOptions::empty();
        overrides.set("landscape", true).set("pageRanges", "1-2");

        let command = PrintOptions::default().merge(&overrides).to_command().unwrap();
        assert_eq!(command.landscape, Some(true));
        assert_eq!(command.print_background, Some(true));
        assert_eq!(command.prefer_css_page_size, Some(true));
        assert_eq!(command.display_header_footer, Some(false));
        assert_eq!(command.page_ranges.as_deref(), Some("1-2"));
        assert_eq!(command.scale, None);
    }

    #[test]
    fn wrongly_typed_options_are_print_errors() {
        let mut overrides = PrintOptions::empty();
        overrides.set("landscape", "sideways");

        let err = PrintOptions::default().merge(&overrides).to_command().unwrap_err();
        assert!(matches!(err, Error::Print(_)));
    }

    #[test]
    fn unknown_options_are_ignored() {
        let mut overrides = PrintOptions::empty();
        overrides.set("pageOrientation", "landscape");

        let command = PrintOptions::default().merge(&overrides).to_command().unwrap();
        assert_eq!(command.landscape, Some(false));
    }

    #[test]
    fn can_parse_options() {
        assert_eq!(
            parse_option("landscape=true").unwrap(),
            ("landscape".to_string(), json!(true))
        );
        assert_eq!(
            parse_option("scale=0.75").unwrap(),
            ("scale".to_string(), json!(0.75))
        );
        assert_eq!(
            parse_option("pageRanges=1-3").unwrap(),
            ("pageRanges".to_string(), json!("1-3"))
        );
        assert_eq!(
            parse_option("headerTemplate=<span>a=b</span>").unwrap(),
            ("headerTemplate".to_string(), json!("<span>a=b</span>"))
        );
        assert!(parse_option("landscape").is_err());
        assert!(parse_option("=true").is_err());
    }
}
