//! Module rules: a file pattern mapped to a loader chain.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A compiled file-path pattern. Compared and serialized by its source text.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = Regex::new(&source)?;
        Ok(Self { source, regex })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source)
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::new(source).map_err(serde::de::Error::custom)
    }
}

/// One step of a loader chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LoaderUseRepr")]
pub struct LoaderUse {
    pub loader: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl LoaderUse {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }
}

impl fmt::Display for LoaderUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.options {
            Some(options) => write!(f, "{}?{}", self.loader, options),
            None => f.write_str(&self.loader),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LoaderUseRepr {
    Name(String),
    Full {
        loader: String,
        #[serde(default)]
        options: Option<Value>,
    },
}

impl From<LoaderUseRepr> for LoaderUse {
    fn from(repr: LoaderUseRepr) -> Self {
        match repr {
            LoaderUseRepr::Name(loader) => LoaderUse::new(loader),
            LoaderUseRepr::Full { loader, options } => LoaderUse { loader, options },
        }
    }
}

/// A file pattern and the loader chain applied to files it matches.
///
/// Accepts the three spellings found in the wild: `loader` (+ `options`),
/// the legacy `loaders`, and a `use` list. All of them normalize to `uses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RuleRepr")]
pub struct Rule {
    pub test: Pattern,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Pattern>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Pattern>,

    #[serde(rename = "use")]
    pub uses: Vec<LoaderUse>,
}

impl Rule {
    pub fn new(test: Pattern, uses: Vec<LoaderUse>) -> Self {
        Self {
            test,
            include: None,
            exclude: None,
            uses,
        }
    }

    pub fn with_include(mut self, include: Pattern) -> Self {
        self.include = Some(include);
        self
    }

    pub fn with_exclude(mut self, exclude: Pattern) -> Self {
        self.exclude = Some(exclude);
        self
    }

    /// Whether this rule applies to `path` (a `/`-separated file path).
    pub fn matches(&self, path: &str) -> bool {
        if !self.test.is_match(path) {
            return false;
        }
        if let Some(include) = &self.include {
            if !include.is_match(path) {
                return false;
            }
        }
        match &self.exclude {
            Some(exclude) => !exclude.is_match(path),
            None => true,
        }
    }

    pub fn uses_loader(&self, name: &str) -> bool {
        self.uses.iter().any(|u| u.loader == name)
    }
}

#[derive(Deserialize)]
struct RuleRepr {
    test: Pattern,
    #[serde(default)]
    include: Option<Pattern>,
    #[serde(default)]
    exclude: Option<Pattern>,
    #[serde(default, alias = "loaders")]
    loader: Option<String>,
    #[serde(default)]
    options: Option<Value>,
    #[serde(default, rename = "use")]
    uses: Option<Vec<LoaderUse>>,
}

impl TryFrom<RuleRepr> for Rule {
    type Error = String;

    fn try_from(repr: RuleRepr) -> Result<Self, Self::Error> {
        let uses = match (repr.loader, repr.uses) {
            (Some(_), Some(_)) => {
                return Err(format!(
                    "rule {} sets both 'loader' and 'use'; pick one",
                    repr.test
                ));
            }
            (Some(loader), None) => vec![LoaderUse {
                loader,
                options: repr.options,
            }],
            (None, Some(uses)) => uses,
            (None, None) => Vec::new(),
        };

        Ok(Rule {
            test: repr.test,
            include: repr.include,
            exclude: repr.exclude,
            uses,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loader_shorthand_carries_options() {
        let rule: Rule = serde_json::from_value(json!({
            "test": "\\.(css|sass|scss)$",
            "loader": "sass-loader",
            "options": { "outputStyle": "expanded", "sourceMap": true }
        }))
        .unwrap();

        assert_eq!(rule.uses.len(), 1);
        assert_eq!(rule.uses[0].loader, "sass-loader");
        assert_eq!(rule.uses[0].options.as_ref().unwrap()["sourceMap"], json!(true));
    }

    #[test]
    fn legacy_loaders_spelling_is_accepted() {
        let rule: Rule = serde_json::from_value(json!({
            "test": "\\.(jpg|png|json|svg)$",
            "loaders": "url-loader"
        }))
        .unwrap();

        assert_eq!(rule.uses, vec![LoaderUse::new("url-loader")]);
    }

    #[test]
    fn use_list_mixes_names_and_tables() {
        let rule: Rule = serde_json::from_value(json!({
            "test": "\\.css$",
            "use": ["style-loader", { "loader": "css-loader", "options": { "modules": true } }]
        }))
        .unwrap();

        assert_eq!(rule.uses[0], LoaderUse::new("style-loader"));
        assert_eq!(rule.uses[1].loader, "css-loader");
    }

    #[test]
    fn loader_and_use_together_are_rejected() {
        let result: std::result::Result<Rule, _> = serde_json::from_value(json!({
            "test": "\\.js$",
            "loader": "babel-loader",
            "use": ["babel-loader"]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let result: std::result::Result<Rule, _> = serde_json::from_value(json!({
            "test": "(unclosed",
            "loader": "babel-loader"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn exclude_wins_over_test() {
        let rule = Rule::new(Pattern::new(r"\.js$").unwrap(), vec![LoaderUse::new("babel-loader")])
            .with_exclude(Pattern::new("node_modules").unwrap());

        assert!(rule.matches("javascript/index.js"));
        assert!(!rule.matches("node_modules/vue/index.js"));
    }

    #[test]
    fn include_narrows_matches() {
        let rule = Rule::new(Pattern::new(r"\.js$").unwrap(), vec![LoaderUse::new("babel-loader")])
            .with_include(Pattern::new("^javascript/").unwrap());

        assert!(rule.matches("javascript/app.js"));
        assert!(!rule.matches("scripts/app.js"));
    }

    #[test]
    fn serializes_as_use_list() {
        let rule = Rule::new(Pattern::new(r"\.vue$").unwrap(), vec![LoaderUse::new("vue-loader")]);
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value, json!({ "test": "\\.vue$", "use": [{ "loader": "vue-loader" }] }));

        let back: Rule = serde_json::from_value(value).unwrap();
        assert_eq!(back, rule);
    }
}
