//! Which methods to instrument, and how.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding the method list in a loosely-typed wrap request.
pub const LOGGING_METHODS: &str = "loggingMethods";

/// Per-method logging options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MethodLogOptions {
    /// Include the argument list in the "call started" record.
    pub log_arguments: bool,
    /// Include the return value in the "call finished" record.
    pub log_return_value: bool,
}

impl Default for MethodLogOptions {
    fn default() -> Self {
        Self {
            log_arguments: true,
            log_return_value: false,
        }
    }
}

/// Method name → logging options. Exactly the listed methods are
/// instrumented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterceptionSpec {
    methods: BTreeMap<String, MethodLogOptions>,
}

impl InterceptionSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every listed method gets the default options.
    pub fn from_methods<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().collect()
    }

    /// Add (or replace) one method.
    pub fn method(mut self, name: impl Into<String>, options: MethodLogOptions) -> Self {
        self.methods.insert(name.into(), options);
        self
    }

    /// Read `{"loggingMethods": [...]}` or `{"loggingMethods": {name: {...}}}`.
    ///
    /// Anything unrecognized is skipped: non-string names, non-object option
    /// blocks (default options), options that are not booleans (default).
    pub fn from_value(value: &Value) -> Self {
        match value.get(LOGGING_METHODS) {
            Some(Value::Array(names)) => names.iter().filter_map(Value::as_str).collect(),
            Some(Value::Object(entries)) => Self {
                methods: entries
                    .iter()
                    .map(|(name, opts)| {
                        let options = opts.as_object().map(options_from).unwrap_or_default();
                        (name.clone(), options)
                    })
                    .collect(),
            },
            _ => Self::default(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&MethodLogOptions> {
        self.methods.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, MethodLogOptions> {
        self.methods.iter()
    }
}

fn options_from(opts: &Map<String, Value>) -> MethodLogOptions {
    let flag = |key: &str| opts.get(key).and_then(Value::as_bool);
    MethodLogOptions {
        log_arguments: flag("logArguments") != Some(false),
        log_return_value: flag("logReturnValue") == Some(true),
    }
}

impl<S: Into<String>> FromIterator<S> for InterceptionSpec {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            methods: iter
                .into_iter()
                .map(|name| (name.into(), MethodLogOptions::default()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a InterceptionSpec {
    type Item = (&'a String, &'a MethodLogOptions);
    type IntoIter = btree_map::Iter<'a, String, MethodLogOptions>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
