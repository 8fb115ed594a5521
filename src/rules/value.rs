use indexmap::IndexMap;

/// A submitted form value, as seen by a validation rule.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<FieldValue>),
    Map(IndexMap<String, FieldValue>),
    /// An uploaded file, identified by its stored path.
    File { path: String },
}

impl FieldValue {
    pub fn file(path: impl Into<String>) -> Self {
        FieldValue::File { path: path.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a single string, for scalar values only.
    pub fn to_scalar_string(&self) -> Option<String> {
        match self {
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn child(&self, key: &str) -> Option<&FieldValue> {
        match self {
            FieldValue::Map(map) => map.get(key),
            FieldValue::List(list) => key.parse::<usize>().ok().and_then(|i| list.get(i)),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self { FieldValue::Text(s.to_string()) }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self { FieldValue::Text(s) }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self { FieldValue::Bool(b) }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self { FieldValue::Number(n) }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self { FieldValue::Number(n as f64) }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Returns whether a value counts as present.
///
/// Null, whitespace-only text, empty lists and maps, and files without a
/// path are absent. Everything else is present.
pub fn is_present(value: &FieldValue) -> bool {
    match value {
        FieldValue::List(items) => !items.is_empty(),
        FieldValue::Map(map) => !map.is_empty(),
        other => is_present_allow_empty_collection(other),
    }
}

/// Like [`is_present`], except that empty lists and maps count as present.
pub fn is_present_allow_empty_collection(value: &FieldValue) -> bool {
    match value {
        FieldValue::Null => false,
        FieldValue::Text(s) => !s.trim().is_empty(),
        FieldValue::File { path } => !path.is_empty(),
        _ => true,
    }
}

/// Read-only view over the fields and files of one submitted form.
#[derive(Debug, Clone, Default)]
pub struct FormContext {
    data: IndexMap<String, FieldValue>,
    files: IndexMap<String, FieldValue>,
}

impl FormContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        data: IndexMap<String, FieldValue>,
        files: IndexMap<String, FieldValue>,
    ) -> Self {
        Self { data, files }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.data.insert(name.into(), value.into());
        self
    }

    pub fn with_file(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.files.insert(name.into(), FieldValue::file(path));
        self
    }

    /// Looks up an attribute in the submitted data, then in the files.
    ///
    /// Attributes may be dotted paths (`address.lines.0`) into nested maps
    /// and lists. A null data value falls through to the files.
    pub fn value(&self, attribute: &str) -> Option<&FieldValue> {
        lookup(&self.data, attribute)
            .filter(|value| **value != FieldValue::Null)
            .or_else(|| lookup(&self.files, attribute))
            .filter(|value| **value != FieldValue::Null)
    }
}

fn lookup<'a>(root: &'a IndexMap<String, FieldValue>, path: &str) -> Option<&'a FieldValue> {
    if let Some(value) = root.get(path) {
        return Some(value);
    }
    let mut keys = path.split('.');
    let first = root.get(keys.next()?)?;
    keys.try_fold(first, |value, key| value.child(key))
}
