//! Choice-entry resolution for selection prompts and line-item display.
//!
//! A "collection" here is a `serde_json::Value` holding either a mapping or a
//! sequence of heterogeneous records (nested mappings, scalars). Each element
//! becomes one [`ChoiceEntry`] carrying an optional position, an optional
//! label, and the record itself; the displayable value is resolved lazily by
//! walking an optional dotted field path (`"issue.dek"`) against the record.

use crate::error::ResolveError;
use serde_json::Value;

/// Parameters controlling how a collection is turned into choice entries.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResolveOptions<'a> {
    /// Dotted field path resolved against each sequence element for display.
    pub attribute_path: Option<&'a str>,
    /// Assign zero-based positions to entries (rendered 1-based).
    pub numbered: bool,
    /// Constant label applied to every sequence element.
    pub label: Option<&'a str>,
}

/// One selectable/displayable item derived from a collection element.
#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceEntry {
    index: Option<usize>,
    label: Option<String>,
    source: Value,
    path: Option<String>,
}

impl ChoiceEntry {
    /// Zero-based position, present only when numbering was requested.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Mapping key or caller-supplied constant label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The original record this entry was derived from.
    pub fn source(&self) -> &Value {
        &self.source
    }

    /// Resolve the display value by walking the dotted field path against the
    /// source record. Pure; the source is never mutated.
    pub fn display_value(&self) -> Result<Value, ResolveError> {
        match self.path.as_deref() {
            Some(path) => resolve_path(&self.source, path),
            None => Ok(self.source.clone()),
        }
    }

    /// Render this entry as one display line.
    ///
    /// `"(i) label: value"` when both position and label are present,
    /// `"(i) value"` with only a position, `"label: value"` with only a
    /// label, and the bare value otherwise. Positions render 1-based.
    pub fn render(&self) -> Result<String, ResolveError> {
        let value = render_value(&self.display_value()?);
        Ok(match (self.index, self.label.as_deref()) {
            (Some(i), Some(label)) => format!("({}) {label}: {value}", i + 1),
            (Some(i), None) => format!("({}) {value}", i + 1),
            (None, Some(label)) => format!("{label}: {value}"),
            (None, None) => value,
        })
    }
}

/// Turn a mapping or sequence into an ordered list of choice entries.
///
/// Mapping pairs become entries labeled by their key, in insertion order;
/// the attribute path does not apply to mapping values. Sequence elements
/// carry the constant label and the attribute path. An empty collection
/// yields an empty list; a scalar is rejected.
pub fn resolve_choices(
    collection: &Value,
    options: ResolveOptions<'_>,
) -> Result<Vec<ChoiceEntry>, ResolveError> {
    match collection {
        Value::Object(map) => Ok(map
            .iter()
            .enumerate()
            .map(|(i, (key, value))| ChoiceEntry {
                index: options.numbered.then_some(i),
                label: Some(key.clone()),
                source: value.clone(),
                path: None,
            })
            .collect()),
        Value::Array(items) => Ok(items
            .iter()
            .enumerate()
            .map(|(i, item)| ChoiceEntry {
                index: options.numbered.then_some(i),
                label: options.label.map(str::to_string),
                source: item.clone(),
                path: options.attribute_path.map(str::to_string),
            })
            .collect()),
        _ => Err(ResolveError::NotACollection),
    }
}

/// Resolve every entry of a collection to its display line.
pub fn render_choices(
    collection: &Value,
    options: ResolveOptions<'_>,
) -> Result<Vec<String>, ResolveError> {
    resolve_choices(collection, options)?
        .iter()
        .map(ChoiceEntry::render)
        .collect()
}

/// Walk a dotted field path (`"a.b.c"`) against a value, one segment at a
/// time.
pub fn resolve_path(value: &Value, path: &str) -> Result<Value, ResolveError> {
    match path.split_once('.') {
        Some((head, rest)) => resolve_path(&resolve_field(value, head)?, rest),
        None => resolve_field(value, path),
    }
}

/// Resolve one field off a record. Mappings look the key up, sequences pass
/// through unchanged, scalars cannot satisfy a field request.
fn resolve_field(value: &Value, name: &str) -> Result<Value, ResolveError> {
    match value {
        Value::Object(map) => map
            .get(name)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownField(name.to_string())),
        Value::Array(_) => Ok(value.clone()),
        _ => Err(ResolveError::FieldOnScalar(name.to_string())),
    }
}

/// Render a resolved value for display; strings drop their JSON quotes.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
