//! Typed access to `<BoundProperties>` bags.
//!
//! Project files attach loosely typed name/value pairs to extents and effects. The loader keeps
//! them in document order as a closed [`PropertyValue`] union; callers read them through the typed
//! getters on [`PropertyBag`], which return `None` when the name is absent (or present with a
//! different type) so each field can apply its own default.

/// One property value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PropertyValue {
    /// `<BoundPropertyBool>`
    Bool(bool),
    /// `<BoundPropertyInt>`
    Int(i64),
    /// `<BoundPropertyFloat>`
    Float(f64),
    /// `<BoundPropertyString>`
    String(String),
    /// `<BoundPropertyFloatSet>`, element order preserved.
    FloatSet(Vec<f64>),
    /// `<BoundPropertyStringSet>`, element order preserved.
    StringSet(Vec<String>),
}

impl PropertyValue {
    /// Short type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::FloatSet(_) => "float set",
            Self::StringSet(_) => "string set",
        }
    }
}

/// Ordered collection of named properties.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropertyBag {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyBag {
    /// Empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property. Duplicates are kept; lookups see the first one.
    pub fn push(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.entries.push((name.into(), value));
    }

    /// Builder form of [`PropertyBag::push`].
    pub fn with(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.push(name, value);
        self
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when the bag has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// First property with exactly `name`, whatever its type.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// First bool property named `name`.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.find_typed(name, |v| match v {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        })
    }

    /// First int property named `name`.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.find_typed(name, |v| match v {
            PropertyValue::Int(i) => Some(*i),
            _ => None,
        })
    }

    /// First float property named `name`.
    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.find_typed(name, |v| match v {
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        })
    }

    /// First string property named `name`.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.find_typed(name, |v| match v {
            PropertyValue::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// First float-set property named `name`.
    pub fn get_float_set(&self, name: &str) -> Option<&[f64]> {
        self.find_typed(name, |v| match v {
            PropertyValue::FloatSet(s) => Some(s.as_slice()),
            _ => None,
        })
    }

    /// First string-set property named `name`.
    pub fn get_string_set(&self, name: &str) -> Option<&[String]> {
        self.find_typed(name, |v| match v {
            PropertyValue::StringSet(s) => Some(s.as_slice()),
            _ => None,
        })
    }

    /// Names that occur more than once, in first-occurrence order.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for (i, (k, _)) in self.entries.iter().enumerate() {
            let first = self.entries[..i].iter().all(|(prev, _)| prev != k);
            let repeated = self.entries[i + 1..].iter().any(|(next, _)| next == k);
            if first && repeated {
                out.push(k.as_str());
            }
        }
        out
    }

    // First entry with this name *and* the requested type.
    fn find_typed<'a, T>(
        &'a self,
        name: &str,
        pick: impl Fn(&'a PropertyValue) -> Option<T>,
    ) -> Option<T> {
        self.entries
            .iter()
            .filter(|(k, _)| k == name)
            .find_map(|(_, v)| pick(v))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/props.rs"]
mod tests;
