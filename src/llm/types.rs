//! Provider-neutral description of a structured response.

/// A single string property of an object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
    pub name: String,
    /// Allowed values, if the property is an enumeration.
    pub allowed_values: Option<Vec<String>>,
    pub required: bool,
}

/// Schema of a JSON object the model must return.
///
/// Property order is preserved and forwarded to providers that support an
/// explicit ordering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseSchema {
    pub properties: Vec<PropertySchema>,
}

impl ResponseSchema {
    pub fn object() -> Self {
        Self::default()
    }

    pub fn string(mut self, name: impl Into<String>, required: bool) -> Self {
        self.properties.push(PropertySchema {
            name: name.into(),
            allowed_values: None,
            required,
        });
        self
    }

    pub fn string_enum<I, S>(mut self, name: impl Into<String>, values: I, required: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties.push(PropertySchema {
            name: name.into(),
            allowed_values: Some(values.into_iter().map(Into::into).collect()),
            required,
        });
        self
    }

    pub fn required_names(&self) -> Vec<String> {
        self.properties
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.clone())
            .collect()
    }
}
