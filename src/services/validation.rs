use crate::errors::ToolError;
use crate::services::qiita_client::{ItemId, Tag};
use serde_json::Value;
use std::num::NonZeroU32;

/// Turns raw tool arguments into typed values. Schema validation runs first;
/// these checks cover what JSON Schema cannot express and keep handlers safe
/// when called directly.
#[derive(Clone)]
pub struct Validation;

impl Validation {
    pub fn new() -> Self {
        Self
    }

    pub fn ensure_string(
        &self,
        value: &Value,
        label: &str,
        trim: bool,
    ) -> Result<String, ToolError> {
        let text = value.as_str().ok_or_else(|| {
            ToolError::invalid_params(format!("{} must be a non-empty string", label))
        })?;
        let normalized = text.trim();
        if normalized.is_empty() {
            return Err(ToolError::invalid_params(format!(
                "{} must be a non-empty string",
                label
            )));
        }
        Ok(if trim {
            normalized.to_string()
        } else {
            text.to_string()
        })
    }

    pub fn ensure_optional_string(
        &self,
        value: Option<&Value>,
        label: &str,
        trim: bool,
    ) -> Result<Option<String>, ToolError> {
        match value {
            None => Ok(None),
            Some(val) if val.is_null() => Ok(None),
            Some(val) => self.ensure_string(val, label, trim).map(Some),
        }
    }

    /// Any string, including an empty one. Article bodies may be blank.
    pub fn ensure_text(&self, value: Option<&Value>, label: &str) -> Result<String, ToolError> {
        value
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| ToolError::invalid_params(format!("{} must be a string", label)))
    }

    pub fn ensure_optional_bool(
        &self,
        value: Option<&Value>,
        label: &str,
    ) -> Result<Option<bool>, ToolError> {
        match value {
            None => Ok(None),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(flag)) => Ok(Some(*flag)),
            Some(_) => Err(ToolError::invalid_params(format!(
                "{} must be a boolean",
                label
            ))),
        }
    }

    pub fn ensure_positive_int(
        &self,
        value: Option<&Value>,
        label: &str,
        fallback: u32,
        max: u32,
    ) -> Result<NonZeroU32, ToolError> {
        let out_of_range = || {
            ToolError::invalid_params(format!(
                "{} must be an integer between 1 and {}",
                label, max
            ))
        };
        let numeric = match value {
            None | Some(Value::Null) => fallback as u64,
            Some(val) => val.as_u64().ok_or_else(out_of_range)?,
        };
        if numeric > max as u64 {
            return Err(out_of_range());
        }
        NonZeroU32::new(numeric as u32).ok_or_else(out_of_range)
    }

    pub fn ensure_item_id(&self, value: Option<&Value>, label: &str) -> Result<ItemId, ToolError> {
        value
            .and_then(|v| v.as_str())
            .and_then(ItemId::parse)
            .ok_or_else(|| {
                ToolError::invalid_params(format!(
                    "{} must be a non-empty string without surrounding whitespace",
                    label
                ))
            })
    }

    pub fn ensure_tags(&self, value: Option<&Value>, label: &str) -> Result<Vec<Tag>, ToolError> {
        let raw = value.filter(|v| !v.is_null()).ok_or_else(|| {
            ToolError::invalid_params(format!("{} must be a non-empty array", label))
        })?;
        let tags: Vec<Tag> = serde_json::from_value(raw.clone()).map_err(|err| {
            ToolError::invalid_params(format!(
                "{} must be an array of {{ name, versions? }} objects: {}",
                label, err
            ))
        })?;
        if tags.is_empty() {
            return Err(ToolError::invalid_params(format!(
                "{} must be a non-empty array",
                label
            )));
        }
        let mut out = Vec::with_capacity(tags.len());
        for (idx, tag) in tags.into_iter().enumerate() {
            let name = tag.name.trim();
            if name.is_empty() {
                return Err(ToolError::invalid_params(format!(
                    "{}[{}].name must be a non-empty string",
                    label, idx
                )));
            }
            out.push(Tag {
                name: name.to_string(),
                versions: tag.versions,
            });
        }
        Ok(out)
    }

    pub fn ensure_optional_tags(
        &self,
        value: Option<&Value>,
        label: &str,
    ) -> Result<Option<Vec<Tag>>, ToolError> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.ensure_tags(value, label).map(Some),
        }
    }
}

impl Default for Validation {
    fn default() -> Self {
        Self::new()
    }
}
