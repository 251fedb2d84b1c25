//! Serializable form description for rendering
//!
//! [`Form::to_metadata`](crate::Form::to_metadata) flattens a form into plain
//! data that a template or client-side renderer can consume. When
//! anti-forgery is enabled the hidden token input comes first, carrying a
//! freshly issued token.

use crate::field::{Field, FieldType, FieldValue};
use serde::{Deserialize, Serialize};

/// Hidden input carrying the anti-forgery token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenField {
	pub name: String,
	#[serde(rename = "type")]
	pub input_type: String,
	pub value: String,
}

impl HiddenField {
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			input_type: "hidden".to_string(),
			value: value.into(),
		}
	}
}

/// Rendering view of one [`Field`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMetadata {
	pub name: String,
	pub label: String,
	pub placeholder: String,
	#[serde(rename = "type")]
	pub field_type: FieldType,
	pub required: bool,
	#[serde(rename = "maxlength", skip_serializing_if = "Option::is_none")]
	pub max_length: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub value: Option<FieldValue>,
}

impl From<&Field> for FieldMetadata {
	fn from(field: &Field) -> Self {
		Self {
			name: field.name.clone(),
			label: field.label.clone(),
			placeholder: field.placeholder.clone(),
			field_type: field.field_type,
			required: field.required,
			max_length: field.max_length.filter(|_| field.field_type.is_text_like()),
			min: field.min.filter(|_| field.field_type == FieldType::Number),
			max: field.max.filter(|_| field.field_type == FieldType::Number),
			value: field.value.clone(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormMetadata {
	pub name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub token: Option<HiddenField>,
	pub fields: Vec<FieldMetadata>,
}
