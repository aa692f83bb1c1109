//! Mapping between JSON and `Protein` for the API.
//!
//! Outbound, a `Protein` serializes field-for-field. Inbound, request bodies
//! are validated here into `NewProtein` / `ProteinChanges`. `id`,
//! `created_at` and `updated_at` are server-controlled and ignored on input,
//! as are unknown keys. All field errors are collected before returning.

use openpip_common::{ApiError, FieldErrors};
use openpip_db::schema::{
    NewProtein, ProteinChanges, ENSEMBL_ID_MAX_LEN, ENTREZ_ID_MAX_LEN, GENE_NAME_MAX_LEN,
    PROTEIN_NAME_MAX_LEN, UNIPROT_ID_MAX_LEN,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_NULL: &str = "This field may not be null.";
pub const MSG_NOT_STRING: &str = "Not a valid string.";

/// A writable column and its input rules.
#[derive(Debug, Clone, Copy)]
struct WritableField {
    name: &'static str,
    required: bool,
    max_len: Option<usize>,
}

const WRITABLE_FIELDS: [WritableField; 7] = [
    WritableField { name: "gene_name", required: true, max_len: Some(GENE_NAME_MAX_LEN) },
    WritableField { name: "protein_name", required: false, max_len: Some(PROTEIN_NAME_MAX_LEN) },
    WritableField { name: "uniprot_id", required: true, max_len: Some(UNIPROT_ID_MAX_LEN) },
    WritableField { name: "ensembl_id", required: false, max_len: Some(ENSEMBL_ID_MAX_LEN) },
    WritableField { name: "entrez_id", required: false, max_len: Some(ENTREZ_ID_MAX_LEN) },
    WritableField { name: "description", required: false, max_len: None },
    WritableField { name: "sequence", required: false, max_len: None },
];

/// How much of the body must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// POST and PUT: required fields must be present.
    Full,
    /// PATCH: only the fields present are validated.
    Partial,
}

/// Validate a create payload. Optional fields default to the empty string.
pub fn parse_new_protein(body: &Value) -> Result<NewProtein, ApiError> {
    let mut values = validate(body, Mode::Full)?;
    let mut take = |name: &str| values.remove(name).unwrap_or_default();
    Ok(NewProtein {
        gene_name: take("gene_name"),
        protein_name: take("protein_name"),
        uniprot_id: take("uniprot_id"),
        ensembl_id: take("ensembl_id"),
        entrez_id: take("entrez_id"),
        description: take("description"),
        sequence: take("sequence"),
    })
}

/// Validate an update payload. Absent fields are left unchanged.
pub fn parse_changes(body: &Value, mode: Mode) -> Result<ProteinChanges, ApiError> {
    let mut values = validate(body, mode)?;
    Ok(ProteinChanges {
        gene_name: values.remove("gene_name"),
        protein_name: values.remove("protein_name"),
        uniprot_id: values.remove("uniprot_id"),
        ensembl_id: values.remove("ensembl_id"),
        entrez_id: values.remove("entrez_id"),
        description: values.remove("description"),
        sequence: values.remove("sequence"),
    })
}

/// Check every writable field of `body`, returning the cleaned values of
/// those present.
fn validate(body: &Value, mode: Mode) -> Result<HashMap<&'static str, String>, ApiError> {
    let object = as_object(body)?;
    let mut errors = FieldErrors::new();
    let mut values = HashMap::new();

    for field in &WRITABLE_FIELDS {
        match object.get(field.name) {
            None => {
                if field.required && mode == Mode::Full {
                    errors.add(field.name, MSG_REQUIRED);
                }
            }
            Some(raw) => match clean_field(field, raw) {
                Ok(value) => {
                    values.insert(field.name, value);
                }
                Err(message) => errors.add(field.name, message),
            },
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(ApiError::Validation(errors))
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ApiError> {
    body.as_object().ok_or_else(|| {
        ApiError::Validation(FieldErrors::single(
            "non_field_errors",
            format!("Invalid data. Expected a dictionary, but got {}.", json_kind(body)),
        ))
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Coerce one value to a trimmed string and apply the field's limits.
fn clean_field(field: &WritableField, raw: &Value) -> Result<String, String> {
    let text = match raw {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => return Err(MSG_NULL.to_string()),
        _ => return Err(MSG_NOT_STRING.to_string()),
    };

    if field.required && text.is_empty() {
        return Err(MSG_BLANK.to_string());
    }
    if let Some(max) = field.max_len {
        if text.chars().count() > max {
            return Err(format!("Ensure this field has no more than {} characters.", max));
        }
    }
    Ok(text)
}
