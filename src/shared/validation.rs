use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

lazy_static! {
    /// Characters that are not allowed in a stored file name
    /// - Kept: letters, digits, '.', '_' and '-'
    /// - Replaced: spaces, path separators, anything else
    pub static ref UNSAFE_FILE_NAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9._-]").unwrap();
}

/// Flatten field validation failures into `"<field>: <message>"` strings.
///
/// Fields are sorted by name so the output is stable across requests.
pub fn format_validation_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (field.to_string(), errs))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{}: failed on '{}'", field, err.code),
            })
        })
        .collect()
}

/// Rejects empty and whitespace-only strings
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Make an uploaded file name safe to embed in a storage key
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned = UNSAFE_FILE_NAME_CHARS.replace_all(base, "_");
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "avatar".to_string()
    } else {
        cleaned.to_string()
    }
}
