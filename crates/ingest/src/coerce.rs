use std::str::FromStr;

/// A single field failed conversion to its typed form.
///
/// Callers on the MOSMIX path turn this into a null field rather than
/// aborting the record.
#[derive(Debug, thiserror::Error)]
#[error("field {field}: cannot coerce {raw:?}")]
pub struct CoercionError {
    pub field: &'static str,
    pub raw: String,
}

/// Convert one raw field to its typed form, trimming surrounding
/// whitespace first.
pub fn coerce<T: FromStr>(field: &'static str, raw: &str) -> Result<T, CoercionError> {
    raw.trim().parse::<T>().map_err(|_| CoercionError {
        field,
        raw: raw.to_owned(),
    })
}
