use thiserror::Error;

/// Errors that can occur while reconstructing a document from its JSON form.
///
/// Parsing HTML itself cannot fail: per the HTML5 spec, any byte stream produces *some*
/// valid tree, so [`crate::parse`] is infallible. Every variant here instead comes from
/// [`crate::Document::new_from_json`], where the input is attacker- or user-supplied JSON
/// rather than a tree the HTML collaborator has already normalised.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse document JSON")]
    InvalidJson(#[from] serde_json::Error),

    #[error("item JSON was missing a non-empty `type` array")]
    MissingTypes,
}
