use thiserror::Error;

use crate::domain::metadata::MethodForm;

/// Precondition failures of the extractor.
///
/// Missing bodies, ambiguous names and unresolvable operands are not errors; they only
/// produce fewer edges. These variants mean the caller or the extractor itself is wrong.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// Accessor reconciliation was asked to run for a method form that has no name matcher.
    #[error("no property name matcher for method form {form:?} ({method})")]
    MissingMatchFunction { form: MethodForm, method: String },
}
