// fieldtag - declarative field validation driven by rule tags
//
// Structs describe their constraints inline, e.g. `#[tag(valid = "nonzero;max=24")]`,
// and a `Validator` checks every tagged field, reporting the first failing
// rule per field.

// Lets the derive's `::fieldtag::` paths resolve inside this crate's own tests
extern crate self as fieldtag;

// Re-export the validation engine
pub use fieldtag_validation::*;

// Re-export the derive macro
#[cfg(feature = "derive")]
pub use fieldtag_macro::Record;

// Process-wide default validator operations
pub use fieldtag_validation::global::{
    register_rule, remove_rule, reset, set_overrides, set_rule, set_tag_name, validate,
    with_default,
};

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ErrorOverride,
        FieldError,
        Inspect,
        Kind,
        Record,
        RuleFn,
        ValidateError,
        ValidationError,
        ValidationErrors,
        Validator,
        ValidatorBuilder,
        ValidatorConfig,
        Value,
    };
}
