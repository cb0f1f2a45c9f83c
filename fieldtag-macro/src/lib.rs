// Procedural macros for fieldtag
// Generates `Record` and `Inspect` implementations from tagged struct fields

use proc_macro::TokenStream;

mod record;

/// Derives `Record` and `Inspect` for a struct.
///
/// Rules are attached with `#[tag(key = "rules")]`; a field may carry
/// tags under several keys and the validator reads the one matching its
/// configured tag name (`valid` by default).
///
/// ```ignore
/// #[derive(Record)]
/// struct User {
///     #[tag(valid = "nonzero;len=7")]
///     name: String,
///     #[tag(valid = "nonzero;max=24")]
///     age: u32,
///     #[tag(valid = "min=1")]
///     pics: Vec<String>,
/// }
/// ```
///
/// Fields without any `#[tag]` attribute are listed but never inspected,
/// so their types need not implement `Inspect`.
#[proc_macro_derive(Record, attributes(tag))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    record::record_derive_impl(input)
}
