//! Tag-driven field validation engine for fieldtag
//!
//! Records expose their fields together with compact tag strings such as
//! `nonzero;len=7;max=24`. The engine parses each tag into ordered rules,
//! resolves them in a rule registry and reports, per field, the first rule
//! that failed.
//!
//! # Examples
//!
//! ## Validating a Record
//!
//! ```
//! use fieldtag_validation::{Field, FieldError, Inspect, Record, Validator, Value};
//!
//! struct User {
//!     name: String,
//!     age: u8,
//!     nickname: Option<String>,
//! }
//!
//! impl Record for User {
//!     fn fields(&self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new("Name", &[("valid", "nonzero;max=16")], self.name.to_value()),
//!             Field::new("Age", &[("valid", "min=18")], self.age.to_value()),
//!             Field::new("Nickname", &[("valid", "len=3")], self.nickname.to_value()),
//!         ]
//!     }
//! }
//!
//! impl Inspect for User {
//!     fn to_value(&self) -> Value<'_> {
//!         Value::Struct(self)
//!     }
//! }
//!
//! let user = User { name: "".to_string(), age: 21, nickname: None };
//! let errors = Validator::new().validate(&user).unwrap();
//!
//! assert_eq!(errors.get("Name"), Some(&FieldError::ZeroValue));
//! assert!(!errors.contains("Age"));
//! assert!(!errors.contains("Nickname"));
//! ```
//!
//! ## Custom Rules and Messages
//!
//! ```
//! use fieldtag_validation::{FieldError, Validator};
//!
//! let validator = Validator::builder()
//!     .rule("even", |value, _param| match value.as_i64() {
//!         Some(n) if n % 2 == 0 => Ok(()),
//!         _ => Err(FieldError::custom("must be even")),
//!     })
//!     .override_message("Age", "max", "age must be less than %v")
//!     .build();
//!
//! assert!(validator.rules().contains("even"));
//! ```
//!
//! ## Tag Syntax
//!
//! ```
//! use fieldtag_validation::tag;
//!
//! let rules = tag::parse("nonzero; len=7 ;;regex=^[a-z]+$");
//! assert_eq!(rules.len(), 3);
//! assert_eq!(rules[1].name, "len");
//! assert_eq!(rules[1].param, "7");
//! ```

mod config;
mod engine;
mod errors;
mod overrides;
mod rules;
mod traits;
mod value;

pub mod global;
pub mod params;
pub mod tag;
pub mod validators;

pub use config::*;
pub use engine::*;
pub use errors::*;
pub use overrides::*;
pub use rules::*;
pub use traits::*;
pub use value::*;

// Serializes tests touching the default instance or the environment
#[cfg(test)]
static TEST_LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());
