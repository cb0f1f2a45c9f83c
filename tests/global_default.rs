//! Process-wide default validator.
//!
//! Everything runs inside a single test so no other test in this binary
//! observes the intermediate configurations.

use fieldtag::{ErrorOverride, FieldError, Record};

#[derive(Record)]
struct Account {
    #[tag(valid = "nonzero;max=24", rules = "min=100")]
    age: i32,
    #[tag(valid = "nonzero;even")]
    seats: u32,
}

#[test]
fn test_default_validator_configuration_lifecycle() {
    fieldtag::reset();

    let account = Account { age: 27, seats: 3 };

    let errors = fieldtag::validate(&account).unwrap();
    assert_eq!(errors.get("age"), Some(&FieldError::Max));
    assert!(!errors.contains("seats"));

    // custom rule
    fieldtag::set_rule("even", |value, _param| match value.as_u64() {
        Some(n) if n % 2 == 0 => Ok(()),
        _ => Err(FieldError::custom("must be even")),
    });
    let errors = fieldtag::validate(&account).unwrap();
    assert_eq!(errors.get("seats"), Some(&FieldError::custom("must be even")));

    // later overrides for the same key win
    fieldtag::set_overrides(vec![
        ErrorOverride::new("age", "max", "too old"),
        ErrorOverride::new("age", "max", "age must be less than %v"),
    ]);
    let errors = fieldtag::validate(&account).unwrap();
    assert_eq!(
        errors.entry("age").unwrap().message(),
        "age must be less than 24"
    );

    // removing a rule makes it fail open
    assert!(fieldtag::remove_rule("even"));
    fieldtag::register_rule("max", None);
    let errors = fieldtag::validate(&account).unwrap();
    assert!(errors.is_empty());

    // empty tag names are ignored
    fieldtag::set_tag_name("");
    fieldtag::with_default(|validator| assert_eq!(validator.tag_name(), "valid"));

    fieldtag::set_tag_name("rules");
    let errors = fieldtag::validate(&account).unwrap();
    assert_eq!(errors.get("age"), Some(&FieldError::Min));
    assert!(!errors.contains("seats"));

    fieldtag::reset();
    fieldtag::with_default(|validator| {
        assert_eq!(validator.tag_name(), "valid");
        assert!(validator.rules().contains("max"));
        assert!(!validator.rules().contains("even"));
        assert!(validator.overrides().is_empty());
    });
}
