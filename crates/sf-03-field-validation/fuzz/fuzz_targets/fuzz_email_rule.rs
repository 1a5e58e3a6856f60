//! Fuzz target for the email rule.
//!
//! Typed input reaches this rule on every keystroke, so it must hold up
//! against any string.
//!
//! ## Running
//!
//! ```bash
//! cd crates/sf-03-field-validation
//! cargo +nightly fuzz run fuzz_email_rule
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use sf_03_field_validation::rules;

fuzz_target!(|input: &str| {
    // Must never panic, whatever the input
    let result = rules::email(input);

    // Deterministic
    assert_eq!(result, rules::email(input));

    // Every suggestion is itself a well-formed address
    for suggestion in &result.suggestions {
        assert!(rules::email(suggestion).valid, "bad suggestion {suggestion:?}");
    }

    // A hint on a valid address always names the suggestion
    if result.valid && result.has_suggestions() {
        assert!(result.message.is_some());
    }
});
