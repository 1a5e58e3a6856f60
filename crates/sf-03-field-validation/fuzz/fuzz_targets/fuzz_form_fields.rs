//! Fuzz target for a signing form fed arbitrary field updates.
//!
//! ## Running
//!
//! ```bash
//! cd crates/sf-03-field-validation
//! cargo +nightly fuzz run fuzz_form_fields
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use sf_03_field_validation::{rules, FieldValidator, FormValidator};

const FIELDS: [&str; 3] = ["title", "signer_name", "signer_email"];

/// One field update.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzEdit {
    /// Index into `FIELDS`
    field: u8,
    value: String,
}

fuzz_target!(|edits: Vec<FuzzEdit>| {
    let title: Vec<Box<dyn FieldValidator>> =
        vec![Box::new(rules::required), Box::new(rules::max_length(200))];
    let form = FormValidator::new()
        .with_field(FIELDS[0], rules::all_of(title))
        .with_field(FIELDS[1], rules::signer_name)
        .with_field(FIELDS[2], rules::email);

    for edit in &edits {
        let field = FIELDS[usize::from(edit.field) % FIELDS.len()];
        let Ok(result) = form.validate_field(field, &edit.value) else {
            panic!("registered field {field} rejected");
        };

        // The held result is exactly the one just produced
        let held = form.result(field).ok().flatten();
        assert_eq!(held.as_deref(), Some(&*result));
    }

    // Form validity agrees with the per-field results
    let all_valid = FIELDS
        .iter()
        .all(|f| form.result(f).ok().flatten().is_some_and(|r| r.valid));
    assert_eq!(form.is_form_valid(), all_valid);
});
