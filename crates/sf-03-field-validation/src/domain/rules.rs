//! # Built-in Field Rules
//!
//! Pure validators for the fields a signing form typically carries. Each one
//! is a plain function (or returns a closure), so it can be handed straight to
//! a `ValidationEngine`.

use crate::domain::entities::ValidationResult;
use crate::ports::FieldValidator;

/// Mail providers recipients most often mistype.
const COMMON_EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "live.com",
    "icloud.com",
    "aol.com",
    "proton.me",
];

/// Largest edit distance still treated as a typo of a known domain.
const MAX_DOMAIN_DISTANCE: usize = 2;

pub const MAX_SIGNER_NAME_LENGTH: usize = 100;

/// Rejects empty and whitespace-only values.
pub fn required(value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        ValidationResult::invalid("This field is required")
    } else {
        ValidationResult::valid()
    }
}

/// Rejects values longer than `limit` characters (not bytes).
pub fn max_length(limit: usize) -> impl Fn(&str) -> ValidationResult + Send + Sync + Clone {
    move |value: &str| {
        if value.chars().count() > limit {
            ValidationResult::invalid(format!("Must be at most {limit} characters"))
        } else {
            ValidationResult::valid()
        }
    }
}

/// Syntactic email check with domain typo suggestions.
///
/// A well-formed address on a near-miss of a common provider
/// (`bob@gmial.com`) stays valid but carries the corrected address as a
/// suggestion; a malformed one (`bob@gmailcom`) is invalid and carries it too.
pub fn email(value: &str) -> ValidationResult {
    let value = value.trim();
    if value.is_empty() {
        return ValidationResult::invalid("Email address is required");
    }

    let Some((local, domain)) = value.rsplit_once('@') else {
        return ValidationResult::invalid("Email address must contain '@'");
    };
    if !is_valid_local_part(local) {
        return ValidationResult::invalid("Email address has an invalid name before '@'");
    }

    let suggestion = suggest_domain(domain).map(|known| format!("{local}@{known}"));

    if !is_valid_domain(domain) {
        let result = ValidationResult::invalid("Email address has an invalid domain");
        return match suggestion {
            Some(s) => result.with_suggestions([s]),
            None => result,
        };
    }

    match suggestion {
        Some(s) => ValidationResult::valid()
            .with_message(format!("Did you mean {s}?"))
            .with_suggestions([s]),
        None => ValidationResult::valid(),
    }
}

/// Name a signer types to adopt their signature.
///
/// Letters plus spaces, hyphens, apostrophes and periods. Stray whitespace is
/// accepted but the normalized name is offered as a suggestion.
pub fn signer_name(value: &str) -> ValidationResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return ValidationResult::invalid("Signer name is required");
    }
    if trimmed.chars().count() > MAX_SIGNER_NAME_LENGTH {
        return ValidationResult::invalid(format!(
            "Signer name must be at most {MAX_SIGNER_NAME_LENGTH} characters"
        ));
    }
    if let Some(bad) = trimmed
        .chars()
        .find(|c| !(c.is_alphabetic() || matches!(c, ' ' | '-' | '\'' | '.')))
    {
        return ValidationResult::invalid(format!("Signer name cannot contain '{bad}'"));
    }
    if !trimmed.chars().any(char::is_alphabetic) {
        return ValidationResult::invalid("Signer name must contain letters");
    }

    let normalized = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized != value {
        ValidationResult::valid().with_suggestions([normalized])
    } else {
        ValidationResult::valid()
    }
}

/// Runs `validators` in order and returns the first invalid result.
///
/// When all pass, the result is valid and collects the hints (first message,
/// all suggestions) the individual validators produced.
pub fn all_of(
    validators: Vec<Box<dyn FieldValidator>>,
) -> impl Fn(&str) -> ValidationResult + Send + Sync {
    move |value: &str| {
        let mut message = None;
        let mut suggestions = Vec::new();
        for validator in &validators {
            let result = validator.validate(value);
            if !result.valid {
                return result;
            }
            message = message.or(result.message);
            suggestions.extend(result.suggestions);
        }

        ValidationResult {
            valid: true,
            message,
            suggestions,
        }
    }
}

fn is_valid_local_part(local: &str) -> bool {
    !local.is_empty()
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && !local.chars().any(|c| c.is_whitespace() || c == '@')
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));
    labels_ok && tld_ok
}

fn suggest_domain(domain: &str) -> Option<&'static str> {
    let domain = domain.to_ascii_lowercase();
    if COMMON_EMAIL_DOMAINS.contains(&domain.as_str()) {
        return None;
    }
    COMMON_EMAIL_DOMAINS
        .iter()
        .map(|known| (strsim::levenshtein(&domain, known), *known))
        .filter(|(distance, _)| *distance <= MAX_DOMAIN_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, known)| known)
}
