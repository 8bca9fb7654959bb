//! # Entity Names
//!
//! Derives the lexical case forms of a user-typed entity name.
//!
//! An entity name must be strict PascalCase: one or more words, each a single
//! uppercase ASCII letter followed by one or more lowercase ASCII letters, with no
//! separators, digits or acronyms.
//!
//! | input         | pascal        | camel         | snake          |
//! |---------------|---------------|---------------|----------------|
//! | `Order`       | `Order`       | `order`       | `order`        |
//! | `UserProfile` | `UserProfile` | `userProfile` | `user_profile` |
//!
//! The snake form doubles as the generated module name and as the resource name
//! embedded in SQL and route paths.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ScaffoldError;

/// Strict PascalCase: `Order`, `UserProfile`; never `order`, `AB`, `User2Profile`.
static PASCAL_CASE_RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][a-z]+(?:[A-Z][a-z]+)*$").expect("PascalCase regex should be valid")
});

/// Any character followed by a capitalized word (`HTTPServer` → `HTTP_Server`).
static FIRST_CAP_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(.)([A-Z][a-z]+)").expect("first-cap boundary regex should be valid")
});

/// Lowercase letter or digit followed by an uppercase letter (`userId` → `user_Id`).
static ALL_CAP_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-z0-9])([A-Z])").expect("all-cap boundary regex should be valid")
});

/// An entity name together with its derived case forms.
///
/// Built only through [`EntityName::derive`], so every instance satisfies the
/// PascalCase invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityName {
    pascal: String,
    camel: String,
    snake: String,
}

impl EntityName {
    /// Validate `raw` and derive its Pascal, camel and snake forms.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidName`] when `raw` is not strict PascalCase.
    pub fn derive(raw: &str) -> Result<Self, ScaffoldError> {
        Self::validate(raw)?;
        Ok(EntityName {
            pascal: raw.to_string(),
            camel: to_camel_case(raw),
            snake: to_snake_case(raw),
        })
    }

    /// Check `raw` against the PascalCase rule without deriving anything.
    ///
    /// This is the validator handed to the interactive prompt.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidName`] when `raw` is not strict PascalCase.
    pub fn validate(raw: &str) -> Result<(), ScaffoldError> {
        if PASCAL_CASE_RULE.is_match(raw) {
            Ok(())
        } else {
            Err(ScaffoldError::InvalidName {
                name: raw.to_string(),
            })
        }
    }

    /// The name exactly as typed.
    #[must_use]
    pub fn pascal(&self) -> &str {
        &self.pascal
    }

    /// The name with its first character lower-cased.
    #[must_use]
    pub fn camel(&self) -> &str {
        &self.camel
    }

    /// The name split at word boundaries with underscores, fully lower-cased.
    #[must_use]
    pub fn snake(&self) -> &str {
        &self.snake
    }

    /// Number of capitalized words in the name.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.pascal.chars().filter(char::is_ascii_uppercase).count()
    }
}

/// Convert a PascalCase or camelCase string to snake_case.
///
/// Two boundary rules are applied in order, then the result is lower-cased:
/// 1. an underscore goes between any character and a following capitalized word
/// 2. an underscore goes between a lowercase letter or digit and a following uppercase letter
///
/// The second rule catches boundaries the first one consumed while scanning
/// (`AbCdEf` → `Ab_CdEf` → `Ab_Cd_Ef`). Input does not have to satisfy the
/// entity-name invariant:
///
/// ```rust
/// use scaffoldgen::names::to_snake_case;
///
/// assert_eq!(to_snake_case("UserProfile"), "user_profile");
/// assert_eq!(to_snake_case("HTTPServer"), "http_server");
/// assert_eq!(to_snake_case("order2Item"), "order2_item");
/// ```
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let snake = FIRST_CAP_BOUNDARY.replace_all(s, "${1}_${2}");
    let snake = ALL_CAP_BOUNDARY.replace_all(&snake, "${1}_${2}");
    snake.to_lowercase()
}

/// Lower-case the first character of `s`, leaving the remainder unchanged.
///
/// ```rust
/// use scaffoldgen::names::to_camel_case;
///
/// assert_eq!(to_camel_case("UserProfile"), "userProfile");
/// ```
#[must_use]
pub fn to_camel_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
