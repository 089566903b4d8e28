// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Name conversions between Rust identifiers and wire names.
//!
//! Wire names follow serde's `rename_all` conventions, so that the names in
//! the generated descriptors are exactly the keys serde reads and writes.
//!
//! | Rule | `date_of_birth` becomes |
//! |------|-------------------------|
//! | `lowercase` / `snake_case` | `date_of_birth` |
//! | `UPPERCASE` / `SCREAMING_SNAKE_CASE` | `DATE_OF_BIRTH` |
//! | `camelCase` | `dateOfBirth` |
//! | `PascalCase` | `DateOfBirth` |
//! | `kebab-case` | `date-of-birth` |
//! | `SCREAMING-KEBAB-CASE` | `DATE-OF-BIRTH` |

use convert_case::{Case, Casing};
use proc_macro2::Span;
use syn::{Ident, ext::IdentExt};

/// Container-level renaming rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenameRule {
    /// Keep the Rust field name.
    #[default]
    None,
    Lower,
    Upper,
    Camel,
    Pascal,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab
}

impl RenameRule {
    /// Parse a serde rule name.
    ///
    /// # Errors
    ///
    /// Returns an error spanned at `span` for unknown rule names.
    pub fn parse(rule: &str, span: Span) -> syn::Result<Self> {
        Ok(match rule {
            "lowercase" => Self::Lower,
            "UPPERCASE" => Self::Upper,
            "camelCase" => Self::Camel,
            "PascalCase" => Self::Pascal,
            "snake_case" => Self::Snake,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnake,
            "kebab-case" => Self::Kebab,
            "SCREAMING-KEBAB-CASE" => Self::ScreamingKebab,
            other => {
                return Err(syn::Error::new(
                    span,
                    format!("unknown rename rule `{other}`")
                ));
            }
        })
    }

    /// Apply the rule to a snake_case field name.
    #[must_use]
    pub fn apply(&self, field: &str) -> String {
        match self {
            Self::None | Self::Lower | Self::Snake => field.to_string(),
            Self::Upper | Self::ScreamingSnake => field.to_uppercase(),
            Self::Camel => field.to_case(Case::Camel),
            Self::Pascal => field.to_case(Case::Pascal),
            Self::Kebab => field.to_case(Case::Kebab),
            Self::ScreamingKebab => field.to_case(Case::Kebab).to_uppercase()
        }
    }
}

/// Field name without the `r#` prefix of raw identifiers.
#[must_use]
pub fn field_name(ident: &Ident) -> String {
    ident.unraw().to_string()
}

/// Variant identifier of the generated field enum (`date_of_birth` →
/// `DateOfBirth`).
#[must_use]
pub fn variant_ident(ident: &Ident) -> Ident {
    Ident::new(&field_name(ident).to_case(Case::Pascal), ident.span())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_rule_names() {
        let span = Span::call_site();
        assert_eq!(RenameRule::parse("camelCase", span).unwrap(), RenameRule::Camel);
        assert_eq!(
            RenameRule::parse("SCREAMING-KEBAB-CASE", span).unwrap(),
            RenameRule::ScreamingKebab
        );
        assert!(RenameRule::parse("Camel", span).is_err());
    }

    #[test]
    fn apply_rules() {
        assert_eq!(RenameRule::None.apply("date_of_birth"), "date_of_birth");
        assert_eq!(RenameRule::Camel.apply("date_of_birth"), "dateOfBirth");
        assert_eq!(RenameRule::Pascal.apply("date_of_birth"), "DateOfBirth");
        assert_eq!(RenameRule::Kebab.apply("date_of_birth"), "date-of-birth");
        assert_eq!(RenameRule::ScreamingSnake.apply("date_of_birth"), "DATE_OF_BIRTH");
        assert_eq!(RenameRule::ScreamingKebab.apply("date_of_birth"), "DATE-OF-BIRTH");
        assert_eq!(RenameRule::Camel.apply("id"), "id");
    }

    #[test]
    fn raw_identifiers_are_unprefixed() {
        let ident: Ident = syn::parse_quote!(r#type);
        assert_eq!(field_name(&ident), "type");
        assert_eq!(variant_ident(&ident).to_string(), "Type");
    }

    #[test]
    fn variant_is_pascal_case() {
        let ident: Ident = syn::parse_quote!(display_name);
        assert_eq!(variant_ident(&ident).to_string(), "DisplayName");
    }
}
