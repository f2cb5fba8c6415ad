//! String newtypes for the parts of a cart line's identity.
//!
//! Use the `define_key!` macro to create type-safe wrappers so a product ID
//! can never be passed where a size is expected (both are plain strings on
//! the wire).

/// Errors that can occur when parsing a key from user input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The input was empty or whitespace only.
    #[error("{kind} cannot be empty")]
    Empty {
        /// Which key type was being parsed.
        kind: &'static str,
    },
}

/// Macro to define a type-safe string key wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `new()` for trusted values, `parse()` for user input (rejects empty)
/// - `as_str()`, `Display`, and `From<&str>`/`From<String>`
///
/// # Example
///
/// ```rust
/// # use silver_saints_core::define_key;
/// define_key!(ProductId, "product id");
/// define_key!(Size, "size");
///
/// let product = ProductId::new("halo-tee");
/// let size = Size::new("M");
///
/// // These are different types, so this won't compile:
/// // let _: Size = product;
/// ```
#[macro_export]
macro_rules! define_key {
    ($name:ident, $kind:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a key from a trusted value without validation.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Parse a key from user input, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            /// Returns [`KeyError::Empty`] if the trimmed input is empty.
            pub fn parse(value: &str) -> Result<Self, $crate::KeyError> {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err($crate::KeyError::Empty { kind: $kind });
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Returns the key as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_key!(ProductId, "product id");
define_key!(Size, "size");
