//! Macro for implementing Display and FromStr for vendor wire enums
//!
//! The provider encodes discriminators as fixed strings (`"BASE64"`,
//! `"IDCARD"`, `"front"`, `"spoofing"`). This macro keeps the mapping in one
//! place for both directions.
//!
//! # Example
//!
//! ```rust
//! use facelink_domain::impl_wire_str_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum QualityControl {
//!     Low,
//!     High,
//! }
//!
//! impl_wire_str_conversions!(QualityControl {
//!     Low => "LOW",
//!     High => "HIGH",
//! });
//!
//! assert_eq!(QualityControl::Low.as_str(), "LOW");
//! assert_eq!("high".parse::<QualityControl>().unwrap(), QualityControl::High);
//! ```

/// Implements `as_str`, Display and FromStr for wire enums
///
/// This macro generates:
/// - `as_str()`: the exact string sent to the provider
/// - Display trait: writes `as_str()`
/// - FromStr trait: parses case-insensitively back to the variant
#[macro_export]
macro_rules! impl_wire_str_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation expected by the provider.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = ::std::string::String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $(if s.eq_ignore_ascii_case($str) {
                    return ::std::result::Result::Ok(Self::$variant);
                })+
                ::std::result::Result::Err(::std::format!("Invalid {}: {}", ::std::stringify!($enum_name), s))
            }
        }
    };
}
