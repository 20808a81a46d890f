//! Contains the serialization format of a token.
//!
//! Tokens only exist in the [`Compact`] form.

mod compact;

#[doc(inline)]
pub use self::compact::Compact;
