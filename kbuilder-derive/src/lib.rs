#[macro_use]
extern crate quote;

mod expand;
mod field;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives a typestate builder, `<Type>Builder`, and an implementation of `kbuilder::Buildable`.
///
/// Field attributes:
///
/// - `#[default]` / `#[default(expr)]`: the field may be left unset.
/// - `#[not_null]`: on an `Option<T>` field, require it to be set. The setter takes `T`.
/// - `#[into]`: the setter takes `impl Into<T>`.
///
/// `Option<T>` fields without attributes start out as `None` and their setter takes `T`.
#[proc_macro_derive(Builder, attributes(default, not_null, into))]
pub fn derive_builder(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand::derive(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
