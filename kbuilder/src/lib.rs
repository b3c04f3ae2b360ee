//! Compile-time checked builders.
//!
//! `#[derive(Builder)]` generates a `<Type>Builder` with one setter per field. Which fields have
//! been set is tracked in the builder's type, so a missing required field is a type error rather
//! than a runtime one, and the builder is the same size as the value it builds.
//!
//! ```
//! use kbuilder::{Buildable, Builder};
//!
//! #[derive(Builder)]
//! struct Orc {
//!     #[into]
//!     name: String,
//!     age: i32,
//!     clan: Option<String>,
//! }
//!
//! fn main() {
//!     let uruk = OrcBuilder::builder().name("Uruk").age(3).build();
//!     assert_eq!((uruk.name.as_str(), uruk.age, uruk.clan), ("Uruk", 3, None));
//!
//!     // Setters can be called in any order, and `Option` fields can be skipped.
//!     let vince = Orc::builder().age(12).clan("Mordor".to_owned()).name("Vince").build();
//!     assert_eq!(vince.clan.as_deref(), Some("Mordor"));
//! }
//! ```
//!
//! Leaving out a required field means there is no `build()` to call:
//!
//! ```compile_fail,E0599
//! use kbuilder::{Buildable, Builder};
//!
//! #[derive(Builder)]
//! struct Orc {
//!     name: String,
//!     age: i32,
//! }
//!
//! fn main() {
//!     let _ = Orc::builder().age(3).build();
//! }
//! ```
//!
//! Setting a field twice doesn't compile either:
//!
//! ```compile_fail,E0599
//! use kbuilder::{Buildable, Builder};
//!
//! #[derive(Builder)]
//! struct Orc {
//!     name: String,
//!     age: i32,
//! }
//!
//! fn main() {
//!     let _ = Orc::builder().name("Uruk".to_owned()).age(3).age(4).build();
//! }
//! ```
//!
//! `#[not_null]` turns an `Option` field into a required one:
//!
//! ```compile_fail,E0599
//! use kbuilder::{Buildable, Builder};
//!
//! #[derive(Builder)]
//! struct Orc {
//!     #[not_null]
//!     name: Option<String>,
//!     age: i32,
//! }
//!
//! fn main() {
//!     let _ = Orc::builder().age(3).build();
//! }
//! ```
//!
//! Inputs the derive can't handle, such as tuple structs or `#[not_null]` on a field that isn't an
//! `Option`, are reported at the offending field or attribute.
pub use kbuilder_derive::Builder;

// Lets the derive's `::kbuilder` paths resolve in this crate's own tests.
extern crate self as kbuilder;

// NOTE: The generated `<Type>Builder::builder()` would do on its own, but going through a trait
// means `Type::builder()` still works when the type already has an inherent `builder` item.
pub trait Buildable {
    type Builder;
    #[must_use]
    fn builder() -> Self::Builder;
}
