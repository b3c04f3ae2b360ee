//! Records constructed through `kbuilder`'s derive, one per kind of field it supports.

pub mod address;
pub mod hobbit;
pub mod orc;
