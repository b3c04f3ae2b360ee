use kbuilder::Builder;

#[derive(Builder)]
pub struct Orc(String, i32);

fn main() {}
