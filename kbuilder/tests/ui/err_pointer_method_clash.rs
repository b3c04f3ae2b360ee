use kbuilder::Builder;

#[derive(Builder)]
pub struct Gun {
    name: u8,
    ptr_name: u8,
}

fn main() {}
