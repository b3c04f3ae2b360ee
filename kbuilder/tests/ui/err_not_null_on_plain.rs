use kbuilder::Builder;

#[derive(Builder)]
pub struct Orc {
    #[not_null]
    name: String,
}

fn main() {}
