use kbuilder::{Buildable, Builder};

#[derive(Builder)]
struct Weapon {
    r#type: &'static str,
    edge_count: u8,
}

fn main() {
    let weapon = Weapon::builder().edge_count(2).r#type("scimitar").build();
    assert_eq!(weapon.r#type, "scimitar");
    assert_eq!(weapon.edge_count, 2);
}
