use kbuilder::{Buildable, Builder};

#[derive(Builder)]
struct Orc {
    #[not_null]
    #[into]
    name: Option<String>,
    age: Option<i32>,
}

fn main() {
    let uruk = Orc::builder().name("Uruk").build();
    assert_eq!(uruk.name.as_deref(), Some("Uruk"));
    assert_eq!(uruk.age, None);

    let vince = OrcBuilder::builder().age(12).name("Vince").build();
    assert_eq!(vince.age, Some(12));
}
