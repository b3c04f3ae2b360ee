use kbuilder::{Buildable, Builder};

#[derive(Debug, PartialEq)]
struct Pony;

#[derive(Builder)]
struct Hobbit {
    #[into]
    name: String,
    #[default(String::from("Shire"))]
    home: String,
    #[default]
    meals: Vec<&'static str>,
    #[default(Some(Pony))]
    pet: Option<Pony>,
}

fn main() {
    let sam = Hobbit::builder().name("Sam").build();
    assert_eq!(sam.name, "Sam");
    assert_eq!(sam.home, "Shire");
    assert!(sam.meals.is_empty());
    assert_eq!(sam.pet, Some(Pony));

    let frodo = Hobbit::builder()
        .home(String::from("Bag End"))
        .meals(vec!["second breakfast"])
        .pet(None)
        .name(String::from("Frodo"))
        .build();
    assert_eq!(frodo.home, "Bag End");
    assert_eq!(frodo.meals, ["second breakfast"]);
    assert_eq!(frodo.pet, None);
}
