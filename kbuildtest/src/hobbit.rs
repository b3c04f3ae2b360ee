use std::fmt;

use kbuilder::Builder;

#[derive(Builder, Debug, PartialEq, Eq)]
pub struct Hobbit {
    #[into]
    pub name: String,
    pub age: i32,
    #[into]
    pub pet: Option<String>,
}

impl fmt::Display for Hobbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hobbit(name={}, age={}, pet=", self.name, self.age)?;
        match &self.pet {
            Some(pet) => write!(f, "{})", pet),
            None => f.write_str("null)"),
        }
    }
}

pub fn smoke_lines() -> Vec<String> {
    let bilbo = HobbitBuilder::builder().name("Bilbo").age(201).build();

    vec![bilbo.to_string()]
}
