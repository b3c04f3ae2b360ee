use std::fmt;

use kbuilder::Builder;

#[derive(Builder, Clone, Debug, PartialEq, Eq)]
pub struct Orc {
    #[into]
    name: String,
    age: i32,
}

impl Orc {
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Orc {
            name: name.into(),
            age,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }
}

impl fmt::Display for Orc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Orc(name={}, age={})", self.name, self.age)
    }
}

/// The lines printed by the `orc_test` binary.
pub fn smoke_lines() -> Vec<String> {
    let uruk = OrcBuilder::builder().name("Uruk").age(3).build();

    let vincent = OrcBuilder::builder().name("Vince").age(12).build();

    vec![format!("uruk: {}", uruk), format!("vincent: {}", vincent)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbuilder::Buildable;

    #[test]
    fn renders_name_and_age() {
        let orc = Orc::new("Uruk", 3);
        assert_eq!(orc.to_string(), "Orc(name=Uruk, age=3)");
        assert_eq!(Orc::new("Vince", 12).to_string(), "Orc(name=Vince, age=12)");
    }

    #[test]
    fn zero_and_negative_ages_are_not_special() {
        assert_eq!(Orc::new("Grishnákh", 0).to_string(), "Orc(name=Grishnákh, age=0)");
        assert_eq!(Orc::new("Ugluk", -7).to_string(), "Orc(name=Ugluk, age=-7)");
        assert_eq!(
            Orc::new("Azog", i32::MIN).to_string(),
            format!("Orc(name=Azog, age={})", i32::MIN)
        );
    }

    #[test]
    fn empty_name_renders_as_is() {
        assert_eq!(Orc::new("", 1).to_string(), "Orc(name=, age=1)");
    }

    #[test]
    fn rendering_depends_only_on_fields() {
        let a = Orc::builder().name("Uruk").age(3).build();
        let b = Orc::builder().age(3).name(String::from("Uruk")).build();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(a.to_string(), a.clone().to_string());
    }

    #[test]
    fn builder_matches_constructor() {
        let built = OrcBuilder::builder().name("Vince").age(12).build();
        assert_eq!(built, Orc::new("Vince", 12));
        assert_eq!(built.name(), "Vince");
        assert_eq!(built.age(), 12);
    }

    #[test]
    fn smoke_output() {
        assert_eq!(
            smoke_lines(),
            ["uruk: Orc(name=Uruk, age=3)", "vincent: Orc(name=Vince, age=12)"]
        );
    }
}
