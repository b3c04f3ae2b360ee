mod horde {
    use kbuilder::Builder;

    #[derive(Builder)]
    pub struct Orc {
        pub name: String,
        pub age: i32,
    }

    pub mod camp {
        use kbuilder::Builder;

        #[derive(Builder)]
        pub(crate) struct Tent {
            pub(crate) size: u8,
        }

        #[derive(Builder)]
        pub(super) struct Fire {
            pub(super) lit: bool,
        }
    }

    pub fn fire() -> bool {
        camp::FireBuilder::builder().lit(true).build().lit
    }
}

fn main() {
    let orc = horde::OrcBuilder::builder().name("Uruk".to_owned()).age(3).build();
    assert_eq!(orc.age, 3);
    let tent = horde::camp::TentBuilder::builder().size(2).build();
    assert_eq!(tent.size, 2);
    assert!(horde::fire());
}
