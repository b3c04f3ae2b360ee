use kbuilder::{Buildable, Builder};

#[derive(Builder)]
#[allow(non_snake_case)]
struct Point {
    x: i32,
    _x: i32,
    pet_name: &'static str,
    petName: &'static str,
    __: u8,
    ___: u8,
}

fn main() {
    let p = Point::builder()
        ._x(2)
        .x(1)
        .petName("b")
        .pet_name("a")
        .___(4)
        .__(3)
        .build();
    assert_eq!((p.x, p._x), (1, 2));
    assert_eq!((p.pet_name, p.petName), ("a", "b"));
    assert_eq!((p.__, p.___), (3, 4));
}
