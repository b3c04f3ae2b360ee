use kbuilder::{Buildable, Builder};

#[derive(Builder)]
struct Foo<'a, T: std::fmt::Debug> {
    bar: &'a T,
    #[default(42)]
    baz: i32,
}

#[derive(Builder)]
struct Grid<T, const N: usize>
where
    T: Copy + Default,
{
    cells: [T; N],
    label: Option<&'static str>,
}

#[derive(Builder)]
struct Empty {}

fn main() {
    let foo: Foo<_> = Foo::builder().bar(&()).baz(2).build();
    assert_eq!(foo.baz, 2);
    let foo = Foo::builder().bar(&1).build();
    assert_eq!((*foo.bar, foo.baz), (1, 42));

    let grid = Grid::builder().label("zeros").cells([0u8; 4]).build();
    assert_eq!(grid.cells.len(), 4);
    assert_eq!(grid.label, Some("zeros"));
    let grid = Grid::<u16, 2>::builder().cells([7, 7]).build();
    assert_eq!(grid.label, None);

    let Empty {} = Empty::builder().build();
}
