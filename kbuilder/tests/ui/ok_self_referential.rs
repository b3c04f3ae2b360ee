use kbuilder::{Buildable, Builder};

#[derive(Builder)]
struct Node {
    value: i32,
    next: Option<Box<Self>>,
}

#[derive(Builder)]
struct Tree<T> {
    #[default]
    children: Vec<Self>,
    leaf: T,
}

fn main() {
    let tail = Node::builder().value(2).build();
    let head = Node::builder().value(1).next(Box::new(tail)).build();
    assert_eq!(head.value, 1);
    assert_eq!(head.next.map(|next| next.value), Some(2));

    let leaf = Tree::builder().leaf("b").build();
    let root = Tree::builder().children(vec![leaf]).leaf("a").build();
    assert_eq!(root.leaf, "a");
    assert_eq!(root.children[0].leaf, "b");
    assert!(root.children[0].children.is_empty());
}
