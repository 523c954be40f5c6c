use observekit::policy::lifo::BoundedStack;

fn main() {
    // An undo history that refuses to grow past two entries
    let undo: BoundedStack<&str> = BoundedStack::new(2);

    undo.on_pushed(|e| println!("pushed: {}", e.item));
    undo.on_popped(|e| println!("popped: {}", e.item));

    undo.push("type a");
    undo.push("type b");
    // Over the limit: the entry just pushed is popped straight back off
    undo.push("type c");

    while let Some(action) = undo.try_pop().into_value() {
        println!("undo {}", action);
    }
}
