use dynarray::DynamicArray;

/// An inventory slot as the game keeps it: boxed, identified by `value`.
struct Item {
    value: i32,
    name: &'static str,
}

fn main() {
    println!("Initializing inventory...");
    let mut inventory: DynamicArray<Box<Item>> = DynamicArray::new();

    println!("Picking up items...");
    for (value, name) in [(3, "rope"), (7, "torch"), (11, "map"), (2, "bread"), (5, "key")] {
        inventory
            .push(Box::new(Item { value, name }))
            .expect("inventory allocation failed");
    }
    inventory
        .push_front(Box::new(Item { value: 1, name: "coin" }))
        .expect("inventory allocation failed");

    assert_eq!(inventory.len(), 6);
    println!("Inventory values:\n{}", inventory.rows_by_key(3, |item| item.value));

    println!("Looking up the torch...");
    let torch = inventory
        .search_by_key(&7, |item| item.value)
        .expect("torch should be in the inventory");
    println!("Slot {}: {}", torch, inventory[torch].name);

    println!("Using the torch (order does not matter)...");
    let used = inventory.swap_remove(torch).expect("torch slot is valid");
    println!("Used {}; slot {} now holds {}", used.name, torch, inventory[torch].name);
    assert_eq!(inventory.search_by_key(&7, |item| item.value), None);

    println!("Dropping out-of-range slot 42...");
    if let Err(err) = inventory.remove(42) {
        println!("Refused: {}", err);
    }

    println!("Emptying inventory...");
    while let Some(item) = inventory.pop_front() {
        print!("{} ", item.name);
    }
    println!("\nInventory empty.");

    assert!(inventory.is_empty());
    println!("Integration test passed successfully.");
}
