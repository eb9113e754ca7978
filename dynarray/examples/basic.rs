use dynarray::DynamicArray;

fn main() {
    println!("--- Basic Usage Example ---");
    let mut arr = DynamicArray::new();

    // Push elements, watching the capacity jump 4 -> 12 -> 28
    for i in 1..=14 {
        arr.push(i * 10).expect("push failed");
        println!("Pushed: {}, len: {}, cap: {}", i * 10, arr.len(), arr.capacity());
    }

    arr.push_front(0).expect("push_front failed");
    arr.insert_many(3, -1, 2).expect("insert_many failed");
    println!("Elements:\n{}", arr.rows(8));

    println!("Index of 70: {:?}", arr.search(&70));
    println!("Index of 75: {:?}", arr.search(&75));

    // Pop elements
    while let Some(val) = arr.pop() {
        println!("Popped: {}, len: {}, cap: {}", val, arr.len(), arr.capacity());
    }

    // Popping an empty array is a no-op
    assert_eq!(arr.pop(), None);
}
