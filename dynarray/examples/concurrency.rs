use dynarray::DynamicArray;
use std::sync::Mutex;
use std::thread;

fn main() {
    println!("--- Cross-thread Ownership Transfer Example ---");
    let mut arr = DynamicArray::new();
    for i in 0..10 {
        arr.push(i).expect("push failed");
    }

    println!("Original array (thread main): {:?}", arr);

    // Move ownership to another thread
    let handle = thread::spawn(move || {
        println!("Array in new thread: {:?}", arr);
        arr.push(100).expect("push failed");
        arr // Return ownership back
    });

    let arr = handle.join().unwrap();
    println!("Array back in main thread: {:?}", arr);

    // Shared mutation needs an external lock
    let shared = Mutex::new(arr);
    thread::scope(|s| {
        for t in 0..4 {
            let shared = &shared;
            s.spawn(move || {
                let mut arr = shared.lock().unwrap();
                arr.push_front(-t).expect("push_front failed");
            });
        }
    });
    let arr = shared.into_inner().unwrap();
    println!("After locked pushes: len {}, cap {}", arr.len(), arr.capacity());
}
