use dynarray::DynamicArray;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Tracked(usize, Arc<AtomicUsize>);

impl Drop for Tracked {
    fn drop(&mut self) {
        println!("Dropping element {}", self.0);
        self.1.fetch_add(1, Ordering::SeqCst);
    }
}

fn main() {
    println!("--- Error Results & RAII Example ---");
    let drop_count = Arc::new(AtomicUsize::new(0));

    {
        let mut arr = DynamicArray::new();
        for i in 0..3 {
            arr.push(Tracked(i, drop_count.clone())).expect("push failed");
        }
        println!("Array created with 3 elements.");

        // Out-of-range operations report an error and leave the array alone
        if let Err(err) = arr.remove(10) {
            println!("remove(10): {}", err);
        }
        if let Err(err) = arr.try_reserve(usize::MAX) {
            println!("try_reserve(usize::MAX): {}", err);
        }
        println!("Still {} elements, capacity {}.", arr.len(), arr.capacity());
        // Scope ends here, arr is dropped
    }

    println!("Total elements dropped: {}", drop_count.load(Ordering::SeqCst));
    assert_eq!(drop_count.load(Ordering::SeqCst), 3);
}
