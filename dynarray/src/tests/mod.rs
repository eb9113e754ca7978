use super::*;
use crossbeam::scope;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn filled(values: &[i32]) -> DynamicArray<i32> {
    let mut v = DynamicArray::new();
    for &x in values {
        v.push(x).unwrap();
    }
    v
}

#[derive(Clone)]
struct Droppable(Arc<AtomicUsize>);

impl Drop for Droppable {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_basic_push_pop() {
    let mut v = DynamicArray::new();
    v.push(1).unwrap();
    v.push(2).unwrap();
    v.push(3).unwrap();
    assert_eq!(v.len(), 3);
    assert_eq!(v[0], 1);
    assert_eq!(v[1], 2);
    assert_eq!(v[2], 3);
    assert_eq!(v.pop(), Some(3));
    assert_eq!(v.pop(), Some(2));
    assert_eq!(v.pop(), Some(1));
    assert_eq!(v.pop(), None);
    assert!(v.is_empty());
}

#[test]
fn test_new_has_default_capacity() {
    let v: DynamicArray<u8> = DynamicArray::new();
    assert_eq!(v.capacity(), DEFAULT_CAPACITY);
    assert_eq!(v.len(), 0);
    assert!(v.get(0).is_none());
    assert!(v.last().is_none());
}

#[test]
fn test_zero_capacity_rejected() {
    let err = DynamicArray::<i32>::try_with_capacity(0).unwrap_err();
    assert_eq!(err, ArrayError::ZeroCapacity);
}

#[test]
fn test_huge_capacity_reports_error() {
    let err = DynamicArray::<u64>::try_with_capacity(usize::MAX).unwrap_err();
    assert_eq!(err, ArrayError::CapacityOverflow);

    // isize::MAX 字节是合法的 Layout，但没有分配器能满足
    let err = DynamicArray::<u8>::try_with_capacity(isize::MAX as usize).unwrap_err();
    assert_eq!(err, ArrayError::AllocationFailed { capacity: isize::MAX as usize });
}

#[test]
fn test_growth_policy() {
    let mut v = DynamicArray::with_capacity(4);
    for i in 1..=4 {
        v.push(i).unwrap();
    }
    assert_eq!(v.capacity(), 4);

    // need 5 -> 取偶 6 -> 翻倍 12
    v.push(5).unwrap();
    assert_eq!(v.capacity(), 12);
    assert_eq!(v.len(), 5);
    assert_eq!(v.get(4), Some(&5));
    assert_eq!(v, [1, 2, 3, 4, 5]);

    let mut odd = DynamicArray::with_capacity(3);
    for i in 0..4 {
        odd.push(i).unwrap();
    }
    assert_eq!(odd.capacity(), 8);
}

#[test]
fn test_growth_from_single_slot() {
    let mut v = DynamicArray::with_capacity(1);
    let mut last_cap = v.capacity();
    for i in 0..100 {
        v.push(i).unwrap();
        assert!(v.capacity() >= v.len());
        assert!(v.capacity() >= last_cap);
        last_cap = v.capacity();
    }
    assert_eq!(v.iter().copied().collect::<Vec<_>>(), (0..100).collect::<Vec<_>>());
}

#[test]
fn test_shrink_policy() {
    let mut v = DynamicArray::new();
    for i in 0..32 {
        v.push(i).unwrap();
    }
    let grown = v.capacity();
    assert!(grown >= 32);

    while v.len() > 1 {
        v.pop();
        assert!(v.capacity() >= v.len());
    }
    assert!(v.capacity() < grown);
    assert!(v.capacity() >= DEFAULT_CAPACITY);

    v.pop();
    v.pop();
    assert_eq!(v.len(), 0);
    assert!(v.capacity() >= DEFAULT_CAPACITY);
}

#[test]
fn test_small_array_does_not_shrink() {
    let mut v = filled(&[1, 2, 3]);
    assert_eq!(v.capacity(), 4);
    v.pop();
    v.pop();
    v.pop();
    assert_eq!(v.capacity(), 4);
}

#[test]
fn test_pop_on_empty_keeps_state() {
    let mut v: DynamicArray<i32> = DynamicArray::new();
    assert_eq!(v.pop(), None);
    assert_eq!(v.pop_front(), None);
    assert_eq!(v.len(), 0);
    assert_eq!(v.capacity(), DEFAULT_CAPACITY);

    v.push(7).unwrap();
    assert_eq!(v, [7]);
}

#[test]
fn test_push_front_and_pop_front() {
    let mut v = DynamicArray::new();
    for i in 0..6 {
        v.push_front(i).unwrap();
    }
    assert_eq!(v, [5, 4, 3, 2, 1, 0]);
    assert_eq!(v.pop_front(), Some(5));
    assert_eq!(v.pop_front(), Some(4));
    assert_eq!(v, [3, 2, 1, 0]);
}

#[test]
fn test_insert_remove() {
    let mut v = DynamicArray::new();
    v.push(1).unwrap();
    v.push(3).unwrap();
    v.insert(1, 2).unwrap();
    assert_eq!(v.as_ref(), &[1, 2, 3]);
    v.insert(3, 4).unwrap();
    assert_eq!(v.as_ref(), &[1, 2, 3, 4]);
    assert_eq!(v.remove(1), Ok(2));
    assert_eq!(v.as_ref(), &[1, 3, 4]);
}

#[test]
fn test_insert_then_read_back() {
    let mut v = filled(&[10, 20, 30, 40, 50]);
    for i in 0..=v.len() {
        let mut copy = v.clone();
        let before = copy.len();
        copy.insert(i, 99).unwrap();
        assert_eq!(copy.get(i), Some(&99));
        assert_eq!(copy.len(), before + 1);
    }
    v.insert(5, 60).unwrap();
    assert_eq!(v.last(), Some(&60));
}

#[test]
fn test_out_of_range_insert() {
    let mut v = filled(&[1, 2]);
    assert_eq!(v.insert(3, 10), Err(ArrayError::IndexOutOfRange { index: 3, len: 2 }));
    assert_eq!(v, [1, 2]);
}

#[test]
fn test_out_of_range_remove() {
    let mut v: DynamicArray<i32> = DynamicArray::new();
    assert_eq!(v.remove(0), Err(ArrayError::IndexOutOfRange { index: 0, len: 0 }));
    assert_eq!(v.swap_remove(0), Err(ArrayError::IndexOutOfRange { index: 0, len: 0 }));

    let mut v = filled(&[1, 2, 3]);
    assert!(v.remove(3).is_err());
    assert_eq!(v, [1, 2, 3]);
}

#[test]
fn test_remove_preserves_order() {
    let original = [3, 1, 4, 1, 5, 9, 2, 6];
    for i in 0..original.len() {
        let mut v = filled(&original);
        v.remove(i).unwrap();
        if i < v.len() {
            assert_eq!(v.get(i), Some(&original[i + 1]));
        }
        let mut expected = original.to_vec();
        expected.remove(i);
        assert_eq!(&v[..], &expected[..]);
    }
}

#[test]
fn test_swap_remove() {
    let original = [1, 2, 3, 4, 5];
    for i in 0..original.len() {
        let mut v = filled(&original);
        let last = *v.last().unwrap();
        assert_eq!(v.swap_remove(i), Ok(original[i]));
        assert_eq!(v.len(), original.len() - 1);
        if i < v.len() {
            assert_eq!(v[i], last);
        }

        let mut remaining: Vec<i32> = v.iter().copied().collect();
        remaining.sort();
        let mut expected = original.to_vec();
        expected.remove(i);
        assert_eq!(remaining, expected);
    }
}

#[test]
fn test_scenario_delete_then_swap_delete() {
    let mut v = DynamicArray::with_capacity(4);
    for i in 1..=5 {
        v.push(i).unwrap();
    }
    assert!(v.capacity() > 4);
    assert_eq!(v.len(), 5);
    assert_eq!(v.get(4), Some(&5));

    v.remove(0).unwrap();
    assert_eq!(v.len(), 4);
    assert_eq!(v.get(0), Some(&2));

    v.swap_remove(0).unwrap();
    assert_eq!(v.len(), 3);
    assert_eq!(v.get(0), Some(&5));
    assert_eq!(v, [5, 3, 4]);
}

#[test]
fn test_insert_many() {
    let mut v = filled(&[1, 2, 3]);
    v.insert_many(1, 0, 4).unwrap();
    assert_eq!(v, [1, 0, 0, 0, 0, 2, 3]);

    v.insert_many(v.len(), 9, 2).unwrap();
    assert_eq!(v, [1, 0, 0, 0, 0, 2, 3, 9, 9]);

    v.insert_many(0, 5, 0).unwrap();
    assert_eq!(v.len(), 9);

    assert_eq!(
        v.insert_many(10, 1, 1),
        Err(ArrayError::IndexOutOfRange { index: 10, len: 9 })
    );
}

#[test]
fn test_insert_many_overflow_keeps_contents() {
    let mut v = filled(&[1, 2, 3]);
    let cap = v.capacity();
    assert_eq!(v.insert_many(1, 7, usize::MAX - 1), Err(ArrayError::CapacityOverflow));
    assert_eq!(v, [1, 2, 3]);
    assert_eq!(v.capacity(), cap);
}

#[test]
fn test_remove_many() {
    let mut v = filled(&[0, 1, 2, 3, 4, 5, 6, 7]);
    v.remove_many(2, 3).unwrap();
    assert_eq!(v, [0, 1, 5, 6, 7]);

    v.remove_many(3, 2).unwrap();
    assert_eq!(v, [0, 1, 5]);

    v.remove_many(3, 0).unwrap();
    assert_eq!(v, [0, 1, 5]);

    assert_eq!(
        v.remove_many(2, 2),
        Err(ArrayError::RangeOutOfBounds { index: 2, count: 2, len: 3 })
    );
    assert_eq!(
        v.remove_many(1, usize::MAX),
        Err(ArrayError::RangeOutOfBounds { index: 1, count: usize::MAX, len: 3 })
    );
    assert_eq!(v, [0, 1, 5]);

    v.remove_many(0, 3).unwrap();
    assert!(v.is_empty());
}

#[test]
fn test_clear_keeps_buffer() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut v = DynamicArray::new();
    for _ in 0..5 {
        v.push(Droppable(counter.clone())).unwrap();
    }
    let cap = v.capacity();
    v.clear();
    assert_eq!(counter.load(Ordering::SeqCst), 5);
    assert!(v.is_empty());
    assert_eq!(v.capacity(), cap);
}

#[test]
fn test_search() {
    let v = filled(&[4, 8, 15, 16, 23, 42, 15]);
    assert_eq!(v.search(&15), Some(2));
    assert_eq!(v.search(&4), Some(0));
    assert_eq!(v.search(&42), Some(5));
    assert_eq!(v.search(&99), None);

    let empty: DynamicArray<i32> = DynamicArray::new();
    assert_eq!(empty.search(&0), None);
}

#[test]
fn test_search_by_key() {
    struct Item {
        value: i32,
        name: &'static str,
    }

    let mut items = DynamicArray::new();
    for (value, name) in [(3, "rope"), (7, "torch"), (3, "bread")] {
        items.push(Box::new(Item { value, name })).unwrap();
    }

    let idx = items.search_by_key(&3, |item| item.value);
    assert_eq!(idx, Some(0));
    assert_eq!(items[idx.unwrap()].name, "rope");
    assert_eq!(items.search_by_key(&"torch", |item| item.name), Some(1));
    assert_eq!(items.search_by_key(&11, |item| item.value), None);
}

#[test]
fn test_rows() {
    let v = filled(&[1, 2, 3, 4, 5]);
    assert_eq!(v.rows(2).to_string(), "1,2,\n3,4,\n5,");
    assert_eq!(v.rows(5).to_string(), "1,2,3,4,5,\n");
    assert_eq!(v.rows(0).to_string(), "1,2,3,4,5,");

    let empty: DynamicArray<i32> = DynamicArray::new();
    assert_eq!(empty.rows(3).to_string(), "");
}

#[test]
fn test_rows_by_key() {
    struct Node {
        value: i32,
    }

    let mut nodes = DynamicArray::new();
    for value in [10, 20, 30] {
        nodes.push(Node { value }).unwrap();
    }
    assert_eq!(nodes.rows_by_key(2, |n| n.value).to_string(), "10,20,\n30,");
    assert_eq!(nodes.rows_by_key(0, |n| n.value * 2).to_string(), "20,40,60,");
}

#[test]
fn test_raii_drop() {
    let counter = Arc::new(AtomicUsize::new(0));

    {
        let mut v = DynamicArray::new();
        for _ in 0..10 {
            v.push(Droppable(counter.clone())).unwrap();
        }
    }
    assert_eq!(counter.load(Ordering::SeqCst), 10);
}

#[test]
fn test_removals_drop_exactly_once() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut v = DynamicArray::new();
    for _ in 0..12 {
        v.push(Droppable(counter.clone())).unwrap();
    }

    drop(v.pop());
    drop(v.pop_front());
    drop(v.remove(3));
    drop(v.swap_remove(0));
    assert_eq!(counter.load(Ordering::SeqCst), 4);

    v.remove_many(2, 3).unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 7);

    v.insert_many(1, Droppable(counter.clone()), 3).unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 7);
    assert_eq!(v.len(), 8);

    drop(v);
    assert_eq!(counter.load(Ordering::SeqCst), 15);
}

#[test]
fn test_partial_into_iter_drops_rest() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut v = DynamicArray::new();
    for _ in 0..6 {
        v.push(Droppable(counter.clone())).unwrap();
    }

    let mut iter = v.into_iter();
    drop(iter.next());
    drop(iter.next_back());
    assert_eq!(iter.len(), 4);
    assert_eq!(counter.load(Ordering::SeqCst), 2);

    drop(iter);
    assert_eq!(counter.load(Ordering::SeqCst), 6);
}

#[test]
fn test_push_n_pop_n_returns_to_empty() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut v = DynamicArray::new();
    for _ in 0..1000 {
        v.push(Droppable(counter.clone())).unwrap();
    }
    for _ in 0..1000 {
        assert!(v.pop().is_some());
    }
    assert_eq!(v.len(), 0);
    assert_eq!(counter.load(Ordering::SeqCst), 1000);
    assert_eq!(Arc::strong_count(&counter), 1);
}

#[test]
fn test_failed_growth_keeps_buffer() {
    let mut v: DynamicArray<u8> = (0..5).collect();
    let cap = v.capacity();

    // 已有缓冲区时走 realloc 分支：Layout 合法，但分配器无法满足
    let result = v.try_reserve(isize::MAX as usize / 8);
    assert!(matches!(result, Err(ArrayError::AllocationFailed { .. })), "got {:?}", result);
    assert_eq!(v.capacity(), cap);
    assert_eq!(v, [0, 1, 2, 3, 4]);

    v.push(5).unwrap();
    assert_eq!(v, [0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_try_reserve() {
    let mut v: DynamicArray<i32> = DynamicArray::new();
    assert!(v.try_reserve(10).is_ok());
    assert!(v.capacity() >= 10);

    let cap = v.capacity();
    assert_eq!(v.try_reserve(usize::MAX), Err(ArrayError::CapacityOverflow));
    assert_eq!(v.capacity(), cap);
}

#[test]
fn test_shrink_to_fit() {
    let mut v = DynamicArray::with_capacity(2);
    v.push(1).unwrap();
    v.push(2).unwrap();
    v.push(3).unwrap();
    assert!(v.capacity() >= 3);
    v.shrink_to_fit();
    assert_eq!(v.capacity(), 3);
    v.pop();
    v.pop();
    v.pop();
    v.shrink_to_fit();
    assert_eq!(v.capacity(), 0);

    // 释放后仍可继续使用
    v.push(4).unwrap();
    assert_eq!(v, [4]);
    assert!(v.capacity() >= 1);
}

#[test]
fn test_iterators() {
    let mut v = DynamicArray::new();
    v.push(10).unwrap();
    v.push(20).unwrap();
    v.push(30).unwrap();

    let mut sum = 0;
    for &x in &v {
        sum += x;
    }
    assert_eq!(sum, 60);

    for x in &mut v {
        *x += 1;
    }
    assert_eq!(v[0], 11);

    let collected: Vec<i32> = v.into_iter().collect();
    assert_eq!(collected, vec![11, 21, 31]);
}

#[test]
fn test_collect_clone_and_debug() {
    let v: DynamicArray<i32> = (1..=6).collect();
    assert_eq!(v.len(), 6);

    let copy = v.clone();
    assert_eq!(copy, v);
    assert_eq!(format!("{:?}", copy), "[1, 2, 3, 4, 5, 6]");

    let mut extended = copy;
    extended.extend([7, 8]);
    assert_eq!(extended, [1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_concurrency() {
    let mut v = DynamicArray::new();
    for i in 0..100 {
        v.push(i).unwrap();
    }

    scope(|s| {
        s.spawn(|_| {
            assert_eq!(v.search(&42), Some(42));
        });
        s.spawn(|_| {
            assert_eq!(v.iter().sum::<i32>(), 4950);
        });
    })
    .unwrap();
}

#[test]
fn test_matches_vec_model() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut model: Vec<i64> = Vec::new();
    let mut v: DynamicArray<i64> = DynamicArray::new();

    for _ in 0..5000 {
        let value = rng.random_range(-100..100);
        match rng.random_range(0..9) {
            0 | 1 => {
                v.push(value).unwrap();
                model.push(value);
            }
            2 => {
                v.push_front(value).unwrap();
                model.insert(0, value);
            }
            3 => assert_eq!(v.pop(), model.pop()),
            4 => {
                let expected = if model.is_empty() { None } else { Some(model.remove(0)) };
                assert_eq!(v.pop_front(), expected);
            }
            5 => {
                let index = rng.random_range(0..=model.len() + 1);
                let result = v.insert(index, value);
                if index <= model.len() {
                    assert!(result.is_ok());
                    model.insert(index, value);
                } else {
                    assert!(result.is_err());
                }
            }
            6 => {
                let index = rng.random_range(0..=model.len());
                let result = v.remove(index);
                if index < model.len() {
                    assert_eq!(result, Ok(model.remove(index)));
                } else {
                    assert!(result.is_err());
                }
            }
            7 => {
                let index = rng.random_range(0..=model.len());
                let result = v.swap_remove(index);
                if index < model.len() {
                    assert_eq!(result, Ok(model.swap_remove(index)));
                } else {
                    assert!(result.is_err());
                }
            }
            _ => {
                let index = rng.random_range(0..=model.len());
                let count = rng.random_range(0..4);
                let result = v.remove_many(index, count);
                if index + count <= model.len() {
                    assert!(result.is_ok());
                    model.drain(index..index + count);
                } else {
                    assert!(result.is_err());
                }
            }
        }

        assert!(v.capacity() >= v.len());
        assert_eq!(&v[..], &model[..]);
        assert_eq!(v.search(&value), model.iter().position(|&x| x == value));
    }
}
