//! C ABI over a heap-owned `DynamicArray<i64>`.
//!
//! Status-returning functions give [`OK`] on success and [`FAILED`] on a null
//! array, a bad index, an empty pop or an allocation failure.

use dynarray::DynamicArray;
use std::ptr;

pub const OK: i64 = 0;
pub const FAILED: i64 = -1;

fn status<T, E: std::fmt::Display>(result: Result<T, E>) -> i64 {
    match result {
        Ok(_) => OK,
        Err(err) => {
            log::debug!("array call failed: {}", err);
            FAILED
        }
    }
}

/// Create a new dynamic array of i64. Returns null on failure.
#[unsafe(no_mangle)]
pub extern "C" fn vector_create_i64(capacity: usize) -> *mut DynamicArray<i64> {
    match DynamicArray::<i64>::try_with_capacity(capacity) {
        Ok(arr) => Box::into_raw(Box::new(arr)),
        Err(err) => {
            log::error!("vector_create_i64({}): {}", capacity, err);
            ptr::null_mut()
        }
    }
}

/// Push an element to the end of the array.
///
/// # Safety
///
/// `arr_ptr` must be null or a live pointer from [`vector_create_i64`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vector_push_i64(arr_ptr: *mut DynamicArray<i64>, elem: i64) -> i64 {
    match unsafe { arr_ptr.as_mut() } {
        Some(arr) => status(arr.push(elem)),
        None => FAILED,
    }
}

/// Push an element to the front of the array.
///
/// # Safety
///
/// Same contract as [`vector_push_i64`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vector_push_front_i64(arr_ptr: *mut DynamicArray<i64>, elem: i64) -> i64 {
    match unsafe { arr_ptr.as_mut() } {
        Some(arr) => status(arr.push_front(elem)),
        None => FAILED,
    }
}

/// Pop the last element into `out` (which may be null).
///
/// # Safety
///
/// `arr_ptr` as for [`vector_push_i64`]; `out` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vector_pop_i64(arr_ptr: *mut DynamicArray<i64>, out: *mut i64) -> i64 {
    let popped = unsafe { arr_ptr.as_mut() }.and_then(|arr| arr.pop());
    unsafe { write_out(popped, out) }
}

/// Pop the first element into `out` (which may be null).
///
/// # Safety
///
/// Same contract as [`vector_pop_i64`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vector_pop_front_i64(arr_ptr: *mut DynamicArray<i64>, out: *mut i64) -> i64 {
    let popped = unsafe { arr_ptr.as_mut() }.and_then(|arr| arr.pop_front());
    unsafe { write_out(popped, out) }
}

unsafe fn write_out(value: Option<i64>, out: *mut i64) -> i64 {
    match value {
        Some(v) => {
            if !out.is_null() {
                unsafe { *out = v };
            }
            OK
        }
        None => FAILED,
    }
}

/// Insert an element at `index` (`index == len` appends).
///
/// # Safety
///
/// Same contract as [`vector_push_i64`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vector_insert_i64(arr_ptr: *mut DynamicArray<i64>, index: usize, elem: i64) -> i64 {
    match unsafe { arr_ptr.as_mut() } {
        Some(arr) => status(arr.insert(index, elem)),
        None => FAILED,
    }
}

/// Delete the element at `index`, keeping the order of the rest.
///
/// # Safety
///
/// Same contract as [`vector_push_i64`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vector_delete_i64(arr_ptr: *mut DynamicArray<i64>, index: usize) -> i64 {
    match unsafe { arr_ptr.as_mut() } {
        Some(arr) => status(arr.remove(index)),
        None => FAILED,
    }
}

/// Delete the element at `index` by moving the last element into its slot.
///
/// # Safety
///
/// Same contract as [`vector_push_i64`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vector_delete_swap_i64(arr_ptr: *mut DynamicArray<i64>, index: usize) -> i64 {
    match unsafe { arr_ptr.as_mut() } {
        Some(arr) => status(arr.swap_remove(index)),
        None => FAILED,
    }
}

/// Get the element at `index`, or 0 when the index is out of range.
///
/// # Safety
///
/// `arr_ptr` must be null or a live pointer from [`vector_create_i64`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vector_item_at_i64(arr_ptr: *const DynamicArray<i64>, index: usize) -> i64 {
    unsafe { arr_ptr.as_ref() }
        .and_then(|arr| arr.get(index).copied())
        .unwrap_or(0)
}

/// Get the length of the dynamic array (0 for null).
///
/// # Safety
///
/// Same contract as [`vector_item_at_i64`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vector_len_i64(arr_ptr: *const DynamicArray<i64>) -> usize {
    unsafe { arr_ptr.as_ref() }.map_or(0, |arr| arr.len())
}

/// Get the capacity of the dynamic array (0 for null).
///
/// # Safety
///
/// Same contract as [`vector_item_at_i64`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vector_cap_i64(arr_ptr: *const DynamicArray<i64>) -> usize {
    unsafe { arr_ptr.as_ref() }.map_or(0, |arr| arr.capacity())
}

/// Index of the first element equal to `value`, or -1.
///
/// # Safety
///
/// Same contract as [`vector_item_at_i64`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vector_search_i64(arr_ptr: *const DynamicArray<i64>, value: i64) -> i64 {
    unsafe { arr_ptr.as_ref() }
        .and_then(|arr| arr.search(&value))
        .map_or(FAILED, |index| index as i64)
}

/// Release the array owned by `*owner` and clear the owner's pointer.
///
/// Releasing through a null owner or an already cleared owner does nothing.
///
/// # Safety
///
/// `owner` must be null or point to a pointer that is null or came from
/// [`vector_create_i64`] and has not been released through another copy.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vector_release_i64(owner: *mut *mut DynamicArray<i64>) {
    if owner.is_null() {
        return;
    }
    unsafe {
        let arr_ptr = ptr::replace(owner, ptr::null_mut());
        if !arr_ptr.is_null() {
            drop(Box::from_raw(arr_ptr));
        }
    }
}
