//! A growable, contiguous, random-access array with explicit error results.
//!
//! `DynamicArray<T>` owns a single heap buffer. Growth doubles an even-rounded
//! capacity, removals may halve it again, and every operation that can fail
//! reports it through [`ArrayError`] or `Option` instead of corrupting state.

use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};

mod error;
mod iter;
mod rows;

pub use error::ArrayError;
pub use iter::IntoIter;
pub use rows::Rows;

/// Number of slots `DynamicArray::new` allocates up front.
///
/// Shrinking never halves the capacity below this value.
pub const DEFAULT_CAPACITY: usize = 4;

/// 基于 RAII 的动态数组实现
pub struct DynamicArray<T> {
    ptr: NonNull<T>,
    cap: usize,
    len: usize,
    _marker: PhantomData<T>,
}

// SAFETY: 只要 T 是 Send，DynamicArray<T> 就可以跨线程转移所有权
unsafe impl<T: Send> Send for DynamicArray<T> {}
// SAFETY: 只要 T 是 Sync，DynamicArray<T> 就可以在多线程间共享引用
unsafe impl<T: Sync> Sync for DynamicArray<T> {}

impl<T> DynamicArray<T> {
    /// 创建容量为 [`DEFAULT_CAPACITY`] 的动态数组
    ///
    /// # Panics
    ///
    /// Panics if the initial buffer cannot be allocated.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// 创建具有指定初始容量的动态数组
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or the buffer cannot be allocated. Use
    /// [`try_with_capacity`](Self::try_with_capacity) to handle those cases.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(array) => array,
            Err(err) => panic!("cannot create array with capacity {}: {}", capacity, err),
        }
    }

    /// Creates an empty array with room for `capacity` elements.
    ///
    /// Allocation failures are logged and returned; no partially built array
    /// escapes.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ArrayError> {
        // 不支持零尺寸类型（ZST）
        assert!(mem::size_of::<T>() != 0, "Zero-sized types are not supported");
        if capacity == 0 {
            return Err(ArrayError::ZeroCapacity);
        }

        let mut array = Self {
            ptr: NonNull::dangling(),
            cap: 0,
            len: 0,
            _marker: PhantomData,
        };
        array.realloc_to(capacity)?;
        Ok(array)
    }

    /// 获取当前元素数量
    pub fn len(&self) -> usize {
        self.len
    }

    /// 获取当前容量
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// 数组是否为空
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 在末尾添加元素
    ///
    /// On failure the element is dropped and the array is unchanged.
    pub fn push(&mut self, elem: T) -> Result<(), ArrayError> {
        self.try_reserve(1)?;

        unsafe {
            // SAFETY: 已确保有足够的容量
            ptr::write(self.ptr.as_ptr().add(self.len), elem);
        }
        // 只有在写入成功后才增加 len
        self.len += 1;
        Ok(())
    }

    /// Inserts `elem` at index 0, shifting every element right.
    pub fn push_front(&mut self, elem: T) -> Result<(), ArrayError> {
        self.insert(0, elem)
    }

    /// 弹出末尾元素
    ///
    /// Returns `None` on an empty array and leaves it untouched.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        // SAFETY: len 已减 1，该位置是有效的已初始化元素
        let elem = unsafe { ptr::read(self.ptr.as_ptr().add(self.len)) };
        self.shrink_after_removal();
        Some(elem)
    }

    /// Removes the first element, shifting the rest left.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.remove(0).ok()
        }
    }

    /// 在指定位置插入元素
    ///
    /// `index` may equal `len()`, which appends.
    pub fn insert(&mut self, index: usize, elem: T) -> Result<(), ArrayError> {
        if index > self.len {
            return Err(ArrayError::IndexOutOfRange { index, len: self.len });
        }
        self.try_reserve(1)?;

        unsafe {
            let p = self.ptr.as_ptr().add(index);
            // 将 index 之后的元素向后移动一位（区间重叠，必须用 copy）
            ptr::copy(p, p.add(1), self.len - index);
            ptr::write(p, elem);
        }
        self.len += 1;
        Ok(())
    }

    /// Inserts `count` copies of `elem` at `index` with a single shift of the tail.
    pub fn insert_many(&mut self, index: usize, elem: T, count: usize) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        if index > self.len {
            return Err(ArrayError::IndexOutOfRange { index, len: self.len });
        }
        if count == 0 {
            return Ok(());
        }
        self.try_reserve(count)?;

        let tail = self.len - index;
        unsafe {
            let p = self.ptr.as_ptr().add(index);
            ptr::copy(p, p.add(count), tail);
            // clone 可能 panic：先把 len 截到 index，最多泄漏尾部，不会重复析构
            self.len = index;
            for i in 0..count - 1 {
                ptr::write(p.add(i), elem.clone());
            }
            ptr::write(p.add(count - 1), elem);
        }
        self.len = index + count + tail;
        Ok(())
    }

    /// 移除并返回指定位置的元素
    pub fn remove(&mut self, index: usize) -> Result<T, ArrayError> {
        if index >= self.len {
            return Err(ArrayError::IndexOutOfRange { index, len: self.len });
        }

        let elem = unsafe {
            self.len -= 1;
            let p = self.ptr.as_ptr().add(index);
            let result = ptr::read(p);
            // 将 index 之后的元素向前移动一位
            ptr::copy(p.add(1), p, self.len - index);
            result
        };
        self.shrink_after_removal();
        Ok(elem)
    }

    /// Removes the element at `index` by moving the last element into its slot.
    ///
    /// O(1), but the order of the remaining elements is not preserved.
    pub fn swap_remove(&mut self, index: usize) -> Result<T, ArrayError> {
        if index >= self.len {
            return Err(ArrayError::IndexOutOfRange { index, len: self.len });
        }

        self.len -= 1;
        let elem = unsafe {
            let base = self.ptr.as_ptr();
            let result = ptr::read(base.add(index));
            if index != self.len {
                ptr::copy_nonoverlapping(base.add(self.len), base.add(index), 1);
            }
            result
        };
        self.shrink_after_removal();
        Ok(elem)
    }

    /// Drops `count` consecutive elements starting at `index` and closes the gap.
    pub fn remove_many(&mut self, index: usize, count: usize) -> Result<(), ArrayError> {
        let len = self.len;
        let end = index
            .checked_add(count)
            .filter(|&end| end <= len)
            .ok_or(ArrayError::RangeOutOfBounds { index, count, len })?;
        if count == 0 {
            return Ok(());
        }

        let tail = len - end;
        unsafe {
            let p = self.ptr.as_ptr().add(index);
            // 析构可能 panic：先截断 len，最多泄漏尾部
            self.len = index;
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(p, count));
            ptr::copy(p.add(count), p, tail);
        }
        self.len = index + tail;
        self.shrink_after_removal();
        Ok(())
    }

    /// Drops every element. The buffer is kept.
    pub fn clear(&mut self) {
        let len = self.len;
        self.len = 0;
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), len));
        }
    }

    /// Index of the first element equal to `value`.
    pub fn search(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|elem| elem == value)
    }

    /// Index of the first element whose extracted key equals `key`.
    ///
    /// Useful for arrays of records or boxed records where only one field
    /// identifies an element.
    pub fn search_by_key<K, F>(&self, key: &K, mut f: F) -> Option<usize>
    where
        K: PartialEq,
        F: FnMut(&T) -> K,
    {
        self.iter().position(|elem| f(elem) == *key)
    }

    /// Displays the elements as `a,b,c,` with a line break after every
    /// `per_row` elements. `per_row == 0` never breaks.
    pub fn rows(&self, per_row: usize) -> Rows<'_, T, fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result>
    where
        T: fmt::Display,
    {
        let show: fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result = <T as fmt::Display>::fmt;
        Rows::new(self, per_row, show)
    }

    /// Like [`rows`](Self::rows), but displays `f(elem)` for every element.
    pub fn rows_by_key<K, F>(
        &self,
        per_row: usize,
        f: F,
    ) -> Rows<'_, T, impl Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result>
    where
        K: fmt::Display,
        F: Fn(&T) -> K,
    {
        Rows::new(self, per_row, move |elem: &T, out: &mut fmt::Formatter<'_>| {
            fmt::Display::fmt(&f(elem), out)
        })
    }

    /// 尝试预留容量（OOM 防护接口）
    ///
    /// Grows with the same policy as `push`. On failure the array keeps its
    /// old buffer and contents.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), ArrayError> {
        let need = self
            .len
            .checked_add(additional)
            .ok_or(ArrayError::CapacityOverflow)?;
        if need > self.cap {
            let new_cap = grown_capacity(need, self.cap).ok_or(ArrayError::CapacityOverflow)?;
            self.realloc_to(new_cap)?;
        }
        Ok(())
    }

    /// 缩小容量以适应当前长度
    pub fn shrink_to_fit(&mut self) {
        if self.len == self.cap {
            return;
        }
        if self.len == 0 {
            // 如果长度为 0，释放所有内存
            unsafe {
                alloc::dealloc(self.ptr.as_ptr().cast(), buffer_layout::<T>(self.cap));
            }
            self.ptr = NonNull::dangling();
            self.cap = 0;
        } else if let Err(err) = self.realloc_to(self.len) {
            log::warn!("keeping capacity {} after failed shrink: {}", self.cap, err);
        }
    }

    fn shrink_after_removal(&mut self) {
        let half = self.cap / 2;
        if self.len <= self.cap / 4 && half >= DEFAULT_CAPACITY {
            if let Err(err) = self.realloc_to(half) {
                log::warn!("keeping capacity {} after failed shrink: {}", self.cap, err);
            }
        }
    }

    fn realloc_to(&mut self, new_cap: usize) -> Result<(), ArrayError> {
        debug_assert!(new_cap > 0 && new_cap >= self.len);
        let new_layout = Layout::array::<T>(new_cap).map_err(|_| ArrayError::CapacityOverflow)?;

        let new_ptr = if self.cap == 0 {
            unsafe { alloc::alloc(new_layout) }
        } else {
            unsafe {
                alloc::realloc(
                    self.ptr.as_ptr().cast(),
                    buffer_layout::<T>(self.cap),
                    new_layout.size(),
                )
            }
        };

        // realloc 失败时旧内存块仍然有效：只有成功后才替换指针
        match NonNull::new(new_ptr.cast::<T>()) {
            Some(p) => {
                log::debug!("array capacity {} -> {}", self.cap, new_cap);
                self.ptr = p;
                self.cap = new_cap;
                Ok(())
            }
            None => {
                log::error!("failed to allocate memory for {} elements", new_cap);
                Err(ArrayError::AllocationFailed { capacity: new_cap })
            }
        }
    }
}

/// Capacity chosen when `need` slots no longer fit in `cap`.
fn grown_capacity(need: usize, cap: usize) -> Option<usize> {
    let base = need.max(cap);
    let even = base.checked_add(base % 2)?;
    even.checked_mul(2)
}

/// Layout of a live buffer with `cap` slots.
pub(crate) fn buffer_layout<T>(cap: usize) -> Layout {
    // SAFETY: 同样的 size/align 在分配时已经通过 Layout::array 校验
    unsafe { Layout::from_size_align_unchecked(mem::size_of::<T>() * cap, mem::align_of::<T>()) }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        if self.cap != 0 {
            unsafe {
                // 1. 析构所有有效元素
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len));
                // 2. 释放内存块
                alloc::dealloc(self.ptr.as_ptr().cast(), buffer_layout::<T>(self.cap));
            }
        }
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.cap.max(1));
        for elem in self.iter() {
            // SAFETY: copy 的容量不小于 self.len
            unsafe {
                ptr::write(copy.ptr.as_ptr().add(copy.len), elem.clone());
            }
            copy.len += 1;
        }
        copy
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for DynamicArray<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        **self == other[..]
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    /// # Panics
    ///
    /// Panics if the array cannot grow.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if let Err(err) = self.try_reserve(lower) {
            panic!("cannot extend array: {}", err);
        }
        for elem in iter {
            if let Err(err) = self.push(elem) {
                panic!("cannot extend array: {}", err);
            }
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let ptr = self.ptr;
        let cap = self.cap;
        let len = self.len;

        // 关键：避免 DynamicArray 的 Drop 被调用，缓冲区交给迭代器释放
        mem::forget(self);

        IntoIter::new(ptr, cap, len)
    }
}

// 借用迭代器
impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> DynamicArray<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.deref().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.deref_mut().iter_mut()
    }
}

#[cfg(test)]
mod tests;
