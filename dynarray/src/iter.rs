use std::alloc;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use crate::buffer_layout;

/// Owning iterator returned by `DynamicArray::into_iter`.
///
/// Elements not consumed are dropped together with the iterator, which then
/// releases the buffer.
pub struct IntoIter<T> {
    ptr: NonNull<T>,
    cap: usize,
    start: *const T,
    end: *const T,
    _marker: PhantomData<T>,
}

// SAFETY: 迭代器独占缓冲区，与 DynamicArray 相同
unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIter<T> {
    pub(crate) fn new(ptr: NonNull<T>, cap: usize, len: usize) -> Self {
        let start = ptr.as_ptr() as *const T;
        let end = unsafe { start.add(len) };
        Self {
            ptr,
            cap,
            start,
            end,
            _marker: PhantomData,
        }
    }

    fn remaining(&self) -> usize {
        // SAFETY: start 和 end 指向同一个分配
        unsafe { self.end.offset_from(self.start) as usize }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            None
        } else {
            unsafe {
                let result = ptr::read(self.start);
                self.start = self.start.add(1);
                Some(result)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            None
        } else {
            unsafe {
                self.end = self.end.sub(1);
                Some(ptr::read(self.end))
            }
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        if self.cap != 0 {
            unsafe {
                // 1. 析构剩余未消费的元素
                let remaining = self.remaining();
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.start as *mut T, remaining));

                // 2. 释放内存块
                alloc::dealloc(self.ptr.as_ptr().cast(), buffer_layout::<T>(self.cap));
            }
        }
    }
}
