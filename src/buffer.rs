use std::ops::{Index, IndexMut};

const INITIAL_CAPACITY: usize = 16;

/// Append-only arena of records addressed by stable indices.
///
/// Slots are default-initialized up to the current capacity, and the capacity
/// doubles whenever a push would overflow it. Nothing is ever removed, so an
/// index returned by [`push`](GrowableBuffer::push) stays valid for the whole
/// lifetime of the buffer. A buffer created with capacity 0 allocates nothing
/// until its first push.
#[derive(Clone, Debug)]
pub struct GrowableBuffer<T> {
    data: Vec<T>,
    len: usize,
}

impl<T: Copy + Default> GrowableBuffer<T> {
    pub fn new() -> GrowableBuffer<T> {
        GrowableBuffer::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> GrowableBuffer<T> {
        GrowableBuffer { data: vec![T::default(); capacity], len: 0 }
    }

    /// Stores `value` in the next free slot and returns its index.
    pub fn push(&mut self, value: T) -> usize {
        if self.len == self.data.len() {
            self.grow();
        }
        self.data[self.len] = value;
        self.len += 1;
        self.len - 1
    }

    fn grow(&mut self) {
        let capacity = (self.data.len() * 2).max(1);
        self.data.resize(capacity, T::default());
    }
}

impl<T> GrowableBuffer<T> {
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<T: Copy + Default> Default for GrowableBuffer<T> {
    fn default() -> Self {
        GrowableBuffer::new()
    }
}

impl<T> Index<usize> for GrowableBuffer<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for GrowableBuffer<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        &mut self.data[..len][index]
    }
}

impl<'a, T> IntoIterator for &'a GrowableBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
