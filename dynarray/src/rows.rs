use std::fmt;

/// Row-wrapped display of an array, created by
/// [`DynamicArray::rows`](crate::DynamicArray::rows) and
/// [`DynamicArray::rows_by_key`](crate::DynamicArray::rows_by_key).
///
/// Every element is written followed by a `,`; a line break follows every
/// `per_row`-th element.
pub struct Rows<'a, T, F> {
    items: &'a [T],
    per_row: usize,
    show: F,
}

impl<'a, T, F> Rows<'a, T, F>
where
    F: Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    pub(crate) fn new(items: &'a [T], per_row: usize, show: F) -> Self {
        Self { items, per_row, show }
    }
}

impl<T, F> fmt::Display for Rows<'_, T, F>
where
    F: Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, elem) in self.items.iter().enumerate() {
            (self.show)(elem, f)?;
            f.write_str(",")?;
            if self.per_row != 0 && (i + 1) % self.per_row == 0 {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}
