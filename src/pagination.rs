/// One page of an already sorted result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based
    pub number: usize,
    pub size: usize,
    pub total: usize,
}

impl<T> Page<T> {
    /// Cuts page `number` out of `all`. Out-of-range numbers clamp to the
    /// first or last page.
    pub fn slice(all: Vec<T>, number: usize, size: usize) -> Self {
        let size = size.max(1);
        let total = all.len();
        let page_count = total.div_ceil(size).max(1);
        let number = number.clamp(1, page_count);

        let items = all
            .into_iter()
            .skip((number - 1) * size)
            .take(size)
            .collect();

        Self {
            items,
            number,
            size,
            total,
        }
    }

    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.size).max(1)
    }

    pub fn previous(&self) -> Option<usize> {
        (self.number > 1).then(|| self.number - 1)
    }

    pub fn next(&self) -> Option<usize> {
        (self.number < self.page_count()).then(|| self.number + 1)
    }
}
