use alloc::vec::Vec;

/// Prefix sums over slot sizes with `O(log n)` point updates and offset → index search.
#[derive(Clone, Debug, Default)]
pub(crate) struct SizeTree {
    nodes: Vec<u64>, // 1-indexed; nodes[0] unused
    total: u64,
}

impl SizeTree {
    /// Builds the tree in `O(n)`.
    pub(crate) fn from_sizes(sizes: &[u32]) -> Self {
        let n = sizes.len();
        let mut nodes = alloc::vec![0u64; n + 1];
        let mut total = 0u64;
        for (i, &size) in sizes.iter().enumerate() {
            let at = i + 1;
            total = total.saturating_add(size as u64);
            nodes[at] = nodes[at].saturating_add(size as u64);
            let parent = at + low_bit(at);
            if parent <= n {
                nodes[parent] = nodes[parent].saturating_add(nodes[at]);
            }
        }
        Self { nodes, total }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    /// Adds `delta` to the size at `index`. Out-of-range indexes are ignored.
    pub(crate) fn add(&mut self, index: usize, delta: i64) {
        let n = self.len();
        if index >= n || delta == 0 {
            return;
        }
        self.total = apply_delta(self.total, delta);
        let mut at = index + 1;
        while at <= n {
            debug_assert!(
                delta >= 0 || self.nodes[at] >= delta.unsigned_abs(),
                "size tree underflow (node={at}, delta={delta})"
            );
            self.nodes[at] = apply_delta(self.nodes[at], delta);
            at += low_bit(at);
        }
    }

    /// Sum of the first `count` sizes.
    pub(crate) fn prefix_sum(&self, count: usize) -> u64 {
        let mut at = count.min(self.len());
        let mut sum = 0u64;
        while at > 0 {
            sum = sum.saturating_add(self.nodes[at]);
            at &= at - 1;
        }
        sum
    }

    /// Number of leading slots whose cumulative size is `<= offset`.
    ///
    /// For an offset inside the list this is the index of the slot that contains it.
    pub(crate) fn count_within(&self, mut offset: u64) -> usize {
        let n = self.len();
        let mut at = 0usize;
        let mut step = if n == 0 { 0 } else { 1usize << (usize::BITS - 1 - n.leading_zeros()) };
        while step > 0 {
            let next = at + step;
            if next <= n && self.nodes[next] <= offset {
                offset -= self.nodes[next];
                at = next;
            }
            step >>= 1;
        }
        at
    }
}

fn low_bit(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn apply_delta(value: u64, delta: i64) -> u64 {
    if delta >= 0 {
        value.saturating_add(delta as u64)
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}
