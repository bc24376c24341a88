//! Group-by-key over already-ordered slices.

/// Iterator over maximal runs of consecutive items sharing a key.
///
/// Each item is `(key, run)` where `run` is a non-empty sub-slice. Order is
/// preserved and runs are never merged across gaps, so the input must already
/// be ordered by the key for each key to appear once. Keys may borrow from
/// the slice.
pub struct GroupRuns<'a, T, F> {
    rest: &'a [T],
    key: F,
}

pub fn group_runs<'a, T, K, F>(items: &'a [T], key: F) -> GroupRuns<'a, T, F>
where
    F: FnMut(&'a T) -> K,
    K: PartialEq,
{
    GroupRuns { rest: items, key }
}

impl<'a, T, K, F> Iterator for GroupRuns<'a, T, F>
where
    F: FnMut(&'a T) -> K,
    K: PartialEq,
{
    type Item = (K, &'a [T]);

    fn next(&mut self) -> Option<Self::Item> {
        let items: &'a [T] = self.rest;
        let current = (self.key)(items.first()?);
        let mut end = 1;
        while end < items.len() && (self.key)(&items[end]) == current {
            end += 1;
        }
        let (run, rest) = items.split_at(end);
        self.rest = rest;
        Some((current, run))
    }
}
