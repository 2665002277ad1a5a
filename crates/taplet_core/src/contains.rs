//! The "is like" capability used by `assert_matches` and `assert_not_matches`.

/// A haystack that can be searched for a `Needle`.
///
/// Implemented for substring search on strings and contiguous subsequence search on slices. An empty needle is
/// found in every haystack.
pub trait Contains<Needle: ?Sized> {
    fn contains_like(&self, needle: &Needle) -> bool;
}

impl Contains<str> for str {
    fn contains_like(&self, needle: &str) -> bool {
        self.contains(needle)
    }
}

impl Contains<str> for String {
    fn contains_like(&self, needle: &str) -> bool {
        self.as_str().contains(needle)
    }
}

impl Contains<String> for String {
    fn contains_like(&self, needle: &String) -> bool {
        self.as_str().contains(needle.as_str())
    }
}

impl<T: PartialEq> Contains<[T]> for [T] {
    fn contains_like(&self, needle: &[T]) -> bool {
        needle.is_empty() || self.windows(needle.len()).any(|window| window == needle)
    }
}

impl<T: PartialEq> Contains<[T]> for Vec<T> {
    fn contains_like(&self, needle: &[T]) -> bool {
        self.as_slice().contains_like(needle)
    }
}

impl<T: PartialEq> Contains<Vec<T>> for Vec<T> {
    fn contains_like(&self, needle: &Vec<T>) -> bool {
        self.as_slice().contains_like(needle.as_slice())
    }
}
