use super::Category;

/// Categories found during a single evaluation pass, keyed by ordinal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategorySet(u16);

impl CategorySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, category: Category) {
        self.0 |= 1 << category.ordinal();
    }

    pub const fn contains(self, category: Category) -> bool {
        self.0 & (1 << category.ordinal()) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Present categories, weakest first.
    pub fn iter(self) -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(move |&c| self.contains(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_query() {
        let mut s = CategorySet::empty();
        assert!(s.is_empty());
        s.insert(Category::Pair);
        s.insert(Category::Flush);
        assert!(s.contains(Category::Pair));
        assert!(!s.contains(Category::TwoPair));
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![Category::Pair, Category::Flush]);
    }
}
