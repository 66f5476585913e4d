use crate::core::models::ids::UnitIndex;
use std::cmp::Ordering;

/// A sorted set of unit indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OrderedSet {
    indices: Vec<UnitIndex>,
}

impl OrderedSet {
    pub fn new(mut indices: Vec<UnitIndex>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self { indices }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The contiguous interval `min..=max`; empty when `min > max`.
    pub fn of_range(min: UnitIndex, max: UnitIndex) -> Self {
        Self {
            indices: (min..=max).collect(),
        }
    }

    pub fn of_single(index: UnitIndex) -> Self {
        Self {
            indices: vec![index],
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn min(&self) -> Option<UnitIndex> {
        self.indices.first().copied()
    }

    pub fn max(&self) -> Option<UnitIndex> {
        self.indices.last().copied()
    }

    pub fn contains(&self, index: UnitIndex) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = UnitIndex> + '_ {
        self.indices.iter().copied()
    }

    pub fn as_slice(&self) -> &[UnitIndex] {
        &self.indices
    }

    pub fn union(&self, other: &Self) -> Self {
        let (a, b) = (&self.indices, &other.indices);
        let mut out = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                Ordering::Less => {
                    out.push(a[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    out.push(b[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    out.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&a[i..]);
        out.extend_from_slice(&b[j..]);
        Self { indices: out }
    }

    pub fn intersect(&self, other: &Self) -> Self {
        let (a, b) = (&self.indices, &other.indices);
        let mut out = Vec::with_capacity(a.len().min(b.len()));
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    out.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        Self { indices: out }
    }

    /// Elements of `self` that are not in `other`.
    pub fn subtract(&self, other: &Self) -> Self {
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|x| !other.contains(*x))
            .collect();
        Self { indices }
    }

    /// Whether every element of `other` is also in `self`.
    pub fn is_superset_of(&self, other: &Self) -> bool {
        other.len() <= self.len() && other.iter().all(|x| self.contains(x))
    }
}

impl FromIterator<UnitIndex> for OrderedSet {
    fn from_iter<T: IntoIterator<Item = UnitIndex>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(xs: &[UnitIndex]) -> OrderedSet {
        OrderedSet::new(xs.to_vec())
    }

    #[test]
    fn construction_sorts_and_dedups() {
        let s = set(&[4, 2, 2, 9]);
        assert_eq!(s.as_slice(), &[2, 4, 9]);
        assert_eq!(s.min(), Some(2));
        assert_eq!(s.max(), Some(9));
    }

    #[test]
    fn range_is_inclusive() {
        assert_eq!(OrderedSet::of_range(2, 5).as_slice(), &[2, 3, 4, 5]);
        assert!(OrderedSet::of_range(5, 2).is_empty());
    }

    #[test]
    fn set_operations_match_expected_values() {
        let a = set(&[1, 2, 3, 7]);
        let b = set(&[2, 3, 4, 8]);

        assert_eq!(a.union(&b).as_slice(), &[1, 2, 3, 4, 7, 8]);
        assert_eq!(a.intersect(&b).as_slice(), &[2, 3]);
        assert_eq!(a.subtract(&b).as_slice(), &[1, 7]);
        assert_eq!(b.subtract(&a).as_slice(), &[4, 8]);
    }

    #[test]
    fn superset_checks_every_element() {
        let a = set(&[1, 2, 3, 7]);
        assert!(a.is_superset_of(&set(&[2, 7])));
        assert!(a.is_superset_of(&OrderedSet::empty()));
        assert!(!a.is_superset_of(&set(&[2, 8])));
    }
}
