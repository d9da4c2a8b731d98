/// Pairing of two unordered lists under an equality predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    /// Matched (left index, right index) pairs in left order
    pub pairs: Vec<(usize, usize)>,
    /// Left indices without a partner, ascending
    pub unmatched_left: Vec<usize>,
    /// Right indices without a partner, ascending
    pub unmatched_right: Vec<usize>,
}

/// Greedy first-fit matching: each left element claims the first equal right
/// element not already claimed by an earlier one.
pub fn match_pairs<T>(left: &[T], right: &[T], mut eq: impl FnMut(&T, &T) -> bool) -> Matching {
    let mut claimed = vec![false; right.len()];
    let mut pairs = Vec::new();
    let mut unmatched_left = Vec::new();

    for (i, item) in left.iter().enumerate() {
        let mut partner = None;
        for (j, candidate) in right.iter().enumerate() {
            if !claimed[j] && eq(item, candidate) {
                partner = Some(j);
                break;
            }
        }

        match partner {
            Some(j) => {
                claimed[j] = true;
                pairs.push((i, j));
            }
            None => unmatched_left.push(i),
        }
    }

    let unmatched_right = (0..right.len()).filter(|&j| !claimed[j]).collect();

    Matching {
        pairs,
        unmatched_left,
        unmatched_right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_lists_fully_match() {
        let left = vec![1, 2, 3];
        let right = vec![1, 2, 3];

        let matching = match_pairs(&left, &right, |a, b| a == b);
        assert_eq!(matching.pairs, vec![(0, 0), (1, 1), (2, 2)]);
        assert!(matching.unmatched_left.is_empty());
        assert!(matching.unmatched_right.is_empty());
    }

    #[test]
    fn test_matches_ignore_position() {
        let left = vec![1, 2];
        let right = vec![2, 1];

        let matching = match_pairs(&left, &right, |a, b| a == b);
        assert_eq!(matching.pairs, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_each_right_element_claimed_once() {
        let left = vec![5, 5];
        let right = vec![5];

        let matching = match_pairs(&left, &right, |a, b| a == b);
        assert_eq!(matching.pairs, vec![(0, 0)]);
        assert_eq!(matching.unmatched_left, vec![1]);
        assert!(matching.unmatched_right.is_empty());
    }

    #[test]
    fn test_leftovers_on_both_sides() {
        let left = vec![1, 2, 3];
        let right = vec![2, 4];

        let matching = match_pairs(&left, &right, |a, b| a == b);
        assert_eq!(matching.pairs, vec![(1, 0)]);
        assert_eq!(matching.unmatched_left, vec![0, 2]);
        assert_eq!(matching.unmatched_right, vec![1]);
    }
}
