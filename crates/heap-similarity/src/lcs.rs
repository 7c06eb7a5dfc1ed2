use serde::Serialize;

/// Longest common subsequence and the index pairs realizing it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LcsAlignment {
    /// Length of the common subsequence.
    pub length: usize,
    /// `(x_index, y_index)` pairs with `x[x_index] == y[y_index]`, increasing
    /// in both components.
    pub matches: Vec<(usize, usize)>,
}

#[derive(Clone, Copy)]
enum Step {
    Diagonal,
    Up,
    Left,
}

/// Longest common subsequence of `x` and `y` by dynamic programming.
///
/// On a mismatch the cell above wins ties, so the reconstructed alignment
/// prefers the latest possible matches in `x`.
pub fn lcs<T: PartialEq>(x: &[T], y: &[T]) -> LcsAlignment {
    let (m, n) = (x.len(), y.len());
    let width = n + 1;
    let mut lengths = vec![0usize; (m + 1) * width];
    let mut steps = vec![Step::Up; (m + 1) * width];

    for i in 1..=m {
        for j in 1..=n {
            let cell = i * width + j;
            if x[i - 1] == y[j - 1] {
                lengths[cell] = lengths[cell - width - 1] + 1;
                steps[cell] = Step::Diagonal;
            } else if lengths[cell - width] >= lengths[cell - 1] {
                lengths[cell] = lengths[cell - width];
                steps[cell] = Step::Up;
            } else {
                lengths[cell] = lengths[cell - 1];
                steps[cell] = Step::Left;
            }
        }
    }

    let mut matches = Vec::with_capacity(lengths[m * width + n]);
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        match steps[i * width + j] {
            Step::Diagonal => {
                matches.push((i - 1, j - 1));
                i -= 1;
                j -= 1;
            }
            Step::Up => i -= 1,
            Step::Left => j -= 1,
        }
    }
    matches.reverse();

    LcsAlignment {
        length: lengths[m * width + n],
        matches,
    }
}

/// Length of the longest common subsequence of `x` and `y`.
pub fn lcs_similarity<T: PartialEq>(x: &[T], y: &[T]) -> usize {
    lcs(x, y).length
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textbook_example() {
        let x: Vec<char> = "ABCBDAB".chars().collect();
        let y: Vec<char> = "BDCABA".chars().collect();
        let alignment = lcs(&x, &y);
        assert_eq!(alignment.length, 4);
        let common: String = alignment.matches.iter().map(|&(i, _)| x[i]).collect();
        assert_eq!(common, "BCBA");
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(lcs::<u8>(&[], &[1, 2]), LcsAlignment::default());
        assert_eq!(lcs_similarity::<u8>(&[1], &[]), 0);
    }
}
