/// Greedy forward matching of a candidate sequence inside a student sequence.
///
/// Every candidate element is searched for from the current student
/// position onwards; a hit moves the student position just past it, a miss
/// leaves it unchanged and the next candidate element is tried. Returns the
/// final student position, which is the index of the last matched student
/// element plus one.
///
/// The measure is asymmetric: it rewards students that reach far along the
/// candidate's trajectory, not sequences that align in full.
pub fn state_similarity<T: PartialEq>(candidate: &[T], student: &[T]) -> usize {
    let mut j = 0;
    for element in candidate {
        if j >= student.len() {
            break;
        }
        if let Some(offset) = student[j..].iter().position(|s| s == element) {
            j += offset + 1;
        }
    }
    j
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_sequences_match_fully() {
        assert_eq!(state_similarity(&[1, 2, 3], &[1, 2, 3]), 3);
    }

    #[test]
    fn unmatched_candidate_elements_are_skipped() {
        // 9 never appears; 3 is still found afterwards
        assert_eq!(state_similarity(&[1, 9, 3], &[1, 2, 3, 4]), 3);
        assert_eq!(state_similarity(&[5], &[1, 2]), 0);
        assert_eq!(state_similarity::<i32>(&[], &[1]), 0);
    }

    #[test]
    fn student_detours_are_absorbed() {
        assert_eq!(state_similarity(&[1, 4], &[1, 2, 3, 4, 5]), 4);
        assert_eq!(state_similarity(&[1, 2, 3, 4, 5], &[1, 4]), 2);
    }
}
