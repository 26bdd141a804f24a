//! Edit-distance based string similarity.

/// Compute the insertion/deletion edit distance between two strings.
///
/// Substitutions count as one deletion plus one insertion, which makes the
/// distance `len1 + len2 - 2 * lcs`.
pub fn indel_distance(s1: &str, s2: &str) -> usize {
    let s1: Vec<char> = s1.chars().collect();
    let s2: Vec<char> = s2.chars().collect();
    let len1 = s1.len();
    let len2 = s2.len();

    // Longest common subsequence table
    let mut matrix = vec![vec![0usize; len2 + 1]; len1 + 1];

    for i in 1..=len1 {
        for j in 1..=len2 {
            matrix[i][j] = if s1[i - 1] == s2[j - 1] {
                matrix[i - 1][j - 1] + 1
            } else {
                matrix[i - 1][j].max(matrix[i][j - 1])
            };
        }
    }

    len1 + len2 - 2 * matrix[len1][len2]
}

/// Similarity ratio in `0..=100`, higher meaning more similar.
///
/// `100 * (1 - indel_distance / (len1 + len2))`, rounded. Two empty strings
/// are identical; one empty string against a non-empty one scores 0.
pub fn fuzzy_ratio(s1: &str, s2: &str) -> u8 {
    let total = s1.chars().count() + s2.chars().count();
    if total == 0 {
        return 100;
    }

    let distance = indel_distance(s1, s2);
    let ratio = 100.0 * (total - distance) as f64 / total as f64;
    ratio.round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indel_distance() {
        assert_eq!(indel_distance("ACME", "ACME"), 0);
        assert_eq!(indel_distance("ACME", "ACNE"), 2);
        assert_eq!(indel_distance("", "ABC"), 3);
        assert_eq!(indel_distance("KITTEN", "SITTING"), 5);
    }

    #[test]
    fn test_ratio_bounds() {
        assert_eq!(fuzzy_ratio("Acme Manufacturing", "Acme Manufacturing"), 100);
        assert_eq!(fuzzy_ratio("", ""), 100);
        assert_eq!(fuzzy_ratio("Acme", ""), 0);
        assert_eq!(fuzzy_ratio("abc", "xyz"), 0);
    }

    #[test]
    fn test_ratio_values() {
        // lcs 3 of total 8
        assert_eq!(fuzzy_ratio("ACME", "ACNE"), 75);
        // one missing character out of 23
        assert_eq!(fuzzy_ratio("Acme Widgets", "Acme Widget"), 96);
    }

    #[test]
    fn test_ratio_symmetric() {
        assert_eq!(
            fuzzy_ratio("General Electric", "General Electrics Company"),
            fuzzy_ratio("General Electrics Company", "General Electric")
        );
    }
}
