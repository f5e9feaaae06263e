use std::cmp::Ordering;

/// compares two entry names the way a person reading them would, so that
/// `File 2` sorts before `File 10` instead of after it. Comparison is
/// case-insensitive; runs of digits are compared by numeric value instead of
/// character by character.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let mut i = 0;
    let mut j = 0;
    while i < a_chars.len() && j < b_chars.len() {
        let ca = a_chars[i];
        let cb = b_chars[j];
        if ca.is_ascii_digit() && cb.is_ascii_digit() {
            let a_end = digit_run_end(&a_chars, i);
            let b_end = digit_run_end(&b_chars, j);
            let a_run = strip_leading_zeros(&a_chars[i..a_end]);
            let b_run = strip_leading_zeros(&b_chars[j..b_end]);
            // a longer digit run (after zero-stripping) is always the larger number
            let ordering = match a_run.len().cmp(&b_run.len()) {
                Ordering::Equal => a_run.cmp(b_run),
                unequal => unequal,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
            i = a_end;
            j = b_end;
        } else {
            let la = ca.to_lowercase().next().unwrap_or(ca);
            let lb = cb.to_lowercase().next().unwrap_or(cb);
            if la != lb {
                return la.cmp(&lb);
            }
            i += 1;
            j += 1;
        }
    }
    // one name is a prefix of the other; the shorter one comes first
    (a_chars.len() - i).cmp(&(b_chars.len() - j))
}

fn digit_run_end(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    end
}

fn strip_leading_zeros(run: &[char]) -> &[char] {
    let mut start = 0;
    // keep the last zero so "0" still compares as a number
    while start < run.len() - 1 && run[start] == '0' {
        start += 1;
    }
    &run[start..]
}

#[cfg(test)]
mod natural_cmp_tests {
    use std::cmp::Ordering;

    use super::natural_cmp;

    #[test]
    fn sorts_digit_runs_numerically() {
        let mut names = vec!["File 10", "File 2", "File 1"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(vec!["File 1", "File 2", "File 10"], names);
    }

    #[test]
    fn ignores_case() {
        assert_eq!(Ordering::Less, natural_cmp("apple.png", "Banana.png"));
        assert_eq!(Ordering::Equal, natural_cmp("Chapter.md", "chapter.md"));
    }

    #[test]
    fn shorter_prefix_comes_first() {
        assert_eq!(Ordering::Less, natural_cmp("intro", "introduction"));
    }

    #[test]
    fn treats_leading_zeros_as_equal_value() {
        assert_eq!(Ordering::Equal, natural_cmp("part 007", "part 7"));
        assert_eq!(Ordering::Less, natural_cmp("part 007", "part 8"));
    }

    #[test]
    fn compares_huge_numbers_without_overflow() {
        assert_eq!(
            Ordering::Less,
            natural_cmp("v99999999999999999998", "v99999999999999999999")
        );
    }
}
