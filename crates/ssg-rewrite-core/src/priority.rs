//! Routing priority order.
//!
//! Reproduces the order in which the Pages Router resolves routes
//! (`getSortedRoutes` in Next.js): static segments win over dynamic ones at
//! the same position, equal prefixes fall back to collation order, and a
//! route sorts before every longer route it is a prefix of.
//!
//! The comparator is a lexicographic order over a total character order
//! (`[` above everything else), so it is transitive and returns
//! [`Ordering::Equal`] only for identical routes. The result therefore does
//! not depend on sort stability or on the input permutation.

use std::cmp::Ordering;

use crate::route::Route;

/// Opening delimiter of a dynamic segment.
const DYNAMIC_SEGMENT_OPEN: char = '[';

/// Whitespace and punctuation in root collation order.
///
/// Characters listed here sort before every other symbol, all digits and all
/// letters, in the order given.
const PUNCTUATION_ORDER: &[char] = &[
    '\t', '\n', '\u{b}', '\u{c}', '\r', ' ', '_', '-', ',', ';', ':', '!', '?', '.', '\'', '"',
    '(', ')', '[', ']', '{', '}', '@', '*', '/', '\\', '&', '#', '%', '`', '^', '+', '<', '=',
    '>', '|', '~', '$',
];

/// Compare two routes by resolution priority.
///
/// `Less` means `a` is tried before `b`.
#[must_use]
pub fn compare_priority(a: &Route, b: &Route) -> Ordering {
    compare_route_str(a.as_str(), b.as_str())
}

/// Sort routes in place, highest priority first.
pub fn sort_by_priority(routes: &mut [Route]) {
    routes.sort_by(compare_priority);
}

/// Return routes ordered highest priority first.
#[must_use]
pub fn sorted_by_priority(mut routes: Vec<Route>) -> Vec<Route> {
    sort_by_priority(&mut routes);
    routes
}

fn compare_route_str(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }

        // Without a dynamic segment at this position wins
        if ca == DYNAMIC_SEGMENT_OPEN {
            return Ordering::Greater;
        }
        if cb == DYNAMIC_SEGMENT_OPEN {
            return Ordering::Less;
        }

        return collate(ca, cb);
    }

    // One is a prefix of the other: the shorter route wins
    a.len().cmp(&b.len())
}

/// Compare two characters the way `String.prototype.localeCompare` does
/// under the root locale, with code point order as the final tie-break.
fn collate(a: char, b: char) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

/// Primary collation weight. Variant order is significant.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Primary {
    Punctuation(usize),
    Symbol,
    Digit(u32),
    Letter(char),
}

fn collation_key(c: char) -> (Primary, bool, char) {
    let primary = if let Some(pos) = PUNCTUATION_ORDER.iter().position(|&p| p == c) {
        Primary::Punctuation(pos)
    } else if let Some(digit) = c.to_digit(10) {
        Primary::Digit(digit)
    } else if c.is_alphabetic() {
        Primary::Letter(c.to_lowercase().next().unwrap_or(c))
    } else {
        Primary::Symbol
    };

    // Lowercase before uppercase on equal primary weight
    (primary, c.is_uppercase(), c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes(list: &[&str]) -> Vec<Route> {
        list.iter().map(|r| Route::parse(r).unwrap()).collect()
    }

    fn sorted(list: &[&str]) -> Vec<String> {
        sorted_by_priority(routes(list))
            .iter()
            .map(|r| r.as_str().to_owned())
            .collect()
    }

    #[test]
    fn test_shorter_prefix_first() {
        assert_eq!(sorted(&["/menu", "/me"]), vec!["/me", "/menu"]);
    }

    #[test]
    fn test_static_before_dynamic() {
        assert_eq!(
            sorted(&["/user/[id]", "/user/new"]),
            vec!["/user/new", "/user/[id]"]
        );
    }

    #[test]
    fn test_static_before_dynamic_at_first_difference() {
        assert_eq!(
            sorted(&[
                "/course/[subjectCode]/credit",
                "/course/subject/[subjectCode]"
            ]),
            vec![
                "/course/subject/[subjectCode]",
                "/course/[subjectCode]/credit"
            ]
        );
    }

    /// Fixture from Next.js `test/unit/page-route-sorter.test.ts`, without the
    /// catch-all routes.
    const NEXTJS_FIXTURE: &[&str] = &[
        "/posts",
        "/[root-slug]",
        "/",
        "/posts/[id]",
        "/blog/[id]/comments/[cid]",
        "/blog/abc/[id]",
        "/blog/abc/post",
        "/blog/abc",
        "/p2/[id]",
        "/p2/[id]/abc",
        "/p3/[id]",
        "/p3/[id]/abc",
        "/blog/[id]",
        "/foo/[d]/bar/baz/[f]",
        "/apples/[ab]/[cd]/ef",
    ];

    #[test]
    fn test_nextjs_fixture_order() {
        assert_eq!(
            sorted(NEXTJS_FIXTURE),
            vec![
                "",
                "/apples/[ab]/[cd]/ef",
                "/blog/abc",
                "/blog/abc/post",
                "/blog/abc/[id]",
                "/blog/[id]",
                "/blog/[id]/comments/[cid]",
                "/foo/[d]/bar/baz/[f]",
                "/p2/[id]",
                "/p2/[id]/abc",
                "/p3/[id]",
                "/p3/[id]/abc",
                "/posts",
                "/posts/[id]",
                "/[root-slug]",
            ]
        );
    }

    #[test]
    fn test_sort_is_idempotent() {
        let once = sorted_by_priority(routes(NEXTJS_FIXTURE));
        let twice = sorted_by_priority(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_is_independent_of_input_order() {
        let expected = sorted(NEXTJS_FIXTURE);
        let mut reversed = NEXTJS_FIXTURE.to_vec();
        reversed.reverse();
        assert_eq!(sorted(&reversed), expected);

        // Every rotation of the input yields the same order
        for shift in 1..NEXTJS_FIXTURE.len() {
            let mut rotated = NEXTJS_FIXTURE.to_vec();
            rotated.rotate_left(shift);
            assert_eq!(sorted(&rotated), expected, "rotation by {shift}");
        }
    }

    #[test]
    fn test_comparator_equal_only_for_identical_routes() {
        let all = routes(NEXTJS_FIXTURE);
        for a in &all {
            for b in &all {
                let ordering = compare_priority(a, b);
                assert_eq!(ordering == Ordering::Equal, a == b, "{a:?} vs {b:?}");
                assert_eq!(ordering, compare_priority(b, a).reverse());
            }
        }
    }

    #[test]
    fn test_comparator_is_transitive() {
        let all = routes(NEXTJS_FIXTURE);
        for a in &all {
            for b in &all {
                for c in &all {
                    if compare_priority(a, b) == Ordering::Less
                        && compare_priority(b, c) == Ordering::Less
                    {
                        assert_eq!(compare_priority(a, c), Ordering::Less);
                    }
                }
            }
        }
    }

    #[test]
    fn test_collation_digits_before_letters() {
        assert_eq!(sorted(&["/posts", "/p2"]), vec!["/p2", "/posts"]);
    }

    #[test]
    fn test_collation_case_insensitive_first() {
        assert_eq!(
            sorted(&["/b", "/B", "/a", "/A"]),
            vec!["/a", "/A", "/b", "/B"]
        );
    }

    #[test]
    fn test_collation_punctuation_before_alphanumerics() {
        assert_eq!(
            sorted(&["/ab", "/a/b", "/a-b", "/a_b", "/a1"]),
            vec!["/a_b", "/a-b", "/a/b", "/a1", "/ab"]
        );
    }

    #[test]
    fn test_collation_distinct_chars_never_equal() {
        assert_eq!(collate('e', 'é'), Ordering::Less);
        assert_ne!(collate('e', 'é'), Ordering::Equal);
        assert_ne!(collate('a', 'A'), Ordering::Equal);
    }
}
