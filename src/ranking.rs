//! Comment ranking.

use crate::result::Comment;

/// Keep the `max_count` most liked comments, most liked first.
///
/// The sort is stable: comments with equal like counts keep their source
/// order.
#[must_use]
pub fn rank_comments(mut comments: Vec<Comment>, max_count: usize) -> Vec<Comment> {
    comments.sort_by(|a, b| b.like_count.cmp(&a.like_count));
    comments.truncate(max_count);
    comments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(nickname: &str, like_count: i64) -> Comment {
        Comment {
            nickname: nickname.to_string(),
            like_count,
            ..Comment::default()
        }
    }

    fn likes(comments: &[Comment]) -> Vec<i64> {
        comments.iter().map(|c| c.like_count).collect()
    }

    #[test]
    fn test_keeps_top_three_in_order() {
        let ranked = rank_comments(
            vec![comment("a", 245), comment("b", 128), comment("c", 96), comment("d", 2)],
            3,
        );
        assert_eq!(likes(&ranked), vec![245, 128, 96]);
    }

    #[test]
    fn test_sorts_descending() {
        let ranked = rank_comments(vec![comment("a", 2), comment("b", 96), comment("c", 245)], 3);
        assert_eq!(likes(&ranked), vec![245, 96, 2]);
    }

    #[test]
    fn test_ties_keep_source_order() {
        let ranked = rank_comments(
            vec![comment("first", 10), comment("top", 50), comment("second", 10), comment("third", 10)],
            3,
        );
        let names: Vec<&str> = ranked.iter().map(|c| c.nickname.as_str()).collect();
        assert_eq!(names, vec!["top", "first", "second"]);
    }

    #[test]
    fn test_empty_and_zero_cap() {
        assert!(rank_comments(Vec::new(), 3).is_empty());
        assert!(rank_comments(vec![comment("a", 1)], 0).is_empty());
    }
}
