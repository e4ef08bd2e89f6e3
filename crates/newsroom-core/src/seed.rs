//! First-run seed data
//!
//! Used when the store has no (readable) collections yet.

use chrono::{Duration, NaiveDate};

use crate::id::generate_id;
use crate::models::{Article, NewsletterIssue};

/// The two articles a fresh newsroom starts with
pub fn default_articles(today: NaiveDate) -> Vec<Article> {
    let mut launch = Article::with_id(
        generate_id(),
        "Launch Issue: Our Newsroom's Promise",
        "Editor-in-Chief",
        today,
    );
    launch.category = "Editorial".to_string();
    launch.tags = vec!["launch".to_string(), "vision".to_string()];
    launch.summary =
        "For our first issue, a word on what a paper made by students should stand for."
            .to_string();
    launch.content = "# Launch Issue\n\n\
        This newsroom is committed to **records** and **verification**.\n\n\
        - More accurate\n\
        - Faster\n\
        - More accountable\n\n\
        We welcome your tips and your criticism."
        .to_string();

    let mut dining = Article::with_id(
        generate_id(),
        "Campus Dining: Prices Went Up, Did Quality?",
        "Campus Desk",
        today - Duration::days(3),
    );
    dining.category = "Campus".to_string();
    dining.tags = vec![
        "campus".to_string(),
        "dining".to_string(),
        "prices".to_string(),
    ];
    dining.summary = "We looked into complaints about quality since the cafeteria raised prices."
        .to_string();
    dining.content = "The student cafeteria recently raised its prices. \
        Of the *412 students* we surveyed, 67% said quality does not match the price. \
        We cover the weekly menu and proposals for alternatives."
        .to_string();

    vec![launch, dining]
}

/// The newsletter issue a fresh newsroom starts with
pub fn default_newsletters(today: NaiveDate) -> Vec<NewsletterIssue> {
    let mut issue = NewsletterIssue::with_id(generate_id(), "Weekly Editor's Note #1", today);
    issue.highlight = "Behind the launch issue & our reporting schedule".to_string();
    issue.content = "This week: how the launch issue was made, the schedule for the next \
        issue, and a roundup of reader questions."
        .to_string();
    vec![issue]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()
    }

    #[test]
    fn test_default_articles() {
        let articles = default_articles(today());
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].date, today());
        assert_eq!(articles[1].date, NaiveDate::from_ymd_opt(2024, 8, 30).unwrap());
        assert_ne!(articles[0].id, articles[1].id);
        assert!(articles.iter().all(|a| !a.title.is_empty() && !a.author.is_empty()));
    }

    #[test]
    fn test_default_newsletters() {
        let issues = default_newsletters(today());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].date, today());
        assert!(!issues[0].highlight.is_empty());
    }
}
