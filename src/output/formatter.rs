use chrono::{DateTime, NaiveDate, NaiveDateTime};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::api::{Article, Repository};

/// "Showing 1 repository" / "Showing 3 repositories"
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    let noun = if count == 1 { singular } else { plural };
    format!("Showing {} {}", count, noun)
}

/// Group digits in thousands: 1234567 -> "1,234,567"
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

const DISPLAY_DATE: &str = "%b %-d, %Y";

/// "2024-01-05T10:00:00Z" -> "Jan 5, 2024".
///
/// Accepts RFC 3339, offsetless ISO-8601 date-times ("2024-01-05T10:00:00",
/// optionally with fractional seconds) and bare dates. Anything else is
/// returned as-is.
pub fn format_published_date(published_at: &str) -> String {
    if let Ok(date) = DateTime::parse_from_rfc3339(published_at) {
        return date.format(DISPLAY_DATE).to_string();
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(published_at, "%Y-%m-%dT%H:%M:%S%.f") {
        return date.format(DISPLAY_DATE).to_string();
    }
    match NaiveDate::parse_from_str(published_at, "%Y-%m-%d") {
        Ok(date) => date.format(DISPLAY_DATE).to_string(),
        Err(_) => published_at.to_string(),
    }
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate to `max_width` characters, ending in "..." when cut
pub fn truncate_label(label: &str, max_width: usize) -> String {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= max_width {
        label.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Width left for the label column once fixed columns are laid out
fn label_width(fixed_width: usize) -> Option<usize> {
    get_terminal_width().map(|width| {
        if width > fixed_width + 10 {
            width - fixed_width
        } else {
            20
        }
    })
}

/// One repository per line: index, stars, name, URL
pub fn format_repo_table(repos: &[&Repository], use_colors: bool) -> String {
    if repos.is_empty() {
        return "No repositories found matching your criteria".to_string();
    }

    let star_width = repos
        .iter()
        .map(|r| format_number(r.stargazers_count).len())
        .max()
        .unwrap_or(1);
    let separator = "  ";

    repos
        .iter()
        .enumerate()
        .map(|(idx, repo)| {
            let index_str = format!("{:>3}.", idx + 1);
            let stars = format!("{:>width$}", format_number(repo.stargazers_count), width = star_width);
            let fixed = index_str.len() + 1 + star_width + 2 + separator.len() * 2 + repo.html_url.len();
            let name = match label_width(fixed) {
                Some(width) => truncate_label(&repo.full_name, width),
                None => repo.full_name.clone(),
            };

            if use_colors {
                format!(
                    "{} {} {}{}{}{}{}",
                    index_str.dimmed(),
                    stars.yellow(),
                    "★".yellow(),
                    separator,
                    name.bold(),
                    separator,
                    repo.html_url.underline()
                )
            } else {
                format!(
                    "{} {} ★{}{}{}{}",
                    index_str, stars, separator, name, separator, repo.html_url
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One article per line: index, reactions, date, title, URL
pub fn format_article_table(articles: &[&Article], use_colors: bool) -> String {
    if articles.is_empty() {
        return "No articles found matching your criteria".to_string();
    }

    let reaction_width = articles
        .iter()
        .map(|a| format_number(a.positive_reactions_count).len())
        .max()
        .unwrap_or(1);
    let separator = "  ";

    articles
        .iter()
        .enumerate()
        .map(|(idx, article)| {
            let index_str = format!("{:>3}.", idx + 1);
            let reactions = format!(
                "{:>width$}",
                format_number(article.positive_reactions_count),
                width = reaction_width
            );
            let date = format!("{:<12}", format_published_date(&article.published_at));
            let fixed = index_str.len()
                + 1
                + reaction_width
                + 2
                + date.len()
                + separator.len() * 3
                + article.canonical_url.len();
            let title = match label_width(fixed) {
                Some(width) => truncate_label(&article.title, width),
                None => article.title.clone(),
            };

            if use_colors {
                format!(
                    "{} {} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    reactions.red(),
                    "♥".red(),
                    separator,
                    date.dimmed(),
                    separator,
                    title.bold(),
                    separator,
                    article.canonical_url.underline()
                )
            } else {
                format!(
                    "{} {} ♥{}{}{}{}{}{}",
                    index_str,
                    reactions,
                    separator,
                    date,
                    separator,
                    title,
                    separator,
                    article.canonical_url
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
