use crate::domain::Article;
use crate::services::{PaginationState, RequestStatus};

/// Format: "{index}. {title} [{source}] {date}"
pub fn article_line(index: usize, article: &Article) -> String {
    let mut line = format!("{:>3}. {}", index, article.title);

    if !article.source_name.is_empty() {
        line.push_str(&format!(" [{}]", article.source_name));
    }

    let date = article.display_date();
    if !date.is_empty() {
        line.push(' ');
        line.push_str(&date);
    }

    line
}

pub fn headline_banner(article: &Article) -> String {
    let mut banner = format!("== {} ==\n{}", article.title, article.source_name);

    let date = article.display_date();
    if !date.is_empty() {
        banner.push_str(" | ");
        banner.push_str(&date);
    }
    if let Some(image) = &article.image_url {
        banner.push_str(&format!("\nImage: {}", image));
    }
    banner.push_str(&format!("\n{}", article.url));

    banner
}

/// Text for status transitions worth showing. Success is shown through
/// the list itself.
pub fn status_line(status: &RequestStatus) -> Option<String> {
    match status {
        RequestStatus::Loading => Some("Loading...".to_string()),
        RequestStatus::Error(err) => Some(format!("Error: {}", err)),
        RequestStatus::Idle | RequestStatus::Success(_) => None,
    }
}

pub fn progress_line(shown: usize, total_results: u64) -> String {
    format!("-- {} of {} results --", shown, total_results)
}

pub fn summary(state: &PaginationState) -> String {
    format!(
        "Showing {} of {} results for '{}'",
        state.accumulated_articles.len(),
        state.total_results,
        state.current_query
    )
}
