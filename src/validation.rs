//! Input checks run on every form submission before the model is touched.
//!
//! The branch order in [`assess`] mirrors the deployed form exactly, gaps
//! included: an invalid summary next to a valid title is reported but does
//! not stop inference, while every "too few words" case does.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

static LOWERCASE_PREFIX: OnceLock<Regex> = OnceLock::new();

fn lowercase_prefix() -> &'static Regex {
    LOWERCASE_PREFIX.get_or_init(|| Regex::new("^[a-z]+").expect("static pattern compiles"))
}

/// Returns true for an empty string or one that starts with lowercase ASCII
/// letters. Only the prefix is checked: `"abc123"` passes.
pub fn is_ok(text: &str) -> bool {
    text.is_empty() || lowercase_prefix().is_match(text)
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn is_short(words: usize) -> bool {
    (1..=3).contains(&words)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NothingEntered,
    BadSummary,
    BadTitle,
    BadTitleAndSummary,
    FewWordsSummary,
    FewWordsTitle,
    FewWordsTitleAndSummary,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::NothingEntered => "PLEASE ENTER SOMETHING!",
            Notice::BadSummary => "INCORRECT INPUT FORMAT: SUMMARY",
            Notice::BadTitle => "INCORRECT INPUT FORMAT: TITLE",
            Notice::BadTitleAndSummary => "INCORRECT INPUT FORMAT: TITLE, SUMMARY",
            Notice::FewWordsSummary => {
                "There are too few words in summary, result can be bad. Make sure you enter full text"
            }
            Notice::FewWordsTitle => {
                "There are too few words in title, result can be bad. Make sure you enter full text"
            }
            Notice::FewWordsTitleAndSummary => {
                "There are too few words in title and summary, result can be bad. Make sure you enter full text"
            }
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// What the form should show, and the model input if inference should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub notices: Vec<Notice>,
    pub text: Option<String>,
}

pub fn assess(title: &str, summary: &str) -> Assessment {
    let title = title.to_lowercase();
    let summary = summary.to_lowercase();

    if title.is_empty() && summary.is_empty() {
        return Assessment {
            notices: vec![Notice::NothingEntered],
            text: None,
        };
    }

    let title_ok = is_ok(&title);
    let summary_ok = is_ok(&summary);
    let title_words = word_count(&title);
    let summary_words = word_count(&summary);

    let mut notices = Vec::new();
    if !summary_ok && title_ok {
        notices.push(Notice::BadSummary);
    }

    let blocking = if summary_ok && !title_ok {
        Some(Notice::BadTitle)
    } else if !title_ok && !summary_ok {
        Some(Notice::BadTitleAndSummary)
    } else if is_short(summary_words) && title.is_empty() {
        Some(Notice::FewWordsSummary)
    } else if is_short(title_words) && summary.is_empty() {
        Some(Notice::FewWordsTitle)
    } else if is_short(title_words) && summary_words == 1 {
        Some(Notice::FewWordsTitleAndSummary)
    } else {
        None
    };

    match blocking {
        Some(notice) => {
            notices.push(notice);
            Assessment {
                notices,
                text: None,
            }
        }
        None => Assessment {
            notices,
            text: Some(format!("{}. {}", title, summary)),
        },
    }
}
