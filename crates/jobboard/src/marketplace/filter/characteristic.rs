use serde::Serialize;

use crate::marketplace::domain::{EngagementLength, Listing, WorkStyle};

/// Parsed form of a characteristic label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Characteristic {
    HourlyWageAtLeast(u32),
    WorkStyle(WorkStyle),
    RemoteFriendly,
    Engagement(EngagementLength),
    Keyword(String),
}

impl Characteristic {
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        match label {
            "フルリモート" => return Self::WorkStyle(WorkStyle::Remote),
            "リモート可" => return Self::RemoteFriendly,
            "長期インターン" => return Self::Engagement(EngagementLength::LongTerm),
            "短期インターン" => return Self::Engagement(EngagementLength::ShortTerm),
            _ => {}
        }

        if let Some(threshold) = label
            .strip_prefix("時給")
            .and_then(|rest| rest.strip_suffix("円以上"))
            .and_then(first_amount)
        {
            return Self::HourlyWageAtLeast(threshold);
        }

        Self::Keyword(label.to_string())
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        match self {
            Self::HourlyWageAtLeast(threshold) => {
                hourly_wage(&listing.salary).is_some_and(|wage| wage >= *threshold)
            }
            Self::WorkStyle(style) => listing.work_style == *style,
            Self::RemoteFriendly => {
                matches!(listing.work_style, WorkStyle::Remote | WorkStyle::Hybrid)
            }
            Self::Engagement(length) => listing.engagement == *length,
            Self::Keyword(keyword) => {
                listing.tags.iter().any(|tag| tag.contains(keyword.as_str()))
                    || listing.description.contains(keyword.as_str())
            }
        }
    }
}

const HOURLY_MARKER: &str = "時給";
const NON_HOURLY_MARKERS: [&str; 4] = ["月給", "日給", "年収", "年俸"];

/// Hourly wage in yen stated by a free-text salary, if one can be read.
///
/// When the text names 時給, the amount after that marker is the wage and other figures are
/// ignored. Otherwise salaries naming a monthly, daily, or annual figure have no hourly wage.
pub fn hourly_wage(salary: &str) -> Option<u32> {
    if let Some((_, rest)) = salary.split_once(HOURLY_MARKER) {
        return first_amount(rest);
    }
    if NON_HOURLY_MARKERS
        .iter()
        .any(|marker| salary.contains(marker))
    {
        return None;
    }
    first_amount(salary)
}

/// First run of digits in `text`, allowing thousands separators inside the run.
fn first_amount(text: &str) -> Option<u32> {
    let mut digits = String::new();
    let mut chars = text.chars().map(normalize_digit).peekable();

    while let Some(ch) = chars.next() {
        if ch.is_ascii_digit() {
            digits.push(ch);
        } else if !digits.is_empty() && matches!(ch, ',' | '，') {
            if !chars.peek().is_some_and(|next| next.is_ascii_digit()) {
                break;
            }
        } else if !digits.is_empty() {
            break;
        }
    }

    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

fn normalize_digit(ch: char) -> char {
    match ch {
        '０'..='９' => char::from_u32(ch as u32 - '０' as u32 + '0' as u32).unwrap_or(ch),
        other => other,
    }
}
