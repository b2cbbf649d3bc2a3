#![forbid(unsafe_code)]

//! Year → month → day navigation tree built from `auto_date` tag usage.
//!
//! The builder is a pure transform: callers re-run it whenever the tag set
//! changes. Children are ordered newest first at every level.

use crate::model::{TagType, TagUsage};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateTagParts {
    pub year: u32,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineLevel {
    Year,
    Month,
    Day,
}

impl TimelineLevel {
    pub fn depth(self) -> u8 {
        match self {
            TimelineLevel::Year => 0,
            TimelineLevel::Month => 1,
            TimelineLevel::Day => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineNode {
    pub id: String,
    pub label: String,
    pub level: TimelineLevel,
    pub count: i64,
    pub tag_name: String,
    pub children: Vec<TimelineNode>,
}

/// Splits a date tag on `-`. One segment is a year, two a month, three a day.
pub fn parse_date_tag(name: &str) -> Option<DateTagParts> {
    let mut parts = name.split('-');
    let year = parse_segment(parts.next()?)?;
    let month = parts.next().map(parse_segment);
    let day = parts.next().map(parse_segment);
    if parts.next().is_some() {
        return None;
    }

    match (month, day) {
        (None, None) => Some(DateTagParts {
            year,
            month: None,
            day: None,
        }),
        (Some(month), None) => Some(DateTagParts {
            year,
            month: Some(month?),
            day: None,
        }),
        (Some(month), Some(day)) => Some(DateTagParts {
            year,
            month: Some(month?),
            day: Some(day?),
        }),
        (None, Some(_)) => None,
    }
}

fn parse_segment(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u32>().ok()
}

#[derive(Default)]
struct YearSlot {
    count: Option<i64>,
    months: BTreeMap<u32, MonthSlot>,
}

#[derive(Default)]
struct MonthSlot {
    count: Option<i64>,
    days: BTreeMap<u32, (String, i64)>,
}

pub fn build_timeline(tags: &[TagUsage]) -> Vec<TimelineNode> {
    let mut years: BTreeMap<u32, YearSlot> = BTreeMap::new();

    for tag in tags.iter().filter(|tag| tag.tag_type == TagType::AutoDate) {
        let Some(parts) = parse_date_tag(&tag.name) else {
            continue;
        };

        let year = years.entry(parts.year).or_default();
        let Some(month) = parts.month else {
            year.count = Some(tag.count);
            continue;
        };

        let month_slot = year.months.entry(month).or_default();
        match parts.day {
            Some(day) => {
                month_slot.days.insert(day, (tag.name.clone(), tag.count));
            }
            None => month_slot.count = Some(tag.count),
        }
    }

    let mut out = Vec::new();
    for (year, slot) in years.into_iter().rev() {
        let mut months = Vec::new();
        for (month, month_slot) in slot.months.into_iter().rev() {
            let days = month_slot
                .days
                .into_iter()
                .rev()
                .map(|(day, (tag_name, count))| TimelineNode {
                    id: format!("day-{year}-{month:02}-{day:02}"),
                    label: format!("{day:02}"),
                    level: TimelineLevel::Day,
                    count,
                    tag_name,
                    children: Vec::new(),
                })
                .collect::<Vec<_>>();

            if days.is_empty() {
                continue;
            }

            months.push(TimelineNode {
                id: format!("month-{year}-{month:02}"),
                label: format!("{month:02}"),
                level: TimelineLevel::Month,
                count: month_slot.count.unwrap_or(0),
                tag_name: format!("{year}-{month:02}"),
                children: days,
            });
        }

        let count = slot.count.unwrap_or(0);
        if months.is_empty() && count == 0 {
            continue;
        }

        out.push(TimelineNode {
            id: format!("year-{year}"),
            label: year.to_string(),
            level: TimelineLevel::Year,
            count,
            tag_name: year.to_string(),
            children: months,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(name: &str, count: i64) -> TagUsage {
        TagUsage {
            name: name.to_string(),
            tag_type: TagType::AutoDate,
            count,
        }
    }

    #[test]
    fn parse_accepts_one_to_three_numeric_segments() {
        assert_eq!(
            parse_date_tag("2024"),
            Some(DateTagParts {
                year: 2024,
                month: None,
                day: None
            })
        );
        assert_eq!(
            parse_date_tag("2024-03"),
            Some(DateTagParts {
                year: 2024,
                month: Some(3),
                day: None
            })
        );
        assert_eq!(
            parse_date_tag("2024-03-07"),
            Some(DateTagParts {
                year: 2024,
                month: Some(3),
                day: Some(7)
            })
        );
    }

    #[test]
    fn parse_rejects_non_numeric_and_extra_segments() {
        assert_eq!(parse_date_tag("english"), None);
        assert_eq!(parse_date_tag("2024-xx"), None);
        assert_eq!(parse_date_tag("2024-03-07-01"), None);
        assert_eq!(parse_date_tag("2024--07"), None);
        assert_eq!(parse_date_tag(""), None);
        assert_eq!(parse_date_tag("+2024"), None);
    }

    #[test]
    fn builds_year_month_day_with_exact_counts() {
        let tags = vec![
            date("2023", 5),
            date("2023-01", 2),
            date("2023-01-15", 2),
            date("2023-01-16", 0),
        ];
        let tree = build_timeline(&tags);

        assert_eq!(tree.len(), 1);
        let year = &tree[0];
        assert_eq!(year.label, "2023");
        assert_eq!(year.tag_name, "2023");
        assert_eq!(year.count, 5);
        assert_eq!(year.level, TimelineLevel::Year);

        assert_eq!(year.children.len(), 1);
        let month = &year.children[0];
        assert_eq!(month.label, "01");
        assert_eq!(month.tag_name, "2023-01");
        assert_eq!(month.count, 2);

        let days = month
            .children
            .iter()
            .map(|node| node.tag_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(days, vec!["2023-01-16", "2023-01-15"]);
    }

    #[test]
    fn ignores_non_date_tags_and_unparseable_names() {
        let tags = vec![
            TagUsage {
                name: "english".to_string(),
                tag_type: TagType::AutoLanguage,
                count: 9,
            },
            TagUsage {
                name: "2020".to_string(),
                tag_type: TagType::Custom,
                count: 4,
            },
            date("not-a-date", 3),
        ];
        assert!(build_timeline(&tags).is_empty());
    }

    #[test]
    fn year_without_months_needs_nonzero_count() {
        assert!(build_timeline(&[date("2021", 0)]).is_empty());

        let tree = build_timeline(&[date("2021", 3)]);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn month_without_days_is_not_emitted() {
        let tree = build_timeline(&[date("2022", 1), date("2022-06", 1)]);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn ordering_is_numeric_and_newest_first() {
        let tags = vec![
            date("2022-02-03", 1),
            date("2024-01-09", 1),
            date("2022-11-20", 1),
            date("2022-11-02", 1),
            date("2023-05-05", 1),
        ];
        let tree = build_timeline(&tags);

        let years = tree.iter().map(|n| n.label.as_str()).collect::<Vec<_>>();
        assert_eq!(years, vec!["2024", "2023", "2022"]);

        let months_2022 = tree[2]
            .children
            .iter()
            .map(|n| n.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(months_2022, vec!["11", "02"]);

        let days_nov = tree[2].children[0]
            .children
            .iter()
            .map(|n| n.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(days_nov, vec!["day-2022-11-20", "day-2022-11-02"]);
    }
}
