//! Listing parameters and the lesson query they resolve into.
//!

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};

use crate::model::entity::Lesson;

/// Raw listing parameters as a caller sends them.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingParams {
    /// `title_desc`, `date_created`, `date_created_desc`; anything else sorts by title
    pub sort_order: Option<String>,
    /// Sort echoed by the previous page, used when `sort_order` is absent
    pub current_sort: Option<String>,
    /// Search text that was active on the previous page
    pub current_filter: Option<String>,
    /// Newly submitted search text, restarts pagination at page 1
    pub search_string: Option<String>,
    pub course_id: Option<i32>,
    /// 1-based, clamped into range
    pub page_number: Option<i64>,
}

/// Serialized names are the `sort_order` values that select each order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "title")]
    TitleAsc,
    #[serde(rename = "title_desc")]
    TitleDesc,
    #[serde(rename = "date_created")]
    DateCreatedAsc,
    #[serde(rename = "date_created_desc")]
    DateCreatedDesc,
}

impl SortOrder {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("title_desc") => Self::TitleDesc,
            Some("date_created") => Self::DateCreatedAsc,
            Some("date_created_desc") => Self::DateCreatedDesc,
            _ => Self::TitleAsc,
        }
    }

    /// The parameter value that selects this order.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::TitleAsc => "title",
            Self::TitleDesc => "title_desc",
            Self::DateCreatedAsc => "date_created",
            Self::DateCreatedDesc => "date_created_desc",
        }
    }

    /// `ORDER BY` body. Ties always fall back to the identifier.
    fn order_by(&self) -> &'static str {
        match self {
            Self::TitleAsc => "title ASC, id ASC",
            Self::TitleDesc => "title DESC, id ASC",
            Self::DateCreatedAsc => "date_created ASC, id ASC",
            Self::DateCreatedDesc => "date_created DESC, id ASC",
        }
    }

    pub fn compare(&self, a: &Lesson, b: &Lesson) -> Ordering {
        let primary = match self {
            Self::TitleAsc => a.title().cmp(b.title()),
            Self::TitleDesc => b.title().cmp(a.title()),
            Self::DateCreatedAsc => a.date_created().cmp(&b.date_created()),
            Self::DateCreatedDesc => b.date_created().cmp(&a.date_created()),
        };
        primary.then_with(|| a.id().cmp(&b.id()))
    }
}

/// Predicates and ordering for one lesson listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonQuery {
    course_id: Option<i32>,
    search: Option<String>,
    sort: SortOrder,
}

impl LessonQuery {
    pub fn new(course_id: Option<i32>, search: Option<String>, sort: SortOrder) -> Self {
        let search = search.filter(|s| !s.is_empty());
        Self {
            course_id,
            search,
            sort,
        }
    }

    pub fn course_id(&self) -> Option<i32> {
        self.course_id
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Course scope AND (title OR introduction contains the search text).
    /// Substring matching is case-sensitive.
    pub fn matches(&self, lesson: &Lesson) -> bool {
        if let Some(course_id) = self.course_id {
            if lesson.course_id() != course_id {
                return false;
            }
        }

        match self.search() {
            Some(text) => {
                lesson.title().contains(text)
                    || lesson.introduction().is_some_and(|intro| intro.contains(text))
            }
            None => true,
        }
    }

    pub fn to_sql(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(
            "SELECT id, title, introduction, course_id, date_created FROM lessons WHERE TRUE",
        );

        if let Some(course_id) = self.course_id {
            qb.push(" AND course_id = ").push_bind(course_id);
        }

        if let Some(text) = self.search() {
            // strpos keeps LIKE wildcards in the search text literal
            qb.push(" AND (strpos(title, ")
                .push_bind(text.to_owned())
                .push(") > 0 OR strpos(introduction, ")
                .push_bind(text.to_owned())
                .push(") > 0)");
        }

        qb.push(" ORDER BY ").push(self.sort.order_by());
        qb
    }
}

/// What a listing request resolves to before it touches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedListing {
    pub query: LessonQuery,
    /// Echoed back so the next page keeps the same filter
    pub current_filter: Option<String>,
    pub page_number: i64,
}

impl ListingParams {
    pub fn resolve(self) -> ResolvedListing {
        // any submitted search, even an empty one, starts over at page 1
        let (active_filter, page_number) = match self.search_string {
            Some(search) => (Some(search), Some(1)),
            None => (self.current_filter, self.page_number),
        };

        let sort = SortOrder::parse(self.sort_order.or(self.current_sort).as_deref());
        let query = LessonQuery::new(self.course_id, active_filter.clone(), sort);

        ResolvedListing {
            query,
            current_filter: active_filter,
            page_number: page_number.unwrap_or(1),
        }
    }
}

#[cfg(test)]
mod test {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn lesson(id: i32, title: &str, intro: Option<&str>, course_id: i32, year: i32) -> Lesson {
        Lesson::new(
            id,
            title.to_string(),
            intro.map(str::to_string),
            course_id,
            Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn sort_order_parse() {
        assert_eq!(SortOrder::parse(Some("title_desc")), SortOrder::TitleDesc);
        assert_eq!(SortOrder::parse(Some("date_created")), SortOrder::DateCreatedAsc);
        assert_eq!(SortOrder::parse(Some("date_created_desc")), SortOrder::DateCreatedDesc);
        assert_eq!(SortOrder::parse(Some("")), SortOrder::TitleAsc);
        assert_eq!(SortOrder::parse(Some("TITLE_DESC")), SortOrder::TitleAsc);
        assert_eq!(SortOrder::parse(None), SortOrder::TitleAsc);
    }

    #[test]
    fn sort_order_param_round_trips() {
        for sort in [
            SortOrder::TitleAsc,
            SortOrder::TitleDesc,
            SortOrder::DateCreatedAsc,
            SortOrder::DateCreatedDesc,
        ] {
            assert_eq!(SortOrder::parse(Some(sort.as_param())), sort);
        }
    }

    #[test]
    fn sort_order_serializes_as_param() {
        for sort in [
            SortOrder::TitleAsc,
            SortOrder::TitleDesc,
            SortOrder::DateCreatedAsc,
            SortOrder::DateCreatedDesc,
        ] {
            let echoed = serde_json::to_value(sort).unwrap();
            assert_eq!(echoed, sort.as_param());
            assert_eq!(SortOrder::parse(echoed.as_str()), sort);
        }
    }

    #[test]
    fn current_sort_applies_without_sort_order() {
        let resolved = ListingParams {
            current_sort: Some("date_created".into()),
            ..Default::default()
        }
        .resolve();
        assert_eq!(resolved.query.sort(), SortOrder::DateCreatedAsc);

        let resolved = ListingParams {
            sort_order: Some("title_desc".into()),
            current_sort: Some("date_created".into()),
            ..Default::default()
        }
        .resolve();
        assert_eq!(resolved.query.sort(), SortOrder::TitleDesc);
    }

    #[test]
    fn new_search_resets_page() {
        let resolved = ListingParams {
            search_string: Some("rust".into()),
            current_filter: Some("old".into()),
            page_number: Some(4),
            ..Default::default()
        }
        .resolve();

        assert_eq!(resolved.page_number, 1);
        assert_eq!(resolved.current_filter.as_deref(), Some("rust"));
        assert_eq!(resolved.query.search(), Some("rust"));
    }

    #[test]
    fn current_filter_keeps_page() {
        let resolved = ListingParams {
            current_filter: Some("old".into()),
            page_number: Some(4),
            ..Default::default()
        }
        .resolve();

        assert_eq!(resolved.page_number, 4);
        assert_eq!(resolved.current_filter.as_deref(), Some("old"));
        assert_eq!(resolved.query.search(), Some("old"));
    }

    #[test]
    fn empty_search_string_clears_filter_and_resets_page() {
        let resolved = ListingParams {
            search_string: Some(String::new()),
            current_filter: Some("old".into()),
            page_number: Some(3),
            ..Default::default()
        }
        .resolve();

        assert_eq!(resolved.page_number, 1);
        assert_eq!(resolved.current_filter.as_deref(), Some(""));
        assert_eq!(resolved.query.search(), None);
    }

    #[test]
    fn missing_page_defaults_to_first() {
        let resolved = ListingParams::default().resolve();
        assert_eq!(resolved.page_number, 1);
        assert_eq!(resolved.query, LessonQuery::default());
    }

    #[test]
    fn matches_is_course_and_text() {
        let query = LessonQuery::new(Some(5), Some("intro".into()), SortOrder::TitleAsc);

        assert!(query.matches(&lesson(1, "intro to rust", None, 5, 2020)));
        assert!(query.matches(&lesson(2, "ownership", Some("an intro"), 5, 2020)));
        assert!(!query.matches(&lesson(3, "intro to go", None, 6, 2020)));
        assert!(!query.matches(&lesson(4, "ownership", None, 5, 2020)));
        // case-sensitive
        assert!(!query.matches(&lesson(5, "Intro", Some("INTRO"), 5, 2020)));
    }

    #[test]
    fn compare_date_desc() {
        let mut lessons = vec![
            lesson(1, "a", None, 1, 2021),
            lesson(2, "b", None, 1, 2022),
            lesson(3, "c", None, 1, 2020),
        ];
        lessons.sort_by(|a, b| SortOrder::DateCreatedDesc.compare(a, b));
        let ids: Vec<_> = lessons.iter().map(Lesson::id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn compare_ties_break_on_id() {
        let mut lessons = vec![
            lesson(9, "same", None, 1, 2021),
            lesson(3, "same", None, 1, 2021),
            lesson(5, "same", None, 1, 2021),
        ];
        lessons.sort_by(|a, b| SortOrder::TitleDesc.compare(a, b));
        let ids: Vec<_> = lessons.iter().map(Lesson::id).collect();
        assert_eq!(ids, vec![3, 5, 9]);
    }

    #[test]
    fn sql_composes_predicates() {
        let query = LessonQuery::new(Some(5), Some("intro".into()), SortOrder::DateCreatedDesc);
        let sql = query.to_sql().into_sql();

        assert!(sql.contains("course_id = $1"));
        assert!(sql.contains("strpos(title, $2) > 0 OR strpos(introduction, $3) > 0"));
        assert!(sql.ends_with("ORDER BY date_created DESC, id ASC"));
    }

    #[test]
    fn sql_without_predicates() {
        let sql = LessonQuery::default().to_sql().into_sql();
        assert!(!sql.contains("course_id ="));
        assert!(!sql.contains("strpos"));
        assert!(sql.ends_with("ORDER BY title ASC, id ASC"));
    }
}
