use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, ItemsAndPagesNumber,
    PaginatorTrait, QueryFilter, Select,
};
use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_PER_PAGE: u64 = 10;

/// Restricts `select` with a substring match for every criterion whose term is
/// non-empty. Active criteria combine with AND; with none active the select
/// passes through unchanged.
pub fn contains_filters<E: EntityTrait>(
    mut select: Select<E>,
    criteria: &[(E::Column, &str)],
) -> Select<E> {
    for (column, term) in criteria {
        if !term.is_empty() {
            select = select.filter(column.contains(*term));
        }
    }
    select
}

/// Raw `page`/`per_page` query parameters. Kept as strings so that
/// non-integer input falls back to the defaults instead of rejecting the
/// request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
    per_page: Option<String>,
}

impl PageQuery {
    pub fn params(&self) -> PageParams {
        PageParams {
            page: parse_positive(self.page.as_deref(), DEFAULT_PAGE),
            per_page: parse_positive(self.per_page.as_deref(), DEFAULT_PER_PAGE),
        }
    }
}

// Non-integer input falls back to the default; integers are clamped to 1.
fn parse_positive(raw: Option<&str>, default: u64) -> u64 {
    match raw.and_then(|s| s.parse::<i64>().ok()) {
        Some(n) => n.max(1) as u64,
        None => default,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageParams {
    pub page: u64,
    pub per_page: u64,
}

/// Pagination envelope wrapping one page of results with navigation metadata.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub pages: u64,
    pub current_page: u64,
    pub per_page: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<String>,
}

/// Counts the filtered rows and fetches the requested page slice. `base_url`
/// is the request path the navigation links are built from.
pub async fn paginate<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    params: PageParams,
    base_url: &str,
) -> Result<Page<E::Model>, sea_orm::DbErr>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Sized + Send + Sync + 'static,
{
    let paginator = select.paginate(db, params.per_page);
    let ItemsAndPagesNumber { number_of_items: total, number_of_pages } =
        paginator.num_items_and_pages().await?;
    let data = paginator.fetch_page(params.page - 1).await?;

    Ok(build_page(data, total, number_of_pages.max(1), params, base_url))
}

fn build_page<T>(
    data: Vec<T>,
    total: u64,
    pages: u64,
    params: PageParams,
    base_url: &str,
) -> Page<T> {
    let next_page =
        (params.page < pages).then(|| format!("{base_url}?page={}", params.page + 1));
    let prev_page =
        (params.page > 1).then(|| format!("{base_url}?page={}", params.page - 1));

    Page {
        data,
        total,
        pages,
        current_page: params.page,
        per_page: params.per_page,
        next_page,
        prev_page,
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait};

    use super::*;
    use crate::entities::actor;

    fn query(page: Option<&str>, per_page: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(str::to_string),
            per_page: per_page.map(str::to_string),
        }
    }

    #[test]
    fn page_params_default_when_absent() {
        let params = query(None, None).params();
        assert_eq!(params, PageParams { page: 1, per_page: 10 });
    }

    #[test]
    fn page_params_default_on_non_integer() {
        let params = query(Some("abc"), Some("1.5")).params();
        assert_eq!(params, PageParams { page: 1, per_page: 10 });
    }

    #[test]
    fn page_params_clamp_to_one() {
        let params = query(Some("0"), Some("-3")).params();
        assert_eq!(params, PageParams { page: 1, per_page: 1 });
    }

    #[test]
    fn page_params_parse_values() {
        let params = query(Some("4"), Some("25")).params();
        assert_eq!(params, PageParams { page: 4, per_page: 25 });
    }

    #[test]
    fn empty_criteria_leave_select_unchanged() {
        let plain = actor::Entity::find().build(DbBackend::Sqlite).to_string();
        let filtered = contains_filters(
            actor::Entity::find(),
            &[(actor::Column::FirstName, ""), (actor::Column::LastName, "")],
        )
        .build(DbBackend::Sqlite)
        .to_string();
        assert_eq!(plain, filtered);
    }

    #[test]
    fn active_criteria_combine_with_and() {
        let sql = contains_filters(
            actor::Entity::find(),
            &[(actor::Column::FirstName, "PEN"), (actor::Column::LastName, "GUI")],
        )
        .build(DbBackend::Sqlite)
        .to_string();
        assert!(sql.contains(r#""first_name" LIKE '%PEN%'"#), "{sql}");
        assert!(sql.contains(r#""last_name" LIKE '%GUI%'"#), "{sql}");
        assert!(sql.contains(" AND "), "{sql}");
    }

    #[test]
    fn first_page_of_many_has_only_next() {
        let page = build_page(vec![1, 2], 25, 3, PageParams { page: 1, per_page: 10 }, "/api/films/");
        assert_eq!(page.next_page.as_deref(), Some("/api/films/?page=2"));
        assert_eq!(page.prev_page, None);
    }

    #[test]
    fn middle_page_links_both_ways() {
        let page =
            build_page(vec![1, 2], 25, 3, PageParams { page: 2, per_page: 10 }, "/api/films/");
        assert_eq!(page.next_page.as_deref(), Some("/api/films/?page=3"));
        assert_eq!(page.prev_page.as_deref(), Some("/api/films/?page=1"));
    }

    #[test]
    fn last_page_has_only_prev() {
        let page =
            build_page(vec![1, 2], 25, 3, PageParams { page: 3, per_page: 10 }, "/api/films/");
        assert_eq!(page.next_page, None);
        assert_eq!(page.prev_page.as_deref(), Some("/api/films/?page=2"));
    }

    #[test]
    fn out_of_range_page_keeps_prev_link() {
        let page = build_page(
            Vec::<i32>::new(),
            25,
            3,
            PageParams { page: 99, per_page: 10 },
            "/api/films/",
        );
        assert_eq!(page.current_page, 99);
        assert_eq!(page.next_page, None);
        assert_eq!(page.prev_page.as_deref(), Some("/api/films/?page=98"));
    }

    #[test]
    fn empty_result_still_reports_one_page() {
        let page =
            build_page(Vec::<i32>::new(), 0, 1, PageParams { page: 1, per_page: 10 }, "/x");
        assert_eq!(page.pages, 1);
        assert_eq!(page.next_page, None);
        assert_eq!(page.prev_page, None);
    }
}
