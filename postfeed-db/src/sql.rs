//! SQL rendering of a [`PostQuery`]
//!
//! User input only ever reaches the database as bound parameters. ORDER BY
//! clauses are assembled from fixed fragments.

use postfeed_core::{PostQuery, SearchTerm, SortDirection, SortKey};
use sqlx::{Postgres, QueryBuilder};

pub(crate) const POST_COLUMNS: &str = "id, title, content, upvotes, downvotes, created_at";

/// `COUNT(*)` of posts matching the plan's filter.
pub fn count_query(query: &PostQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM posts");
    push_filter(&mut builder, query.search.as_ref());
    builder
}

/// The requested page, sorted and sliced.
pub fn page_query(query: &PostQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM posts", POST_COLUMNS));
    push_filter(&mut builder, query.search.as_ref());

    builder.push(" ORDER BY ");
    builder.push(order_by(query.sort, query.direction));

    let offset = i64::try_from(query.pagination.offset()).unwrap_or(i64::MAX);
    builder.push(" LIMIT ");
    builder.push_bind(i64::from(query.pagination.limit()));
    builder.push(" OFFSET ");
    builder.push_bind(offset);
    builder
}

fn push_filter(builder: &mut QueryBuilder<'static, Postgres>, search: Option<&SearchTerm>) {
    let Some(term) = search else {
        return;
    };
    let pattern = like_pattern(term.as_str());

    builder.push(" WHERE (title ILIKE ");
    builder.push_bind(pattern.clone());
    builder.push(" ESCAPE '\\' OR content ILIKE ");
    builder.push_bind(pattern);
    builder.push(" ESCAPE '\\')");
}

/// Substring pattern with LIKE wildcards in the term escaped.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// ORDER BY clause. Popular/positivity ties keep insertion order in both directions.
///
/// Positivity is the whole-number ratio `upvotes / (upvotes + downvotes)`. With
/// non-negative counts that is 1 exactly when a post has upvotes and no downvotes,
/// so the key is written as a `CASE` and never adds two `BIGINT` columns.
fn order_by(sort: SortKey, direction: SortDirection) -> String {
    let dir = direction.as_sql();
    match sort {
        SortKey::Recency => format!("created_at {dir}, id {dir}"),
        SortKey::Popular => format!("upvotes {dir}, id ASC"),
        SortKey::Positivity => format!(
            "CASE WHEN upvotes > 0 AND downvotes = 0 THEN 1 ELSE 0 END {dir}, id ASC"
        ),
    }
}
