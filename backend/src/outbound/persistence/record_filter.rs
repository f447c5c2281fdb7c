//! SQL predicates for [`RecordFilter`].

use diesel::dsl::sql;
use diesel::expression::BoxableExpression;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;

use super::schema::{authors, books};
use crate::domain::ports::RecordFilter;

type Predicate<T> = Box<dyn BoxableExpression<T, Pg, SqlType = Bool>>;

fn raw_ids(filter: &RecordFilter) -> Option<Vec<i64>> {
    match filter {
        RecordFilter::All => None,
        RecordFilter::Id(id) => Some(vec![id.get()]),
        RecordFilter::Ids(ids) => Some(ids.iter().map(|id| id.get()).collect()),
    }
}

pub(crate) fn author_predicate(filter: &RecordFilter) -> Predicate<authors::table> {
    match raw_ids(filter) {
        None => Box::new(sql::<Bool>("TRUE")),
        Some(ids) => Box::new(authors::id.eq_any(ids)),
    }
}

pub(crate) fn book_predicate(filter: &RecordFilter) -> Predicate<books::table> {
    match raw_ids(filter) {
        None => Box::new(sql::<Bool>("TRUE")),
        Some(ids) => Box::new(books::id.eq_any(ids)),
    }
}
