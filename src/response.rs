//! Response envelopes: `{ data }` for single entities and plain lists, `{ total, page, limit, data }`
//! for paginated blog listings.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::store::{PageRequest, Paged};

#[derive(Debug, Serialize, ToSchema)]
pub struct Data<T> {
    pub data: T,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T> {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(paged: Paged<T>, request: PageRequest) -> Self {
        Page {
            total: paged.total,
            page: request.page,
            limit: request.limit,
            data: paged.rows,
        }
    }
}

pub fn success_one<T: Serialize>(data: T) -> (StatusCode, Json<Data<T>>) {
    (StatusCode::OK, Json(Data { data }))
}

pub fn success_created<T: Serialize>(data: T) -> (StatusCode, Json<Data<T>>) {
    (StatusCode::CREATED, Json(Data { data }))
}

pub fn success_page<T: Serialize>(page: Page<T>) -> (StatusCode, Json<Page<T>>) {
    (StatusCode::OK, Json(page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_echoes_request_and_keeps_total() {
        let page = Page::new(
            Paged {
                total: 23,
                rows: vec![1, 2, 3],
            },
            PageRequest { page: 3, limit: 10 },
        );
        let v = serde_json::to_value(&page).unwrap();
        assert_eq!(v, serde_json::json!({"total": 23, "page": 3, "limit": 10, "data": [1, 2, 3]}));
    }

    #[test]
    fn absent_entity_serializes_as_null_data() {
        let (status, Json(body)) = success_one(None::<i32>);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::to_value(&body).unwrap(), serde_json::json!({"data": null}));
    }
}
