use serde::Serialize;

/// Standard success envelope: `{ "data": ... }`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        DataResponse { data }
    }
}

/// Paginated list envelope: `{ "data": [...], "total": n, "page": p, "limit": l }`.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}
