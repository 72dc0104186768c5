use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;
use utsav_core::models::District;

#[derive(Debug, Serialize, ToSchema)]
pub struct DistrictsResponse {
    /// District names sorted for display. Submissions must use one of
    /// these values verbatim.
    pub districts: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/v0/districts",
    tag = "districts",
    responses(
        (status = 200, description = "The fixed set of Telangana districts", body = DistrictsResponse)
    )
)]
pub async fn list_districts() -> Json<DistrictsResponse> {
    Json(DistrictsResponse {
        districts: District::sorted_names()
            .into_iter()
            .map(String::from)
            .collect(),
    })
}
