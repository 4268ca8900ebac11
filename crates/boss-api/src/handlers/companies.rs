//! Company handlers

use axum::{extract::State, Json};
use boss_service::{CompanyResponse, CompanyService, CreateCompanyRequest};

use crate::extractors::{CurrentUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Found the caller's company
///
/// POST /api/companies
pub async fn create_company(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateCompanyRequest>,
) -> ApiResult<Created<Json<CompanyResponse>>> {
    let company = CompanyService::new(state.service_context())
        .create(current.user_id, request)
        .await?;
    Ok(Created(Json(CompanyResponse::from(company))))
}

/// Get the caller's company
///
/// GET /api/companies/me
pub async fn get_my_company(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<CompanyResponse>> {
    let company = CompanyService::new(state.service_context())
        .get_by_user(current.user_id)
        .await?;
    Ok(Json(CompanyResponse::from(company)))
}
