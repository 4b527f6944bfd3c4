use axum::extract::{Path, State};
use axum::response::Html;

use crate::error::ApiError;
use crate::{views, AppState};

pub async fn vendor_detail(
    State(state): State<AppState>,
    Path(vendor_id): Path<i32>,
) -> Result<Html<String>, ApiError> {
    let detail = state
        .with_catalog(move |catalog| {
            catalog
                .vendor_detail(vendor_id)?
                .ok_or_else(|| ApiError::not_found("vendor", vendor_id))
        })
        .await?;
    Ok(views::vendors::vendor_detail(&detail))
}
