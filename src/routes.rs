// src/routes.rs
use std::convert::Infallible;

use log::info;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::error::ApiError;
use crate::handlers::{
    dashboard::get_dashboard, projection::get_projection, projection::ProjectionQuery,
    reserves::get_reserves,
};

// Add recovery handling for our custom errors
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.clone();
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        code = warp::http::StatusCode::BAD_REQUEST;
        message = "Missing or invalid query parameters".to_string();
    } else {
        code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes() -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let reserves_route = warp::path!("api" / "v1" / "reserves")
        .and(warp::get())
        .and_then(get_reserves);

    let projection_route = warp::path!("api" / "v1" / "projection")
        .and(warp::get())
        .and(warp::query::<ProjectionQuery>())
        .and_then(get_projection);

    let dashboard_route = warp::path!("api" / "v1" / "dashboard")
        .and(warp::get())
        .and(warp::query::<ProjectionQuery>())
        .and_then(get_dashboard);

    info!("All routes configured successfully.");

    reserves_route
        .or(projection_route)
        .or(dashboard_route)
        .recover(handle_rejection)
}
