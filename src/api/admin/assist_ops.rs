//! Admin API: AI-assisted content generation
//!
//! The gateway client is blocking, so each handler hops to the blocking
//! pool with `web::block`. Gateway failures keep their distinct codes
//! (429 and 402) all the way to the frontend.

use actix_web::{HttpRequest, Responder, Result as ActixResult, web};
use tracing::info;

use crate::errors::RotatorError;
use crate::services::AssistClient;

use super::helpers::{api_result, error_from_rotator, success_response};
use super::types::{
    GenerateBlogContentRequest, GenerateBlogImageRequest, GenerateWebResultsRequest,
    GeneratedImageResponse,
};

pub async fn generate_blog_content(
    _req: HttpRequest,
    payload: web::Json<GenerateBlogContentRequest>,
    assist: web::Data<AssistClient>,
) -> ActixResult<impl Responder> {
    let title = payload.into_inner().title;
    info!("Admin API: generate blog content for \"{}\"", title);

    let result = web::block(move || assist.generate_blog_content(&title))
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(api_result(result))
}

pub async fn generate_web_results(
    _req: HttpRequest,
    payload: web::Json<GenerateWebResultsRequest>,
    assist: web::Data<AssistClient>,
) -> ActixResult<impl Responder> {
    let search_text = payload.into_inner().search_text;
    info!("Admin API: generate web results for \"{}\"", search_text);

    let result = web::block(move || assist.generate_web_results(&search_text))
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(api_result(result))
}

pub async fn generate_blog_image(
    _req: HttpRequest,
    payload: web::Json<GenerateBlogImageRequest>,
    assist: web::Data<AssistClient>,
) -> ActixResult<impl Responder> {
    let title = payload.into_inner().title;
    info!("Admin API: generate blog image for \"{}\"", title);

    let result: Result<String, RotatorError> =
        web::block(move || assist.generate_blog_image(&title))
            .await
            .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    match result {
        Ok(image_url) => Ok(success_response(GeneratedImageResponse { image_url })),
        Err(e) => Ok(error_from_rotator(&e)),
    }
}
