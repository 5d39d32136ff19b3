use actix_multipart::Multipart;
use actix_web::{post, web, HttpRequest, HttpResponse};
use futures::StreamExt;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    middleware::get_request_id,
    models::dto::request::RunCrewParams,
};

/// Multipart field carrying the PDF.
const FILE_FIELD: &str = "file";

async fn read_file_field(mut payload: Multipart) -> AppResult<Vec<u8>> {
    let mut file = None;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let is_file = field.name() == Some(FILE_FIELD);

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if is_file {
                bytes.extend_from_slice(&chunk);
            }
        }

        if is_file && file.is_none() {
            log::info!(
                "Received upload '{}' ({} bytes)",
                field.content_disposition().and_then(|cd| cd.get_filename()).unwrap_or("<unnamed>"),
                bytes.len()
            );
            file = Some(bytes);
        }
    }

    file.ok_or_else(|| AppError::ValidationError(format!("Missing multipart field '{}'", FILE_FIELD)))
}

#[post("/run-crew/")]
pub async fn run_crew(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<RunCrewParams>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    params.validate()?;

    let pdf_bytes = read_file_field(payload).await?;
    let limits = state.quiz_pipeline.limits();
    log::info!(
        "[{}] Building quiz: {} question(s) per skill, model {}, at most {} MCQs in chunks of {}",
        get_request_id(&req).unwrap_or_default(),
        params.num_questions,
        state.config.llm_model,
        limits.max_mcqs,
        limits.chunk_size
    );

    let result = state
        .quiz_pipeline
        .run_pdf(pdf_bytes, params.num_questions as usize)
        .await?;

    Ok(HttpResponse::Ok().json(result))
}
