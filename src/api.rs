// API routes and handlers
use actix_web::http::header::ContentType;
use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::ranking::{displayed, format_line, CategoryScore};
use crate::render;
use crate::state::AppState;
use crate::validation::{assess, Notice};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassificationRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Default)]
pub struct ClassificationOutcome {
    pub notices: Vec<Notice>,
    /// Ranked topics, cut off once the shown probabilities reach the
    /// display threshold.
    pub topics: Vec<CategoryScore>,
}

#[derive(Serialize)]
struct ClassifyResponse {
    notices: Vec<String>,
    topics: Vec<CategoryScore>,
    lines: Vec<String>,
}

impl From<ClassificationOutcome> for ClassifyResponse {
    fn from(outcome: ClassificationOutcome) -> Self {
        Self {
            notices: outcome.notices.iter().map(|n| n.message().to_string()).collect(),
            lines: outcome.topics.iter().map(format_line).collect(),
            topics: outcome.topics,
        }
    }
}

/// Validation, then (when allowed) one blocking inference on the pool.
pub async fn classify(
    state: &AppState,
    request: &ClassificationRequest,
) -> Result<ClassificationOutcome> {
    let assessment = assess(&request.title, &request.summary);
    let Some(text) = assessment.text else {
        log::info!("input rejected: {:?}", assessment.notices);
        return Ok(ClassificationOutcome {
            notices: assessment.notices,
            topics: Vec::new(),
        });
    };

    let classifier = state.classifier.clone();
    let ranked = web::block(move || classifier.predict(&text))
        .await
        .map_err(|e| AppError::Blocking(e.to_string()))??;

    let topics = displayed(&ranked, state.display_threshold).to_vec();
    log::info!(
        "classified input: top topic {} ({}%), showing {}",
        ranked[0].label,
        ranked[0].probability,
        topics.len()
    );
    Ok(ClassificationOutcome {
        notices: assessment.notices,
        topics,
    })
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

#[get("/")]
pub async fn index() -> HttpResponse {
    html(render::page(&ClassificationRequest::default(), None))
}

#[post("/")]
pub async fn submit(
    state: web::Data<AppState>,
    form: web::Form<ClassificationRequest>,
) -> Result<HttpResponse> {
    let outcome = classify(&state, &form).await?;
    Ok(html(render::page(&form, Some(&outcome))))
}

#[post("/api/classify")]
pub async fn classify_json(
    state: web::Data<AppState>,
    payload: web::Json<ClassificationRequest>,
) -> Result<HttpResponse> {
    let outcome = classify(&state, &payload).await?;
    Ok(HttpResponse::Ok().json(ClassifyResponse::from(outcome)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(submit).service(classify_json);
}
