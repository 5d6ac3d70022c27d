use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;
use crate::core::{clean_domain, CultureScorer};
use crate::models::{CultureMatchRequest, CultureMatchResponse, ErrorResponse, HealthResponse, PreferenceOptionsResponse};
use crate::services::Enricher;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub enricher: Arc<Enricher>,
    pub scorer: CultureScorer,
}

/// Configure all culture-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/preferences/options", web::get().to(preference_options))
        .service(
            web::resource("/culture-match")
                .route(web::get().to(culture_match_query))
                .route(web::post().to(culture_match_json)),
        );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        llm_enabled: state.enricher.llm_enabled(),
        search_enabled: state.enricher.search_enabled(),
    })
}

/// Categories and importance levels for building preference forms
///
/// GET /api/v1/preferences/options
async fn preference_options() -> impl Responder {
    HttpResponse::Ok().json(PreferenceOptionsResponse::current())
}

/// Culture match via query string
///
/// GET /api/v1/culture-match?domain=acme.com&flexibility=very-important
///
/// Preferences may also be passed as a JSON-encoded `preferences` parameter
/// or as `preferences[category]=level` keys.
async fn culture_match_query(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let req = CultureMatchRequest::from_query(&query);
    run_culture_match(&state, req).await
}

/// Culture match via JSON body
///
/// POST /api/v1/culture-match
///
/// Request body:
/// ```json
/// {
///   "domain": "acme.com",
///   "preferences": {
///     "flexibility": "very-important",
///     "management": "somewhat-important",
///     "inclusion": "important"
///   }
/// }
/// ```
async fn culture_match_json(
    state: web::Data<AppState>,
    req: web::Json<CultureMatchRequest>,
) -> impl Responder {
    run_culture_match(&state, req.into_inner()).await
}

async fn run_culture_match(state: &AppState, req: CultureMatchRequest) -> HttpResponse {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for culture match request: {}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: "domain is required".to_string(),
            status_code: 400,
        });
    }

    let domain = match clean_domain(&req.domain) {
        Ok(domain) => domain,
        Err(e) => {
            tracing::info!("Rejected domain {:?}: {}", req.domain, e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid domain".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    tracing::info!(
        "Scoring culture match for {} ({} weighted categories)",
        domain,
        req.preferences.max_possible()
    );

    let enrichment = state.enricher.enrich(&domain).await;
    let match_result = state.scorer.score(&enrichment.summary.tags, &req.preferences);

    tracing::info!(
        "Culture match for {}: {}% from {} tags (source: {:?})",
        domain,
        match_result.score,
        enrichment.summary.tags.len(),
        enrichment.source
    );

    HttpResponse::Ok().json(CultureMatchResponse {
        domain,
        summary: enrichment.summary,
        cultural_insights: enrichment.insights,
        match_result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TagDeriver;
    use actix_web::{test, App};

    fn state() -> AppState {
        AppState {
            enricher: Arc::new(Enricher::new(TagDeriver::default())),
            scorer: CultureScorer::default(),
        }
    }

    #[actix_web::test]
    async fn test_health_check_response() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let response: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(response.status, "healthy");
        assert!(!response.llm_enabled);
    }

    #[actix_web::test]
    async fn test_invalid_domain_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/culture-match?domain=not%20a%20domain")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_long_url_with_valid_host_is_scored() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/culture-match")
            .set_json(serde_json::json!({
                "domain": format!("https://remote-tech.com/careers?ref={}", "x".repeat(260)),
                "preferences": {"flexibility": "very-important"}
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["domain"], "remote-tech.com");
        assert_eq!(body["match"]["score"], 100);
    }

    #[actix_web::test]
    async fn test_overlong_host_reports_length() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/culture-match")
            .set_json(serde_json::json!({ "domain": format!("{}.com", "a".repeat(260)) }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Invalid domain");
        assert!(body.message.contains("253"));
    }
}
