pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::auth::handlers as auth;
use crate::generation::handlers as generation;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(health::templates_handler))
        // Auth
        .route("/api/v1/auth/signup", post(auth::handle_signup))
        .route("/api/v1/auth/signin", post(auth::handle_signin))
        // Resume
        .route(
            "/api/v1/resume",
            get(resume::handle_get_resume).put(resume::handle_save_resume),
        )
        .route("/api/v1/resume/draft", put(resume::handle_save_draft))
        .route("/api/v1/resume/validate", post(resume::handle_validate))
        .route("/api/v1/resume/feedback", get(resume::handle_feedback))
        .route("/api/v1/resume/digest", get(resume::handle_digest))
        .route(
            "/api/v1/resume/sections/:section",
            post(resume::handle_add_item),
        )
        .route(
            "/api/v1/resume/sections/:section/:index",
            delete(resume::handle_remove_item),
        )
        .route("/api/v1/resume/preview", get(resume::handle_preview))
        .route("/api/v1/resume/export", get(resume::handle_export))
        // AI content
        .route(
            "/api/v1/resume/generate",
            post(generation::handle_generate_into_resume),
        )
        .route("/api/v1/resume/autofill", post(generation::handle_autofill))
        .route("/api/generate", post(generation::handle_generate))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::auth::{issue_test_token, TokenVerifier};
    use crate::generation::templates::TemplateGenerator;
    use crate::generation::SUMMARY_NEEDS_TITLE;
    use crate::resume::autosave::Autosaver;
    use crate::resume::store::MemoryResumeStore;

    const SECRET: &str = "test-secret";

    fn app() -> Router {
        build_router(AppState {
            autosave: Autosaver::new(Arc::new(MemoryResumeStore::new()), Duration::from_secs(60)),
            generator: Arc::new(TemplateGenerator),
            tokens: TokenVerifier::new(SECRET),
            auth: None,
            exports: None,
        })
    }

    fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> Response {
        app.clone().oneshot(req).await.unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    fn token() -> String {
        issue_test_token(SECRET, Uuid::new_v4())
    }

    #[tokio::test]
    async fn test_health() {
        let response = send(&app(), request(Method::GET, "/health", None, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["service"], "cvforge-api");
    }

    #[tokio::test]
    async fn test_templates_list() {
        let response = send(&app(), request(Method::GET, "/api/v1/templates", None, None)).await;
        let body = body_json(response).await;
        assert_eq!(body["templates"], json!(["modern", "minimal", "professional"]));
        assert_eq!(body["default"], "modern");
    }

    #[tokio::test]
    async fn test_resume_requires_token() {
        let app = app();
        let response = send(&app, request(Method::GET, "/api/v1/resume", None, None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bad = issue_test_token("other-secret", Uuid::new_v4());
        let response = send(&app, request(Method::GET, "/api/v1/resume", Some(&bad), None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_resume_is_404() {
        let app = app();
        let token = token();
        for uri in [
            "/api/v1/resume",
            "/api/v1/resume/feedback",
            "/api/v1/resume/digest",
            "/api/v1/resume/preview",
            "/api/v1/resume/export",
        ] {
            let response = send(&app, request(Method::GET, uri, Some(&token), None)).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_draft_is_readable_before_it_is_saved() {
        let app = app();
        let token = token();
        let draft = json!({"personalInfo": {"name": "Ada Lovelace"}});

        let response = send(
            &app,
            request(Method::PUT, "/api/v1/resume/draft", Some(&token), Some(draft)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let response = send(&app, request(Method::GET, "/api/v1/resume", Some(&token), None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["source"], "pending");
        assert_eq!(body["resume"]["personalInfo"]["name"], "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_save_returns_record() {
        let app = app();
        let token = token();
        let response = send(
            &app,
            request(
                Method::PUT,
                "/api/v1/resume",
                Some(&token),
                Some(json!({"summary": "Hello"})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let record = body_json(response).await;
        assert_eq!(record["content"]["summary"], "Hello");
        assert!(record.get("updated_at").is_some());

        let response = send(&app, request(Method::GET, "/api/v1/resume", Some(&token), None)).await;
        assert_eq!(body_json(response).await["source"], "saved");
    }

    #[tokio::test]
    async fn test_validate_reports_errors() {
        let response = send(
            &app(),
            request(
                Method::POST,
                "/api/v1/resume/validate",
                Some(&token()),
                Some(json!({})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let report = body_json(response).await;
        assert_eq!(report["valid"], false);
        assert!(!report["errors"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_flat_generate_contract() {
        let app = app();
        let token = token();

        let response = send(
            &app,
            request(
                Method::POST,
                "/api/generate",
                Some(&token),
                Some(json!({"section": "summary"})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await, json!({"error": SUMMARY_NEEDS_TITLE}));

        let response = send(
            &app,
            request(
                Method::POST,
                "/api/generate",
                Some(&token),
                Some(json!({"section": "skills", "jobTitle": "Frontend Developer"})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["skills"].as_array().unwrap().contains(&json!("React")));
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_flat_generate_unreadable_body() {
        let app = app();
        let token = token();

        let response = send(
            &app,
            request(
                Method::POST,
                "/api/generate",
                Some(&token),
                Some(json!({"jobTitle": "Engineer"})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("section"));
        assert_eq!(body.as_object().unwrap().len(), 1);

        let malformed = Request::builder()
            .method(Method::POST)
            .uri("/api/generate")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = send(&app, malformed).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_generate_into_resume_uses_first_job() {
        let app = app();
        let token = token();
        let draft = json!({
            "workExperience": [{"title": "Product Manager", "company": "Acme"}]
        });
        send(
            &app,
            request(Method::PUT, "/api/v1/resume/draft", Some(&token), Some(draft)),
        )
        .await;

        let response = send(
            &app,
            request(
                Method::POST,
                "/api/v1/resume/generate",
                Some(&token),
                Some(json!({"section": "workExperience"})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let description = body["resume"]["workExperience"][0]["description"]
            .as_str()
            .unwrap();
        assert_eq!(description.lines().count(), 4);
        assert_eq!(body["content"]["description"], description);
    }

    #[tokio::test]
    async fn test_sections_add_and_remove() {
        let app = app();
        let token = token();

        let response = send(
            &app,
            request(Method::POST, "/api/v1/resume/sections/projects", Some(&token), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["projects"].as_array().unwrap().len(), 1);

        // the only work entry stays
        let response = send(
            &app,
            request(
                Method::DELETE,
                "/api/v1/resume/sections/workExperience/0",
                Some(&token),
                None,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["workExperience"].as_array().unwrap().len(), 1);
        assert_eq!(body["projects"].as_array().unwrap().len(), 1);

        let response = send(
            &app,
            request(Method::POST, "/api/v1/resume/sections/hobbies", Some(&token), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_autofill_then_digest_and_feedback() {
        let app = app();
        let token = token();
        let response = send(
            &app,
            request(Method::POST, "/api/v1/resume/autofill", Some(&token), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(
            &app,
            request(Method::GET, "/api/v1/resume/digest", Some(&token), None),
        )
        .await;
        let summary = body_json(response).await["summary"].as_str().unwrap().to_string();
        assert!(summary.starts_with("Alex Johnson is a Senior Full Stack Developer with 2 work experiences"));

        let response = send(
            &app,
            request(Method::GET, "/api/v1/resume/feedback", Some(&token), None),
        )
        .await;
        assert_eq!(body_json(response).await["feedback"], json!([]));
    }

    #[tokio::test]
    async fn test_preview_and_export() {
        let app = app();
        let token = token();
        send(
            &app,
            request(Method::POST, "/api/v1/resume/autofill", Some(&token), None),
        )
        .await;

        let response = send(
            &app,
            request(
                Method::GET,
                "/api/v1/resume/preview?template=professional",
                Some(&token),
                None,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert!(body_text(response).await.contains("professional-resume"));

        let response = send(
            &app,
            request(
                Method::GET,
                "/api/v1/resume/export?format=markdown",
                Some(&token),
                None,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume.md\""
        );
        assert!(body_text(response).await.starts_with("# Alex Johnson"));

        let response = send(
            &app,
            request(
                Method::GET,
                "/api/v1/resume/export?format=png",
                Some(&token),
                None,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_auth_unconfigured() {
        let response = send(
            &app(),
            request(
                Method::POST,
                "/api/v1/auth/signup",
                None,
                Some(json!({"email": "ada@example.com", "password": "hunter22"})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_auth_rejects_bad_email() {
        let response = send(
            &app(),
            request(
                Method::POST,
                "/api/v1/auth/signin",
                None,
                Some(json!({"email": "not-an-email", "password": "x"})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
