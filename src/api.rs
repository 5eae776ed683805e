//! REST handlers for the review collection, mounted under `/api/reviews`.

#[cfg(feature = "ssr")]
mod handlers {
    use crate::db::Database;
    use crate::models::review::{NewReview, ReviewFilter};
    use actix_web::error::JsonPayloadError;
    use actix_web::http::StatusCode;
    use actix_web::{web, HttpResponse, ResponseError};
    use leptos::logging::{error, log};
    use serde_json::json;

    /// Failures of the review handlers, rendered as `{success:false, message}`.
    #[derive(Debug, thiserror::Error)]
    pub enum ApiError {
        #[error("{0}")]
        BadRequest(String),
        #[error("{0}")]
        NotFound(&'static str),
        /// A decodable body the collection would refuse to store.
        #[error("{0}")]
        Rejected(&'static str),
        #[error("{message}")]
        Storage {
            message: &'static str,
            #[source]
            source: rusqlite::Error,
        },
    }

    impl ApiError {
        fn storage(message: &'static str) -> impl FnOnce(rusqlite::Error) -> ApiError {
            move |source| {
                error!("[API] {}: {:?}", message, source);
                ApiError::Storage { message, source }
            }
        }
    }

    impl ResponseError for ApiError {
        fn status_code(&self) -> StatusCode {
            match self {
                ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
                ApiError::NotFound(_) => StatusCode::NOT_FOUND,
                ApiError::Rejected(_) | ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }

        fn error_response(&self) -> HttpResponse {
            HttpResponse::build(self.status_code()).json(json!({
                "success": false,
                "message": self.to_string(),
            }))
        }
    }

    /// Valid JSON with missing or mistyped fields fails like any other write;
    /// only a body that is not JSON at all is a bad request.
    fn body_error(err: JsonPayloadError) -> ApiError {
        match err {
            JsonPayloadError::Deserialize(err) if err.is_data() => {
                error!("[API] Failed to create review: {}", err);
                ApiError::Rejected("Failed to create review")
            }
            err => {
                log!("[API] Rejected review body: {}", err);
                ApiError::BadRequest(err.to_string())
            }
        }
    }

    /// Registers the review routes. Bodies that fail to decode are answered
    /// with the same envelope as every other failure.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        let json = web::JsonConfig::default().error_handler(|err, _req| body_error(err).into());
        cfg.service(
            web::scope("/api/reviews")
                .app_data(json)
                .route("", web::post().to(create_review))
                .route("", web::get().to(get_reviews))
                .route("/{id}", web::delete().to(delete_review)),
        );
    }

    pub async fn create_review(
        db: web::Data<Database>,
        body: web::Json<NewReview>,
    ) -> Result<HttpResponse, ApiError> {
        let review = body.into_inner();
        log!(
            "[API] Creating review for partner {} (rating {})",
            review.delivery_partner_id,
            review.rating
        );
        let saved = db
            .insert_review(&review, chrono::Utc::now())
            .await
            .map_err(ApiError::storage("Failed to create review"))?;
        Ok(HttpResponse::Created().json(json!({ "success": true, "review": saved })))
    }

    pub async fn get_reviews(
        db: web::Data<Database>,
        filter: web::Query<ReviewFilter>,
    ) -> Result<HttpResponse, ApiError> {
        let reviews = db
            .get_reviews(&filter)
            .await
            .map_err(ApiError::storage("Failed to fetch reviews"))?;
        log!("[API] Returning {} reviews", reviews.len());
        Ok(HttpResponse::Ok().json(json!({ "success": true, "reviews": reviews })))
    }

    pub async fn delete_review(
        db: web::Data<Database>,
        id: web::Path<String>,
    ) -> Result<HttpResponse, ApiError> {
        let removed = db
            .delete_review(&id)
            .await
            .map_err(ApiError::storage("Failed to delete review"))?;
        if !removed {
            return Err(ApiError::NotFound("Review not found"));
        }
        log!("[API] Deleted review {}", id);
        Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Review deleted successfully",
        })))
    }

}

#[cfg(feature = "ssr")]
pub use handlers::{configure, create_review, delete_review, get_reviews, ApiError};
