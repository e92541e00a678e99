use actix_web::{get, web, HttpResponse};
use log::debug;

use crate::{
    directory::public_directory,
    results::{check_results, ResultsQuery},
    status::detailed_status,
    store::{CheckStore, Page},
    structures::{
        errors::ApiError,
        responses::{respond, Message, ResultsResponse, WebsiteResponse},
    },
};

#[get("/")]
pub async fn index_handler() -> Result<HttpResponse, ApiError> {
    respond(Message {
        message: "Welcome to the uptimers API!".to_string(),
    })
}

#[get("/status/{url:.*}")]
pub async fn status_handler(
    store: web::Data<dyn CheckStore>,
    url: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    respond(detailed_status(store.get_ref(), &url).await?)
}

#[get("/results/{url:.*}")]
pub async fn results_handler(
    store: web::Data<dyn CheckStore>,
    url: web::Path<String>,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, ApiError> {
    let page = Page::from_query(&ResultsQuery::from_pairs(query.into_inner()))?;
    let results = check_results(store.get_ref(), &url, page).await?;
    respond(ResultsResponse { results })
}

#[get("/websites")]
pub async fn websites_handler(
    store: web::Data<dyn CheckStore>,
) -> Result<HttpResponse, ApiError> {
    let websites = public_directory(store.get_ref()).await?;
    respond(WebsiteResponse { websites })
}

pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound(
        "Unable to find the requested resource.".to_string(),
    ))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _| {
        debug!("rejecting query string: {}", err);
        ApiError::BadRequest("Unable to parse given query-parameters.".to_string()).into()
    }))
    .service(index_handler)
    .service(status_handler)
    .service(results_handler)
    .service(websites_handler);
}
