use actix_web::{get, http::header::ContentType, web, HttpRequest, HttpResponse, Responder};

use crate::{
    errors::AppError,
    utils::flash::{clear_flash_cookie, take_flash},
    views::landing::render_landing,
    AppState,
};

#[get("/")]
pub async fn home(request: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    let notification = take_flash(&request);
    let landing = state.resume_handler.landing().await;

    let mut response = HttpResponse::Ok();
    response.insert_header(ContentType::html());
    if notification.is_some() {
        response.cookie(clear_flash_cookie());
    }
    response.body(render_landing(&landing, notification.as_ref()))
}

pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound("Page not found".to_string()))
}
