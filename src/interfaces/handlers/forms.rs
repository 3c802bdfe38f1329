use actix_web::{
    http::header::{self, ContentType},
    web, HttpResponse,
};
use tracing::instrument;

use crate::{
    domain::form::{EntityForm, FieldValues},
    entities::Resource,
    errors::AppError,
    use_cases::form_controller::{FormController, FormMode, Notification, SubmitOutcome},
    utils::flash::flash_cookie,
    views::form::render_form,
    AppState,
};

fn html(mut builder: actix_web::HttpResponseBuilder, body: String) -> HttpResponse {
    builder.insert_header(ContentType::html()).body(body)
}

/// Maps a submission outcome onto the HTTP response the browser gets.
fn respond<R>(form: &FormController<R>, outcome: SubmitOutcome) -> HttpResponse
where
    R: Resource + EntityForm,
{
    match outcome {
        SubmitOutcome::Succeeded { notification, redirect_to } => HttpResponse::SeeOther()
            .insert_header((header::LOCATION, redirect_to))
            .cookie(flash_cookie(&notification))
            .finish(),
        SubmitOutcome::Invalid(_) => html(HttpResponse::UnprocessableEntity(), render_form(form, None)),
        SubmitOutcome::Failed { notification } => {
            html(HttpResponse::BadGateway(), render_form(form, Some(&notification)))
        }
        SubmitOutcome::Busy => {
            let notice = Notification::error(format!("This {} is already being saved", R::NAME));
            html(HttpResponse::Conflict(), render_form(form, Some(&notice)))
        }
    }
}

pub async fn create_page<R>() -> HttpResponse
where
    R: Resource + EntityForm,
{
    html(HttpResponse::Ok(), render_form(&FormController::<R>::create(), None))
}

#[instrument(skip(state, values), fields(entity = R::NAME))]
pub async fn submit_create<R>(
    state: web::Data<AppState>,
    values: web::Form<FieldValues>,
) -> HttpResponse
where
    R: Resource + EntityForm,
{
    let (form, outcome) = state
        .resume_handler
        .submit::<R>(FormMode::Create, values.into_inner())
        .await;

    respond(&form, outcome)
}

#[instrument(skip(state), fields(entity = R::NAME))]
pub async fn edit_page<R>(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError>
where
    R: Resource + EntityForm,
{
    let form = state.resume_handler.load_edit::<R>(&id).await?;
    Ok(html(HttpResponse::Ok(), render_form(&form, None)))
}

#[instrument(skip(state, values), fields(entity = R::NAME))]
pub async fn submit_edit<R>(
    state: web::Data<AppState>,
    id: web::Path<String>,
    values: web::Form<FieldValues>,
) -> HttpResponse
where
    R: Resource + EntityForm,
{
    let mode = FormMode::Edit { id: id.into_inner() };
    let (form, outcome) = state
        .resume_handler
        .submit::<R>(mode, values.into_inner())
        .await;

    respond(&form, outcome)
}
