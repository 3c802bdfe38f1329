use actix_web::web;

use crate::{
    entities::Resource,
    form::EntityForm,
    handlers::forms::{create_page, edit_page, submit_create, submit_edit},
};

/// `/{name}/create` and `/{name}/edit/{id}` for one editable section.
pub fn config_routes<R>(cfg: &mut web::ServiceConfig)
where
    R: Resource + EntityForm,
{
    cfg.service(
        web::scope(&format!("/{}", R::NAME))
            .service(
                web::resource("/create")
                    .route(web::get().to(create_page::<R>))
                    .route(web::post().to(submit_create::<R>)),
            )
            .service(
                web::resource("/edit/{id}")
                    .route(web::get().to(edit_page::<R>))
                    .route(web::post().to(submit_edit::<R>)),
            ),
    );
}
