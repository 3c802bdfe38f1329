use actix_web::web;

use crate::{
    entities::{education::Education, skill::Skill},
    handlers::{
        home::{home, not_found},
        system::health_check,
    },
};

mod form_error;
mod resume;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(health_check);

    cfg.configure(resume::config_routes::<Education>)
        .configure(resume::config_routes::<Skill>);

    cfg.configure(form_error::config_routes);
    cfg.default_service(web::route().to(not_found));
}
