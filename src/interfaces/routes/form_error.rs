use actix_web::{error::UrlencodedError, web};

use crate::errors::AppError;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(|err, _req| {
        AppError::from(err).into()
    }));
}

impl From<UrlencodedError> for AppError {
    fn from(err: UrlencodedError) -> Self {
        tracing::debug!("Rejected form body: {}", err);
        AppError::BadRequest(format!("Could not read the submitted form: {}", err))
    }
}
