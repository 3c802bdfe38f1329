mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, form, use_cases};
pub use interfaces::{handlers, repositories, routes, views};
pub use infrastructure::{http, utils};

use errors::GatewayError;
use repositories::http_repo::HttpGateway;
use use_cases::resume::ResumeHandler;

pub struct AppState {
    pub resume_handler: AppResumeHandler,
}

pub type AppResumeHandler = ResumeHandler<HttpGateway>;

impl AppState {
    pub fn new(config: &settings::AppConfig) -> Result<Self, GatewayError> {
        let gateway_config = config
            .gateway_config()
            .map_err(|e| GatewayError::InvalidUrl(e.to_string()))?;
        let gateway = HttpGateway::new(&gateway_config)?;

        Ok(AppState {
            resume_handler: ResumeHandler::new(gateway),
        })
    }
}
