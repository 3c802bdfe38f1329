use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    HttpRequest,
};
use derive_more::Display;

use crate::use_cases::form_controller::{Notification, NotificationKind};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Display, PartialEq, Eq)]
pub enum FlashError {
    #[display("Flash cookie is not valid UTF-8")]
    Encoding,

    #[display("Flash cookie has no kind separator")]
    MissingSeparator,

    #[display("Unknown flash kind: {_0}")]
    UnknownKind(String),
}

fn encode(notification: &Notification) -> String {
    let kind = match notification.kind {
        NotificationKind::Success => "success",
        NotificationKind::Error => "error",
    };
    urlencoding::encode(&format!("{kind}|{}", notification.title)).into_owned()
}

pub fn decode(raw: &str) -> Result<Notification, FlashError> {
    let decoded = urlencoding::decode(raw).map_err(|_| FlashError::Encoding)?;
    let (kind, title) = decoded.split_once('|').ok_or(FlashError::MissingSeparator)?;
    match kind {
        "success" => Ok(Notification::success(title)),
        "error" => Ok(Notification::error(title)),
        other => Err(FlashError::UnknownKind(other.to_string())),
    }
}

/// Cookie carrying a notification across the redirect that follows a submission.
pub fn flash_cookie(notification: &Notification) -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, encode(notification))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(60))
        .finish()
}

/// Cookie that deletes the flash once it has been shown.
pub fn clear_flash_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// Pending notification, if the request carries one. Bad cookies are dropped.
pub fn take_flash(request: &HttpRequest) -> Option<Notification> {
    let cookie = request.cookie(FLASH_COOKIE)?;
    decode(cookie.value())
        .map_err(|e| tracing::warn!("Ignoring flash cookie: {}", e))
        .ok()
}
