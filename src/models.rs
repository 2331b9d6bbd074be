use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::service::CheckInRequest;

/// Check-in form body. Missing fields read as empty and are rejected later.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckInForm {
    #[serde(default)]
    #[schema(example = "Ana")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "E0123456")]
    pub nusnet: String,
    #[serde(default)]
    #[schema(example = "3f2b9c0d4e5f40718293a4b5c6d7e8f9")]
    pub token: String,
}

impl From<CheckInForm> for CheckInRequest {
    fn from(form: CheckInForm) -> Self {
        CheckInRequest {
            name: form.name,
            identifier: form.nusnet,
            token: form.token,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct AdminLoginForm {
    #[serde(default)]
    pub pswd: String,
}

/// Query on `GET /`: `name` shows the thank-you page, `err` an error banner.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FormQuery {
    pub name: Option<String>,
    pub err: Option<String>,
}
