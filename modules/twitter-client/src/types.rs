use serde::Deserialize;

/// The authenticated account, from `account/verify_credentials`.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id_str: String,
    pub screen_name: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A status from a timeline or returned by `statuses/update`.
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id_str: String,
    pub text: String,
}

/// One entry of the `errors` array in a v1.1 error body.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ApiErrorDetail {
    pub code: u32,
    pub message: String,
}

/// v1.1 error body: `{"errors":[{"code":187,"message":"Status is a duplicate."}]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}
