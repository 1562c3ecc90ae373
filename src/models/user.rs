use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Document stored in the `users` collection.
///
/// Fields missing from the submitted form stay absent in the document.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,  // stored as submitted
}

/// Body of `POST /register`.
#[derive(Debug, Deserialize, Serialize, Clone, Default, utoipa::ToSchema)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl From<RegisterForm> for User {
    fn from(form: RegisterForm) -> Self {
        User {
            id: None,
            name: form.name,
            email: form.email,
            password: form.password,
        }
    }
}
