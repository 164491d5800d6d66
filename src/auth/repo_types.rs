use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User document as stored in the `users` collection.
///
/// The password is kept and compared in clear text, and it is part of the
/// document returned by `/verifyUser`. Any real deployment must replace this
/// with a salted hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    pub password: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
}

/// Fields of a user about to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}
