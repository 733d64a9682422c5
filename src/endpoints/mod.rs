//! # Endpoint templates
//!
//! Relative request targets for every pet-store action. Pure string building:
//! identifiers are percent-encoded but never validated, so a negative or
//! non-numeric id reaches the server exactly as given.

use std::fmt::Display;

use urlencoding::encode;

fn segment(value: impl Display) -> String {
    encode(&value.to_string()).into_owned()
}

pub mod pet {
    use super::*;

    pub const COLLECTION: &str = "pet";

    pub fn by_id(id: impl Display) -> String {
        format!("{COLLECTION}/{}", segment(id))
    }

    /// `pet/findByStatus?status=a,b`; statuses are joined with commas.
    pub fn find_by_status<S: AsRef<str>>(statuses: &[S]) -> String {
        let joined = statuses
            .iter()
            .map(|status| encode(status.as_ref()).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        format!("{COLLECTION}/findByStatus?status={joined}")
    }

    pub fn upload_image(id: impl Display) -> String {
        format!("{}/uploadImage", by_id(id))
    }
}

pub mod store {
    use super::*;

    pub const INVENTORY: &str = "store/inventory";
    pub const ORDER: &str = "store/order";

    pub fn order_by_id(id: impl Display) -> String {
        format!("{ORDER}/{}", segment(id))
    }
}

pub mod user {
    use super::*;

    pub const COLLECTION: &str = "user";
    pub const CREATE_WITH_ARRAY: &str = "user/createWithArray";
    pub const CREATE_WITH_LIST: &str = "user/createWithList";
    pub const LOGOUT: &str = "user/logout";

    pub fn by_username(username: &str) -> String {
        format!("{COLLECTION}/{}", segment(username))
    }

    pub fn login(username: &str, password: &str) -> String {
        format!(
            "{COLLECTION}/login?username={}&password={}",
            encode(username),
            encode(password)
        )
    }
}
