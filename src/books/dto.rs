use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `totalPages` as a client sent it: a JSON number or any string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PageCount {
    Int(i64),
    Float(f64),
    Text(String),
}

impl PageCount {
    /// Zero and the empty string count as not supplied.
    pub fn is_supplied(&self) -> bool {
        match self {
            PageCount::Int(n) => *n != 0,
            PageCount::Float(f) => *f != 0.0 && !f.is_nan(),
            PageCount::Text(s) => !s.is_empty(),
        }
    }

    /// Base-10 integer value. Text is read up to the first non-digit after an
    /// optional sign; text with no leading digits becomes 0.
    pub fn to_pages(&self) -> i64 {
        match self {
            PageCount::Int(n) => *n,
            PageCount::Float(f) => f.trunc() as i64,
            PageCount::Text(s) => leading_int(s).unwrap_or(0),
        }
    }
}

fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Body of `POST /addBook`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBookRequest {
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub total_pages: Option<PageCount>,
}

/// Body of `POST /getBooks`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBooksRequest {
    pub user_id: Option<String>,
}

/// Body of `PUT /updatePagesRead`. Only an absent `pagesRead` is missing; 0 is
/// a real value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePagesReadRequest {
    pub book_id: Option<String>,
    pub pages_read: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBookResponse {
    pub message: &'static str,
    pub book_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
