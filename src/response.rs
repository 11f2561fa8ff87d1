use std::{borrow::Cow, fmt::Display};

use crate::error::Error;

const BAD_REQUEST_BODY: &str = "400 Bad Request!\r\n";
const NOT_FOUND_BODY: &str = "404 Not Found!\r\n";
const INTERNAL_SERVER_ERROR_BODY: &str = "500 Internal Server Error!\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::InternalServerError => 500,
        }
    }

    fn reason(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::NotFound => "Not Found",
            Status::InternalServerError => "Internal Server Error",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

/// A complete `text/plain` response. The connection is always closed after
/// it is sent, so there is no keep-alive or chunked framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: Status,
    body: Cow<'static, str>,
}

impl Response {
    pub fn ok(payload: String) -> Self {
        Response {
            status: Status::Ok,
            body: Cow::Owned(payload),
        }
    }

    pub fn bad_request() -> Self {
        Response {
            status: Status::BadRequest,
            body: Cow::Borrowed(BAD_REQUEST_BODY),
        }
    }

    pub fn not_found() -> Self {
        Response {
            status: Status::NotFound,
            body: Cow::Borrowed(NOT_FOUND_BODY),
        }
    }

    pub fn internal_server_error() -> Self {
        Response {
            status: Status::InternalServerError,
            body: Cow::Borrowed(INTERNAL_SERVER_ERROR_BODY),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nContent-Type: text/plain\r\n\r\n{}",
            self.status,
            self.body.len(),
            self.body
        )
        .into_bytes()
    }
}

impl From<&Error> for Response {
    fn from(err: &Error) -> Self {
        match err {
            Error::BadRequest => Response::bad_request(),
            Error::NotFound(_) => Response::not_found(),
            Error::SystemRead(_) => Response::internal_server_error(),
        }
    }
}
