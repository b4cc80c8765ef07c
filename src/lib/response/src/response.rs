//! A custom response api for the toolbox-api.

use rocket::{error, http::Status, response::Responder, Request};
use serde::Serialize;

/// Internal data that must be passed to a responder. Any data may be passed, but it must
/// implement `rocket::response::Responder`.
#[derive(Debug)]
pub struct Data<T>
where
    T: Responder<'static, 'static>,
{
    pub data: T,
    pub status: Status,
}

#[allow(dead_code)]
impl<T> Data<T>
where
    T: Responder<'static, 'static>,
{
    /// Returns the status of this response
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the inner data of this response
    pub fn data(&self) -> &T {
        &self.data
    }
}

/// Represents a response from the api, the content-type and content-disposition headers are automatically generated.
#[derive(Debug)]
pub enum Response {
    TextErr(Data<String>),
    TextOk(Data<String>),
    JsonOk(Data<String>),
    HtmlOk(Data<String>),
}

impl Response {
    /// Serialize a value into a `JsonOk` response with the provided status.
    /// Serialization failures become a plain-text 500, as they indicate a bug rather than a bad request.
    pub fn json<T: Serialize>(value: &T, status: Status) -> Response {
        match serde_json::to_string(value) {
            Ok(data) => Response::JsonOk(Data { data, status }),
            Err(e) => {
                error!("failed to serialize response body: {}", e);
                Response::TextErr(Data {
                    data: format!("Failed to serialize response {}", e),
                    status: Status::InternalServerError,
                })
            }
        }
    }

    /// Returns the status this response will be sent with.
    pub fn status(&self) -> Status {
        match self {
            Response::TextErr(d) | Response::TextOk(d) | Response::JsonOk(d) | Response::HtmlOk(d) => {
                d.status
            }
        }
    }
}

#[rocket::async_trait]
impl<'r> rocket::response::Responder<'r, 'static> for Response {
    fn respond_to(self, req: &'r Request<'_>) -> rocket::response::Result<'static> {
        //Generate content type header
        let c_type = match self {
            Response::TextErr(_) | Response::TextOk(_) => rocket::http::ContentType::Plain,
            Response::JsonOk(_) => rocket::http::ContentType::JSON,
            Response::HtmlOk(_) => rocket::http::ContentType::HTML,
        };

        let c_disp = rocket::http::Header::new("Content-Disposition", "inline");
        let status = self.status();

        //Construct and return response
        let mut response = match self {
            Response::TextErr(d) | Response::TextOk(d) | Response::JsonOk(d) | Response::HtmlOk(d) => {
                d.data.respond_to(req)?
            }
        };

        response.set_header(c_type);
        response.set_header(c_disp);
        response.set_status(status);
        Ok(response)
    }
}
