//! Shorthands for returning early from an endpoint with a plain text error.
//!
//! Every endpoint in the toolbox api returns `Result<Response, Response>`, these macros build the `Err` side.

#[doc(hidden)]
pub use response;
#[doc(hidden)]
pub use rocket;

/// Return early with a plain text error of the given status. The message is either a single
/// string or `format!()` style arguments.
///
/// **Example**
/// ```rust,ignore
///     #[get("/teapot")]
///     fn teapot() -> Result<Response, Response> {
///         respond_err!(Status::ImATeapot, "Short and stout, {} cups left", 3);
///     }
/// ```
#[macro_export]
macro_rules! respond_err {
    ($status:expr) => {
        compile_error!("A message must be provided along with the status!");
    };
    ($status:expr, $msg:literal) => {
        {
            return Err($crate::response::Response::TextErr($crate::response::Data {
                data: String::from($msg),
                status: $status,
            }));
        }
    };
    ($status:expr, $($arg:tt)+) => {
        {
            return Err($crate::response::Response::TextErr($crate::response::Data {
                data: format!($($arg)+),
                status: $status,
            }));
        }
    };
}

/// A quick 400 response, for when the request itself is at fault.
///
/// **Example**
/// ```rust,ignore
///     #[post("/palette", data = "<req>")]
///     fn palette(req: Json<PaletteRequest>) -> Result<Response, Response> {
///         match generate_palette(&req.color, req.harmony) {
///             Ok(p) => Ok(Response::json(&p, Status::Ok)),
///             Err(e) => reject!("{}", e),
///         }
///     }
/// ```
#[macro_export]
macro_rules! reject {
    () => {
        compile_error!("String must be provided to rejection macro!");
    };
    ($($arg:tt)+) => {
        $crate::respond_err!($crate::rocket::http::Status::BadRequest, $($arg)+)
    };
}

/// A quick 500 response, for when the server could not complete an otherwise valid request.
#[macro_export]
macro_rules! failure {
    () => {
        compile_error!("String must be provided to error macro!");
    };
    ($($arg:tt)+) => {
        $crate::respond_err!($crate::rocket::http::Status::InternalServerError, $($arg)+)
    };
}

/// Unwraps a json body received as `Result<Json<T>, rocket::serde::json::Error<'_>>`.
/// An empty body is rejected with a 400, malformed json with a 422 and an i/o failure with a 500.
///
/// **Example**
/// ```rust,ignore
///     #[post("/", data = "<item>")]
///     fn index(item: Result<Json<String>, json::Error<'_>>) -> Result<Response, Response> {
///         let item: String = unwrap_json!(item);
///     }
/// ```
#[macro_export]
macro_rules! unwrap_json {
    ($arg:expr) => {
        match $arg {
            Ok(body) => body.into_inner(),
            Err($crate::rocket::serde::json::Error::Io(e)) => {
                $crate::failure!("Failed to read the request body, try again later. {}", e)
            }
            Err($crate::rocket::serde::json::Error::Parse(bdy, err)) => {
                if bdy.trim().is_empty() {
                    $crate::reject!("No json body found!");
                }
                $crate::respond_err!(
                    $crate::rocket::http::Status::UnprocessableEntity,
                    "Invalid json body {}",
                    err
                )
            }
        }
    };
}
