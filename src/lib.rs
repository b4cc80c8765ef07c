#![doc = include_str!("../readme.md")]

pub mod models;

#[macro_use]
extern crate rocket;

use colors::{generate_palette, Gradient, Harmony, TEMPLATES};
use config::Config;
use converter::{data_uri, sample, ConversionError, Converter};
use macros::{failure, reject, unwrap_json};
use models::*;
use password::{PasswordOptions, Strength};
use response::{Data, Response};
use rocket::{
    data::{Data as Body, ToByteUnit},
    http::{ContentType, Status},
    serde::json::{self, Json},
    Build, Rocket,
};

/// Describes every endpoint, returned by `/docs`.
const DOCS: &str = "GET  /                                   greeting
GET  /docs                               this document
GET  /s/<code>                           short link notice, returns to / after a delay

GET  /api/v1/tools                       catalogue of tools
POST /api/v1/password                    {length, uppercase, lowercase, numbers, symbols} -> {password, length, strength}
POST /api/v1/palette                     {color, harmony} -> {base, harmony, colors, joined}
GET  /api/v1/palette/harmonies           available harmonies
POST /api/v1/gradient                    {type, angle | shape, stops} -> {css, code, gradient}
POST /api/v1/gradient/stops              gradient -> gradient with one more stop
POST /api/v1/gradient/stops/remove?<i>   gradient -> gradient without stop i
GET  /api/v1/gradient/templates          ready made gradients
POST /api/v1/convert/<from>/<to>         {input, delimiter, has_header} -> {from, to, output}
GET  /api/v1/convert/samples/<format>    example input (csv, json, markdown)
POST /api/v1/markdown                    {markdown} -> {html}
POST /api/v1/markdown/preview            {markdown} -> html page fragment
POST /api/v1/data-uri?<name>             raw image body, type from Content-Type -> {uri, file_name, file_size, file_type, bytes}
POST /api/v1/regex                       {pattern, flags, text} -> {match_count, lines}
GET  /api/v1/regex/examples              example patterns
POST /api/v1/shorten                     {url} -> {original, code, short_url, created}";

/// Maps a conversion failure onto a 400 when the input was at fault, otherwise a 500.
fn conversion_failure(e: ConversionError) -> Response {
    let status = if e.is_user_error() {
        Status::BadRequest
    } else {
        Status::InternalServerError
    };
    Response::TextErr(Data {
        data: e.to_string(),
        status,
    })
}

/// The base url of the program. This is just a catch-all for those who stumble across the api without knowing what it does.
#[get("/")]
fn index(cfg: &Config) -> String {
    format!(
        "Welcome to the {} API, a collection of small utilities! Please make a request to /docs for documentation.",
        cfg.API_NAME()
    )
}

#[get("/docs")]
fn docs() -> &'static str {
    DOCS
}

/// Short links are never stored, so this only explains what would have happened.
#[get("/s/<code>")]
fn short_link(cfg: &Config, code: &str) -> Response {
    Response::HtmlOk(Data {
        data: shortener::redirect_page(code, cfg.REDIRECT_DELAY_SECONDS()),
        status: Status::Ok,
    })
}

#[get("/tools")]
fn tools() -> Response {
    Response::json(&TOOLS, Status::Ok)
}

#[post("/password", data = "<options>", format = "application/json")]
fn generate_password(
    cfg: &Config,
    options: Result<Json<PasswordOptions>, json::Error<'_>>,
) -> Result<Response, Response> {
    let options: PasswordOptions = unwrap_json!(options);

    let password = match password::generate(
        &options,
        cfg.PASSWORD_LENGTH_MIN()..=cfg.PASSWORD_LENGTH_MAX(),
    ) {
        Ok(p) => p,
        Err(e) => reject!("{}", e),
    };

    Ok(Response::json(
        &PasswordResponse {
            password,
            length: options.length,
            strength: Strength::from_length(options.length),
        },
        Status::Ok,
    ))
}

#[post("/palette", data = "<request>", format = "application/json")]
fn palette(request: Result<Json<PaletteRequest>, json::Error<'_>>) -> Result<Response, Response> {
    let request: PaletteRequest = unwrap_json!(request);

    match generate_palette(&request.color, request.harmony) {
        Ok(p) => Ok(Response::json(&PaletteResponse::from(p), Status::Ok)),
        Err(e) => reject!("{}", e),
    }
}

#[get("/palette/harmonies")]
fn harmonies() -> Response {
    let harmonies: Vec<HarmonyInfo> = Harmony::ALL
        .iter()
        .map(|h| HarmonyInfo {
            name: h.name(),
            description: h.description(),
        })
        .collect();
    Response::json(&harmonies, Status::Ok)
}

#[post("/gradient", data = "<gradient>", format = "application/json")]
fn gradient(
    cfg: &Config,
    gradient: Result<Json<Gradient>, json::Error<'_>>,
) -> Result<Response, Response> {
    let gradient: Gradient = unwrap_json!(gradient);

    match gradient.validated(cfg.GRADIENT_MAX_STOPS()) {
        Ok(g) => Ok(Response::json(&GradientResponse::from(g), Status::Ok)),
        Err(e) => reject!("{}", e),
    }
}

#[post("/gradient/stops", data = "<gradient>", format = "application/json")]
fn add_gradient_stop(
    cfg: &Config,
    gradient: Result<Json<Gradient>, json::Error<'_>>,
) -> Result<Response, Response> {
    let gradient: Gradient = unwrap_json!(gradient);

    let mut gradient = match gradient.validated(cfg.GRADIENT_MAX_STOPS()) {
        Ok(g) => g,
        Err(e) => reject!("{}", e),
    };
    if let Err(e) = gradient.add_stop(cfg.GRADIENT_MAX_STOPS()) {
        reject!("{}", e)
    }

    Ok(Response::json(&GradientResponse::from(gradient), Status::Ok))
}

#[post("/gradient/stops/remove?<index>", data = "<gradient>", format = "application/json")]
fn remove_gradient_stop(
    cfg: &Config,
    index: usize,
    gradient: Result<Json<Gradient>, json::Error<'_>>,
) -> Result<Response, Response> {
    let gradient: Gradient = unwrap_json!(gradient);

    let mut gradient = match gradient.validated(cfg.GRADIENT_MAX_STOPS()) {
        Ok(g) => g,
        Err(e) => reject!("{}", e),
    };
    if let Err(e) = gradient.remove_stop(index) {
        reject!("{}", e)
    }

    Ok(Response::json(&GradientResponse::from(gradient), Status::Ok))
}

#[get("/gradient/templates")]
fn gradient_templates() -> Response {
    let templates: Vec<TemplateResponse> = TEMPLATES
        .iter()
        .map(|t| {
            let gradient = t.gradient();
            TemplateResponse {
                name: t.name,
                css: gradient.css(),
                gradient,
            }
        })
        .collect();
    Response::json(&templates, Status::Ok)
}

/// Converts text from one format to another, e.g. `/convert/csv/json`.
#[post("/convert/<from>/<to>", data = "<request>", format = "application/json")]
fn convert(
    cfg: &Config,
    converter: &Converter,
    from: &str,
    to: &str,
    request: Result<Json<ConvertRequest>, json::Error<'_>>,
) -> Result<Response, Response> {
    let request: ConvertRequest = unwrap_json!(request);

    if !converter.is_supported(from, to) {
        reject!("Conversion from {} to {} is not supported", from, to)
    }

    let options = request
        .options(cfg.CSV_MAX_INPUT_BYTES())
        .map_err(conversion_failure)?;
    let output = converter
        .convert(from, to, &request.input, &options)
        .map_err(conversion_failure)?;

    Ok(Response::json(
        &ConvertResponse {
            from: from.to_lowercase(),
            to: to.to_lowercase(),
            output,
        },
        Status::Ok,
    ))
}

#[get("/convert/samples/<format>")]
fn convert_sample(format: &str) -> Result<Response, Response> {
    match sample(format) {
        Some(s) => Ok(Response::TextOk(Data {
            data: String::from(s),
            status: Status::Ok,
        })),
        None => reject!("No sample is available for {}", format),
    }
}

fn render_markdown(cfg: &Config, converter: &Converter, markdown: &str) -> Result<String, Response> {
    let options = converter::ConversionOptions {
        max_input_bytes: Some(cfg.MARKDOWN_MAX_INPUT_BYTES()),
        ..Default::default()
    };
    converter
        .convert("markdown", "html", markdown, &options)
        .map_err(conversion_failure)
}

#[post("/markdown", data = "<request>", format = "application/json")]
fn markdown(
    cfg: &Config,
    converter: &Converter,
    request: Result<Json<MarkdownRequest>, json::Error<'_>>,
) -> Result<Response, Response> {
    let request: MarkdownRequest = unwrap_json!(request);
    let html = render_markdown(cfg, converter, &request.markdown)?;
    Ok(Response::json(&MarkdownResponse { html }, Status::Ok))
}

#[post("/markdown/preview", data = "<request>", format = "application/json")]
fn markdown_preview(
    cfg: &Config,
    converter: &Converter,
    request: Result<Json<MarkdownRequest>, json::Error<'_>>,
) -> Result<Response, Response> {
    let request: MarkdownRequest = unwrap_json!(request);
    let html = render_markdown(cfg, converter, &request.markdown)?;
    Ok(Response::HtmlOk(Data {
        data: html,
        status: Status::Ok,
    }))
}

/// Encodes the raw request body as a data uri. The media type is taken from the `Content-Type` header.
#[post("/data-uri?<name>", data = "<body>")]
async fn image_data_uri(
    cfg: &Config,
    name: Option<&str>,
    content_type: Option<&ContentType>,
    body: Body<'_>,
) -> Result<Response, Response> {
    let media_type = content_type
        .map(|c| format!("{}/{}", c.top(), c.sub()))
        .unwrap_or_default();
    data_uri::check_media_type(&media_type, cfg.ALLOWED_IMAGE_TYPES()).map_err(conversion_failure)?;

    let max = cfg.IMAGE_MAX_SIZE_BYTES();
    let bytes = match body.open(max.bytes()).into_bytes().await {
        Ok(b) => b,
        Err(e) => failure!("Failed to read the uploaded file {}", e),
    };
    if !bytes.is_complete() {
        return Err(conversion_failure(ConversionError::TooLarge { max }));
    }

    let encoded = data_uri::encode(
        &bytes.into_inner(),
        &media_type,
        name.unwrap_or("image"),
        max,
        cfg.ALLOWED_IMAGE_TYPES(),
    )
    .map_err(conversion_failure)?;

    Ok(Response::json(&encoded, Status::Ok))
}

#[post("/regex", data = "<request>", format = "application/json")]
fn regex(
    cfg: &Config,
    request: Result<Json<RegexRequest>, json::Error<'_>>,
) -> Result<Response, Response> {
    let request: RegexRequest = unwrap_json!(request);

    match matcher::test(
        &request.pattern,
        &request.flags,
        &request.text,
        &RegexRequest::limits(cfg),
    ) {
        Ok(results) => Ok(Response::json(&RegexResponse::from(results), Status::Ok)),
        Err(e) => reject!("{}", e),
    }
}

#[get("/regex/examples")]
fn regex_examples() -> Response {
    Response::json(&matcher::EXAMPLES, Status::Ok)
}

#[post("/shorten", data = "<request>", format = "application/json")]
fn shorten(
    cfg: &Config,
    request: Result<Json<ShortenRequest>, json::Error<'_>>,
) -> Result<Response, Response> {
    let request: ShortenRequest = unwrap_json!(request);

    match shortener::shorten(&request.url, cfg.BASE_URL(), cfg.SHORT_CODE_LENGTH()) {
        Ok(link) => {
            debug!("fabricated short link {} for {}", link.code, link.original);
            Ok(Response::json(&link, Status::Created))
        }
        Err(e) => reject!("{}", e),
    }
}

pub fn rocket() -> Rocket<Build> {
    rocket::build()
        .mount("/", routes![index, docs, short_link])
        .mount(
            "/api/v1/",
            routes![
                tools,
                generate_password,
                palette,
                harmonies,
                gradient,
                add_gradient_stop,
                remove_gradient_stop,
                gradient_templates,
                convert,
                convert_sample,
                markdown,
                markdown_preview,
                image_data_uri,
                regex,
                regex_examples,
                shorten,
            ],
        )
        .attach(Config::fairing())
        .attach(Converter::fairing(converter::all_conversions()))
}
