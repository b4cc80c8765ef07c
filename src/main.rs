#[doc(hidden)]
#[rocket::launch]
fn rocket() -> _ {
    toolbox_api::rocket()
}
