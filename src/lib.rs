mod app;
mod firebase;
mod pages;
mod routine;
mod session;
mod sheets;
mod storage;
mod timer;
mod types;

use leptos::*;
use wasm_bindgen::prelude::*;
use web_sys::{Notification, NotificationPermission};

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    // Ask once, up front, so rest-timer alerts can fire later.
    if Notification::permission() == NotificationPermission::Default {
        let _ = Notification::request_permission();
    }

    mount_to_body(app::App);
}
