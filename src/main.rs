#[macro_use]
extern crate rocket;

use rocket::{Build, Rocket};

use handler::{
    api_handler::{api_version, create_user},
    file_handler::{
        add_url, create_folder, delete_entry, download_entry, get_entry, list_folder, move_entry,
        rename_entry, set_entry_access, upload_file,
    },
};

use crate::repository::initialize_db;
use crate::storage::check_storage_root;

mod config;
mod guard;
mod handler;
mod model;
mod repository;
mod service;
mod storage;
#[cfg(test)]
mod test;
mod util;

fn configure_logger() {
    let configured = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(std::time::SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .apply();
    if configured.is_err() {
        // tests build more than one rocket in a process; only the first init sticks
    }
}

#[launch]
fn rocket() -> Rocket<Build> {
    configure_logger();
    initialize_db().unwrap();
    check_storage_root();
    rocket::build()
        .mount("/api", routes![api_version, create_user])
        .mount(
            "/projects",
            routes![
                list_folder,
                get_entry,
                download_entry,
                upload_file,
                create_folder,
                add_url,
                rename_entry,
                move_entry,
                set_entry_access,
                delete_entry
            ],
        )
}
