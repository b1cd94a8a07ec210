use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;

use crate::{config::SETTINGS, crawler::investing::Investing};

pub mod config;
pub mod crawler;
pub mod declare;
pub mod error;
pub mod logging;
pub mod util;
pub mod web;

#[cfg(all(target_os = "linux", target_env = "musl"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let source = Investing::new(&SETTINGS.upstream)?;
    let state = web::AppState::new(SETTINGS.system.service_name.clone(), Arc::new(source));

    let addr = format!("{}:{}", SETTINGS.system.host, SETTINGS.system.port);
    let listener = TcpListener::bind(&addr).await?;
    let msg = format!(
        "{} is listening on {}, upstream {}",
        SETTINGS.system.service_name, addr, SETTINGS.upstream.url
    );
    logging::info_console(msg.clone());
    logging::info_file_async(msg);

    axum::serve(listener, web::router(state)).await?;

    Ok(())
}
