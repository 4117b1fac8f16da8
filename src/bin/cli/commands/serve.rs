use anyhow::{anyhow, Result};

use ica_shopping_list_lib::server::start_server;

use crate::app::App;

pub async fn run(app: App, port: u16) -> Result<()> {
    let mut server = start_server(app.state, port).await.map_err(|e| anyhow!(e))?;
    println!("Serving '{}' on {}", app.config.list_name, server.base_url());

    tokio::signal::ctrl_c().await?;
    server.stop();
    Ok(())
}
