use anyhow::{bail, Context, Result};

use ica_shopping_list_lib::sync::config::store_password;
use ica_shopping_list_lib::sync::SyncConfig;

pub fn run(config: &SyncConfig, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_line(&mut buf)
                .context("Failed to read password from stdin")?;
            buf.trim_end_matches(['\r', '\n']).to_string()
        }
    };
    if password.is_empty() {
        bail!("Password must not be empty");
    }

    store_password(&config.username, &password).context("Failed to store password")?;
    println!("Stored password for {} in the keyring", config.username);
    Ok(())
}
