use std::env;

use melcloud_bridge::{Authenticator, Credentials, Language};

#[tokio::main]
async fn main() -> melcloud_bridge::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let (Some(email), Some(password)) = (args.get(1), args.get(2)) else {
        eprintln!("usage: login <email> <password> [language-tag]");
        std::process::exit(2);
    };
    let language = match args.get(3) {
        Some(tag) => tag.parse()?,
        None => Language::English,
    };

    let auth = Authenticator::builder().build();
    let credentials = Credentials::new(email, password, language);

    println!("Logging in as {email} ({language})...");
    match auth.login(&credentials).await {
        Ok(token) => println!("Context key: {token}"),
        Err(e) if e.is_connectivity() => eprintln!("Cannot reach MELCloud: {e}"),
        Err(e) => eprintln!("Login refused: {e}"),
    }
    Ok(())
}
