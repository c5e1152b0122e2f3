use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::domain::Email;
use crate::email_client::EmailClient;
use crate::routes::{health_check, submit_contact};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let email_client = configuration.email_client.client();

        // Misconfigured addresses should kill the process at startup,
        // not surface as 500s on the first submission.
        let owner = SiteOwner {
            email: Email::parse(configuration.owner.email)
                .map_err(|e| anyhow::anyhow!("Invalid owner email address: {e}"))?,
            phone: configuration.owner.phone,
        };

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener
            .local_addr()
            .context("Failed to read the bound address")?
            .port();
        let server = run(
            listener,
            email_client,
            owner,
            configuration.application.base_url,
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub struct ApplicationBaseUrl(pub String);

pub struct SiteOwner {
    pub email: Email,
    pub phone: String,
}

fn run(
    listener: TcpListener,
    email_client: EmailClient,
    owner: SiteOwner,
    base_url: String,
) -> Result<Server, anyhow::Error> {
    let email_client = web::Data::new(email_client);
    let owner = web::Data::new(owner);
    let base_url = web::Data::new(ApplicationBaseUrl(base_url));
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/contact", web::post().to(submit_contact))
            .app_data(email_client.clone())
            .app_data(owner.clone())
            .app_data(base_url.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
