use crate::{
    configuration::{Environment, Settings},
    routes::*,
    waitlist_client::WaitlistClient,
};
use actix_web::{dev::Server, web, web::Data, App, HttpServer};
use tracing_actix_web::TracingLogger;
use std::net::TcpListener;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, std::io::Error> {
        let waitlist_client = WaitlistClient::new(configuration.backend.base_url);

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        tracing::info!(
            port,
            backend = waitlist_client.endpoint(),
            environment = configuration.environment.as_str(),
            "Starting the waitlist proxy"
        );
        let server = run(listener, waitlist_client, configuration.environment)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    waitlist_client: WaitlistClient,
    environment: Environment,
) -> Result<Server, std::io::Error> {
    let waitlist_client = Data::new(waitlist_client);
    let environment = Data::new(environment);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .service(index)
            .service(health_check)
            .route("/api/waitlist", web::post().to(waitlist_proxy))
            .app_data(waitlist_client.clone())
            .app_data(environment.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
