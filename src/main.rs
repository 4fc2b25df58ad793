use anyhow::Context;
use sofly_waitlist::configuration::get_configuration;
use sofly_waitlist::startup::Application;
use sofly_waitlist::telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().context("Failed to read configuration")?;

    // Setting up Logging
    let subscriber = get_subscriber(
        "sofly-waitlist".into(),
        configuration.environment.default_log_level().into(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let application = Application::build(configuration).await?;
    application.run_until_stopped().await?;
    Ok(())
}
