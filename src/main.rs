use acme_reservations::{db, router, seed};
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    trace::{self},
    Resource,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize OpenTelemetry tracing
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    // First, set up basic tracing subscriber
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "acme_reservations=debug,tower_http=debug,axum::rejection=trace".into()
    });

    // Try to set up OpenTelemetry OTLP exporter
    match opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint("http://localhost:4317"), // Default OTEL collector endpoint
        )
        .with_trace_config(trace::config().with_resource(Resource::new(vec![
            KeyValue::new("service.name", "acme-reservations"),
            KeyValue::new("service.version", "0.1.0"),
        ])))
        .install_batch(opentelemetry_sdk::runtime::Tokio)
    {
        Ok(tracer) => {
            println!("✅ OpenTelemetry initialized successfully, sending traces to http://localhost:4317");
            // Set up tracing subscriber with OpenTelemetry layer
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .init();
        }
        Err(e) => {
            println!("⚠️  Failed to initialize OpenTelemetry: {}", e);
            println!("📝 Falling back to console-only logging");
            // Fall back to console-only logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing()?;

    info!("Starting acme-reservations API server");

    let pool = db::establish_connection_pool()?;

    // Destructive: drops and recreates all tables before the listener binds,
    // so no request is ever served against a partially-seeded store.
    let seeded = seed::sync_and_seed(&pool).await?;
    info!(
        users = seeded.users.len(),
        restaurants = seeded.restaurants.len(),
        reservations = seeded.reservations.len(),
        "seed phase complete"
    );

    // Create the router; static assets default to the crate directory but
    // can be repointed for deployments launched from elsewhere.
    let asset_root = std::env::var("ASSET_ROOT")
        .unwrap_or_else(|_| env!("CARGO_MANIFEST_DIR").to_string());
    let app = router::create_router(pool, std::path::Path::new(&asset_root));

    // Start the server
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    info!("Server listening on http://0.0.0.0:{port}");

    axum::serve(listener, app).await?;

    // Shutdown OpenTelemetry
    global::shutdown_tracer_provider();

    Ok(())
}
