use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use diskaudit::audit::aggregate::ClusterTotals;
use diskaudit::audit::collect::InstallCollector;
use diskaudit::audit::format::format_bytes;
use diskaudit::audit::report::{render, ColorScheme};
use diskaudit::audit::vendor::VendorVariant;
use diskaudit::config::AuditConfig;
use diskaudit::error::AuditError;
use diskaudit::inventory::InventoryClient;
use diskaudit::platform::disk::DuDiskProbe;
use diskaudit::platform::identity::local_cluster_id;
use diskaudit::platform::wpcli::WpCliProbe;
use diskaudit::preflight;
use diskaudit::version::VERSION;

/// Disk and database usage audit for the installs on this node.
#[derive(Parser, Debug)]
#[command(name = "diskaudit", version = VERSION)]
struct Cli {
    /// Install identifiers to audit. Defaults to every active install on
    /// the cluster.
    installs: Vec<String>,

    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<String>,

    /// Disable ANSI colors in the report.
    #[arg(long)]
    no_color: bool,
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

async fn run(cli: Cli) -> Result<(), AuditError> {
    let config = AuditConfig::load(cli.config.as_deref())?;
    let colors = ColorScheme::new(!cli.no_color);

    let report = preflight::run(&config);
    if !report.passed() {
        return Err(AuditError::Preflight(report.failures()));
    }
    println!("{}", colors.lt_green("Server resources look good. Proceeding with audit..."));

    let cluster_id = local_cluster_id(&config.cluster_id_file)?;
    let inventory = InventoryClient::new(&config.api_base_url);
    let cluster = inventory.cluster_info(&cluster_id).await?;
    let vendor = VendorVariant::classify(&cluster.provider)?;
    info!(cluster_id = %cluster_id, provider = %cluster.provider, ?vendor, "Resolved cluster context.");

    let installs = if cli.installs.is_empty() {
        inventory.sites_on_cluster(&cluster_id).await?
    } else {
        cli.installs
    };
    info!(install_count = installs.len(), "Auditing installs.");

    println!("Conducting {} ...", colors.lt_red("diskaudit"));
    println!("Executing calculations, {}.", colors.orange("this could take a few minutes"));

    let disk_probe = DuDiskProbe;
    let db_probe = WpCliProbe::new(&config);
    let collector = InstallCollector::new(&config, &disk_probe, &db_probe, &db_probe);

    let mut records = Vec::with_capacity(installs.len());
    for install in &installs {
        records.push(collector.collect(install, vendor).await?);
    }

    let totals = ClusterTotals::aggregate(&records);
    let pool_size = format_bytes(db_probe.buffer_pool_size().await?);

    print!("{}", render(&records, &totals, vendor, &pool_size, &cluster_id, &colors));
    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run(Cli::parse()).await {
        error!(error = %e, "diskaudit failed.");
        std::process::exit(1);
    }
}
