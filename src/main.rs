use anyhow::{Result, bail};
use clap::Parser;
use order_report_rs::{
    Config, Error, Geolocate, OsmGeocoder, OutputFormat, ReportPipeline, ReportWriter,
    download_feed, send_report, setup_logging,
};

/// Process orders from a JSON feed into a summary report.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Output file name (without extension). Alphanumeric only.
    #[arg(long, default_value = "orders")]
    filename: String,

    /// Report encoding.
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Comma-separated recipient addresses for the finished report.
    #[arg(long = "email-to")]
    email_to: Option<String>,

    /// Enrich each report record with latitude/longitude looked up from
    /// the shipping address.
    #[arg(long)]
    geolocation: bool,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    setup_logging()?;

    let cli = Cli::parse();
    validate_file_name(&cli.filename)?;
    let recipients = match cli.email_to.as_deref() {
        Some(raw) => parse_recipients(raw)?,
        None => Vec::new(),
    };

    let config = Config::from_env()?;
    if !recipients.is_empty() && config.mail.is_none() {
        bail!("recipients were given but mail is not configured (set SMTP_URL and MAIL_FROM)");
    }

    println!("Processing orders...");

    let input_path = download_feed(&config.feed_url, &config.data_dir)?;
    let writer = ReportWriter::create(&config.data_dir, &cli.filename, cli.format)?;
    let geolocator: Option<Box<dyn Geolocate>> = if cli.geolocation {
        Some(Box::new(OsmGeocoder::new(config.geocoder_url.clone())?))
    } else {
        None
    };

    let mut run = ReportPipeline::new(input_path, writer, geolocator).run()?;
    for progress in &mut run {
        println!("{}%", progress?);
    }

    if !run.writer().artifact_exists() {
        return Err(Error::MissingArtifact {
            path: run.writer().path().to_path_buf(),
        }
        .into());
    }
    println!("Report saved to {}", run.writer().path().display());
    if !run.writer().validate() {
        bail!("report artifact failed {} validation", run.writer().format());
    }

    if let Some(mail_config) = &config.mail {
        if !recipients.is_empty() {
            send_report(mail_config, &recipients, run.writer().path())?;
            println!("Email sent!");
        }
    }

    Ok(())
}

fn validate_file_name(name: &str) -> Result<()> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        bail!("file name must only include alphanumeric characters, got '{name}'");
    }
    Ok(())
}

fn parse_recipients(raw: &str) -> Result<Vec<String>> {
    let recipients: Vec<String> = raw
        .split(',')
        .map(|address| address.trim().to_string())
        .collect();

    for address in &recipients {
        // Same mailbox grammar the SMTP transport will apply when sending
        if address.parse::<lettre::message::Mailbox>().is_err() {
            bail!("invalid recipient email address: '{address}'");
        }
    }
    Ok(recipients)
}
