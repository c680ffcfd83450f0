use analytics::AnalyticsEngine;
use anyhow::bail;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use core_types::{CampaignDraft, ChannelType, MetricEntry};
use database::{DbRepository, FailureKind, Tracker};
use rust_decimal::Decimal;
use uuid::Uuid;

mod render;

/// The main entry point for the campaign tracker.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load DB_* variables from a .env file when one is present.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let settings = configuration::load_settings()?;
    let _log_guard = configuration::init_tracing(&settings.logging)?;

    let pool = database::connect(&settings.database);
    if let Err(e) = database::run_migrations(&pool).await {
        // An unreachable server is reported by the command itself below.
        if e.kind() != FailureKind::Unavailable {
            return Err(e.into());
        }
        tracing::warn!(error = %e, "Skipping migrations; the database is unavailable.");
    }
    let tracker = Tracker::new(DbRepository::new(pool));

    // Execute the appropriate command
    match cli.command {
        Commands::Campaign(command) => handle_campaign(&tracker, command).await,
        Commands::Customer(command) => handle_customer(&tracker, command).await,
        Commands::Segment(command) => handle_segment(&tracker, command).await,
        Commands::Metrics(command) => handle_metrics(&tracker, command).await,
        Commands::Insights => handle_insights(&tracker).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Manage marketing campaigns, customers and segments, and track campaign performance.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, list, update and delete campaigns.
    #[command(subcommand)]
    Campaign(CampaignCommand),
    /// Create, list, update and delete customers.
    #[command(subcommand)]
    Customer(CustomerCommand),
    /// Create segments and manage their members.
    #[command(subcommand)]
    Segment(SegmentCommand),
    /// Log and review performance data.
    #[command(subcommand)]
    Metrics(MetricsCommand),
    /// Show totals, averages and highlights across all campaigns.
    Insights,
}

#[derive(Subcommand)]
enum CampaignCommand {
    Create {
        #[command(flatten)]
        campaign: CampaignArgs,

        /// Repeat for each channel: email, social-media, paid-ads.
        #[arg(long = "channel", default_values_t = [ChannelType::Email])]
        channels: Vec<ChannelType>,
    },
    List,
    /// Replace every field of a campaign, including its full channel set.
    Update {
        #[arg(long)]
        id: Uuid,
        #[command(flatten)]
        campaign: CampaignArgs,

        /// Repeat for each channel the campaign keeps running on.
        #[arg(long = "channel", required_unless_present = "no_channels")]
        channels: Vec<ChannelType>,

        /// Remove every channel from the campaign.
        #[arg(long, conflicts_with = "channels")]
        no_channels: bool,
    },
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Args)]
struct CampaignArgs {
    #[arg(long)]
    name: String,

    /// Non-negative budget with at most 2 decimal places, e.g. 1500.00
    #[arg(long)]
    budget: Decimal,

    /// Start date (format: YYYY-MM-DD).
    #[arg(long)]
    start: NaiveDate,

    /// End date (format: YYYY-MM-DD).
    #[arg(long)]
    end: NaiveDate,

    #[arg(long, default_value = "")]
    description: String,
}

impl CampaignArgs {
    fn into_draft(self, channels: Vec<ChannelType>) -> CampaignDraft {
        CampaignDraft {
            name: self.name,
            budget: self.budget,
            start_date: self.start,
            end_date: self.end,
            description: self.description,
            channels,
        }
    }
}

#[derive(Subcommand)]
enum CustomerCommand {
    Add(CustomerArgs),
    List,
    Update {
        #[arg(long)]
        id: Uuid,
        #[command(flatten)]
        customer: CustomerArgs,
    },
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Args)]
struct CustomerArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    /// Free text, e.g. location or age band.
    #[arg(long, default_value = "")]
    demographics: String,
}

#[derive(Subcommand)]
enum SegmentCommand {
    Create {
        #[arg(long)]
        name: String,
        /// A description of who belongs in the segment. It is not evaluated.
        #[arg(long, default_value = "")]
        criteria: String,
    },
    /// Add customers to a segment. Existing members are skipped.
    AddMembers {
        #[arg(long)]
        segment: Uuid,
        #[arg(long = "customer", required = true)]
        customers: Vec<Uuid>,
    },
    List,
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Subcommand)]
enum MetricsCommand {
    Log {
        #[arg(long)]
        campaign: Uuid,
        #[arg(long)]
        sent: u32,
        #[arg(long)]
        opened: u32,
        #[arg(long)]
        clicks: u32,
    },
    /// List log entries, oldest first.
    List {
        #[arg(long)]
        campaign: Option<Uuid>,
    },
    /// Summed counts with open and click-through rates per campaign.
    Summary,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_campaign(tracker: &Tracker, command: CampaignCommand) -> anyhow::Result<()> {
    match command {
        CampaignCommand::Create { campaign, channels } => {
            if !tracker.create_campaign(&campaign.into_draft(channels)).await {
                bail!("Failed to create campaign.");
            }
            println!("New campaign created successfully!");
        }
        CampaignCommand::List => {
            let campaigns = tracker.read_campaigns().await;
            if campaigns.is_empty() {
                println!("No campaigns found.");
            } else {
                println!("{}", render::campaigns(&campaigns));
            }
        }
        CampaignCommand::Update { id, campaign, channels, .. } => {
            // With --no-channels the list is empty, which clears the set.
            if !tracker.update_campaign(id, &campaign.into_draft(channels)).await {
                bail!("Failed to update campaign.");
            }
            println!("Campaign updated successfully!");
        }
        CampaignCommand::Delete { id } => {
            if !tracker.delete_campaign(id).await {
                bail!("Failed to delete campaign.");
            }
            println!("Campaign {id} deleted.");
        }
    }
    Ok(())
}

async fn handle_customer(tracker: &Tracker, command: CustomerCommand) -> anyhow::Result<()> {
    match command {
        CustomerCommand::Add(args) => {
            if !tracker.create_customer(&args.name, &args.email, &args.demographics).await {
                bail!("Failed to add customer. Email might be a duplicate.");
            }
            println!("Customer added successfully!");
        }
        CustomerCommand::List => {
            let customers = tracker.read_customers().await;
            if customers.is_empty() {
                println!("No customers found.");
            } else {
                println!("{}", render::customers(&customers));
            }
        }
        CustomerCommand::Update { id, customer } => {
            if !tracker
                .update_customer(id, &customer.name, &customer.email, &customer.demographics)
                .await
            {
                bail!("Failed to update customer.");
            }
            println!("Customer updated successfully!");
        }
        CustomerCommand::Delete { id } => {
            if !tracker.delete_customer(id).await {
                bail!("Failed to delete customer.");
            }
            println!("Customer {id} deleted.");
        }
    }
    Ok(())
}

async fn handle_segment(tracker: &Tracker, command: SegmentCommand) -> anyhow::Result<()> {
    match command {
        SegmentCommand::Create { name, criteria } => match tracker.create_segment(&name, &criteria).await {
            Some(id) => println!("Segment '{name}' created with id {id}."),
            None => bail!("Failed to create segment."),
        },
        SegmentCommand::AddMembers { segment, customers } => {
            if !tracker.add_customers_to_segment(segment, &customers).await {
                bail!("Failed to add customers to segment.");
            }
            println!("Segment {segment} now includes the {} given customer(s).", customers.len());
        }
        SegmentCommand::List => {
            let segments = tracker.read_segments().await;
            if segments.is_empty() {
                println!("No segments created yet.");
            } else {
                println!("{}", render::segments(&segments));
            }
        }
        SegmentCommand::Delete { id } => {
            if !tracker.delete_segment(id).await {
                bail!("Failed to delete segment.");
            }
            println!("Segment {id} deleted.");
        }
    }
    Ok(())
}

async fn handle_metrics(tracker: &Tracker, command: MetricsCommand) -> anyhow::Result<()> {
    match command {
        MetricsCommand::Log { campaign, sent, opened, clicks } => {
            let entry = MetricEntry {
                campaign_id: campaign,
                emails_sent: sent,
                emails_opened: opened,
                clicks,
            };
            if let Err(e) = entry.check() {
                bail!("Emails opened cannot be more than emails sent ({e}).");
            }
            if !tracker.log_performance_metric(&entry).await {
                bail!("Failed to log performance data.");
            }
            println!("Performance data logged successfully!");
        }
        MetricsCommand::List { campaign } => {
            let metrics = tracker.get_performance_metrics(campaign).await;
            if metrics.is_empty() {
                println!("No performance data available yet.");
            } else {
                println!("{}", render::metrics(&metrics));
            }
        }
        MetricsCommand::Summary => {
            let performance = tracker.get_campaign_performance().await;
            if performance.is_empty() {
                println!("No performance data available yet.");
            } else {
                let reports = AnalyticsEngine::new().calculate_all(&performance);
                println!("{}", render::engagement(&reports));
            }
        }
    }
    Ok(())
}

async fn handle_insights(tracker: &Tracker) -> anyhow::Result<()> {
    println!("Total campaigns: {}", tracker.get_campaign_count().await);
    println!("Total campaign budget: ${:.2}", tracker.get_total_campaign_budget().await);
    println!(
        "Average clicks (all entries): {:.2}",
        tracker.get_average_clicks_per_campaign().await
    );

    if let Some(extremes) = tracker.get_max_min_metrics().await {
        println!("{}", render::extremes(&extremes));
    }

    match tracker.get_most_successful_campaign().await {
        Some(top) => println!(
            "The most successful campaign is '{}' with a total of {} clicks.",
            top.name, top.total_clicks
        ),
        None => println!("No clicks data to determine the most successful campaign."),
    }
    Ok(())
}
