use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{BikeTaxiApi, BikeTaxiClient};
use serde_json::json;
use shared::{
    domain::{RideId, RideTransition, Role, UserId},
    protocol::{DriverStatusUpdate, NewUser, RideRequest},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Drive the bike taxi backend from the command line")]
struct Cli {
    #[arg(long, env = "BACKEND_URL")]
    backend_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    CreateUser {
        #[arg(long)]
        name: String,
        #[arg(long, value_enum)]
        role: RoleArg,
        #[arg(long)]
        phone: Option<String>,
    },
    Drivers,
    DriverStatus {
        user_id: String,
        #[arg(long)]
        unavailable: bool,
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        lng: Option<f64>,
    },
    RequestRide {
        rider_id: String,
        #[arg(long)]
        pickup: String,
        #[arg(long)]
        dropoff: String,
    },
    Assign {
        ride_id: String,
        driver_id: String,
    },
    RideStatus {
        ride_id: String,
        #[arg(value_enum)]
        status: TransitionArg,
    },
    Rides {
        #[arg(long)]
        rider_id: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum RoleArg {
    Rider,
    Driver,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Rider => Role::Rider,
            RoleArg::Driver => Role::Driver,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum TransitionArg {
    #[value(name = "picked_up")]
    PickedUp,
    Completed,
    Cancelled,
}

impl From<TransitionArg> for RideTransition {
    fn from(value: TransitionArg) -> Self {
        match value {
            TransitionArg::PickedUp => RideTransition::PickedUp,
            TransitionArg::Completed => RideTransition::Completed,
            TransitionArg::Cancelled => RideTransition::Cancelled,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = client_core::load_settings().with_backend_url_override(cli.backend_url);
    let client = BikeTaxiClient::from_settings(&settings)?;
    tracing::debug!(backend_url = %settings.backend_url, "using backend");

    let output = run(&client, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run(api: &dyn BikeTaxiApi, command: Command) -> Result<serde_json::Value> {
    let output = match command {
        Command::CreateUser { name, role, phone } => {
            let user = NewUser {
                phone,
                ..NewUser::active(name, role.into())
            };
            let id = api.create_user(&user).await?;
            json!({ "id": id })
        }
        Command::Drivers => serde_json::to_value(api.list_drivers().await?)?,
        Command::DriverStatus {
            user_id,
            unavailable,
            lat,
            lng,
        } => {
            let update = DriverStatusUpdate {
                user_id: UserId::from(user_id),
                is_available: !unavailable,
                lat,
                lng,
            };
            api.update_driver_status(&update).await?;
            serde_json::to_value(&update)?
        }
        Command::RequestRide {
            rider_id,
            pickup,
            dropoff,
        } => {
            let request = RideRequest {
                rider_id: UserId::from(rider_id),
                pickup,
                dropoff,
            };
            let id = api.request_ride(&request).await?;
            json!({ "id": id })
        }
        Command::Assign { ride_id, driver_id } => {
            let ride_id = RideId::from(ride_id);
            let driver_id = UserId::from(driver_id);
            api.assign_driver(&ride_id, &driver_id).await?;
            json!({ "ride_id": ride_id, "driver_id": driver_id })
        }
        Command::RideStatus { ride_id, status } => {
            let ride_id = RideId::from(ride_id);
            let status = RideTransition::from(status);
            api.update_ride_status(&ride_id, status).await?;
            json!({ "ride_id": ride_id, "status": status })
        }
        Command::Rides { rider_id } => {
            let rider_id = rider_id.map(UserId::from);
            serde_json::to_value(api.list_rides(rider_id.as_ref()).await?)?
        }
    };
    Ok(output)
}
