/* src/cli/core/src/api.rs */

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use mtr_client::{ApiResponse, MtrApi, ServerMonitor, TrainCommand};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Project, ui};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Endpoint {
  Rails,
  Rail,
  RailConnections,
  Trains,
  Train,
  TrainPath,
  TrainStatus,
  TrainCommand,
  Stations,
  Station,
  StationPassengers,
  Lines,
  Routes,
  Timetables,
  Status,
  Config,
  Stats,
  Realtime,
  /// Check reachability through `/mtr/status`
  Ping,
}

impl Endpoint {
  fn needs_id(self) -> bool {
    matches!(
      self,
      Self::Rail
        | Self::RailConnections
        | Self::Train
        | Self::TrainPath
        | Self::TrainStatus
        | Self::TrainCommand
        | Self::Station
        | Self::StationPassengers
    )
  }
}

#[derive(Args)]
pub struct ApiArgs {
  #[arg(value_enum)]
  endpoint: Endpoint,
  /// Rail, train or station id
  id: Option<String>,
  /// Dimension query parameter (defaults to api.dimension)
  #[arg(short, long)]
  dimension: Option<String>,
  /// Server base URL (defaults to api.base_url)
  #[arg(long)]
  base_url: Option<String>,
  /// Command name for train-command
  #[arg(long)]
  command: Option<String>,
  /// JSON object of command parameters for train-command
  #[arg(long)]
  params: Option<String>,
}

impl ApiArgs {
  fn id(&self) -> Result<&str> {
    match self.id.as_deref() {
      Some(id) => Ok(id),
      None => bail!("{:?} needs an id argument", self.endpoint),
    }
  }

  fn train_command(&self) -> Result<TrainCommand> {
    let command = self.command.clone().context("train-command needs --command")?;
    let params = match self.params.as_deref() {
      Some(raw) => Some(
        serde_json::from_str::<Map<String, Value>>(raw).context("--params must be a JSON object")?,
      ),
      None => None,
    };
    Ok(TrainCommand { command, params })
  }
}

pub async fn run_api(project: &Project, args: ApiArgs) -> Result<()> {
  if args.endpoint.needs_id() {
    args.id()?;
  }
  let base_url = args.base_url.clone().unwrap_or_else(|| project.config.api.base_url.clone());
  let api = MtrApi::new(base_url);
  let dim = args.dimension.as_deref().or(project.config.api.dimension.as_deref());
  tracing::debug!(base_url = api.base_url(), endpoint = ?args.endpoint, dimension = ?dim, "calling MTR server");

  let (json, success) = match args.endpoint {
    Endpoint::Rails => envelope(api.rails(dim).await)?,
    Endpoint::Rail => envelope(api.rail(args.id()?, dim).await)?,
    Endpoint::RailConnections => envelope(api.rail_connections(args.id()?, dim).await)?,
    Endpoint::Trains => envelope(api.trains(dim).await)?,
    Endpoint::Train => envelope(api.train(args.id()?, dim).await)?,
    Endpoint::TrainPath => envelope(api.train_path(args.id()?, dim).await)?,
    Endpoint::TrainStatus => envelope(api.train_status(args.id()?, dim).await)?,
    Endpoint::TrainCommand => {
      envelope(api.send_train_command(args.id()?, args.train_command()?, dim).await)?
    }
    Endpoint::Stations => envelope(api.stations(dim).await)?,
    Endpoint::Station => envelope(api.station(args.id()?, dim).await)?,
    Endpoint::StationPassengers => envelope(api.station_passengers(args.id()?, dim).await)?,
    Endpoint::Lines => envelope(api.lines(dim).await)?,
    Endpoint::Routes => envelope(api.routes(dim).await)?,
    Endpoint::Timetables => envelope(api.timetables(dim).await)?,
    Endpoint::Status => envelope(api.system_status(dim).await)?,
    Endpoint::Config => envelope(api.system_config(dim).await)?,
    Endpoint::Stats => envelope(api.simulation_stats(dim).await)?,
    Endpoint::Realtime => envelope(api.realtime_data(dim).await)?,
    Endpoint::Ping => return ping(api, dim).await,
  };

  println!("{json}");
  if !success {
    bail!("request to {} failed", api.base_url());
  }
  Ok(())
}

fn envelope<T: Serialize>(resp: ApiResponse<T>) -> Result<(String, bool)> {
  let json = serde_json::to_string_pretty(&resp).context("failed to serialize response")?;
  Ok((json, resp.success))
}

async fn ping(api: MtrApi, dimension: Option<&str>) -> Result<()> {
  let base_url = api.base_url().to_string();
  let monitor = ServerMonitor::new(api);
  ui::arrow(&base_url);
  if monitor.check_connection(dimension).await {
    ui::ok("MTR server reachable");
    if let Some(status) = monitor.state().server_status {
      ui::detail(&status.to_string());
    }
    Ok(())
  } else {
    ui::fail("MTR server unreachable");
    bail!("cannot reach {base_url}")
  }
}
