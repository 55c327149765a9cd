use std::net::{IpAddr, SocketAddr};

use tickercast_web::{serve, AppState, Controller};

use crate::cli::ServeArgs;
use crate::error::CliError;

pub async fn run(controller: Controller, args: &ServeArgs) -> Result<(), CliError> {
    let ip: IpAddr = args.bind.parse()?;
    let addr = SocketAddr::new(ip, args.port);
    serve(AppState::new(controller), addr).await?;
    Ok(())
}
