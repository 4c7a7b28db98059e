use std::net::SocketAddr;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, author, about, long_about = None)]
pub struct Args {
    /// Address to serve the metrics endpoint on; overrides `LISTEN_ADDR`.
    #[arg(long)]
    pub(crate) listen: Option<SocketAddr>,
}
