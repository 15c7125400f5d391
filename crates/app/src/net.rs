use std::io;
use std::net::{IpAddr, SocketAddr};

use tokio::net::TcpListener;

pub async fn create_listener(host: IpAddr, port: u16) -> io::Result<TcpListener> {
    let address = SocketAddr::from((host, port));
    tracing::trace!(%address, "binding listener");
    TcpListener::bind(address).await
}
