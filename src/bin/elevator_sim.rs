use anyhow::Context;
use elevator_sim::services::datagram::{DatagramLayer, DatagramService};
use elevator_sim::services::elevator::ElevatorService;
use elevator_sim::{Config, Elevator};
use log::{error, info};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tower::{Service, ServiceBuilder, ServiceExt};

const UDP_MAX_SIZE: usize = 65535;

async fn serve(
    socket: &UdpSocket,
    svc: &mut DatagramService<ElevatorService>,
) -> anyhow::Result<()> {
    let mut buf = vec![0u8; UDP_MAX_SIZE];
    loop {
        let (len, addr) = socket.recv_from(&mut buf).await?;
        let raw = &buf[..len];
        ServiceExt::<&[u8]>::ready(&mut *svc).await?;
        match svc.call(raw).await {
            Ok(reply) => {
                socket.send_to(&reply, addr).await?;
            }
            Err(e) => error!("Service error for {addr}: {e:#}"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    let socket = UdpSocket::bind(&config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;
    info!("Listening on {}", config.bind_address);

    let elevator = Arc::new(Elevator::with_config(config.elevator)?);
    info!("Serving floors 1 to {}", elevator.num_floors());
    let mut svc = ServiceBuilder::new()
        .layer(DatagramLayer)
        .service(ElevatorService::new(Arc::clone(&elevator)));

    let result = tokio::select! {
        result = serve(&socket, &mut svc) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
            Ok(())
        }
    };

    elevator.shutdown().await;
    result
}
