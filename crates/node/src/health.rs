//! Minimal health endpoint for neo-node.
use crate::metrics;
use crate::service::NodeService;
use hyper::{
    service::{make_service_fn, service_fn},
    Body, Request, Response, Server, StatusCode,
};
use neo_core::ProtocolSettings;
use serde::Serialize;
use std::fs;
use std::{net::SocketAddr, sync::Arc};

pub async fn serve_health(
    port: u16,
    storage_path: Option<String>,
    rpc_enabled: bool,
    service: Arc<NodeService>,
) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let make_svc = make_service_fn(move |_conn| {
        let service = service.clone();
        let storage_path = storage_path.clone();
        async move {
            let storage_path_inner = storage_path.clone();
            Ok::<_, hyper::Error>(service_fn(move |req| {
                let service = service.clone();
                let storage_path_req = storage_path_inner.clone();
                async move {
                    handle_request(req, storage_path_req, rpc_enabled, service.clone()).await
                }
            }))
        }
    });

    Server::bind(&addr).serve(make_svc).await?;
    Ok(())
}

async fn handle_request(
    req: Request<Body>,
    storage_path: Option<String>,
    rpc_enabled: bool,
    service: Arc<NodeService>,
) -> Result<Response<Body>, hyper::Error> {
    match (req.method(), req.uri().path()) {
        (&hyper::Method::GET, "/healthz") | (&hyper::Method::GET, "/readyz") => {
            let settings: &ProtocolSettings = service.settings();
            let rpc_ready = check_rpc_ready(rpc_enabled, &service);
            let peer_count = match service.context.network() {
                Some(network) => network.peer_count().await,
                None => 0,
            };
            let storage_ready = storage_path
                .as_deref()
                .map(|path| verify_storage_marker(path, settings.network))
                .unwrap_or(true);
            let block_height = match service.context.blockchain() {
                Some(blockchain) => blockchain.height().await,
                None => 0,
            };
            let mempool_size = match service.context.mempool() {
                Some(mempool) => mempool.transaction_count().await as u32,
                None => 0,
            };
            let healthy = storage_ready && rpc_ready;

            metrics::update_metrics(block_height, mempool_size, peer_count, storage_path.as_deref());

            let body = HealthStatus {
                status: if healthy { "ok" } else { "degraded" },
                network_magic: settings.network,
                version: env!("CARGO_PKG_VERSION"),
                milliseconds_per_block: settings.milliseconds_per_block,
                block_height,
                mempool_size,
                rpc_ready,
                peer_count,
                storage_ready,
            };
            let json =
                serde_json::to_string(&body).unwrap_or_else(|_| "{\"status\":\"ok\"}".into());
            let mut resp = Response::new(Body::from(json));
            if !healthy {
                *resp.status_mut() = StatusCode::SERVICE_UNAVAILABLE;
            }
            Ok(resp)
        }
        (&hyper::Method::GET, "/metrics") => {
            let body = metrics::gather();
            Ok(Response::new(Body::from(body)))
        }
        _ => {
            let mut not_found = Response::new(Body::from("not found"));
            *not_found.status_mut() = StatusCode::NOT_FOUND;
            Ok(not_found)
        }
    }
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    network_magic: u32,
    version: &'static str,
    milliseconds_per_block: u32,
    block_height: u32,
    mempool_size: u32,
    rpc_ready: bool,
    peer_count: usize,
    storage_ready: bool,
}

fn verify_storage_marker(path: &str, expected_magic: u32) -> bool {
    let storage_path = std::path::Path::new(path);
    let magic_marker = storage_path.join("NETWORK_MAGIC");
    fs::read_to_string(&magic_marker)
        .ok()
        .and_then(|contents| {
            let parsed = contents.trim_start_matches("0x").trim().to_string();
            u32::from_str_radix(&parsed, 16)
                .ok()
                .or_else(|| parsed.parse::<u32>().ok())
        })
        .map(|stored| stored == expected_magic)
        .unwrap_or(false)
}

fn check_rpc_ready(enabled: bool, service: &NodeService) -> bool {
    if !enabled {
        return true;
    }
    service.rpc.is_some()
}
