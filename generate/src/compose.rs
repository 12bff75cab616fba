use crate::error::GenerateError;
use crate::target::Target;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tailpod_config::DeploymentKind;

pub const TAILSCALE_IMAGE: &str = "tailscale/tailscale:latest";
const TAILSCALE_SERVICE: &str = "tailscale";
const APP_SERVICE: &str = "app";
const STATE_VOLUME: &str = "tailscale-state";

#[derive(Debug, Serialize)]
struct ComposeFile {
    services: BTreeMap<&'static str, Service>,
    volumes: BTreeMap<&'static str, VolumeConfig>,
}

#[derive(Debug, Default, Serialize)]
struct Service {
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    build: Option<Build>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hostname: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    command: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    environment: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    volumes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    devices: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cap_add: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    network_mode: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<String>,
    restart: &'static str,
}

#[derive(Debug, Serialize)]
struct Build {
    context: String,
    dockerfile: String,
}

#[derive(Debug, Default, Serialize)]
struct VolumeConfig {}

fn tailscale_service(target: &Target<'_>) -> Service {
    Service {
        image: Some(TAILSCALE_IMAGE.to_string()),
        hostname: Some(target.hostname.to_string()),
        environment: vec![
            "TS_AUTHKEY=${TS_AUTHKEY}".to_string(),
            "TS_STATE_DIR=/var/lib/tailscale".to_string(),
            "TS_SERVE_CONFIG=/config/serve.config".to_string(),
            "TS_USERSPACE=false".to_string(),
        ],
        volumes: vec![
            format!("{}:/var/lib/tailscale", STATE_VOLUME),
            "./serve.config:/config/serve.config:ro".to_string(),
        ],
        devices: vec!["/dev/net/tun:/dev/net/tun".to_string()],
        cap_add: vec!["net_admin".to_string(), "sys_module".to_string()],
        restart: "unless-stopped",
        ..Default::default()
    }
}

fn app_service(target: &Target<'_>) -> Service {
    let mut service = Service {
        network_mode: Some(format!("service:{}", TAILSCALE_SERVICE)),
        depends_on: vec![TAILSCALE_SERVICE.to_string()],
        volumes: target.volumes.iter().map(|v| v.bind()).collect(),
        restart: "unless-stopped",
        ..Default::default()
    };

    match target.kind {
        DeploymentKind::Go => {
            service.image = Some(target.image_name.to_string());
            service.build = Some(Build {
                context: ".".to_string(),
                dockerfile: "Dockerfile".to_string(),
            });
        }
        DeploymentKind::DockerImage => {
            service.image = Some(target.image_name.to_string());
            service.command = target.args.to_vec();
        }
        DeploymentKind::DockerFile => {
            let build_path = target.build_path.unwrap_or(".");
            let context = Path::new(target.work_dir).join(build_path);
            service.image = Some(target.image_name.to_string());
            service.build = Some(Build {
                context: context.to_string_lossy().to_string(),
                dockerfile: "Dockerfile".to_string(),
            });
        }
    }

    service
}

/// docker-compose.yaml running the application inside the network namespace
/// of a Tailscale sidecar.
pub(crate) fn render(target: &Target<'_>) -> Result<String, GenerateError> {
    let mut services = BTreeMap::new();
    services.insert(TAILSCALE_SERVICE, tailscale_service(target));
    services.insert(APP_SERVICE, app_service(target));

    let mut volumes = BTreeMap::new();
    volumes.insert(STATE_VOLUME, VolumeConfig::default());

    Ok(serde_yaml::to_string(&ComposeFile { services, volumes })?)
}
