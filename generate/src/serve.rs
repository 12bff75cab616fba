use crate::error::GenerateError;
use crate::target::Target;
use serde_json::json;

/// Tailscale serve config: HTTPS on 443 proxied to the application port,
/// optionally exposed through a funnel.
pub(crate) fn render(target: &Target<'_>) -> Result<String, GenerateError> {
    let host = "${TS_CERT_DOMAIN}:443";
    let config = json!({
        "TCP": {
            "443": { "HTTPS": true }
        },
        "Web": {
            host: {
                "Handlers": {
                    "/": { "Proxy": format!("http://127.0.0.1:{}", target.port) }
                }
            }
        },
        "AllowFunnel": {
            host: target.funnel
        }
    });

    let mut out = serde_json::to_string_pretty(&config)?;
    out.push('\n');
    Ok(out)
}
