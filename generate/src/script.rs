use crate::target::Target;
use tailpod_config::DeploymentKind;

/// Exit status of the run script when `TS_AUTHKEY` is not exported.
pub const AUTHKEY_MISSING_STATUS: i32 = 9;

pub(crate) fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Bash script bringing the compose project up, or down with `-stop`.
pub(crate) fn render(target: &Target<'_>) -> String {
    let project = shell_quote(target.hostname);
    let mut out = String::new();

    out.push_str("#!/usr/bin/env bash\n");
    out.push_str("set -euo pipefail\n\n");
    out.push_str("cd \"$(dirname \"$0\")\"\n\n");

    out.push_str("if [ \"${1:-}\" = \"-stop\" ]; then\n");
    out.push_str(&format!("    docker compose -p {} down\n", project));
    out.push_str("    exit 0\n");
    out.push_str("fi\n\n");

    out.push_str("if [ -z \"${TS_AUTHKEY:-}\" ]; then\n");
    out.push_str("    echo \"TS_AUTHKEY environment variable must be set\" >&2\n");
    out.push_str(&format!("    exit {}\n", AUTHKEY_MISSING_STATUS));
    out.push_str("fi\n\n");

    if target.kind == DeploymentKind::Go
        && let Some(exec_name) = target.exec_name
    {
        let build_path = target.build_path.unwrap_or(".");
        out.push_str("STAGING=\"$(pwd)\"\n");
        out.push_str(&format!(
            "(cd {} && CGO_ENABLED=0 GOOS=linux go build -o \"$STAGING\"/{} {})\n\n",
            shell_quote(target.work_dir),
            shell_quote(exec_name),
            shell_quote(build_path),
        ));
    }

    out.push_str(&format!("docker compose -p {} up -d --build\n", project));
    out
}
