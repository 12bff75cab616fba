use crate::BASE_IMAGE;
use crate::error::GenerateError;
use crate::target::Target;

/// Dockerfile wrapping a Go executable compiled on the host.
pub(crate) fn render(target: &Target<'_>, exec_name: &str) -> Result<String, GenerateError> {
    let binary = format!("/usr/local/bin/{}", exec_name);
    let mut entrypoint = vec![binary.clone()];
    entrypoint.extend(target.args.iter().cloned());

    let mut out = String::new();
    out.push_str(&format!("FROM {}\n\n", BASE_IMAGE));
    out.push_str("RUN apt-get update \\\n");
    out.push_str("    && apt-get install -y --no-install-recommends ca-certificates \\\n");
    out.push_str("    && rm -rf /var/lib/apt/lists/*\n\n");
    // exec form, so names with spaces or quotes survive
    let copy = [exec_name.to_string(), binary.clone()];
    out.push_str(&format!("COPY {}\n", serde_json::to_string(&copy)?));
    out.push_str("WORKDIR /app\n");
    out.push_str(&format!("EXPOSE {}\n\n", target.port));
    out.push_str(&format!("ENTRYPOINT {}\n", serde_json::to_string(&entrypoint)?));
    Ok(out)
}
