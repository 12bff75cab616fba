use crate::error::ConfigError;
use std::path::{Path, PathBuf};

const CMD_DIR: &str = "cmd";
const DOCKERFILE: &str = "Dockerfile";

/// What the resolution pass can learn about the project without asking.
pub trait Environment {
    /// Absolute path of the project directory.
    fn work_dir(&self) -> Result<String, ConfigError>;

    /// `<name>` when the project has exactly one `./cmd/<name>` directory.
    fn command_name(&self) -> Result<String, ConfigError>;

    /// `./cmd/<exec_name>` when that directory exists.
    fn go_build_path(&self, exec_name: &str) -> Result<String, ConfigError>;

    /// `.` when the project root holds a Dockerfile.
    fn dockerfile_context(&self) -> Result<String, ConfigError>;
}

/// The project on the local filesystem.
pub struct HostEnvironment {
    root: PathBuf,
}

impl HostEnvironment {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The process working directory.
    pub fn current() -> Result<Self, ConfigError> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Environment for HostEnvironment {
    fn work_dir(&self) -> Result<String, ConfigError> {
        let dir = std::fs::canonicalize(&self.root)?;
        dir.to_str()
            .map(str::to_string)
            .ok_or_else(|| ConfigError::Underivable(format!("{:?} is not valid UTF-8", dir)))
    }

    fn command_name(&self) -> Result<String, ConfigError> {
        let cmd_dir = self.root.join(CMD_DIR);
        if !cmd_dir.is_dir() {
            return Err(ConfigError::Underivable(format!(
                "{:?} is not a directory",
                cmd_dir
            )));
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&cmd_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }

        match names.len() {
            1 => Ok(names.remove(0)),
            0 => Err(ConfigError::Underivable(format!(
                "no command directory under {:?}",
                cmd_dir
            ))),
            _ => {
                names.sort();
                Err(ConfigError::Underivable(format!(
                    "several commands under {:?}: {}",
                    cmd_dir,
                    names.join(", ")
                )))
            }
        }
    }

    fn go_build_path(&self, exec_name: &str) -> Result<String, ConfigError> {
        if !exec_name.is_empty() && self.root.join(CMD_DIR).join(exec_name).is_dir() {
            return Ok(format!("./{}/{}", CMD_DIR, exec_name));
        }
        Err(ConfigError::Underivable(format!(
            "./{}/{} is not a directory",
            CMD_DIR, exec_name
        )))
    }

    fn dockerfile_context(&self) -> Result<String, ConfigError> {
        if self.root.join(DOCKERFILE).is_file() {
            return Ok(".".to_string());
        }
        Err(ConfigError::Underivable(format!(
            "no {} in {:?}",
            DOCKERFILE, self.root
        )))
    }
}
