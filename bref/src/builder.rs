//! Archive builder: produces `.bref/output/`, a self-contained deployable
//! copy of the project with the PHP runtime, the Lambda shim and production
//! dependencies.
//!
//! The output directory is fully deleted and rebuilt on every run; the PHP
//! runtime archive is cached under `.bref/bin/php/` and downloaded at most
//! once per version.

use std::fs;
use std::path::{Path, PathBuf};

use bref_core::config::BrefConfig;
use bref_core::error::BrefError;
use bref_core::progress::Progress;
use tracing::{debug, info};

use crate::runner;

/// Fixed PHP runtime version; the archive cache is keyed by it.
pub const PHP_VERSION: &str = "7.2.5";

/// Directory holding the archive cache and the generated output.
pub const BUILD_DIR: &str = ".bref";

/// Steps reported by `build()`. The deploy path adds one more for the upload.
pub const BUILD_STEPS: usize = 8;

const DEFAULT_PHP_URL: &str = "https://s3.amazonaws.com/bref-php/bin/php-7.2.5.tar.gz";

/// Lambda shim installed at the root of the output directory.
const HANDLER_JS: &str = include_str!("../assets/handler.js");

/// Files that must exist in the project root before the pipeline touches
/// anything.
const REQUIRED_FILES: [&str; 2] = ["serverless.yml", "bref.php"];

pub struct Builder {
    project_root: PathBuf,
    /// Dependency install command, split into discrete arguments.
    composer: Vec<String>,
}

impl Builder {
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            composer: [
                "composer",
                "install",
                "--no-dev",
                "--classmap-authoritative",
                "--no-scripts",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    /// Replace the dependency install command (e.g. a different composer
    /// binary, or a no-op in tests).
    pub fn with_composer_command(mut self, command: Vec<String>) -> Self {
        self.composer = command;
        self
    }

    pub fn output_dir(&self) -> PathBuf {
        self.project_root.join(BUILD_DIR).join("output")
    }

    /// Run the packaging pipeline. Each step advances `progress` by one
    /// after it completes; the first failure aborts everything after it.
    pub fn build(&self, progress: &mut Progress) -> Result<(), BrefError> {
        self.check_preconditions()?;

        let config = BrefConfig::load(&self.project_root)?;
        progress.advance("Reading project configuration");

        let output = self.output_dir();
        if output.exists() {
            fs::remove_dir_all(&output)?;
        }
        fs::create_dir_all(&output)?;
        progress.advance("Recreating the output directory");

        bref_core::fs::copy_project(&self.project_root, &output, &[BUILD_DIR])?;
        progress.advance("Copying the project files");

        let archive = self.ensure_runtime_archive(config.php.as_deref())?;
        progress.advance("Fetching the PHP runtime");

        extract_runtime(&archive, &output.join(BUILD_DIR).join("bin"))?;
        progress.advance("Extracting the PHP runtime");

        fs::write(output.join("handler.js"), HANDLER_JS)?;
        progress.advance("Installing the Lambda shim");

        if let Some((program, args)) = self.composer.split_first() {
            runner::run_args(program, args, &output)?;
        }
        progress.advance("Installing composer dependencies");

        for hook in &config.hooks.build {
            info!(hook, "Running build hook");
            runner::run(hook, &output)?;
        }
        progress.advance("Running the build hooks");

        Ok(())
    }

    /// Both marker files must exist before any side effect happens.
    fn check_preconditions(&self) -> Result<(), BrefError> {
        let missing: Vec<String> = REQUIRED_FILES
            .iter()
            .filter(|f| !self.project_root.join(f).exists())
            .map(|f| f.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(BrefError::MissingProjectFiles { missing })
        }
    }

    /// Return the cached runtime archive, downloading it first if absent.
    /// Presence of the file alone suppresses the download.
    fn ensure_runtime_archive(&self, url_override: Option<&str>) -> Result<PathBuf, BrefError> {
        let cache_dir = self.project_root.join(BUILD_DIR).join("bin").join("php");
        let archive = cache_dir.join(format!("php-{PHP_VERSION}.tar.gz"));
        if archive.exists() {
            debug!(path = %archive.display(), "PHP runtime archive already cached");
            return Ok(archive);
        }

        fs::create_dir_all(&cache_dir)?;
        let url = url_override.unwrap_or(DEFAULT_PHP_URL);
        info!(url, "Downloading the PHP runtime");
        download(url, &archive)?;
        Ok(archive)
    }
}

/// Download `url` into `dest`. The body is written to a `.partial` file
/// first so an interrupted download never poisons the cache.
fn download(url: &str, dest: &Path) -> Result<(), BrefError> {
    let agent = ureq::AgentBuilder::new().build();
    let response = agent.get(url).call().map_err(|e| BrefError::Download {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let partial = dest.with_file_name(format!("php-{PHP_VERSION}.tar.gz.partial"));
    let mut file = fs::File::create(&partial)?;
    std::io::copy(&mut response.into_reader(), &mut file)?;
    fs::rename(&partial, dest)?;
    Ok(())
}

/// Unpack the gzipped tar archive into `bin_dir` and make the extracted
/// binaries executable (0755).
fn extract_runtime(archive: &Path, bin_dir: &Path) -> Result<(), BrefError> {
    fs::create_dir_all(bin_dir)?;
    let file = fs::File::open(archive)?;
    let mut tarball = tar::Archive::new(flate2::read::GzDecoder::new(file));
    tarball.unpack(bin_dir)?;
    chmod_recursive(bin_dir, 0o755)?;
    Ok(())
}

#[cfg(unix)]
fn chmod_recursive(dir: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(dir, fs::Permissions::from_mode(mode))?;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            chmod_recursive(&path, mode)?;
        } else {
            fs::set_permissions(&path, fs::Permissions::from_mode(mode))?;
        }
    }
    Ok(())
}

#[cfg(not(unix))]
fn chmod_recursive(_dir: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
