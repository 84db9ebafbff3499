use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::content::fetcher::{ContentLayout, DEFAULT_EXTENSION};
use crate::post_repository::DEFAULT_RECENT_LIMIT;

/// Route the server exposes the content directory under.
pub const CONTENT_ROUTE: &str = "/assets/blog-posts";

#[derive(Deserialize)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
    pub content_dir: PathBuf,
    pub content_index: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, PartialEq, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    #[default]
    File,
    Http,
}

#[derive(Deserialize, Default)]
pub struct Content {
    #[serde(default)]
    pub source: ContentSource,
    pub base_url: Option<String>,
    pub path: Option<String>,
    pub extension: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct Defaults {
    pub recent_count: Option<usize>,
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub paths: Paths,
    #[serde(default)]
    pub content: Content,
    #[serde(default)]
    pub defaults: Defaults,
    pub server: Server,
    pub log: Option<Log>,
}

impl Config {
    pub fn recent_count(&self) -> usize {
        self.defaults.recent_count.unwrap_or(DEFAULT_RECENT_LIMIT)
    }

    /// Layout of content paths as seen by the configured fetcher.
    pub fn content_layout(&self) -> ContentLayout {
        let extension = self.content.extension.as_deref().unwrap_or(DEFAULT_EXTENSION);
        match self.content.source {
            ContentSource::File => ContentLayout::new("", extension),
            ContentSource::Http => {
                let path = self.content.path.as_deref().unwrap_or(CONTENT_ROUTE);
                ContentLayout::new(path, extension)
            }
        }
    }

    /// Public URL prefix for images referenced by post bodies.
    pub fn image_prefix(&self) -> String {
        match self.content.source {
            ContentSource::File => CONTENT_ROUTE.to_string(),
            ContentSource::Http => {
                let base_url = self.content.base_url.as_deref().unwrap_or_default().trim_end_matches('/');
                format!("{}{}", base_url, self.content_layout().base)
            }
        }
    }
}

fn parse_path(path: PathBuf) -> PathBuf {
    let Some(str_path) = path.to_str() else {
        return path;
    };
    if !str_path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    match exe_dir {
        Some(exe_dir) => PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy())),
        None => path,
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    if cfg.content.source == ContentSource::Http && cfg.content.base_url.is_none() {
        return Err(io::Error::new(
            ErrorKind::InvalidData, "content.base_url is required when content.source is http"));
    }

    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir),
        public_dir: parse_path(cfg.paths.public_dir),
        content_dir: parse_path(cfg.paths.content_dir),
        content_index: cfg.paths.content_index.map(parse_path),
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
