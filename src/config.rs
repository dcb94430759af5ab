//! Loads a project's blog settings and persisted sidebar from `quire.yaml`.

use crate::blog::Blog;
use crate::widget::Instance;
use anyhow::{anyhow, Context, Result};
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The project file name searched for by [`Config::from_directory`].
pub const PROJECT_FILE: &str = "quire.yaml";

#[derive(Deserialize)]
struct Project {
    blog: Blog,

    /// A UTC offset such as `+09:00`, `-0330` or `UTC`.
    #[serde(default)]
    time_zone: Option<String>,

    #[serde(default)]
    sidebar: Vec<Instance>,
}

pub struct Config {
    /// The path of the project file this was loaded from.
    pub project_file: PathBuf,

    pub blog: Blog,

    /// The zone dates are displayed in. Defaults to UTC.
    pub time_zone: FixedOffset,

    /// The blog's persisted sidebar, in file order.
    pub sidebar: Vec<Instance>,
}

impl Config {
    /// Loads the first `quire.yaml` found in `dir` or any of its ancestors.
    /// A relative `dir` is resolved against the current directory first.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let dir = dir
            .canonicalize()
            .with_context(|| format!("Resolving project directory `{}`", dir.display()))?;
        Config::search(&dir)
    }

    fn search(dir: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            Config::from_project_file(&path)
                .with_context(|| format!("Loading configuration from `{}`", path.display()))
        } else {
            match dir.parent() {
                Some(parent) => Config::search(parent),
                None => Err(anyhow!(
                    "Could not find `{}` in any parent directory",
                    PROJECT_FILE
                )),
            }
        }
    }

    /// Loads a project file. Sidebar instances without a `blog_id` are
    /// assigned to the project's blog.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let file = File::open(path)
            .with_context(|| format!("Opening project file `{}`", path.display()))?;
        let project: Project = serde_yaml::from_reader(file)?;

        let time_zone = match &project.time_zone {
            None => utc(),
            Some(zone) => parse_utc_offset(zone)?,
        };

        let blog_id = project.blog.id;
        let sidebar = project
            .sidebar
            .into_iter()
            .map(|mut instance| {
                if instance.blog_id == 0 {
                    instance.blog_id = blog_id;
                }
                instance
            })
            .collect();

        Ok(Config {
            project_file: path.to_owned(),
            blog: project.blog,
            time_zone,
            sidebar,
        })
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Parses `UTC`, `Z`, `+HH:MM`, `+HHMM` or `+HH` (and their `-` forms).
pub fn parse_utc_offset(s: &str) -> Result<FixedOffset> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("utc") || s.eq_ignore_ascii_case("z") {
        return Ok(utc());
    }

    let invalid = || anyhow!("invalid UTC offset `{}`", s);
    let (sign, rest) = match s.chars().next() {
        Some('+') => (1, &s[1..]),
        Some('-') => (-1, &s[1..]),
        _ => return Err(invalid()),
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let (hours, minutes) = match digits.len() {
        2 => (&digits[..2], "0"),
        4 => (&digits[..2], &digits[2..]),
        _ => return Err(invalid()),
    };
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
