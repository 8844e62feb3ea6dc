#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub fn validate_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_validate-catalog"))
}

pub fn merge_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_merge-apis"))
}

/// Command for one of the helper binaries with site discovery pinned to `cwd`.
pub fn helper_command(binary: &Path, cwd: &Path) -> Command {
    let mut cmd = Command::new(binary);
    cmd.current_dir(cwd).env_remove("APIPEDIA_ROOT");
    cmd
}

/// Run a command and capture its output regardless of exit status.
pub fn run(mut cmd: Command) -> Result<Output> {
    cmd.output()
        .with_context(|| format!("failed to run command: {:?}", cmd))
}

/// Run a command that is expected to exit 0.
pub fn run_command(cmd: Command) -> Result<Output> {
    let output = run(cmd)?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command failed: status {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn api_entry(id: &str, category: &str) -> Value {
    json!({
        "id": id,
        "name": id.to_uppercase(),
        "description": "テスト用のAPI",
        "url": format!("https://{id}.example.com"),
        "category": category,
        "pricing": "freemium",
        "auth": "apiKey",
        "region": "japan",
        "difficulty": "easy",
        "popularity": {
            "score": 72,
            "sources": [
                {"url": "https://qiita.com/tags/api", "label": "Qiita"},
                {"url": "https://zenn.dev/topics/api", "label": "Zenn"}
            ]
        }
    })
}

/// A small catalog that passes every validation check.
pub fn fixture_catalog() -> Value {
    json!({
        "metadata": {
            "version": "2.1.0",
            "lastUpdated": "2026-10-01",
            "totalApis": 2,
            "totalCategories": 2
        },
        "categories": [
            {"id": "payment", "name": "決済", "icon": "💳"},
            {"id": "ai", "name": "AI・機械学習", "icon": "🤖"}
        ],
        "apis": [api_entry("stripe", "payment"), api_entry("openai", "ai")]
    })
}

/// Temporary site root holding `docs/data/apis.json`.
pub struct Site {
    pub dir: TempDir,
}

impl Site {
    pub fn new(catalog: &Value) -> Result<Self> {
        let dir = TempDir::new().context("failed to allocate site root")?;
        let data = dir.path().join("docs/data");
        fs::create_dir_all(&data)?;
        fs::write(
            data.join("apis.json"),
            serde_json::to_string_pretty(catalog)? + "\n",
        )?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root().join("docs/data/apis.json")
    }

    pub fn read_catalog(&self) -> Result<Value> {
        let text = fs::read_to_string(self.catalog_path())?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn write_fragment(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.root().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }
}
