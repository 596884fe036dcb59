//! Renders the `noti(1)` man page: `gen-man [OUT]`, where `OUT` is a file or an existing directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::CommandFactory;
use clap_mangen::Man;

use noti::cli::Cli;

const PAGE_NAME: &str = "noti.1";

fn page_path(arg: Option<String>) -> PathBuf {
    match arg.map(PathBuf::from) {
        Some(dir) if dir.is_dir() => dir.join(PAGE_NAME),
        Some(file) => file,
        None => PathBuf::from(PAGE_NAME),
    }
}

fn render() -> anyhow::Result<Vec<u8>> {
    let man = Man::new(Cli::command())
        .section("1")
        .manual("User Commands")
        .source(concat!("noti ", env!("CARGO_PKG_VERSION")));
    let mut page = Vec::new();
    man.render(&mut page).context("Rendering man page")?;
    Ok(page)
}

fn write_page(path: &Path, page: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, page).with_context(|| format!("Writing man page {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let path = page_path(std::env::args().nth(1));
    write_page(&path, &render()?)?;
    eprintln!("Generated man page at {}", path.display());
    Ok(())
}
