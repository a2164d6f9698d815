// Calligraphy site task runner (cargo xtask)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use xshell::{Shell, cmd};

const BINARY: &str = "calligraphy-site";

fn main() -> Result<()> {
    let sh = Shell::new()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let flag = |name: &str| args.iter().any(|a| a == name);

    match args.first().map(String::as_str) {
        Some("build") => build(&sh, flag("--release")),
        Some("test") => test(&sh),
        Some("format") => format(&sh, flag("--check")),
        Some("clippy") => clippy(&sh),
        Some("run") => run(&sh, &args[1..]),
        Some("ci") => ci(&sh),
        Some("dist") => dist(&sh),
        Some("config") => {
            let Some(path) = args.get(1) else {
                bail!("Usage: cargo xtask config <path>");
            };
            write_config(Path::new(path))
        },
        Some("clean") => clean(&sh),
        _ => {
            print_help();
            Ok(())
        },
    }
}

fn print_help() {
    println!("Calligraphy site tasks");
    println!();
    println!("Usage: cargo xtask <COMMAND> [OPTIONS]");
    println!();
    println!("  build [--release]   Build the server");
    println!("  test                Run the test suite");
    println!("  format [--check]    rustfmt the workspace");
    println!("  clippy              Lint with warnings denied");
    println!("  run [ARGS...]       Run the server with ARGS");
    println!("  ci                  format --check, clippy, test");
    println!("  dist                Release build packaged as build/{}-<timestamp>.tar.gz", BINARY);
    println!("  config <path>       Write a sample config.toml");
    println!("  clean               Remove build artifacts");
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    let _dir = sh.push_dir(project_root());
    if release {
        cmd!(sh, "cargo build --release -p {BINARY}").run().context("Release build failed")?;
    } else {
        cmd!(sh, "cargo build -p {BINARY}").run().context("Build failed")?;
    }
    Ok(())
}

fn test(sh: &Shell) -> Result<()> {
    let _dir = sh.push_dir(project_root());
    cmd!(sh, "cargo test --workspace").run().context("Tests failed")?;
    Ok(())
}

fn format(sh: &Shell, check: bool) -> Result<()> {
    let _dir = sh.push_dir(project_root());
    if check {
        cmd!(sh, "cargo fmt --all -- --check").run().context("Code is not formatted")?;
    } else {
        cmd!(sh, "cargo fmt --all").run().context("Failed to format code")?;
    }
    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    let _dir = sh.push_dir(project_root());
    cmd!(sh, "cargo clippy --workspace --all-targets -- --deny warnings")
        .run()
        .context("Clippy checks failed")?;
    Ok(())
}

fn run(sh: &Shell, args: &[String]) -> Result<()> {
    let _dir = sh.push_dir(project_root().join("backend"));
    cmd!(sh, "cargo run -p {BINARY} -- {args...}").run().context("Server exited with an error")?;
    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    println!("[1/3] format");
    format(sh, true)?;
    println!("[2/3] clippy");
    clippy(sh)?;
    println!("[3/3] test");
    test(sh)?;
    println!("CI checks passed");
    Ok(())
}

/// Lay out bin/, conf/, data/fonts/ and logs/ under build/dist and tar them.
fn dist(sh: &Shell) -> Result<()> {
    build(sh, true)?;

    let project = project_root();
    let dist_dir = project.join("build/dist");
    for sub in ["bin", "conf", "data/fonts", "logs"] {
        std::fs::create_dir_all(dist_dir.join(sub))
            .with_context(|| format!("Failed to create {}", sub))?;
    }

    let binary = project.join("target/release").join(BINARY);
    std::fs::copy(&binary, dist_dir.join("bin").join(BINARY))
        .with_context(|| format!("Missing release binary at {}", binary.display()))?;
    write_config(&dist_dir.join("conf/config.toml"))?;

    let web = project.join("web");
    if web.exists() {
        cmd!(sh, "cp -r {web} {dist_dir}/web").run()?;
    }

    let package = format!("{}-{}.tar.gz", BINARY, chrono::Local::now().format("%Y%m%d_%H%M%S"));
    let _dir = sh.push_dir(&dist_dir);
    cmd!(sh, "tar czf ../{package} .").run().context("Failed to create tarball")?;

    println!("Package: {}", project.join("build").join(&package).display());
    Ok(())
}

fn write_config(path: &Path) -> Result<()> {
    let sample = r#"[server]
host = "0.0.0.0"
port = 8080

[site]
url = "https://arabiccalligraphygenerator.com"
environment = "production"

[logging]
level = "info,calligraphy_site=debug"
file = "logs/calligraphy-site.log"

[static_config]
enabled = true
web_root = "web"

[fonts]
asset_base_url = "https://assets.arabiccalligraphygenerator.com"
download_base_url = "https://assets.arabiccalligraphygenerator.com/downloads"
cache_dir = "data/fonts"
load_timeout_ms = "3s"

[indexnow]
enabled = false
key = ""
"#;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, sample).with_context(|| format!("Failed to write {}", path.display()))
}

fn clean(sh: &Shell) -> Result<()> {
    let project = project_root();
    let _dir = sh.push_dir(&project);
    cmd!(sh, "cargo clean").run()?;

    let build_dir = project.join("build");
    if build_dir.exists() {
        std::fs::remove_dir_all(&build_dir).context("Failed to remove build/")?;
    }
    Ok(())
}

fn project_root() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest.parent().unwrap_or(manifest).to_path_buf()
}
