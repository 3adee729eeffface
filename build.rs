use {
    std::{
        env,
        fs::File,
        io::prelude::*,
        path::Path,
    },
    git2::Repository,
    semver::Version,
};

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error(transparent)] Git(#[from] git2::Error),
    #[error(transparent)] Io(#[from] std::io::Error),
    #[error(transparent)] Semver(#[from] semver::Error),
    #[error("missing environment variable {0}")]
    Env(&'static str),
    #[error("unexpected pre-release or build metadata in crate version {0}")]
    VersionMetadata(Version),
}

/// The commit the binary is built from, if the source is a git checkout.
fn commit_hash(manifest_dir: &Path) -> Result<Option<String>, Error> {
    let repo = match Repository::discover(manifest_dir) {
        Ok(repo) => repo,
        Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let Ok(head) = repo.head() else { return Ok(None) }; // unborn branch
    Ok(Some(head.peel_to_commit()?.id().to_string()))
}

fn main() -> Result<(), Error> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=assets/season.json");
    let manifest_dir = env::var_os("CARGO_MANIFEST_DIR").ok_or(Error::Env("CARGO_MANIFEST_DIR"))?;
    let out_dir = env::var_os("OUT_DIR").ok_or(Error::Env("OUT_DIR"))?;
    let version = env!("CARGO_PKG_VERSION").parse::<Version>()?;
    if !version.pre.is_empty() || !version.build.is_empty() {
        return Err(Error::VersionMetadata(version))
    }
    let clap_version = match commit_hash(Path::new(&manifest_dir))? {
        Some(commit_hash) => format!("{version} ({commit_hash})"),
        None => version.to_string(),
    };
    let mut out_f = File::create(Path::new(&out_dir).join("version.rs"))?;
    writeln!(&mut out_f, "pub const CLAP_VERSION: &str = {clap_version:?};")?;
    Ok(())
}
