//! Signer sources: the CSV export of a public spreadsheet and a plain-text
//! allow-list committed to the repository.
//!
//! Each source yields a [`SignerSet`]. A source with no location configured
//! yields [`CheckError::NotConfigured`], which [`load_signers`] treats as
//! "skipped". Any other failure aborts the whole load: a partial signer list
//! would turn an infrastructure failure into a false "not signed".

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::CheckError;
use crate::identity::{Identifier, SignerSet};
use crate::platform::{Platform, SheetFetcher};

pub const SHEET_SOURCE: &str = "sheet";
pub const REPO_FILE_SOURCE: &str = "repo-file";

/// Column holding the login in the sheet export. Header names are not checked.
const SHEET_LOGIN_COLUMN: usize = 1;

/// Parse a spreadsheet CSV export.
///
/// The first row is a header and always skipped. Rows too short to reach the
/// login column, or with a blank login, are skipped.
///
/// A login containing a line break or comma means a quote was never closed
/// and the rest of the document ran into one field; that is a format error.
pub fn parse_sheet(csv: &[u8]) -> Result<SignerSet, CheckError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv);

    reader
        .headers()
        .map_err(|e| CheckError::format("signer sheet header", e))?;

    let mut signers = SignerSet::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| CheckError::format("signer sheet", e))?;
        let Some(value) = record.get(SHEET_LOGIN_COLUMN) else {
            continue;
        };
        if value.contains(['\n', '\r', ',']) {
            return Err(CheckError::format(
                "signer sheet",
                format!("row {}: login {value:?} spans fields or lines", row + 2),
            ));
        }
        if let Some(login) = Identifier::parse(value) {
            accept(&mut signers, login, SHEET_SOURCE);
        }
    }
    Ok(signers)
}

/// Parse a plain-text signer file: one login per line, `#` starts a comment line.
pub fn parse_signer_file(content: &[u8]) -> Result<SignerSet, CheckError> {
    let text =
        std::str::from_utf8(content).map_err(|e| CheckError::format("signer file", e))?;

    let mut signers = SignerSet::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        accept(&mut signers, Identifier::new(line), REPO_FILE_SOURCE);
    }
    Ok(signers)
}

fn accept(signers: &mut SignerSet, login: Identifier, source: &'static str) {
    info!(signer = %login, source, "CLA signer");
    signers.insert(login);
}

/// Fetch and parse the spreadsheet export at `url`.
pub async fn read_sheet(
    fetcher: &dyn SheetFetcher,
    url: Option<&str>,
) -> Result<SignerSet, CheckError> {
    let url = url.ok_or(CheckError::NotConfigured(SHEET_SOURCE))?;
    let body = fetcher.fetch_csv(url).await?;
    parse_sheet(&body)
}

/// Fetch and parse the signer file at `path` as of `revision`.
pub async fn read_repo_file(
    platform: &dyn Platform,
    path: Option<&str>,
    revision: &str,
) -> Result<SignerSet, CheckError> {
    let path = path.ok_or(CheckError::NotConfigured(REPO_FILE_SOURCE))?;
    let content = platform.file_contents(path, revision).await?;
    parse_signer_file(&content)
}

/// Union every configured source into one lookup set.
///
/// Sources are read in order (sheet, then repo file) and the first failure
/// stops the load.
pub async fn load_signers(
    config: &Config,
    platform: &dyn Platform,
    sheet: &dyn SheetFetcher,
    revision: &str,
) -> Result<SignerSet, CheckError> {
    let mut merged = SignerSet::new();
    let mut configured = 0;

    configured += absorb(
        &mut merged,
        read_sheet(sheet, config.sheet_url.as_deref()).await,
    )?;
    configured += absorb(
        &mut merged,
        read_repo_file(platform, config.signers_path.as_deref(), revision).await,
    )?;

    if configured == 0 {
        warn!("no signer source configured; every author will fail the check");
    }
    info!(count = merged.len(), sources = configured, "loaded signers");
    Ok(merged)
}

/// Merge one source's result, returning how many configured sources it counts for.
fn absorb(
    merged: &mut SignerSet,
    result: Result<SignerSet, CheckError>,
) -> Result<usize, CheckError> {
    match result {
        Ok(set) => {
            merged.merge(set);
            Ok(1)
        }
        Err(CheckError::NotConfigured(source)) => {
            debug!(source, "signer source skipped");
            Ok(0)
        }
        Err(e) => Err(e),
    }
}
