use anyhow::{Context, Result};
use reqwest::Url;

/// Open a repository or article link in the user's default browser.
///
/// Only http(s) links are opened.
pub fn open_url(url: &str) -> Result<()> {
    ensure_web_url(url)?;
    webbrowser::open(url).with_context(|| format!("Failed to open browser for URL: {}", url))?;
    Ok(())
}

fn ensure_web_url(url: &str) -> Result<()> {
    let parsed = Url::parse(url).with_context(|| format!("Not a valid URL: {}", url))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => anyhow::bail!("Refusing to open {} link: {}", other, url),
    }
}
