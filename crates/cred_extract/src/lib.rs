use chrono::{DateTime, Utc};
use cred_core::{Error, Result};
use scraper::{Html, Selector};
use url::Url;

mod jsonld;

/// Article text pulled out of a fetched page.
#[derive(Debug, Clone)]
pub struct ExtractedArticle {
    pub url: String,
    pub title: String,
    pub text: String,
    pub fetched_at: DateTime<Utc>,
}

/// Only http(s) URLs are fetchable.
pub fn parse_url(url: &str) -> Result<Url> {
    let parsed =
        Url::parse(url).map_err(|e| Error::Extraction(format!("Failed to parse URL: {}", e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(Error::Extraction(format!(
            "Unsupported URL scheme: {}",
            other
        ))),
    }
}

/// Fetch a page and extract its article content.
pub async fn fetch_article(url: &str) -> Result<ExtractedArticle> {
    let parsed = parse_url(url)?;
    tracing::info!("Fetching article from {}", parsed);

    let response = reqwest::get(parsed).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Extraction(format!(
            "Fetching {} returned {}",
            url, status
        )));
    }
    let html = response.text().await?;
    extract_from_html(url, &html)
}

/// Extraction order: og:title / h1 / <title> for the title; article
/// paragraphs, then any paragraphs, then JSON-LD articleBody for the text.
pub fn extract_from_html(url: &str, html: &str) -> Result<ExtractedArticle> {
    let document = Html::parse_document(html);

    let mut title = extract_title(&document)?;
    let mut text = extract_body(&document)?;

    if text.is_empty() || title.is_empty() {
        if let Some(metadata) = jsonld::extract_article(&document) {
            if text.is_empty() {
                if let Some(body) = metadata.body {
                    text = body;
                }
            }
            if title.is_empty() {
                if let Some(headline) = metadata.headline {
                    title = headline;
                }
            }
        }
    }

    if text.trim().is_empty() {
        return Err(Error::Extraction(format!(
            "No article text found at {}",
            url
        )));
    }

    Ok(ExtractedArticle {
        url: url.to_string(),
        title,
        text,
        fetched_at: Utc::now(),
    })
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| Error::Extraction(format!("Invalid selector: {}", e)))
}

fn extract_title(document: &Html) -> Result<String> {
    let og_title = parse_selector("meta[property='og:title']")?;
    if let Some(content) = document
        .select(&og_title)
        .next()
        .and_then(|el| el.value().attr("content"))
    {
        let content = content.trim();
        if !content.is_empty() {
            return Ok(content.to_string());
        }
    }

    for selector in ["h1", "title"] {
        let selector = parse_selector(selector)?;
        if let Some(text) = document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
        {
            if !text.is_empty() {
                return Ok(text);
            }
        }
    }

    Ok(String::new())
}

fn extract_body(document: &Html) -> Result<String> {
    for selector in ["article p", "p"] {
        let selector = parse_selector(selector)?;
        let paragraphs: Vec<String> = document
            .select(&selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if !paragraphs.is_empty() {
            return Ok(paragraphs.join("\n\n"));
        }
    }
    Ok(String::new())
}
