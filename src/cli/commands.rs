use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::app::{AppContext, Result, SitegrabError};
use crate::domain::{ProgressEvent, RetrievalRequest, ScannedPage};
use crate::engine::{ParallelRetriever, ResponseDecoding};

/// Scan a single URL, reporting each attempt on stderr.
///
/// Returns `false` when every relay failed.
pub async fn scan_one(
    ctx: &AppContext,
    url: &str,
    output: Option<&Path>,
    raw: bool,
    open_after: bool,
) -> Result<bool> {
    eprintln!("> Target: {}", url);
    let sink = |event: ProgressEvent| eprintln!("> {}", event);

    let outcome = ctx.engine.retrieve(url, &sink).await?;
    let page = if raw {
        outcome
            .into_page()
            .map(|p| ScannedPage::new(p.target, p.strategy, p.markup))
    } else {
        ctx.finish(outcome)
    };

    let Some(page) = page else {
        eprintln!("> Error: Network blocked.");
        eprintln!("> Solution: save the page source by hand and run `sitegrab normalize`.");
        return Ok(false);
    };

    match output {
        Some(path) => {
            std::fs::write(path, &page.html)?;
            eprintln!("> Saved {} ({} bytes)", path.display(), page.html.len());
            if open_after {
                open_in_browser(path)?;
            }
        }
        None => println!("{}", page.html),
    }

    Ok(true)
}

/// Scan several URLs concurrently. Each page is saved into `output_dir`
/// when given, otherwise only a summary is printed. With `open_after` the
/// output directory is opened once all pages are written.
pub async fn scan_many(
    ctx: &AppContext,
    urls: Vec<String>,
    output_dir: Option<&Path>,
    raw: bool,
    open_after: bool,
    workers: Option<usize>,
) -> Result<bool> {
    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)?;
    }

    println!("Scanning {} pages...", urls.len());

    let results = match workers {
        Some(n) => {
            ParallelRetriever::with_workers(ctx.engine.clone(), n)
                .retrieve_all(urls)
                .await
        }
        None => ctx.parallel_retriever.retrieve_all(urls).await,
    };

    let mut saved = 0;
    let mut failed = 0;
    let mut used_names = HashSet::new();

    for (url, result) in results {
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("  ! {} - {}", url, e);
                failed += 1;
                continue;
            }
        };

        let page = if raw {
            outcome
                .into_page()
                .map(|p| ScannedPage::new(p.target, p.strategy, p.markup))
        } else {
            ctx.finish(outcome)
        };

        match page {
            Some(page) => {
                match output_dir {
                    Some(dir) => {
                        let path = unique_path(dir, &page.file_name(), &mut used_names);
                        std::fs::write(&path, &page.html)?;
                        println!("  + {} via {} -> {}", page.source_url, page.strategy, path.display());
                    }
                    None => println!(
                        "  + {} via {} ({} bytes)",
                        page.source_url,
                        page.strategy,
                        page.html.len()
                    ),
                }
                saved += 1;
            }
            None => {
                eprintln!("  ! {} - all relays failed", url);
                failed += 1;
            }
        }
    }

    println!("Scan complete: {} retrieved, {} failed", saved, failed);

    if open_after {
        if let Some(dir) = output_dir {
            open_in_browser(dir)?;
        }
    }

    Ok(failed == 0)
}

/// Path inside `dir` for `name`, suffixed `-2`, `-3`, ... if this run
/// already wrote a file under that name.
fn unique_path(dir: &Path, name: &str, used: &mut HashSet<String>) -> PathBuf {
    let stem = name.strip_suffix(".html").unwrap_or(name);
    let mut candidate = name.to_string();
    let mut n = 2;

    while !used.insert(candidate.clone()) {
        candidate = format!("{}-{}.html", stem, n);
        n += 1;
    }

    dir.join(candidate)
}

/// Normalize markup the user saved manually.
pub fn normalize_file(ctx: &AppContext, path: &Path, source: &str, output: Option<&Path>) -> Result<()> {
    let request = RetrievalRequest::new(source)?;
    url::Url::parse(request.target())?;

    let markup = std::fs::read_to_string(path)?;
    let html = ctx.normalizer.normalize(&markup, request.target());

    match output {
        Some(out) => {
            std::fs::write(out, &html)?;
            eprintln!("> Saved {}", out.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}

pub fn list_relays(ctx: &AppContext) {
    for (i, strategy) in ctx.engine.strategies().iter().enumerate() {
        let decoding = match &strategy.decoding {
            ResponseDecoding::JsonEnvelope { field } => format!("json envelope, field '{}'", field),
            ResponseDecoding::Passthrough => "passthrough".to_string(),
        };
        println!(
            "{}. {} ({})\n   {}\n   {}",
            i + 1,
            strategy.label,
            strategy.name,
            strategy.template,
            decoding
        );
    }
}

fn open_in_browser(path: &Path) -> Result<()> {
    open::that(path).map_err(|e| SitegrabError::Other(format!("could not open {}: {}", path.display(), e)))
}
