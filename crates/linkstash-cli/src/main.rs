mod cli;

use crate::cli::{Cli, Command};
use anyhow::bail;
use clap::Parser;
use jiff::Zoned;
use linkstash_analytics::StatsService;
use linkstash_core::{ClickContext, ShortCode};
use linkstash_logsink::{HttpTransport, LogLevel, LogSink, LogStack};
use linkstash_resolver::{Countdown, Resolution, ResolverService, DEFAULT_COUNTDOWN_SECONDS};
use linkstash_store::{CreateRequest, JsonFileBackend, UrlStore};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Cli::parse();
    let store = Arc::new(UrlStore::open(JsonFileBackend::new(&args.store), &args.base_url).await);
    let sink = args
        .log_endpoint
        .as_deref()
        .map(|endpoint| LogSink::new(HttpTransport::new(endpoint)));

    let outcome = run(&args.command, &store, sink.as_ref()).await;

    if let Some(sink) = &sink {
        sink.flush().await;
    }
    outcome
}

async fn run(
    command: &Command,
    store: &Arc<UrlStore<JsonFileBackend>>,
    sink: Option<&LogSink<HttpTransport>>,
) -> anyhow::Result<()> {
    match command {
        Command::Shorten {
            url,
            code,
            validity,
        } => {
            let request = match code {
                Some(code) => CreateRequest::builder()
                    .original_url(url.clone())
                    .custom_shortcode(code.clone())
                    .validity_minutes(*validity)
                    .build(),
                None => CreateRequest::builder()
                    .original_url(url.clone())
                    .validity_minutes(*validity)
                    .build(),
            };

            let created = store.create(request).await?;
            println!("{}", created.short_url);
            println!("  -> {}", created.record.original_url);
            println!("  expires at {}", created.record.expires_at);

            diag(
                sink,
                LogLevel::Info,
                format!("created short url {}", created.record.shortcode),
            )
            .await;
        }

        Command::Resolve {
            code,
            now,
            referrer,
        } => {
            let code = ShortCode::new(code.clone())?;
            let resolver = ResolverService::new(Arc::clone(store));
            let ctx = ClickContext {
                user_agent: Some(format!("linkstash-cli/{}", env!("CARGO_PKG_VERSION"))),
                referrer: referrer.clone(),
                utc_offset_minutes: local_offset_minutes(),
            };

            match resolver.resolve(&code, &ctx).await? {
                Resolution::NotFound => {
                    diag(sink, LogLevel::Error, format!("short url not found: {code}")).await;
                    bail!("short url not found: {code}");
                }
                Resolution::Expired => {
                    diag(sink, LogLevel::Warn, format!("short url expired: {code}")).await;
                    bail!("this short url has expired: {code}");
                }
                Resolution::Ready(ready) => {
                    println!("Destination: {}", ready.original_url);
                    diag(sink, LogLevel::Info, format!("resolved short url {code}")).await;

                    if !*now {
                        let mut countdown = Countdown::start(DEFAULT_COUNTDOWN_SECONDS);
                        let mut ticks = countdown.subscribe();
                        while ticks.changed().await.is_ok() {
                            let remaining = *ticks.borrow();
                            if remaining == 0 {
                                break;
                            }
                            println!("Redirecting in {remaining}...");
                        }
                        countdown.finished().await;
                    }
                    println!("Navigate to: {}", ready.original_url);
                }
            }
        }

        Command::Stats { code } => {
            let code = ShortCode::new(code.clone())?;
            let stats = StatsService::new(Arc::clone(store));
            let Some(stats) = stats.stats_for(&code).await else {
                bail!("short url not found: {code}");
            };

            println!("{} -> {}", stats.short_url, stats.record.original_url);
            println!("  created: {}", stats.record.created_at);
            println!(
                "  expires: {}{}",
                stats.record.expires_at,
                if stats.is_expired { " (expired)" } else { "" }
            );
            println!("  clicks:  {}", stats.record.click_count);
            if !stats.clicks.is_empty() {
                println!("  by source:");
                for (source, count) in &stats.clicks_by_source {
                    println!("    {source}: {count}");
                }
                println!("  by date:");
                for (date, count) in &stats.clicks_by_date {
                    println!("    {date}: {count}");
                }
            }
        }

        Command::List => {
            let all = store.list_all().await;
            if all.is_empty() {
                println!("no short urls");
            }
            for snapshot in all {
                println!(
                    "{} -> {} ({} clicks{})",
                    snapshot.short_url,
                    snapshot.record.original_url,
                    snapshot.record.click_count,
                    if snapshot.is_expired { ", expired" } else { "" }
                );
            }
        }

        Command::Delete { code } => {
            let code = ShortCode::new(code.clone())?;
            if store.delete(&code).await? {
                println!("deleted {code}");
            } else {
                println!("nothing to delete for {code}");
            }
        }

        Command::Sweep => {
            let removed = store.sweep_expired().await?;
            println!("removed {removed} expired short url(s)");
        }
    }

    Ok(())
}

async fn diag(sink: Option<&LogSink<HttpTransport>>, level: LogLevel, message: String) {
    if let Some(sink) = sink {
        sink.emit(LogStack::Frontend, level, "page", message).await;
    }
}

fn local_offset_minutes() -> i32 {
    Zoned::now().offset().seconds() / 60
}
