#![forbid(unsafe_code)]

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use stepcheck_core::{CheckConfig, HostConfig, RegistryConfig};
use stepcheck_hosting::{DiscourseClient, DiscourseConfig, GithubHost, GithubHostConfig};
use stepcheck_server::{
    build_router, AppState, BadgeAssets, BadgeFileNames, GithubAnnotator, NoopPublisher,
    TopicPublisher,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_u64(name, default_ms))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("STEPCHECK_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn forum_publisher(timeout: Duration) -> Result<Arc<dyn TopicPublisher>, String> {
    let base_url = env::var("DISCOURSE_URL").unwrap_or_default();
    if base_url.trim().is_empty() {
        info!("DISCOURSE_URL not set, release announcements disabled");
        return Ok(Arc::new(NoopPublisher));
    }
    let api_key =
        env::var("DISCOURSE_API_KEY").map_err(|_| "DISCOURSE_API_KEY is not set".to_string())?;
    let api_username = env::var("DISCOURSE_API_USERNAME")
        .map_err(|_| "DISCOURSE_API_USERNAME is not set".to_string())?;
    let category =
        env::var("DISCOURSE_CATEGORY").map_err(|_| "DISCOURSE_CATEGORY is not set".to_string())?;
    let client = DiscourseClient::new(DiscourseConfig {
        base_url,
        api_key,
        api_username,
        category,
        timeout,
    })
    .map_err(|e| format!("discourse client: {e}"))?;
    Ok(Arc::new(client))
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env_str("STEPCHECK_BIND", "0.0.0.0:8000");
    let timeout = env_duration_ms("STEPCHECK_HTTP_TIMEOUT_MS", 10_000);

    let check = CheckConfig {
        registry: RegistryConfig {
            steps_root: env_str("STEPCHECK_STEPS_ROOT", "steps/"),
            step_file_name: env_str("STEPCHECK_STEP_FILE", "step.yml"),
        },
        host: HostConfig {
            web_base_url: env_str("STEPCHECK_WEB_BASE_URL", "https://github.com/"),
            api_base_url: env_str("STEPCHECK_API_BASE_URL", "https://api.github.com/repos/"),
        },
    };

    let github = Arc::new(
        GithubHost::new(GithubHostConfig {
            api_base_url: check.host.api_base_url.clone(),
            repo_slug: env_str("STEPCHECK_REGISTRY_REPO", "bitrise-io/bitrise-steplib"),
            token: env::var("GITHUB_ACCESS_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            timeout,
        })
        .map_err(|e| format!("github client: {e}"))?,
    );

    let badges = match env::var("STEPCHECK_ASSET_DIR") {
        Ok(dir) if !dir.trim().is_empty() => {
            BadgeAssets::load_dir(&PathBuf::from(dir), &BadgeFileNames::default())
                .map_err(|e| format!("badge assets: {e}"))?
        }
        _ => BadgeAssets::embedded(),
    };

    let annotator = Arc::new(GithubAnnotator::new(github.clone(), check.host.clone()));
    let publisher = forum_publisher(timeout)?;
    let badge_base_url = env_str(
        "STEPCHECK_BADGE_BASE_URL",
        "https://bitrise-steplib-git-check.herokuapp.com",
    );

    let state = AppState::new(
        github,
        check,
        badges,
        annotator,
        publisher,
        &badge_base_url,
    );
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind {bind_addr}: {e}"))?;
    info!("stepcheck-server listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}
