//! services/app/src/bin/app.rs
//!
//! The interactive shell standing in for the browser UI: it validates user
//! input, dispatches intents to the store and reads derived state back.

use app_lib::{
    adapters::{FileCredentialStore, FileSnapshotStore, HttpAuthAdapter, MockAnalysisAdapter},
    config::Config,
    error::AppError,
};
use lawlens_core::domain::{Gender, NotificationKind, UserContext};
use lawlens_core::store::Store;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting LawLens client...");

    // --- 2. Initialize Service Adapters ---
    let http_client = reqwest::Client::new();
    let auth_adapter = Arc::new(HttpAuthAdapter::new(http_client, config.api_base_url.clone()));
    let analysis_adapter = Arc::new(MockAnalysisAdapter::new());
    let snapshot_store = Arc::new(FileSnapshotStore::new(config.snapshot_path.clone()));
    let credential_store = Arc::new(FileCredentialStore::new(config.token_path.clone()));

    // --- 3. Open the Store (rehydration happens here, before any read) ---
    let store = Arc::new(Store::open(
        auth_adapter,
        analysis_adapter,
        snapshot_store,
        credential_store,
    ));
    if store.auth().is_authenticated {
        if let Some(session) = store.auth().session {
            info!("Welcome back, {}.", session.name);
        }
    }

    // --- 4. Run the Command Loop ---
    run_shell(store).await?;
    Ok(())
}

const HELP: &str = "\
Commands:
  login <email> <password>
  signup <name> <email> <password> <male|female>
  logout
  context <age> <location> <purpose>
  upload <path>
  analyze
  docs
  dashboard
  status
  notices
  dismiss <id>
  help
  quit";

async fn run_shell(store: Arc<Store>) -> Result<(), AppError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    println!("LawLens document analysis client. Type 'help' for commands.");
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let args: Vec<&str> = line.split_whitespace().collect();

        match args.as_slice() {
            [] => {}
            ["help"] => println!("{HELP}"),
            ["quit"] | ["exit"] => break,

            ["login", email, password] => {
                if email.is_empty() || password.is_empty() {
                    println!("Email and password are required.");
                    continue;
                }
                match store.login(email, password).await {
                    Ok(()) => {
                        let name = store
                            .auth()
                            .session
                            .map(|s| s.name)
                            .unwrap_or_default();
                        store.push_notification(
                            NotificationKind::Success,
                            format!("Welcome back, {name}!"),
                        );
                        println!("Logged in as {name}.");
                    }
                    Err(e) => println!("Login failed: {}", e.message()),
                }
            }

            ["signup", name, email, password, gender] => {
                let gender = match *gender {
                    "male" => Gender::Male,
                    "female" => Gender::Female,
                    other => {
                        println!("Unknown gender '{other}' (expected male or female).");
                        continue;
                    }
                };
                match store.signup(name, email, password, gender).await {
                    Ok(()) => {
                        store.push_notification(
                            NotificationKind::Success,
                            "Account created successfully",
                        );
                        println!("Signed up as {name}.");
                    }
                    Err(e) => println!("Signup failed: {}", e.message()),
                }
            }

            ["logout"] => {
                store.logout();
                println!("Logged out.");
            }

            ["context", age, location, purpose] => {
                let Ok(age) = age.parse::<u32>() else {
                    println!("Age must be a number.");
                    continue;
                };
                if age == 0 {
                    println!("Age must be positive.");
                    continue;
                }
                store.set_user_context(UserContext {
                    age,
                    location: (*location).to_string(),
                    purpose: (*purpose).to_string(),
                });
                println!("Context saved.");
            }

            ["upload", path] => {
                let Some(context) = store.document().user_context else {
                    println!("Set a context first: context <age> <location> <purpose>");
                    continue;
                };
                let payload = match tokio::fs::read(path).await {
                    Ok(payload) => payload,
                    Err(e) => {
                        println!("Cannot read {path}: {e}");
                        continue;
                    }
                };
                let name = Path::new(path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| (*path).to_string());
                let mime_type = guess_mime_type(path);

                match store.upload_document(&payload, &name, mime_type, &context).await {
                    Ok(()) => {
                        store.push_notification(
                            NotificationKind::Success,
                            format!("{name} uploaded successfully"),
                        );
                        println!("Uploaded {name}. Run 'analyze' to analyze it.");
                    }
                    Err(e) => {
                        store.push_notification(NotificationKind::Error, e.message());
                        println!("Upload failed: {}", e.message());
                    }
                }
            }

            ["analyze"] => {
                let Some(current) = store.document().current_document else {
                    println!("No current document. Upload one first.");
                    continue;
                };
                if current.analysis_result.is_some() {
                    println!("{} is already analyzed.", current.name);
                    continue;
                }
                println!("Analyzing {}...", current.name);
                match store.analyze_document(&current.id).await {
                    Ok(()) => {
                        if let Some(result) = store
                            .document()
                            .current_document
                            .and_then(|d| d.analysis_result)
                        {
                            store.push_notification(
                                NotificationKind::Success,
                                "Analysis complete",
                            );
                            println!("Risk score: {}/100", result.risk_score);
                            println!("Summary: {}", result.summary);
                            for flag in &result.red_flags {
                                println!("  [{:?}] {} - {}", flag.severity, flag.title, flag.description);
                            }
                        }
                    }
                    Err(e) => {
                        store.push_notification(NotificationKind::Error, e.message());
                        println!("Analysis failed: {}", e.message());
                    }
                }
            }

            ["docs"] => {
                let document = store.document();
                if document.documents.is_empty() {
                    println!("No documents yet.");
                }
                for doc in store.recent_documents(document.documents.len()) {
                    let marker = document
                        .current_document
                        .as_ref()
                        .filter(|c| c.id == doc.id)
                        .map(|_| "*")
                        .unwrap_or(" ");
                    let status = match &doc.analysis_result {
                        Some(result) => format!("risk {}/100", result.risk_score),
                        None => "not analyzed".to_string(),
                    };
                    println!("{marker} {} ({}, {status})", doc.name, doc.uploaded_at.date_naive());
                }
            }

            ["dashboard"] => {
                println!("Average risk score: {:.1}", store.average_risk_score());
                println!("Risk trend:         {:+}%", store.risk_trend_percent());
                println!("Total red flags:    {}", store.total_red_flags());
                for doc in store.recent_documents(3) {
                    println!("Recent: {}", doc.name);
                }
            }

            ["status"] => {
                let auth = store.auth();
                match auth.session {
                    Some(session) => println!("Authenticated as {} <{}>", session.name, session.email),
                    None => println!("Anonymous."),
                }
                if let Some(error) = auth.error {
                    println!("Last auth error: {error}");
                }
            }

            ["notices"] => {
                let ui = store.ui();
                if ui.notifications.is_empty() {
                    println!("No notifications.");
                }
                for n in &ui.notifications {
                    println!("[{:?}] {} ({})", n.kind, n.message, n.id);
                }
            }

            ["dismiss", id] => store.dismiss_notification(id),

            _ => println!("Unrecognized command. Type 'help' for commands."),
        }
    }

    info!("Shutting down.");
    Ok(())
}

/// Best-effort mime type from the file extension; the backend only needs a
/// label to display.
fn guess_mime_type(path: &str) -> &'static str {
    match Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
