use alcina_profile::config::GEOCODING_URL;
use alcina_profile::core::session::parse_command;
use alcina_profile::domain::model::verify_wire_names;
use alcina_profile::utils::{logger, validation::Validate};
use alcina_profile::{
    AutocompleteController, CliConfig, FileDraftStore, FormController, FormEvent, FormSession,
    HttpProfileGateway, NominatimClient, PageContext, TerminalSurface,
};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting alcina-profile form client");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }
    verify_wire_names()?;

    let page = PageContext::parse(&config.page_url)?;
    let api_base = page.resolve_api_base(config.production);
    tracing::info!("Using API base URL: {}", api_base);

    let gateway = HttpProfileGateway::new(api_base);
    let store = FileDraftStore::new(&config.storage_path);
    let search = NominatimClient::new(GEOCODING_URL)?;

    let session = FormSession::new(
        FormController::new(gateway, store),
        AutocompleteController::new(search),
        TerminalSurface,
    );

    let (tx, rx) = mpsc::channel(32);
    tokio::spawn(read_commands(tx));

    session.run(&page, rx).await;

    tracing::info!("Session ended");
    Ok(())
}

/// Reads line commands from stdin and feeds them to the session until EOF
/// or `quit`.
async fn read_commands(tx: mpsc::Sender<FormEvent>) {
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        if line == "help" {
            print_help();
            continue;
        }
        match parse_command(line) {
            Some(event) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            None => eprintln!("Unrecognized command: {} (try 'help')", line),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  name <value>      set your name");
    println!("  dob <YYYY-MM-DD>  set your date of birth");
    println!("  time <HH:MM>      set your birth time");
    println!("  unknown on|off    toggle 'I don't know my birth time'");
    println!("  place <text>      type into the birth-place search box");
    println!("  focus | blur      enter/leave the birth-place box");
    println!("  pick <n>          choose the n-th location suggestion");
    println!("  dismiss           close the suggestion list");
    println!("  sun <sign>        set your sun sign");
    println!("  asc <sign>        set your ascendant sign (or 'unknown')");
    println!("  submit            create the profile");
    println!("  quit              leave without submitting");
}
