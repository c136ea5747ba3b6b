use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use partograf_api::{
    refresh, summarize_history_str, ClientConfig, HttpClient, NoticeLevel, StaticToken,
};
use partograf_core::{DashboardSnapshot, PartografConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "partograf-cli",
    about = "Ringkasan dashboard partograf Ruang Bunda."
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Terima DJJ/pembukaan bernilai 0 sebagai terisi.
    #[arg(long, global = true)]
    accept_zero_vitals: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ringkas file JSON riwayat partograf.
    Summarize {
        /// Lokasi file JSON riwayat (array atau envelope `data`).
        #[arg(short, long)]
        input: PathBuf,
        /// Cetak snapshot lengkap sebagai JSON.
        #[arg(long)]
        json: bool,
    },
    /// Muat dashboard langsung dari API pasien.
    Dashboard {
        /// Token login (JWT).
        #[arg(long, env = "PARTOGRAF_TOKEN", hide_env_values = true)]
        token: String,
        /// Alamat dasar API.
        #[arg(long, env = "PARTOGRAF_API_BASE_URL")]
        base_url: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = PartografConfig {
        accept_zero_vitals: args.accept_zero_vitals,
        ..PartografConfig::default()
    };

    match args.command {
        Command::Summarize { input, json } => {
            let data = std::fs::read_to_string(&input)
                .with_context(|| format!("File {input:?} tidak dapat dibaca"))?;
            let snapshot = summarize_history_str(&data, &config)?;
            print_snapshot(&snapshot, json)?;
        }
        Command::Dashboard {
            token,
            base_url,
            json,
        } => {
            let mut client_config = ClientConfig::from_env();
            if let Some(base_url) = base_url.filter(|url| !url.trim().is_empty()) {
                client_config = client_config.with_base_url(base_url);
            }
            info!(base_url = %client_config.base_url, "Loading dashboard");

            let client = HttpClient::new(client_config).context("HTTP client gagal dibuat")?;
            let result = refresh(&client, &StaticToken::new(token), &config)
                .await
                .context("Dashboard gagal dimuat")?;

            for notice in &result.notices {
                let prefix = match notice.level {
                    NoticeLevel::Info => "Info",
                    NoticeLevel::Error => "Error",
                };
                eprintln!("[{prefix}] {}", notice.message);
            }
            print_snapshot(&result.snapshot, json)?;
        }
    }

    Ok(())
}

fn print_snapshot(snapshot: &DashboardSnapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }

    if let Some(pasien) = &snapshot.pasien_name {
        println!("Pasien: {pasien}");
    }
    if let Some(bidan) = &snapshot.bidan_name {
        println!("Bidan: {bidan}");
    }
    println!(
        "Generated at: {}\nTerakhir dicatat: {} ({})\nPembukaan: {} cm, {}\nDJJ: {} bpm, {}\nTensi: {}\nNadi: {}\nSuhu: {}\nKondisi ibu: {}",
        snapshot.generated_at,
        snapshot.waktu_catat,
        snapshot.jam_catat,
        snapshot.pembukaan_cm,
        snapshot.fase(),
        snapshot.djj_bpm,
        snapshot.djj_status.text,
        snapshot.vitals.tensi_text(),
        snapshot.vitals.nadi_text(),
        snapshot.vitals.suhu_text(),
        snapshot.ibu_status.status,
    );
    if snapshot.ibu_status.is_complete() {
        for issue in &snapshot.ibu_status.issues {
            println!("  - {issue}");
        }
    } else {
        println!("  {}", snapshot.ibu_status.message);
    }

    Ok(())
}
