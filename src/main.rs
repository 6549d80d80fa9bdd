//! 客户端命令行入口
//!
//! 把一段文本发给翻译服务并打印结果，每次尝试（无论成败）
//! 都会写入本地历史。`--history` 打印当前历史后退出。

use langos::client::{ClientConfig, FileStorage, HistoryLog, HistoryStatus, TranslationClient};
use langos::env::{client as client_env, EnvVar};
use langos::locales::{Locale, DEFAULT_LOCALE};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    let mut target = Locale::Es;
    let mut source = DEFAULT_LOCALE;
    let mut config = ClientConfig::from_env();
    let mut show_history = false;
    let mut text_parts: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--to" | "-t" => {
                target = parse_locale_arg(&args, i, "--to");
                i += 2;
            }
            "--from" | "-f" => {
                source = parse_locale_arg(&args, i, "--from");
                i += 2;
            }
            "--endpoint" => {
                if i + 1 < args.len() {
                    config.endpoint = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("Error: --endpoint requires a URL");
                    std::process::exit(1);
                }
            }
            "--history" => {
                show_history = true;
                i += 1;
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            other if other.starts_with('-') => {
                eprintln!("Error: Unknown argument: {}", other);
                print_help();
                std::process::exit(1);
            }
            _ => {
                text_parts.push(args[i].clone());
                i += 1;
            }
        }
    }

    let history_dir =
        client_env::HistoryDir::get().unwrap_or_else(|_| ".langos".to_string());
    let log = HistoryLog::new(FileStorage::new(history_dir));

    if show_history {
        print_history(&log);
        return;
    }

    let text = text_parts.join(" ");
    if text.trim().is_empty() {
        eprintln!("Error: Source text is required.");
        print_help();
        std::process::exit(1);
    }

    let client = match TranslationClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match client.translate_logged(&log, &text, target, source).await {
        Ok(translated) => println!("{}", translated),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn parse_locale_arg(args: &[String], i: usize, flag: &str) -> Locale {
    if i + 1 >= args.len() {
        eprintln!("Error: {} requires a locale code", flag);
        std::process::exit(1);
    }
    match Locale::from_code(&args[i + 1]) {
        Some(locale) => locale,
        None => {
            eprintln!(
                "Error: Unsupported locale '{}'. Supported: en, es, de, ar",
                args[i + 1]
            );
            std::process::exit(1);
        }
    }
}

fn print_history(log: &HistoryLog<FileStorage>) {
    let items = log.load();
    if items.is_empty() {
        println!("No translation history.");
        return;
    }

    for item in items {
        let marker = match item.status {
            HistoryStatus::Success => "ok",
            HistoryStatus::Error => "error",
        };
        println!(
            "[{}] {} ({}) {} -> {}",
            marker, item.created_at, item.locale, item.input, item.output
        );
    }
}

fn print_help() {
    println!("Langos Translation Client");
    println!();
    println!("USAGE:");
    println!("    langos [OPTIONS] <TEXT>...");
    println!();
    println!("OPTIONS:");
    println!("    -t, --to <LOCALE>        Target locale [default: es]");
    println!("    -f, --from <LOCALE>      Source locale [default: en]");
    println!("        --endpoint <URL>     Translation endpoint override");
    println!("        --history            Print the stored translation history");
    println!("    -h, --help               Print help information");
    println!();
    println!("EXAMPLES:");
    println!("    langos --to es \"Ship this release after QA sign-off.\"");
    println!("    langos --history");
}
