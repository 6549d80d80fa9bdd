//! Web 服务器主程序入口

use langos::translation::TranslationConfig;
use langos::web::{WebConfig, WebServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载 .env，然后按环境变量初始化日志
    dotenv::dotenv().ok();
    init_tracing();

    // 解析命令行参数
    let args: Vec<String> = std::env::args().collect();

    let mut web_config = WebConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    web_config.bind_addr = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("Error: --bind requires an address");
                    std::process::exit(1);
                }
            }
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    web_config.port = args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("Error: Invalid port number");
                        std::process::exit(1);
                    });
                    i += 2;
                } else {
                    eprintln!("Error: --port requires a port number");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Error: Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = web_config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // 翻译配置：默认值 → langos.toml → 环境变量
    let translation_config = TranslationConfig::load();

    let server = WebServer::new(web_config, translation_config)?;
    server.start().await?;

    Ok(())
}

fn init_tracing() {
    use langos::env::{core, EnvVar};

    let level = match core::LogLevel::get().as_deref() {
        Ok("trace") => tracing::Level::TRACE,
        Ok("debug") => tracing::Level::DEBUG,
        Ok("warn") => tracing::Level::WARN,
        Ok("error") => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };
    tracing_subscriber::fmt().with_max_level(level).init();
}

fn print_help() {
    println!("Langos Web Server");
    println!();
    println!("USAGE:");
    println!("    langos-web [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -b, --bind <ADDRESS>     Bind address [default: 127.0.0.1]");
    println!("    -p, --port <PORT>        Port number [default: 7080]");
    println!("    -h, --help               Print help information");
    println!();
    println!("ENVIRONMENT:");
    println!("    LINGO_API_KEY            Credential for the translation engine");
    println!("    LANGOS_WEB_BIND_ADDRESS  Bind address override");
    println!("    LANGOS_WEB_PORT          Port override");
    println!();
    println!("EXAMPLES:");
    println!("    langos-web");
    println!("    langos-web --bind 0.0.0.0 --port 3000");
}
