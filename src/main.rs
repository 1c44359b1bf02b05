use clap::{Parser, ValueEnum};
use neuq_free_classroom::app::{
    login_or_fail, parse_periods, print_free_classrooms, print_report, query_periods, ErrorPolicy,
};
use neuq_free_classroom::client::request::create_client;
use neuq_free_classroom::config::{
    ClientConfig, Credentials, RenderConfig, DEFAULT_BASE_URL, DEFAULT_CREDENTIALS_PATH,
    DEFAULT_OUTPUT_DIR,
};
use neuq_free_classroom::error::Result;
use neuq_free_classroom::export::{Exporter, OutputFormat};
use neuq_free_classroom::model::dtos::FreeClassroomQuery;
use neuq_free_classroom::model::structs::{Building, Campus};
use neuq_free_classroom::render::Renderer;
use neuq_free_classroom::{date, logging};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum PolicyArg {
    Abort,
    #[default]
    Skip,
    Retry,
}

#[derive(Parser, Debug)]
#[command(name = "free-classroom", version, about = "查询 NEUQ 教务系统空教室")]
struct Cli {
    /// 学号
    #[arg(short, long)]
    username: Option<String>,

    /// 密码
    #[arg(short, long)]
    password: Option<String>,

    /// JSON file with `username` and `password`, used when the flags are absent
    #[arg(long, default_value = DEFAULT_CREDENTIALS_PATH)]
    credentials: PathBuf,

    /// Building file code (gxg, jcl, ...), numeric id, or label
    #[arg(long, default_value = "gxg")]
    building: Building,

    #[arg(long, default_value = "1")]
    campus: Campus,

    /// yyyy-mm-dd, defaults to today in Asia/Shanghai
    #[arg(long)]
    date: Option<String>,

    /// Periods to query, e.g. `1-12` or `1-4,9`
    #[arg(long, default_value = "1-12")]
    periods: String,

    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Font for image output (a CJK font such as Noto Sans CJK); overrides NEUQ_FONT
    #[arg(long)]
    font: Option<PathBuf>,

    /// What to do when one period fails
    #[arg(long, value_enum, default_value_t)]
    error_policy: PolicyArg,

    /// Extra attempts per period with `--error-policy retry`
    #[arg(long, default_value_t = 2)]
    retries: u32,

    #[arg(long, default_value_t = 500)]
    page_size: u32,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Pause before login and each query
    #[arg(long, default_value_t = 3000)]
    delay_ms: u64,

    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl Cli {
    fn policy(&self) -> ErrorPolicy {
        match self.error_policy {
            PolicyArg::Abort => ErrorPolicy::Abort,
            PolicyArg::Skip => ErrorPolicy::Skip,
            PolicyArg::Retry => ErrorPolicy::Retry(self.retries),
        }
    }

    /// Font lookup only happens when images are requested.
    fn renderer(&self) -> Result<Renderer> {
        let config = RenderConfig {
            font_path: self.font.clone(),
            ..RenderConfig::default()
        };
        if self.format.image() {
            Renderer::new(config)
        } else {
            Ok(Renderer::with_font(config, None))
        }
    }

    fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::default()
            .with_base_url(self.base_url.as_str())
            .with_request_delay(Duration::from_millis(self.delay_ms));
        match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let creds = Credentials::resolve(cli.username.clone(), cli.password.clone(), &cli.credentials)?;
    let date = match &cli.date {
        Some(d) => date::parse_date(d)?,
        None => date::today(),
    };
    let periods = parse_periods(&cli.periods)?;
    let renderer = cli.renderer()?;

    let client = create_client(cli.client_config())?;
    login_or_fail(&client, &creds.username, &creds.password).await?;
    println!("login succeed");

    let base = FreeClassroomQuery::single_period(cli.campus, cli.building, &date, periods[0])
        .with_page_size(cli.page_size);
    let exporter = Exporter::new(&cli.output_dir, cli.format, renderer);
    let building = cli.building;

    let report = query_periods(&client, &base, &periods, cli.policy(), |period, names| {
        print_free_classrooms(building.label(), &date, period, names);
        for path in exporter.export(building, &date, period, names)? {
            println!("path: {}", path.display());
        }
        Ok(())
    })
    .await?;

    print_report(&report);
    Ok(report.is_complete())
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init("info");
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
