use crate::{
    crypto,
    error::{ErrorKind, Result},
    interface::RequestApi,
    model::dtos::{FreeClassroomQuery, LoginParams, FIRST_PERIOD, LAST_PERIOD},
    parser,
};
use std::time::Duration;

/// Per-item failure handling for multi-period runs, chosen once by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first failing period and return its error
    Abort,
    /// Log the failure and move on to the next period
    #[default]
    Skip,
    /// Retry a failing period up to n more times, then skip it
    Retry(u32),
}

/// Outcome of [`query_periods`].
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<u8>,
    pub failed: Vec<(u8, String)>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

async fn avoid_too_fast_warning(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    tracing::info!("wait for {}ms to avoid warning for too fast clicking", delay.as_millis());
    tokio::time::sleep(delay).await;
}

/// Challenge-response login.
///
/// Returns `Ok(false)` when the portal did not land on its home page. A login
/// page without a salt fails with [`ErrorKind::SaltNotFound`] before any
/// credentials are sent. Transport errors are returned unchanged.
pub async fn login<C: RequestApi>(client: &C, username: &str, password: &str) -> Result<bool> {
    let page = client.get_login_page().await?;
    let salt = crypto::extract_salt(&page)?;
    tracing::debug!(%salt, "salt extracted from login page");

    avoid_too_fast_warning(client.request_delay()).await;

    let params = LoginParams {
        username: username.to_string(),
        hashed_password: crypto::hash_password(&salt, password),
    };
    let final_url = client.send_login_request(params).await?;

    let ok = parser::is_login_success(&final_url);
    if ok {
        tracing::info!(username, "login succeeded");
    } else {
        tracing::warn!(username, %final_url, "login did not reach the home page");
    }
    Ok(ok)
}

/// Like [`login`], but a rejected login becomes [`ErrorKind::LoginError`].
pub async fn login_or_fail<C: RequestApi>(client: &C, username: &str, password: &str) -> Result<()> {
    if login(client, username, password).await? {
        Ok(())
    } else {
        Err(ErrorKind::LoginError(username.to_string()).into())
    }
}

/// Runs one search and returns the free classroom names in server order.
///
/// Must be called on a client that has logged in. An unexpected page (no
/// results table) yields an empty list.
pub async fn get_free_classroom<C: RequestApi>(
    client: &C,
    query: &FreeClassroomQuery,
) -> Result<Vec<String>> {
    query.validate()?;

    avoid_too_fast_warning(client.request_delay()).await;

    let html = client.search_free_classroom(query).await?;
    let names = parser::parse_free_classroom_table(&html);
    tracing::debug!(count = names.len(), "parsed free classroom table");
    Ok(names)
}

/// Queries each period in turn (same building and date as `base`) and hands
/// every result to `on_result`. A failing query or sink is handled per `policy`.
pub async fn query_periods<C, F>(
    client: &C,
    base: &FreeClassroomQuery,
    periods: &[u8],
    policy: ErrorPolicy,
    mut on_result: F,
) -> Result<BatchReport>
where
    C: RequestApi,
    F: FnMut(u8, &[String]) -> Result<()>,
{
    let mut report = BatchReport::default();
    let max_attempts = match policy {
        ErrorPolicy::Retry(n) => n.saturating_add(1),
        ErrorPolicy::Abort | ErrorPolicy::Skip => 1,
    };

    for &period in periods {
        let mut query = base.clone();
        query.time_begin = period;
        query.time_end = period;

        // only the portal query is retried; a failing sink is final
        let mut attempt = 0;
        let fetched = loop {
            attempt += 1;
            tracing::info!(
                date = %query.cycle_time.date_begin,
                period,
                attempt,
                "requesting free classroom"
            );
            match get_free_classroom(client, &query).await {
                Ok(names) => break Ok(names),
                Err(e) if matches!(e.kind(), ErrorKind::ValidationError(_)) => break Err(e),
                Err(e) if attempt < max_attempts => {
                    tracing::warn!(period, attempt, error = %e, "period failed, retrying");
                }
                Err(e) => break Err(e),
            }
        };
        let outcome = fetched.and_then(|names| on_result(period, &names));

        match outcome {
            Ok(()) => report.succeeded.push(period),
            Err(e) if policy == ErrorPolicy::Abort => return Err(e),
            Err(e) => {
                tracing::error!(period, error = %e, "period failed, skipping");
                report.failed.push((period, e.to_string()));
            }
        }
    }

    Ok(report)
}

/// Parses a period list such as `1-12`, `3`, or `1-4,9,11`. Order is kept,
/// duplicates are removed.
pub fn parse_periods(input: &str) -> Result<Vec<u8>> {
    let invalid = |part: &str| ErrorKind::ValidationError(format!("invalid period input {part:?}"));
    let mut periods = Vec::new();

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (begin, end) = match part.split_once('-') {
            Some((b, e)) => (b.trim(), e.trim()),
            None => (part, part),
        };
        let begin: u8 = begin.parse().map_err(|_| invalid(part))?;
        let end: u8 = end.parse().map_err(|_| invalid(part))?;
        if begin < FIRST_PERIOD || end > LAST_PERIOD || begin > end {
            return Err(invalid(part).into());
        }
        for p in begin..=end {
            if !periods.contains(&p) {
                periods.push(p);
            }
        }
    }

    if periods.is_empty() {
        return Err(invalid(input).into());
    }
    Ok(periods)
}

pub fn print_free_classrooms(building: &str, date: &str, period: u8, names: &[String]) {
    println!("================{} {} 第{}节================", building, date, period);
    if names.is_empty() {
        println!("暂无空教室");
    }
    for row in names.chunks(6) {
        let line: Vec<String> = row.iter().map(|n| format!("{n:<10}")).collect();
        println!("{}", line.join(""));
    }
    println!("共找到 {} 间空教室", names.len());
}

pub fn print_report(report: &BatchReport) {
    println!("============================================");
    println!("成功: {:?}", report.succeeded);
    for (period, err) in &report.failed {
        println!("第{}节失败: {}", period, err);
    }
    println!("============================================");
}
