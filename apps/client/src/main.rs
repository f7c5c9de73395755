//! Smoke driver: browse the job board against a running API server.
//!
//! Usage:
//!   CAREER_CAVE_URL=http://localhost:4000 CAREER_CAVE_TOKEN=<session> career-cave-client

use anyhow::Result;
use career_cave_client::ApiClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let base_url =
        std::env::var("CAREER_CAVE_URL").unwrap_or_else(|_| "http://localhost:4000".to_string());
    let mut client = ApiClient::new(&base_url);
    if let Ok(token) = std::env::var("CAREER_CAVE_TOKEN") {
        client = client.with_token(token);
    }

    let health = client.health().await?;
    println!("server: {health}");

    let jobs = client.get_all_jobs().await?;
    println!("{} open jobs", jobs.len());
    for job in jobs.iter().take(10) {
        let salary = match (job.fixed_salary, job.salary_from, job.salary_to) {
            (Some(fixed), _, _) => format!("{fixed}"),
            (None, Some(from), Some(to)) => format!("{from} - {to}"),
            _ => "unspecified".to_string(),
        };
        println!("  {} — {} ({}) [{}]", job.title, job.category, job.location, salary);
    }

    if let Some(first) = jobs.first() {
        let detail = client.get_job(first.id).await?;
        println!("\nfirst job detail:\n  {}\n  {}", detail.title, detail.description);
    }

    Ok(())
}
