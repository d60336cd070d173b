/*
[INPUT]:  Base URL and owner id from the command line
[OUTPUT]: Tasks owned by that user printed to stdout
[POS]:    Examples - listing the todo collection
[UPDATE]: When collection endpoints change
*/

use taskdeck_adapter::*;

/// Example: list tasks for an owner
///
/// Usage: cargo run --example list_tasks -- http://127.0.0.1:3000 3344
#[tokio::main]
async fn main() {
    println!("=== Todo Collection Example ===\n");

    let mut args = std::env::args().skip(1);
    let base_url = args.next().unwrap_or_else(|| "http://127.0.0.1:3000/".to_string());
    let user_id: u64 = match args.next().map(|raw| raw.parse()) {
        Some(Ok(id)) => id,
        Some(Err(e)) => {
            eprintln!("Invalid user id: {}", e);
            return;
        }
        None => 1,
    };

    let client = match TodoClient::with_config_and_base_url(ClientConfig::default(), &base_url) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created for {}\n", client.base_url());

    println!("Listing tasks for user {}...", user_id);
    match client.list_tasks(user_id).await {
        Ok(tasks) => {
            for task in &tasks {
                let mark = if task.completed { "x" } else { " " };
                println!("  [{}] #{} {}", mark, task.id, task.title);
            }
            println!("\n✓ {} task(s)", tasks.len());
        }
        Err(e) => println!("✗ Error: {}", e),
    }
}
