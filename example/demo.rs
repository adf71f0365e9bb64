use std::sync::Arc;
use std::time::Duration;

use ttl_map::{NEVER, TtlMap, TtlMapError};

const SESSION_TTL_MS: u64 = 200;
const WORKERS: u32 = 4;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let sessions: Arc<TtlMap<String, String>> = Arc::new(TtlMap::new());

    println!("Inserting a permanent entry and a short-lived session...");
    sessions.insert("admin".to_string(), "root".to_string(), NEVER)?;
    sessions.insert(
        "guest".to_string(),
        "visitor".to_string(),
        Duration::from_millis(SESSION_TTL_MS),
    )?;

    println!("admin -> {}", sessions.get(&"admin".to_string())?);
    println!("guest -> {}", sessions.get(&"guest".to_string())?);

    match sessions.insert("admin".to_string(), "intruder".to_string(), NEVER) {
        Err(TtlMapError::KeyAlreadyExists) => println!("Second insert for admin rejected"),
        other => println!("Unexpected result: {:?}", other),
    }

    tokio::time::sleep(Duration::from_millis(SESSION_TTL_MS * 2)).await;

    let guest = "guest".to_string();
    println!("guest after ttl: {:?}", sessions.get(&guest));
    println!("guest still stored: {}", sessions.has(&guest));

    sessions.update(guest.clone(), "visitor-renewed".to_string(), Duration::from_secs(60))?;
    println!("guest after update: {}", sessions.get(&guest)?);
    println!("guest ttl: {:?}", sessions.time_to_live(&guest)?);

    println!("Inserting from {} tasks concurrently:", WORKERS);
    let mut handles = Vec::new();
    for i in 0..WORKERS {
        let sessions = sessions.clone();
        handles.push(tokio::spawn(async move {
            sessions.insert(format!("worker-{}", i), format!("task {}", i), NEVER)
        }));
    }
    for handle in handles {
        handle.await??;
    }
    for i in 0..WORKERS {
        let key = format!("worker-{}", i);
        println!("{} -> {}", key, sessions.get(&key)?);
    }

    sessions.remove(&guest)?;
    println!("guest after removal: {:?}", sessions.get(&guest));

    Ok(())
}
